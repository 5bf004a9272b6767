use async_trait::async_trait;
use chromiumoxide::Page;
use page_port::{ElementId, Locator, PageError, PagePort};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::js;

/// A live browser tab seen through the page-accessor port. One pipeline run
/// per page at a time; element handles are only meaningful for the page that
/// produced them and go stale when the underlying node leaves the document.
pub struct CdpPage {
    page: Page,
}

/// Envelope for handle-addressed reads: `stale` marks a handle whose element
/// is gone, `value` carries the answer (itself optional for reads that can
/// legitimately be absent, like attributes).
#[derive(Debug, Deserialize)]
struct Probe<T> {
    stale: bool,
    value: Option<T>,
}

impl CdpPage {
    pub(crate) fn new(page: Page) -> Self {
        Self { page }
    }

    /// Current URL of the underlying tab, for run telemetry.
    pub async fn url(&self) -> Result<Option<String>, PageError> {
        self.page
            .url()
            .await
            .map_err(|err| PageError::Unavailable(err.to_string()))
    }

    async fn eval<T: DeserializeOwned>(&self, expression: String) -> Result<T, PageError> {
        let outcome = self
            .page
            .evaluate(expression)
            .await
            .map_err(|err| PageError::Unavailable(err.to_string()))?;
        outcome
            .into_value::<T>()
            .map_err(|err| PageError::Eval(err.to_string()))
    }

    async fn probe<T: DeserializeOwned>(
        &self,
        el: ElementId,
        expression: String,
    ) -> Result<Option<T>, PageError> {
        let probe: Probe<T> = self.eval(expression).await?;
        if probe.stale {
            return Err(PageError::Stale(el));
        }
        Ok(probe.value)
    }
}

#[async_trait]
impl PagePort for CdpPage {
    async fn query(&self, locator: &Locator) -> Result<Vec<ElementId>, PageError> {
        let handles: Vec<u64> = self.eval(js::query(locator.as_str())).await?;
        debug!(%locator, matches = handles.len(), "query");
        Ok(handles.into_iter().map(ElementId).collect())
    }

    async fn query_within(
        &self,
        root: ElementId,
        locator: &Locator,
    ) -> Result<Vec<ElementId>, PageError> {
        let handles: Vec<u64> = self
            .probe(root, js::query_within(root.0, locator.as_str()))
            .await?
            .unwrap_or_default();
        Ok(handles.into_iter().map(ElementId).collect())
    }

    async fn text(&self, el: ElementId) -> Result<String, PageError> {
        let text: Option<String> = self.probe(el, js::inner_text(el.0)).await?;
        Ok(text.unwrap_or_default())
    }

    async fn attribute(&self, el: ElementId, name: &str) -> Result<Option<String>, PageError> {
        self.probe(el, js::attribute(el.0, name)).await
    }

    async fn closest(
        &self,
        el: ElementId,
        locator: &Locator,
    ) -> Result<Option<ElementId>, PageError> {
        let handle: Option<u64> = self.probe(el, js::closest(el.0, locator.as_str())).await?;
        Ok(handle.map(ElementId))
    }

    async fn is_visible(&self, el: ElementId) -> Result<bool, PageError> {
        let visible: Option<bool> = self.probe(el, js::is_visible(el.0)).await?;
        Ok(visible.unwrap_or(false))
    }

    async fn click(&self, el: ElementId) -> Result<(), PageError> {
        let clicked: bool = self.eval(js::click(el.0)).await?;
        if clicked {
            Ok(())
        } else {
            Err(PageError::Stale(el))
        }
    }

    async fn scroll_to_bottom(&self) -> Result<(), PageError> {
        let _: bool = self.eval(js::scroll_to_bottom()).await?;
        Ok(())
    }

    async fn content_height(&self) -> Result<i64, PageError> {
        self.eval(js::content_height()).await
    }
}
