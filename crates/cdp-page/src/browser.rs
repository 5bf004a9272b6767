use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use page_port::PageError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::page::CdpPage;

/// Owns the browser connection and the event-handler loop behind it.
///
/// Either launches a local Chromium or attaches to a running one over its
/// DevTools websocket; attaching is the extension-like mode where the
/// operator's own logged-in browser does the rendering.
pub struct CdpBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl CdpBrowser {
    pub async fn launch(headless: bool) -> Result<Self, PageError> {
        let mut builder = BrowserConfig::builder();
        if !headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(PageError::Unavailable)?;
        let (browser, handler) = Browser::launch(config)
            .await
            .map_err(|err| PageError::Unavailable(err.to_string()))?;
        info!(headless, "launched browser");
        Ok(Self {
            browser,
            handler_task: spawn_handler(handler),
        })
    }

    pub async fn connect(ws_url: &str) -> Result<Self, PageError> {
        let (browser, handler) = Browser::connect(ws_url)
            .await
            .map_err(|err| PageError::Unavailable(err.to_string()))?;
        info!(ws_url, "attached to running browser");
        Ok(Self {
            browser,
            handler_task: spawn_handler(handler),
        })
    }

    /// Open a tab on `url` and wait for the initial navigation to land.
    pub async fn open(&self, url: &str) -> Result<CdpPage, PageError> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|err| PageError::Unavailable(err.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|err| PageError::Unavailable(err.to_string()))?;
        debug!(url, "page ready");
        Ok(CdpPage::new(page))
    }

    pub async fn close(mut self) {
        if let Err(err) = self.browser.close().await {
            warn!(error = %err, "browser close failed");
        }
        self.handler_task.abort();
    }
}

fn spawn_handler(
    mut handler: chromiumoxide::Handler,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(err) = event {
                debug!(error = %err, "browser event error");
            }
        }
    })
}
