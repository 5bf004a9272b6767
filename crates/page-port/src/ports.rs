use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::PageError;
use crate::locator::Locator;

/// Opaque handle to an element of the live document. Handles are valid for
/// the lifetime of one pipeline run against one page; implementations may
/// report a handle as stale after the underlying node is removed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// The one capability the pipeline stages hold on the document.
///
/// The document itself is owned by the host environment; this port is a
/// borrowed accessor, handed in per run. Stages never reach for ambient
/// globals, so a run can be driven against a live browser page or against
/// the in-memory [`crate::fixture::FixturePage`] interchangeably. At most
/// one pipeline run may use a given accessor at a time.
#[async_trait]
pub trait PagePort: Send + Sync {
    /// All elements matching `locator`, in document order.
    async fn query(&self, locator: &Locator) -> Result<Vec<ElementId>, PageError>;

    /// Matching descendants of `root`, in document order (`root` excluded).
    async fn query_within(
        &self,
        root: ElementId,
        locator: &Locator,
    ) -> Result<Vec<ElementId>, PageError>;

    /// Visible text of the element and its descendants, newline-separated.
    async fn text(&self, el: ElementId) -> Result<String, PageError>;

    async fn attribute(&self, el: ElementId, name: &str) -> Result<Option<String>, PageError>;

    /// Nearest ancestor (the element itself included) matching `locator`.
    async fn closest(
        &self,
        el: ElementId,
        locator: &Locator,
    ) -> Result<Option<ElementId>, PageError>;

    /// Whether the element participates in layout (has a layout parent).
    async fn is_visible(&self, el: ElementId) -> Result<bool, PageError>;

    /// Dispatch a synthetic click on the element.
    async fn click(&self, el: ElementId) -> Result<(), PageError>;

    /// Scroll the viewport to the bottom of the document.
    async fn scroll_to_bottom(&self) -> Result<(), PageError>;

    /// Current content height of the document, in layout units.
    async fn content_height(&self) -> Result<i64, PageError>;
}
