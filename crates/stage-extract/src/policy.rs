use page_port::Locator;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractPolicyView {
    /// Structural container repeated once per comment.
    pub entry: Locator,
    /// Author anchor within an entry; either signature may appear.
    pub author_anchor: Locator,
    /// Fallback author-name label, for markup variants without per-entry
    /// containers.
    pub author_label: Locator,
    /// Enclosing-anchor locator used to resolve a label to its profile link.
    pub profile_anchor: Locator,
}

impl Default for ExtractPolicyView {
    fn default() -> Self {
        Self {
            entry: Locator::new("article"),
            author_anchor: Locator::new("a[data-test-app-aware-link], a.app-aware-link"),
            author_label: Locator::new(
                "a.comments-comment-meta__description-title, span.comments-comment-meta__description-title",
            ),
            profile_anchor: Locator::new("a"),
        }
    }
}
