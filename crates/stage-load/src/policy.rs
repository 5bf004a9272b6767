use std::time::Duration;

use page_port::Locator;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadPolicyView {
    /// Load-more affordance locators, checked in priority order; the first
    /// visible match is clicked, at most once per iteration.
    pub load_more: Vec<Locator>,
    /// Per-iteration settle, letting asynchronous content insertion land
    /// before the height is measured.
    pub settle_ms: u64,
    /// Extra settle right after a load-more click.
    pub click_settle_ms: u64,
    /// Consecutive stagnant iterations after which content is considered
    /// stable.
    pub stagnation_threshold: u32,
    /// Hard bound on iterations, against feeds that never stabilize.
    pub max_iterations: u32,
}

impl Default for LoadPolicyView {
    fn default() -> Self {
        Self {
            load_more: vec![
                Locator::new(".comments-comments-list__load-more-comments-button--cr"),
                Locator::new(".comments-comments-list__load-more-comments-arrows"),
            ],
            settle_ms: 1500,
            click_settle_ms: 500,
            stagnation_threshold: 3,
            max_iterations: 50,
        }
    }
}

impl LoadPolicyView {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn click_settle(&self) -> Duration {
        Duration::from_millis(self.click_settle_ms)
    }
}
