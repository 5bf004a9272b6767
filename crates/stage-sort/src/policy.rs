use std::time::Duration;

use page_port::Locator;
use serde::{Deserialize, Serialize};

/// Structural locators and settle intervals for the sort-switch stage.
///
/// The locators encode the platform's current markup and are expected to
/// drift; they live in policy rather than code so a deployment can override
/// them without a rebuild.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SortPolicyView {
    pub trigger: Locator,
    pub options_inline: Locator,
    /// Menus sometimes render into a detached overlay instead of the inline
    /// container; the most recently appended overlay match is taken.
    pub options_overlay: Locator,
    pub option_candidates: Locator,
    pub menu_settle_ms: u64,
    pub applied_settle_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for SortPolicyView {
    fn default() -> Self {
        Self {
            trigger: Locator::new(".comments-sort-order-toggle__trigger"),
            options_inline: Locator::new(".comments-sort-order-toggle__content"),
            options_overlay: Locator::new(".artdeco-dropdown__content"),
            option_candidates: Locator::new("[role=\"button\"], li, button"),
            menu_settle_ms: 1000,
            applied_settle_ms: 2000,
            poll_interval_ms: 100,
        }
    }
}

impl SortPolicyView {
    pub fn menu_settle(&self) -> Duration {
        Duration::from_millis(self.menu_settle_ms)
    }

    pub fn applied_settle(&self) -> Duration {
        Duration::from_millis(self.applied_settle_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
