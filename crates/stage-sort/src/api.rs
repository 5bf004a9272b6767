use page_port::PagePort;

use crate::model::SortReport;
use crate::picker::{OptionPicker, PositionalPicker};
use crate::policy::SortPolicyView;
use crate::runner;

/// Brings the thread into a canonical most-recent-first ordering before
/// extraction. Best-effort: a missing or uncooperative sort control degrades
/// ordering but never fails the run.
pub struct SortSelector {
    policy: SortPolicyView,
    picker: Box<dyn OptionPicker>,
}

impl SortSelector {
    pub fn new(policy: SortPolicyView) -> Self {
        Self {
            policy,
            picker: Box::new(PositionalPicker::default()),
        }
    }

    pub fn with_picker(mut self, picker: Box<dyn OptionPicker>) -> Self {
        self.picker = picker;
        self
    }

    pub async fn select_most_recent_order(&self, page: &dyn PagePort) -> SortReport {
        runner::execute(page, self.picker.as_ref(), &self.policy).await
    }
}
