use page_port::PagePort;

use crate::model::LoadReport;
use crate::policy::LoadPolicyView;
use crate::runner;

/// Forces all lazily-loaded thread content to materialize before
/// extraction. Runs until content stabilizes or a bound is hit; never
/// raises.
pub struct IncrementalLoader {
    policy: LoadPolicyView,
}

impl IncrementalLoader {
    pub fn new(policy: LoadPolicyView) -> Self {
        Self { policy }
    }

    pub async fn load_all(&self, page: &dyn PagePort) -> LoadReport {
        runner::execute(page, &self.policy).await
    }
}
