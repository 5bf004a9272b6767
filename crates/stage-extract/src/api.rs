use page_port::PagePort;
use threadharvest_core_types::ParticipantRecord;

use crate::errors::ExtractError;
use crate::policy::ExtractPolicyView;
use crate::runner;
use crate::strategies::{AuthorLabelStrategy, EntryAnchorStrategy, ExtractStrategy};

/// Pure read of the materialized document: deterministic for a fixed
/// document, deduplicated by profile URL, first-seen order preserved.
pub struct RecordExtractor {
    strategies: Vec<Box<dyn ExtractStrategy>>,
}

impl RecordExtractor {
    pub fn new(policy: &ExtractPolicyView) -> Self {
        Self {
            strategies: vec![
                Box::new(EntryAnchorStrategy::from_policy(policy)),
                Box::new(AuthorLabelStrategy::from_policy(policy)),
            ],
        }
    }

    /// Replace the ordered strategy list; the first non-empty result wins.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn ExtractStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub async fn extract(
        &self,
        page: &dyn PagePort,
    ) -> Result<Vec<ParticipantRecord>, ExtractError> {
        runner::execute(page, &self.strategies).await
    }
}
