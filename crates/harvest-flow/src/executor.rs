use std::time::Instant;

use chrono::Utc;
use page_port::PagePort;
use stage_extract::RecordExtractor;
use stage_load::IncrementalLoader;
use stage_sort::SortSelector;
use threadharvest_core_types::RunId;
use tracing::{info, instrument};

use crate::errors::FlowError;
use crate::model::{HarvestPolicies, HarvestReport};

/// Runs the three stages in fixed order against one page accessor:
/// sort → load → extract. No branching, no internal retry; a fatal
/// extraction error propagates to the caller untouched. The stages share the
/// accessor strictly sequentially, so a single run needs no locking; at most
/// one run may drive a given page at a time.
pub struct HarvestFlow {
    sort: SortSelector,
    load: IncrementalLoader,
    extract: RecordExtractor,
}

impl HarvestFlow {
    pub fn new(policies: HarvestPolicies) -> Self {
        Self {
            sort: SortSelector::new(policies.sort),
            load: IncrementalLoader::new(policies.load),
            extract: RecordExtractor::new(&policies.extract),
        }
    }

    pub fn with_sort(mut self, sort: SortSelector) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_extractor(mut self, extract: RecordExtractor) -> Self {
        self.extract = extract;
        self
    }

    #[instrument(skip_all, fields(run = %run_id), err)]
    pub async fn run_as(
        &self,
        run_id: RunId,
        page: &dyn PagePort,
    ) -> Result<HarvestReport, FlowError> {
        let started_at = Utc::now();
        let started = Instant::now();

        let sort = self.sort.select_most_recent_order(page).await;
        let load = self.load.load_all(page).await;
        let records = self.extract.extract(page).await?;

        info!(
            records = records.len(),
            sorted = sort.switched,
            load_iterations = load.iterations,
            "harvest run complete"
        );
        Ok(HarvestReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            latency_ms: started.elapsed().as_millis(),
            sort,
            load,
            records,
        })
    }

    pub async fn run(&self, page: &dyn PagePort) -> Result<HarvestReport, FlowError> {
        self.run_as(RunId::new(), page).await
    }
}
