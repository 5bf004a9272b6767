use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stage_extract::ExtractPolicyView;
use stage_load::{LoadPolicyView, LoadReport};
use stage_sort::{SortPolicyView, SortReport};
use threadharvest_core_types::{ParticipantRecord, RunId};

/// Per-stage policies, bundled so a deployment can override any of them from
/// one config document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestPolicies {
    pub sort: SortPolicyView,
    pub load: LoadPolicyView,
    pub extract: ExtractPolicyView,
}

/// Everything one completed run produced. `records` is the caller-facing
/// result set; the rest is operator-facing run telemetry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HarvestReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub latency_ms: u128,
    pub sort: SortReport,
    pub load: LoadReport,
    pub records: Vec<ParticipantRecord>,
}
