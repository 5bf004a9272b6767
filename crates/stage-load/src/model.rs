use serde::{Deserialize, Serialize};

/// Loop-local loader state, mutated once per iteration and discarded with
/// the run.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadState {
    pub scroll_iterations: u32,
    pub last_document_height: i64,
    pub stagnant_iteration_count: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum StopReason {
    /// Content stabilized: enough consecutive iterations with no growth and
    /// no load-more interaction.
    Stagnated,
    /// The hard iteration cap bounded a thread that never stabilized.
    IterationCap,
    /// The document stopped answering; whatever materialized so far stands.
    Aborted,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoadReport {
    pub iterations: u32,
    pub final_height: i64,
    pub load_more_clicks: u32,
    pub stop: StopReason,
    pub latency_ms: u128,
}
