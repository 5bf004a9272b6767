use serde::{Deserialize, Serialize};

/// Outcome of one sort-switch attempt. A failed switch degrades ordering
/// only; it never fails the surrounding run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SortReport {
    pub switched: bool,
    pub latency_ms: u128,
}
