pub mod errors;
pub mod executor;
pub mod model;
pub mod protocol;

pub use errors::FlowError;
pub use executor::HarvestFlow;
pub use model::{HarvestPolicies, HarvestReport};
pub use protocol::{handle, respond};
pub use stage_load::{LoadReport, StopReason};
pub use stage_sort::SortReport;
