pub mod api;
pub mod model;
pub mod policy;

mod runner;

pub use api::IncrementalLoader;
pub use model::{LoadReport, LoadState, StopReason};
pub use policy::LoadPolicyView;
