pub mod api;
pub mod errors;
pub mod policy;
pub mod strategies;

mod runner;

pub use api::RecordExtractor;
pub use errors::ExtractError;
pub use policy::ExtractPolicyView;
pub use strategies::{AuthorLabelStrategy, EntryAnchorStrategy, ExtractStrategy};
