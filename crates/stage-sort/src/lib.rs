pub mod api;
pub mod model;
pub mod picker;
pub mod policy;

mod runner;

pub use api::SortSelector;
pub use model::SortReport;
pub use picker::{OptionPicker, PositionalPicker};
pub use policy::SortPolicyView;
