pub mod errors;
pub mod fixture;
pub mod locator;
pub mod ports;
pub mod wait;

pub use errors::PageError;
pub use fixture::{ClickEffect, FixturePage, NodeSpec};
pub use locator::{CompoundSelector, Locator};
pub use ports::{ElementId, PagePort};
