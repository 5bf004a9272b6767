use thiserror::Error;
use threadharvest_core_types::HarvestError;

use crate::ports::ElementId;

#[derive(Debug, Error, Clone)]
pub enum PageError {
    #[error("stale element handle {0:?}")]
    Stale(ElementId),
    #[error("page evaluation failed: {0}")]
    Eval(String),
    #[error("document unavailable: {0}")]
    Unavailable(String),
}

impl From<PageError> for HarvestError {
    fn from(err: PageError) -> Self {
        HarvestError::new(err.to_string())
    }
}
