use stage_extract::ExtractError;
use thiserror::Error;
use threadharvest_core_types::HarvestError;

/// The only fatal path out of a run. Sort and load degradations are absorbed
/// inside their stages; extraction failures propagate uncaught.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl From<FlowError> for HarvestError {
    fn from(err: FlowError) -> Self {
        HarvestError::new(err.to_string())
    }
}
