use page_port::PageError;
use thiserror::Error;
use threadharvest_core_types::HarvestError;

/// Extraction failures are the one fatal class in the pipeline: a document
/// that stops answering mid-read surfaces to the caller instead of being
/// papered over with a partial result.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document read failed during extraction: {0}")]
    Page(#[from] PageError),
}

impl From<ExtractError> for HarvestError {
    fn from(err: ExtractError) -> Self {
        HarvestError::new(err.to_string())
    }
}
