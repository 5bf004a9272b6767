//! Invocation boundary: one request in, exactly one response out. The
//! message-relay transport around this is someone else's concern; the flow
//! is the sole producer of the response.

use page_port::PagePort;
use threadharvest_core_types::{HarvestRequest, HarvestResponse};
use tracing::error;

use crate::errors::FlowError;
use crate::executor::HarvestFlow;
use crate::model::HarvestReport;

pub async fn handle(
    flow: &HarvestFlow,
    page: &dyn PagePort,
    request: HarvestRequest,
) -> HarvestResponse {
    match request {
        HarvestRequest::ScrapeRequested => respond(flow.run(page).await),
    }
}

/// Collapse a run outcome into the single response the caller is owed. An
/// empty record set is a success; a fatal error becomes one failure message,
/// never a silent drop and never a partial result.
pub fn respond(result: Result<HarvestReport, FlowError>) -> HarvestResponse {
    match result {
        Ok(report) => HarvestResponse::ScrapeSucceeded {
            records: report.records,
        },
        Err(err) => {
            error!(error = %err, "harvest run failed");
            HarvestResponse::ScrapeFailed {
                message: err.to_string(),
            }
        }
    }
}
