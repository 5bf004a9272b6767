use std::time::Instant;

use page_port::{wait, PageError, PagePort};
use tracing::{debug, info, instrument, warn};

use crate::model::{LoadReport, LoadState, StopReason};
use crate::policy::LoadPolicyView;

/// Converges a virtualized thread into a fully materialized one: scroll,
/// click the first visible load-more affordance, settle, measure, repeat
/// until the document stops growing or the iteration cap is hit. Never
/// raises; a failing document aborts the loop with whatever loaded so far.
#[instrument(skip_all)]
pub(crate) async fn execute(page: &dyn PagePort, policy: &LoadPolicyView) -> LoadReport {
    let started = Instant::now();
    let mut state = LoadState::default();
    let mut clicks = 0u32;

    let stop = match drive(page, policy, &mut state, &mut clicks).await {
        Ok(stop) => stop,
        Err(err) => {
            warn!(error = %err, "loader aborted; keeping content materialized so far");
            StopReason::Aborted
        }
    };

    info!(
        iterations = state.scroll_iterations,
        final_height = state.last_document_height,
        clicks,
        ?stop,
        "incremental load finished"
    );
    LoadReport {
        iterations: state.scroll_iterations,
        final_height: state.last_document_height,
        load_more_clicks: clicks,
        stop,
        latency_ms: started.elapsed().as_millis(),
    }
}

async fn drive(
    page: &dyn PagePort,
    policy: &LoadPolicyView,
    state: &mut LoadState,
    clicks: &mut u32,
) -> Result<StopReason, PageError> {
    state.last_document_height = page.content_height().await?;

    loop {
        if state.scroll_iterations >= policy.max_iterations {
            return Ok(StopReason::IterationCap);
        }

        page.scroll_to_bottom().await?;
        let clicked = click_load_more(page, policy).await?;
        if clicked {
            *clicks += 1;
        }
        wait::settle(policy.settle()).await;

        let height = page.content_height().await?;
        state.scroll_iterations += 1;

        // A click without height growth means a load may still be in
        // flight, so only a no-click, no-growth iteration counts as
        // stagnant.
        if height == state.last_document_height && !clicked {
            state.stagnant_iteration_count += 1;
            if state.stagnant_iteration_count >= policy.stagnation_threshold {
                return Ok(StopReason::Stagnated);
            }
        } else {
            state.stagnant_iteration_count = 0;
        }
        state.last_document_height = height;
    }
}

/// Scan the affordance locators in priority order and click the first
/// element that participates in layout. Zero matches is the common case once
/// the thread is exhausted, not an error.
async fn click_load_more(page: &dyn PagePort, policy: &LoadPolicyView) -> Result<bool, PageError> {
    for locator in &policy.load_more {
        for el in page.query(locator).await? {
            if page.is_visible(el).await? {
                debug!(%locator, "clicking load-more affordance");
                page.click(el).await?;
                wait::settle(policy.click_settle()).await;
                return Ok(true);
            }
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_port::{ClickEffect, FixturePage, NodeSpec};

    fn policy() -> LoadPolicyView {
        LoadPolicyView::default()
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_three_stagnant_iterations() {
        let page = FixturePage::new();
        page.set_heights([100, 200, 200, 200, 200]);

        let report = execute(&page, &policy()).await;

        assert_eq!(report.iterations, 4);
        assert_eq!(report.stop, StopReason::Stagnated);
        assert_eq!(report.final_height, 200);
        assert_eq!(page.scroll_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn hard_cap_bounds_a_feed_that_never_stabilizes() {
        let page = FixturePage::new();
        page.grow_forever(1);

        let report = execute(&page, &policy()).await;

        assert_eq!(report.iterations, 50);
        assert_eq!(report.stop, StopReason::IterationCap);
    }

    #[tokio::test(start_paused = true)]
    async fn constant_height_stops_at_the_threshold() {
        let page = FixturePage::new();
        page.set_heights([100]);

        let report = execute(&page, &policy()).await;

        assert_eq!(report.iterations, 3);
        assert_eq!(report.stop, StopReason::Stagnated);
    }

    #[tokio::test(start_paused = true)]
    async fn clicks_first_visible_affordance_once_per_iteration() {
        let page = FixturePage::new();
        page.set_heights([100]);
        let _hidden = page.append(
            page.root(),
            NodeSpec::new("button")
                .class("comments-comments-list__load-more-comments-button--cr")
                .hidden(),
        );
        let arrows = page.append(
            page.root(),
            NodeSpec::new("button").class("comments-comments-list__load-more-comments-arrows"),
        );
        // The affordance disappears after one use, like an exhausted pager.
        page.on_click(arrows, ClickEffect::Remove(arrows));

        let report = execute(&page, &policy()).await;

        assert_eq!(report.load_more_clicks, 1);
        assert_eq!(page.clicks(), vec![arrows]);
        // Click iteration resets stagnation even though height never moved.
        assert_eq!(report.iterations, 4);
        assert_eq!(report.stop, StopReason::Stagnated);
    }

    #[tokio::test(start_paused = true)]
    async fn broken_document_aborts_instead_of_raising() {
        let page = FixturePage::new();
        page.break_document("tab closed");

        let report = execute(&page, &policy()).await;

        assert_eq!(report.stop, StopReason::Aborted);
        assert_eq!(report.iterations, 0);
    }
}
