use std::time::Instant;

use page_port::{wait, ElementId, Locator, PageError, PagePort};
use tracing::{debug, instrument, warn};

use crate::model::SortReport;
use crate::picker::OptionPicker;
use crate::policy::SortPolicyView;

/// Best-effort switch to most-recent ordering. Every missing-element case is
/// a recoverable degradation: the page keeps its default order and the run
/// continues, so this never surfaces an error to the caller.
#[instrument(skip_all)]
pub(crate) async fn execute(
    page: &dyn PagePort,
    picker: &dyn OptionPicker,
    policy: &SortPolicyView,
) -> SortReport {
    let started = Instant::now();
    let switched = match try_switch(page, picker, policy).await {
        Ok(switched) => switched,
        Err(err) => {
            warn!(error = %err, "sort switch degraded; keeping page default order");
            false
        }
    };
    SortReport {
        switched,
        latency_ms: started.elapsed().as_millis(),
    }
}

async fn try_switch(
    page: &dyn PagePort,
    picker: &dyn OptionPicker,
    policy: &SortPolicyView,
) -> Result<bool, PageError> {
    let Some(trigger) = page.query(&policy.trigger).await?.into_iter().next() else {
        warn!(locator = %policy.trigger, "sort trigger not found");
        return Ok(false);
    };

    page.click(trigger).await?;
    wait::until(policy.menu_settle(), policy.poll_interval(), || {
        let page = page;
        let policy = policy;
        async move {
            matches!(find_options_container(page, policy).await, Ok(Some(_)))
        }
    })
    .await;

    let Some(container) = find_options_container(page, policy).await? else {
        warn!("sort options container did not render");
        return Ok(false);
    };

    let options = page
        .query_within(container, &policy.option_candidates)
        .await?;
    let Some(choice) = picker.pick(&options) else {
        warn!(found = options.len(), "not enough sort options; skipping");
        return Ok(false);
    };

    debug!(?choice, "selecting recency option");
    page.click(choice).await?;
    wait::settle(policy.applied_settle()).await;
    Ok(true)
}

/// The options menu renders either inline or into a detached overlay
/// (portal). Inline wins; otherwise the most recently appended overlay is
/// taken to be the menu just opened. Only containers participating in
/// layout count as rendered.
async fn find_options_container(
    page: &dyn PagePort,
    policy: &SortPolicyView,
) -> Result<Option<ElementId>, PageError> {
    if let Some(inline) = visible_match(page, &policy.options_inline, false).await? {
        return Ok(Some(inline));
    }
    visible_match(page, &policy.options_overlay, true).await
}

async fn visible_match(
    page: &dyn PagePort,
    locator: &Locator,
    last: bool,
) -> Result<Option<ElementId>, PageError> {
    let mut candidates = page.query(locator).await?;
    if last {
        candidates.reverse();
    }
    for el in candidates {
        if page.is_visible(el).await? {
            return Ok(Some(el));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::PositionalPicker;
    use page_port::{ClickEffect, FixturePage, NodeSpec};

    fn policy() -> SortPolicyView {
        SortPolicyView::default()
    }

    #[tokio::test(start_paused = true)]
    async fn missing_trigger_degrades_without_touching_the_page() {
        let page = FixturePage::new();
        page.append(page.root(), NodeSpec::new("article"));

        let report = execute(&page, &PositionalPicker::default(), &policy()).await;

        assert!(!report.switched);
        assert!(page.clicks().is_empty());
        assert_eq!(page.scroll_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn clicks_second_option_in_inline_menu() {
        let page = FixturePage::new();
        let trigger = page.append(
            page.root(),
            NodeSpec::new("div").class("comments-sort-order-toggle__trigger"),
        );
        let menu = page.append(
            page.root(),
            NodeSpec::new("div")
                .class("comments-sort-order-toggle__content")
                .hidden(),
        );
        let _relevance = page.append(menu, NodeSpec::new("li"));
        let recency = page.append(menu, NodeSpec::new("li"));
        page.on_click(trigger, ClickEffect::Reveal(menu));

        let report = execute(&page, &PositionalPicker::default(), &policy()).await;

        assert!(report.switched);
        assert_eq!(page.clicks(), vec![trigger, recency]);
    }

    #[tokio::test(start_paused = true)]
    async fn falls_back_to_most_recent_detached_overlay() {
        let page = FixturePage::new();
        let trigger = page.append(
            page.root(),
            NodeSpec::new("div").class("comments-sort-order-toggle__trigger"),
        );
        // A stale overlay from some earlier menu, still hidden.
        let _old_overlay = page.append(
            page.root(),
            NodeSpec::new("div").class("artdeco-dropdown__content").hidden(),
        );
        let overlay = page.append(
            page.root(),
            NodeSpec::new("div").class("artdeco-dropdown__content").hidden(),
        );
        let _top = page.append(overlay, NodeSpec::new("div").attr("role", "button"));
        let recent = page.append(overlay, NodeSpec::new("div").attr("role", "button"));
        page.on_click(trigger, ClickEffect::Reveal(overlay));

        let report = execute(&page, &PositionalPicker::default(), &policy()).await;

        assert!(report.switched);
        assert_eq!(page.clicks(), vec![trigger, recent]);
    }

    #[tokio::test(start_paused = true)]
    async fn skips_when_menu_has_a_single_option() {
        let page = FixturePage::new();
        let trigger = page.append(
            page.root(),
            NodeSpec::new("div").class("comments-sort-order-toggle__trigger"),
        );
        let menu = page.append(
            page.root(),
            NodeSpec::new("div")
                .class("comments-sort-order-toggle__content")
                .hidden(),
        );
        page.append(menu, NodeSpec::new("li"));
        page.on_click(trigger, ClickEffect::Reveal(menu));

        let report = execute(&page, &PositionalPicker::default(), &policy()).await;

        assert!(!report.switched);
        assert_eq!(page.clicks(), vec![trigger]);
    }

    #[tokio::test(start_paused = true)]
    async fn menu_never_rendering_degrades() {
        let page = FixturePage::new();
        let trigger = page.append(
            page.root(),
            NodeSpec::new("div").class("comments-sort-order-toggle__trigger"),
        );

        let report = execute(&page, &PositionalPicker::default(), &policy()).await;

        assert!(!report.switched);
        assert_eq!(page.clicks(), vec![trigger]);
    }
}
