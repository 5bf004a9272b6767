use std::collections::HashSet;

use page_port::PagePort;
use threadharvest_core_types::ParticipantRecord;
use tracing::{debug, info, instrument};

use crate::errors::ExtractError;
use crate::strategies::ExtractStrategy;

/// Run the strategies in order; the first non-empty candidate list wins and
/// is deduplicated by profile URL, earliest record kept. An empty result is
/// a valid outcome, not a failure.
#[instrument(skip_all)]
pub(crate) async fn execute(
    page: &dyn PagePort,
    strategies: &[Box<dyn ExtractStrategy>],
) -> Result<Vec<ParticipantRecord>, ExtractError> {
    for strategy in strategies {
        let found = strategy.extract(page).await?;
        if found.is_empty() {
            debug!(strategy = strategy.name(), "no records; trying next strategy");
            continue;
        }
        let records = dedupe_first_seen(found);
        info!(
            strategy = strategy.name(),
            records = records.len(),
            "extraction complete"
        );
        return Ok(records);
    }
    info!("no participants present");
    Ok(Vec::new())
}

fn dedupe_first_seen(records: Vec<ParticipantRecord>) -> Vec<ParticipantRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.profile_url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ExtractPolicyView;
    use crate::strategies::{AuthorLabelStrategy, EntryAnchorStrategy};
    use page_port::{ElementId, FixturePage, NodeSpec, PageError};

    fn strategies() -> Vec<Box<dyn ExtractStrategy>> {
        let policy = ExtractPolicyView::default();
        vec![
            Box::new(EntryAnchorStrategy::from_policy(&policy)),
            Box::new(AuthorLabelStrategy::from_policy(&policy)),
        ]
    }

    fn add_entry(page: &FixturePage, url: &str, name: &str, headline: Option<&str>) -> ElementId {
        let entry = page.append(page.root(), NodeSpec::new("article"));
        page.append(
            entry,
            NodeSpec::new("a")
                .class("app-aware-link")
                .attr("href", url)
                .text(name),
        );
        if let Some(headline) = headline {
            page.append(entry, NodeSpec::new("span").text(headline));
        }
        entry
    }

    #[tokio::test]
    async fn extracts_and_dedupes_in_first_seen_order() {
        let page = FixturePage::new();
        add_entry(&page, "/in/a", "A", Some("Engineer"));
        add_entry(&page, "/in/a", "A", Some("Senior Engineer"));
        add_entry(&page, "/in/b", "B", None);

        let records = execute(&page, &strategies()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "/in/a");
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].profile_url, "/in/a");
        assert_eq!(records[0].headline.as_deref(), Some("Engineer"));
        assert_eq!(records[1].id, "/in/b");
        assert_eq!(records[1].headline, None);

        let urls: Vec<_> = records.iter().map(|r| r.profile_url.as_str()).collect();
        let mut unique = urls.clone();
        unique.dedup();
        assert_eq!(urls, unique);
    }

    #[tokio::test]
    async fn entries_missing_name_or_url_are_skipped() {
        let page = FixturePage::new();
        let nameless = page.append(page.root(), NodeSpec::new("article"));
        page.append(
            nameless,
            NodeSpec::new("a").class("app-aware-link").attr("href", "/in/x"),
        );
        let linkless = page.append(page.root(), NodeSpec::new("article"));
        page.append(linkless, NodeSpec::new("a").class("app-aware-link").text("X"));
        add_entry(&page, "/in/ok", "Ok", None);

        let records = execute(&page, &strategies()).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "/in/ok");
    }

    #[tokio::test]
    async fn fallback_runs_only_when_primary_finds_nothing() {
        let page = FixturePage::new();
        // No article containers at all; only bare meta labels inside links.
        let link_a = page.append(page.root(), NodeSpec::new("a").attr("href", "/in/a"));
        page.append(
            link_a,
            NodeSpec::new("span")
                .class("comments-comment-meta__description-title")
                .text("A"),
        );
        let link_b = page.append(page.root(), NodeSpec::new("a").attr("href", "/in/b"));
        page.append(
            link_b,
            NodeSpec::new("span")
                .class("comments-comment-meta__description-title")
                .text("B"),
        );

        let records = execute(&page, &strategies()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[1].name, "B");
        assert_eq!(records[1].profile_url, "/in/b");
    }

    #[tokio::test]
    async fn fallback_is_not_merged_into_primary_results() {
        let page = FixturePage::new();
        add_entry(&page, "/in/primary", "Primary", None);
        // A stray label elsewhere on the page must not leak into the output
        // while the primary strategy produced records.
        let stray = page.append(page.root(), NodeSpec::new("a").attr("href", "/in/stray"));
        page.append(
            stray,
            NodeSpec::new("span")
                .class("comments-comment-meta__description-title")
                .text("Stray"),
        );

        let records = execute(&page, &strategies()).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "/in/primary");
    }

    #[tokio::test]
    async fn empty_document_is_a_valid_empty_result() {
        let page = FixturePage::new();
        let records = execute(&page, &strategies()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn unreadable_document_is_fatal() {
        let page = FixturePage::new();
        page.break_document("tab closed");

        let err = execute(&page, &strategies()).await.unwrap_err();
        assert!(matches!(err, ExtractError::Page(PageError::Unavailable(_))));
    }
}
