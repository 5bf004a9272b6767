use async_trait::async_trait;
use page_port::{Locator, PagePort};
use threadharvest_core_types::ParticipantRecord;

use crate::errors::ExtractError;
use crate::policy::ExtractPolicyView;

/// One way of reading participant records out of the materialized document.
/// Strategies are pure reads: given the same document they return the same
/// candidate list. The extractor runs them in order and accepts the first
/// non-empty result.
#[async_trait]
pub trait ExtractStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract(&self, page: &dyn PagePort) -> Result<Vec<ParticipantRecord>, ExtractError>;
}

/// Primary strategy: one record per comment-entry container, author resolved
/// through the entry's author anchor.
pub struct EntryAnchorStrategy {
    entry: Locator,
    author_anchor: Locator,
}

impl EntryAnchorStrategy {
    pub fn from_policy(policy: &ExtractPolicyView) -> Self {
        Self {
            entry: policy.entry.clone(),
            author_anchor: policy.author_anchor.clone(),
        }
    }
}

#[async_trait]
impl ExtractStrategy for EntryAnchorStrategy {
    fn name(&self) -> &'static str {
        "entry-anchor"
    }

    async fn extract(&self, page: &dyn PagePort) -> Result<Vec<ParticipantRecord>, ExtractError> {
        let mut records = Vec::new();
        for entry in page.query(&self.entry).await? {
            let Some(anchor) = page
                .query_within(entry, &self.author_anchor)
                .await?
                .into_iter()
                .next()
            else {
                continue;
            };
            let Some(profile_url) = page
                .attribute(anchor, "href")
                .await?
                .filter(|url| !url.is_empty())
            else {
                continue;
            };
            let anchor_text = page.text(anchor).await?;
            let name = anchor_text.lines().next().unwrap_or("").trim().to_string();
            if name.is_empty() {
                continue;
            }
            // The headline renders as sibling text below the name inside the
            // same entry, so it comes from the entry's text, not the anchor's.
            let entry_text = page.text(entry).await?;
            let headline = entry_text
                .lines()
                .nth(1)
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from);

            let mut record = ParticipantRecord::new(profile_url, name);
            record.headline = headline;
            records.push(record);
        }
        Ok(records)
    }
}

/// Fallback for markup variants without per-entry containers: find
/// author-name labels and resolve each to its nearest enclosing anchor.
pub struct AuthorLabelStrategy {
    author_label: Locator,
    profile_anchor: Locator,
}

impl AuthorLabelStrategy {
    pub fn from_policy(policy: &ExtractPolicyView) -> Self {
        Self {
            author_label: policy.author_label.clone(),
            profile_anchor: policy.profile_anchor.clone(),
        }
    }
}

#[async_trait]
impl ExtractStrategy for AuthorLabelStrategy {
    fn name(&self) -> &'static str {
        "author-label"
    }

    async fn extract(&self, page: &dyn PagePort) -> Result<Vec<ParticipantRecord>, ExtractError> {
        let mut records = Vec::new();
        for label in page.query(&self.author_label).await? {
            let name = page.text(label).await?.trim().to_string();
            if name.is_empty() {
                continue;
            }
            let Some(anchor) = page.closest(label, &self.profile_anchor).await? else {
                continue;
            };
            let Some(profile_url) = page
                .attribute(anchor, "href")
                .await?
                .filter(|url| !url.is_empty())
            else {
                continue;
            };
            records.push(ParticipantRecord::new(profile_url, name));
        }
        Ok(records)
    }
}
