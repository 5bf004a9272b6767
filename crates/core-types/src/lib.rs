use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Shared error type crossing crate boundaries inside the pipeline.
///
/// Stage crates carry their own `thiserror` enums and convert into this at
/// the seam, so callers see one uniform failure shape.
#[derive(Debug, Error, Clone)]
pub enum HarvestError {
    #[error("{message}")]
    Message { message: String },
}

impl HarvestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One participant extracted from the thread. The profile URL is the natural
/// key: `id` and `profile_url` always carry the same value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub id: String,
    pub name: String,
    pub profile_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
}

impl ParticipantRecord {
    pub fn new(profile_url: impl Into<String>, name: impl Into<String>) -> Self {
        let profile_url = profile_url.into();
        Self {
            id: profile_url.clone(),
            name: name.into(),
            profile_url,
            headline: None,
        }
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }
}

/// Invocation-boundary request. The transport relaying it is out of scope;
/// the pipeline is the sole producer of the matching response.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HarvestRequest {
    ScrapeRequested,
}

/// Exactly one of these is produced per request. An empty record set is a
/// valid success, not a failure.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HarvestResponse {
    ScrapeSucceeded { records: Vec<ParticipantRecord> },
    ScrapeFailed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_is_profile_url() {
        let rec = ParticipantRecord::new("/in/a", "A");
        assert_eq!(rec.id, rec.profile_url);
        assert_eq!(rec.headline, None);
    }

    #[test]
    fn record_serializes_camel_case_and_omits_empty_headline() {
        let rec = ParticipantRecord::new("/in/a", "A");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["profileUrl"], "/in/a");
        assert!(json.get("headline").is_none());

        let rec = rec.with_headline("Engineer");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["headline"], "Engineer");
    }

    #[test]
    fn response_tag_matches_wire_contract() {
        let resp = HarvestResponse::ScrapeFailed {
            message: "boom".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "ScrapeFailed");
        assert_eq!(json["message"], "boom");
    }
}
