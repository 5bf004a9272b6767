use std::fmt;

use serde::{Deserialize, Serialize};

/// A structural identifier used to find elements within the document.
///
/// Wraps a raw CSS selector list. Live-page implementations hand the raw
/// string to the browser; the in-memory fixture matches against the parsed
/// [`CompoundSelector`] form. Only the subset the pipeline actually uses is
/// parsed: tag names, class steps, attribute steps, and comma-joined
/// alternatives. Combinators are not supported.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed alternatives, in source order. Malformed steps are skipped
    /// rather than failing the whole locator.
    pub fn compounds(&self) -> Vec<CompoundSelector> {
        self.0
            .split(',')
            .filter_map(|part| CompoundSelector::parse(part.trim()))
            .collect()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Locator {
    fn from(selector: &str) -> Self {
        Self::new(selector)
    }
}

/// One comma-separated alternative of a selector list: an optional tag name
/// plus any number of `.class` and `[attr]` / `[attr="value"]` steps.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrStep>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttrStep {
    pub name: String,
    pub value: Option<String>,
}

impl CompoundSelector {
    fn parse(input: &str) -> Option<Self> {
        if input.is_empty() {
            return None;
        }
        let mut out = CompoundSelector::default();
        let mut chars = input.char_indices().peekable();

        if input.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            let end = input
                .find(|c: char| c == '.' || c == '[')
                .unwrap_or(input.len());
            out.tag = Some(input[..end].to_ascii_lowercase());
            while matches!(chars.peek(), Some((i, _)) if *i < end) {
                chars.next();
            }
        }

        while let Some((start, c)) = chars.next() {
            match c {
                '.' => {
                    let mut end = input.len();
                    while let Some((i, c)) = chars.peek() {
                        if *c == '.' || *c == '[' {
                            end = *i;
                            break;
                        }
                        chars.next();
                    }
                    if end > start + 1 {
                        out.classes.push(input[start + 1..end].to_string());
                    }
                }
                '[' => {
                    let close = input[start..].find(']').map(|i| start + i)?;
                    let body = &input[start + 1..close];
                    let step = match body.split_once('=') {
                        Some((name, value)) => AttrStep {
                            name: name.trim().to_string(),
                            value: Some(
                                value
                                    .trim()
                                    .trim_matches(|c| c == '"' || c == '\'')
                                    .to_string(),
                            ),
                        },
                        None => AttrStep {
                            name: body.trim().to_string(),
                            value: None,
                        },
                    };
                    if step.name.is_empty() {
                        return None;
                    }
                    out.attrs.push(step);
                    while matches!(chars.peek(), Some((i, _)) if *i <= close) {
                        chars.next();
                    }
                }
                _ => return None,
            }
        }

        if out.tag.is_none() && out.classes.is_empty() && out.attrs.is_empty() {
            None
        } else {
            Some(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tag_with_class() {
        let loc = Locator::new("a.app-aware-link");
        let compounds = loc.compounds();
        assert_eq!(compounds.len(), 1);
        assert_eq!(compounds[0].tag.as_deref(), Some("a"));
        assert_eq!(compounds[0].classes, vec!["app-aware-link"]);
    }

    #[test]
    fn parses_selector_list_in_order() {
        let loc = Locator::new("[role=\"button\"], li, button");
        let compounds = loc.compounds();
        assert_eq!(compounds.len(), 3);
        assert_eq!(
            compounds[0].attrs,
            vec![AttrStep {
                name: "role".into(),
                value: Some("button".into()),
            }]
        );
        assert_eq!(compounds[1].tag.as_deref(), Some("li"));
        assert_eq!(compounds[2].tag.as_deref(), Some("button"));
    }

    #[test]
    fn parses_bare_attribute_step() {
        let loc = Locator::new("a[data-test-app-aware-link]");
        let compounds = loc.compounds();
        assert_eq!(compounds.len(), 1);
        assert_eq!(compounds[0].tag.as_deref(), Some("a"));
        assert_eq!(compounds[0].attrs[0].name, "data-test-app-aware-link");
        assert_eq!(compounds[0].attrs[0].value, None);
    }

    #[test]
    fn skips_malformed_alternatives() {
        let loc = Locator::new("a.ok, >broken");
        assert_eq!(loc.compounds().len(), 1);
    }
}
