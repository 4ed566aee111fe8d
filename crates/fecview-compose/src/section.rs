use std::fmt::Display;

use serde::Serialize;

/// Content of one independently loaded part of a page.
///
/// Only `Ready` is shown. `Empty` and `Failed` both tell the renderer to
/// hide the section's container; they stay distinct so callers and tests
/// can tell "nothing to show" from "could not load".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    Empty,
    Failed { reason: String },
}

impl<T> Section<T> {
    pub fn failed(err: impl Display) -> Self {
        Section::Failed {
            reason: err.to_string(),
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Section::Failed { .. })
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Section<Vec<T>> {
    /// `Ready` for a non-empty list, `Empty` otherwise.
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Section::Empty
        } else {
            Section::Ready(items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_suppressed() {
        let section: Section<Vec<u8>> = Section::from_items(Vec::new());
        assert_eq!(section, Section::Empty);
        assert!(!section.is_visible());
    }

    #[test]
    fn failure_keeps_reason() {
        let section: Section<Vec<u8>> = Section::failed("lookup timed out");
        assert!(section.is_failed());
        assert!(section.ready().is_none());
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            serde_json::json!({"state": "failed", "data": {"reason": "lookup timed out"}})
        );
    }
}
