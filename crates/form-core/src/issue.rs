//! Validation issues and the form/field flattener.
//!
//! An [`Issue`] is one validation failure, optionally scoped to a field by
//! the first segment of its path. [`flatten_issues`] buckets a flat issue
//! list into whole-form messages and per-field message lists.
//!
//! Invariants:
//! - An issue with an empty path lands in `form_issues`, in input order.
//! - An issue with a non-empty path lands in `field_issues` under the key of
//!   its first segment, in input order.
//! - `field_issues` never contains an empty bucket.
//! - Field names are not checked against any schema (unknown keys pass
//!   through as-is).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One segment of an issue path. Deeper segments than the first are carried
/// but ignored by the flattener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// Bucket key for this segment. Numeric segments bucket under their
    /// decimal rendering.
    pub fn key(&self) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => index.to_string(),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// A single validation failure reported by a [`Schema`](crate::Schema).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub message: String,
    /// Empty path means the issue concerns the whole form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

impl Issue {
    /// Whole-form issue (empty path).
    pub fn form(message: impl Into<String>) -> Self {
        Self { message: message.into(), path: Vec::new() }
    }

    /// Issue scoped to a top-level field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: vec![PathSegment::Key(field.into())],
        }
    }
}

/// Issues bucketed into whole-form and per-field groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedIssues {
    pub form_issues: Vec<String>,
    pub field_issues: IndexMap<String, Vec<String>>,
}

/// Flatten issues into form and field errors. Useful for schemas that are
/// one level deep. Single pass, no deduplication, no re-ordering.
pub fn flatten_issues(issues: &[Issue]) -> FlattenedIssues {
    let mut flattened = FlattenedIssues::default();

    for issue in issues {
        match issue.path.first() {
            Some(segment) => flattened
                .field_issues
                .entry(segment.key())
                .or_default()
                .push(issue.message.clone()),
            None => flattened.form_issues.push(issue.message.clone()),
        }
    }

    flattened
}
