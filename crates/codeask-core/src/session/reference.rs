//! Code reference attached to an assistant answer.

use serde::{Deserialize, Serialize};

/// A pointer to a code excerpt supporting an answer.
///
/// `line_start`/`line_end` are 1-indexed and either both present or both
/// absent; when present, `line_start` is the starting line of the `code`
/// slice for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_end: Option<u32>,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_file_url: Option<String>,
}

impl Reference {
    /// Returns the line range when both endpoints are present and ordered.
    ///
    /// A half-specified or inverted range degrades to `None` rather than
    /// failing; rendering must never error on malformed references.
    pub fn line_range(&self) -> Option<(u32, u32)> {
        match (self.line_start, self.line_end) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }

    /// The line number rendering should start from (1 when no range is given).
    pub fn starting_line(&self) -> u32 {
        self.line_start.unwrap_or(1)
    }
}
