//! Rendering contract for code references.
//!
//! Pure helpers the presentation layer builds on: syntax-highlighting
//! language detection, the optional line-range label, and the timed
//! copied-to-clipboard affordance. None of these may fail; unknown input
//! degrades to plain text.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::session::Reference;

/// How long the "copied" affordance stays visible before auto-reverting.
pub const COPIED_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Platform clipboard seam. The system implementation lives in the
/// infrastructure crate; tests substitute their own.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Derives a syntax-highlighting language tag from a file extension.
///
/// Unknown or missing extensions fall back to `"text"`.
pub fn language_for_path(file_path: &str) -> &'static str {
    let Some((_, extension)) = file_path.rsplit_once('.') else {
        return "text";
    };
    match extension.to_ascii_lowercase().as_str() {
        "js" => "javascript",
        "jsx" => "jsx",
        "ts" => "typescript",
        "tsx" => "tsx",
        "py" => "python",
        "java" => "java",
        "cpp" => "cpp",
        "c" => "c",
        "go" => "go",
        "rs" => "rust",
        "rb" => "ruby",
        "php" => "php",
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "json" => "json",
        "xml" => "xml",
        "md" => "markdown",
        "sh" => "bash",
        "yml" | "yaml" => "yaml",
        "sql" => "sql",
        _ => "text",
    }
}

/// The `L10–L20` style label for a reference, when it carries a line range.
///
/// Absence of the range must not block rendering of the code body; callers
/// simply omit the label.
pub fn line_range_label(reference: &Reference) -> Option<String> {
    reference
        .line_range()
        .map(|(start, end)| format!("L{start}\u{2013}L{end}"))
}

/// Timer-based "copied" visual state for one snippet.
///
/// After a successful clipboard write the state reads as copied for
/// [`COPIED_FEEDBACK_DURATION`] and then reverts on its own; no explicit
/// clear is needed.
#[derive(Debug, Default, Clone)]
pub struct CopyFeedback {
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts the clipboard write; on success arms the copied state.
    /// Returns whether the copy succeeded.
    pub fn copy_with(&mut self, clipboard: &dyn Clipboard, text: &str) -> bool {
        match clipboard.copy(text) {
            Ok(()) => {
                self.copied_at = Some(Instant::now());
                true
            }
            Err(_) => false,
        }
    }

    /// Whether the "copied" affordance should currently show.
    pub fn is_copied(&self) -> bool {
        self.is_copied_at(Instant::now())
    }

    fn is_copied_at(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.duration_since(at) < COPIED_FEEDBACK_DURATION)
    }
}
