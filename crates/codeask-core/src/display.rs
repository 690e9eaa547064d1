//! Pure display helpers shared by presentation surfaces.

use chrono::{DateTime, Utc};

/// Formats a timestamp relative to `now` ("Just now", "5m ago", "3h ago",
/// "2d ago", or the date once it is a week old).
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

/// Truncates to `max_length` characters, appending `...` when cut.
/// Operates on characters, not bytes, so multi-byte text is safe.
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_length).collect();
    format!("{cut}...")
}

/// Human-readable file size (`0 Bytes`, `1 KB`, `7.34 MB`, ...).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = (((bytes as f64).ln() / 1024_f64.ln()) as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

/// The repository name from a GitHub URL (last non-empty path segment),
/// falling back to `"repository"`.
pub fn extract_repo_name(url: &str) -> String {
    url.split('/')
        .rev()
        .find(|segment| !segment.is_empty())
        .unwrap_or("repository")
        .to_string()
}
