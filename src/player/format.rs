use std::time::Duration;

/// Format a position as `m:ss`.
///
/// Minutes are unbounded and unpadded, seconds always take two digits, and
/// both are truncated rather than rounded.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
