//! Line-level helpers for `key = value` configuration files.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` with the key lower-cased and `-` folded to `_`;
///   `None` when the line has no `=`.
///
/// Details:
/// - Splits on the first `=`; the value keeps everything after it, inline
///   comment included (see [`strip_inline_comment`]).
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (key, value) = line.trim().split_once('=')?;
    let key = key.trim().to_ascii_lowercase().replace('-', "_");
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim().to_string()))
}

/// Drop a trailing `# ...` or `// ...` comment from a value.
#[must_use]
pub fn strip_inline_comment(s: &str) -> &str {
    let mut end = s.len();
    if let Some(i) = s.find(" #") {
        end = end.min(i);
    }
    // URLs carry `//` right after the scheme, so only ` //` counts.
    if let Some(i) = s.find(" //") {
        end = end.min(i);
    }
    s[..end].trim()
}

/// Split a comma-separated value into trimmed, lower-cased, non-empty entries.
#[must_use]
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
