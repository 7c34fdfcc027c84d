//! Markup escaping for remote text.

use std::borrow::Cow;

/// What: Escape text for use in HTML element content and quoted attributes.
///
/// Inputs:
/// - `raw`: Untrusted text from the catalog.
///
/// Output:
/// - Borrowed input when nothing needs escaping; otherwise an owned copy with
///   `& < > " '` replaced by entities.
#[must_use]
pub fn escape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 16);
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}
