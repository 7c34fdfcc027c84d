//! Small helpers shared by the binary and the library.

pub mod config;

/// What: Open a URL in the default browser (cross-platform).
///
/// Inputs:
/// - `url`: Trailer or image URL.
///
/// Output:
/// - Nothing; the launcher runs on a detached thread and its failure is logged.
///
/// Details:
/// - Uses `xdg-open` on Linux, falling back to `open` (macOS); on Windows
///   `cmd /c start`.
/// - Does nothing under `cfg(test)`.
pub fn open_url(url: &str) {
    #[cfg(not(test))]
    {
        let url = url.to_string();
        std::thread::spawn(move || {
            #[cfg(target_os = "windows")]
            let spawned = std::process::Command::new("cmd")
                .args(["/c", "start", "", &url])
                .stdin(std::process::Stdio::null())
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .spawn();
            #[cfg(not(target_os = "windows"))]
            let spawned = std::process::Command::new("xdg-open")
                .arg(&url)
                .stdin(std::process::Stdio::null())
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .spawn()
                .or_else(|_| {
                    std::process::Command::new("open")
                        .arg(&url)
                        .stdin(std::process::Stdio::null())
                        .stdout(std::process::Stdio::null())
                        .stderr(std::process::Stdio::null())
                        .spawn()
                });
            match spawned {
                Ok(_) => tracing::info!(url = %url, "opened url in browser"),
                Err(e) => tracing::warn!(url = %url, error = %e, "failed to open url"),
            }
        });
    }
    #[cfg(test)]
    {
        let _ = url;
    }
}

/// What: Truncate `text` to at most `max` display columns, appending `…` when cut.
///
/// Details:
/// - Width is measured with `unicode-width`, so CJK titles do not overflow
///   terminal cells.
#[must_use]
pub fn truncate_to_width(text: &str, max: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if unicode_width::UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Format a favorites count with thousands separators (`12345` → `12,345`).
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_wide_chars() {
        assert_eq!(truncate_to_width("Bleach", 10), "Bleach");
        assert_eq!(truncate_to_width("Fullmetal Alchemist", 8), "Fullmet…");
        assert_eq!(truncate_to_width("進撃の巨人", 5), "進撃…");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(1234), "1,234");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn open_url_is_inert_in_tests() {
        open_url("https://example.invalid/");
    }
}
