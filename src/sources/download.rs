//! Saving gallery images to disk.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::Result;

/// Name used when a title sanitizes to nothing.
const DEFAULT_IMAGE_NAME: &str = "anime-image";

/// Keep ASCII alphanumerics and `-`; whitespace and `_` runs become one `_`.
fn sanitize_stem(raw: &str) -> String {
    let mut stem = String::with_capacity(raw.len());
    let mut last_sep = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            stem.push(ch);
            last_sep = false;
        } else if (ch.is_whitespace() || ch == '_') && !last_sep && !stem.is_empty() {
            stem.push('_');
            last_sep = true;
        }
    }
    stem.trim_end_matches('_').to_string()
}

/// What: Derive a safe file name for an image.
///
/// Inputs:
/// - `title`: Display title of the gallery item (may be empty).
/// - `url`: Image URL; its extension is reused when it looks like one.
///
/// Output:
/// - `<sanitized title>.<ext>`. A title with nothing usable becomes
///   `anime-image-<url file stem>`, or plain `anime-image`, with `jpg` as the
///   default extension.
#[must_use]
pub fn image_file_name(title: &str, url: &str) -> String {
    let path_part = url.split(['?', '#']).next().unwrap_or(url);
    let file_part = path_part.rsplit('/').next().unwrap_or(path_part);
    let (url_stem, url_ext) = file_part
        .rsplit_once('.')
        .map_or((file_part, None), |(s, e)| (s, Some(e)));
    let ext = url_ext
        .map(str::to_ascii_lowercase)
        .filter(|e| matches!(e.as_str(), "jpg" | "jpeg" | "png" | "webp" | "gif"))
        .unwrap_or_else(|| "jpg".to_string());

    let mut stem = sanitize_stem(title);
    if stem.is_empty() {
        let from_url = sanitize_stem(url_stem);
        stem = if from_url.is_empty() {
            DEFAULT_IMAGE_NAME.to_string()
        } else {
            format!("{DEFAULT_IMAGE_NAME}-{from_url}")
        };
    }
    format!("{stem}.{ext}")
}

/// What: Write `bytes` under `dir` without replacing an existing file.
///
/// Output:
/// - Path written: `name` itself, or `<stem>-2.<ext>`, `<stem>-3.<ext>`... when taken.
///
/// # Errors
/// - Directory creation or write failures.
pub fn write_unique(dir: &Path, name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let (stem, ext) = name.rsplit_once('.').unwrap_or((name, ""));
    let mut n = 1u32;
    loop {
        let candidate = match (n, ext.is_empty()) {
            (1, _) => dir.join(name),
            (_, true) => dir.join(format!("{stem}-{n}")),
            (_, false) => dir.join(format!("{stem}-{n}.{ext}")),
        };
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(mut file) => {
                file.write_all(bytes)?;
                return Ok(candidate);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e),
        }
    }
}

/// What: Download an image into `dir`.
///
/// Inputs:
/// - `client`: Shared HTTP client, so downloads carry the same User-Agent as catalog requests.
/// - `url`: Image URL.
/// - `title`: Title used to name the file.
/// - `dir`: Target directory; created when missing.
///
/// Output:
/// - Path of the written file; earlier downloads are never overwritten.
///
/// # Errors
/// - Network failures, non-success status, or filesystem errors.
pub async fn download_image(
    client: &reqwest::Client,
    url: &str,
    title: &str,
    dir: &Path,
) -> Result<PathBuf> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), url, "image download failed");
        return Err(format!("image download returned HTTP {status}").into());
    }
    let bytes = resp.bytes().await?;
    let name = image_file_name(title, url);
    let dir = dir.to_path_buf();
    let path = tokio::task::spawn_blocking(move || write_unique(&dir, &name, &bytes)).await??;
    info!(path = %path.display(), "image saved");
    Ok(path)
}
