//! Destination filename policy for downloads.
//!
//! Precedence: explicit name, then the URL's last path segment, then a
//! synthesized time-ordered name. Every result carries an extension.

use percent_encoding::percent_decode_str;
use std::path::Path;
use url::Url;
use uuid::Uuid;

use crate::error::{ImageError, Result};
use crate::types::DownloadOptions;

/// Extension used when neither the name nor the URL provides one.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Longest extension accepted from a URL path.
const MAX_EXTENSION_LEN: usize = 5;

/// Resolve the filename for `url` under `options`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidUrl`] if `url` cannot be parsed.
pub fn resolve(url: &str, options: &DownloadOptions) -> Result<String> {
    let parsed = Url::parse(url).map_err(|err| ImageError::invalid_url(url, err.to_string()))?;

    let name = match &options.filename {
        Some(explicit) => explicit.clone(),
        None => {
            let from_url = if options.keep_original_name {
                last_segment(&parsed)
            } else {
                None
            };
            from_url.unwrap_or_else(|| synthesize(&parsed))
        }
    };

    Ok(ensure_extension(name))
}

/// The percent-decoded last path segment, if it is usable as a filename.
fn last_segment(url: &Url) -> Option<String> {
    let raw = url.path_segments()?.next_back()?;
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    let decoded = decoded.trim();

    if decoded.is_empty() || decoded == "." || decoded == ".." {
        return None;
    }
    if decoded.contains(['/', '\\']) || decoded.contains('\0') {
        return None;
    }
    Some(decoded.to_string())
}

/// A UUID v7 name with the URL's extension, or [`DEFAULT_EXTENSION`].
fn synthesize(url: &Url) -> String {
    let extension = guess_extension(url).unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    format!("{}.{extension}", Uuid::now_v7())
}

fn guess_extension(url: &Url) -> Option<String> {
    let segment = last_segment(url)?;
    let extension = Path::new(&segment).extension()?.to_str()?;
    let valid = !extension.is_empty()
        && extension.len() <= MAX_EXTENSION_LEN
        && extension.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| extension.to_ascii_lowercase())
}

fn has_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|extension| !extension.is_empty())
}

/// Append [`DEFAULT_EXTENSION`] unless `name` already has one. Trailing dots are dropped first.
fn ensure_extension(name: String) -> String {
    if has_extension(&name) {
        return name;
    }
    let stem = name.trim_end_matches('.');
    format!("{stem}.{DEFAULT_EXTENSION}")
}
