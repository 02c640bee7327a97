// File validation utilities

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{UploadError, UploadResult};

/// Maximum accepted file size: 5 MiB
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// MIME types accepted for upload
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "text/plain"];

/// Names Windows treats as devices regardless of extension
const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
    "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
}

/// Turn a client-supplied filename into a safe, flat storage key.
///
/// Compatibility-decomposes the name and drops what is still non-ASCII
/// (`résumé` becomes `resume`). Path separators become word breaks, whitespace runs collapse to `_`,
/// anything outside `[A-Za-z0-9_.-]` is dropped and leading/trailing dots
/// and underscores are stripped, so the result never contains `/`, `\` or a
/// `..` prefix. May return an empty string.
pub fn sanitize_filename(filename: &str) -> String {
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let flattened = ascii.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");

    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c == '_');

    let stem = trimmed.split('.').next().unwrap_or_default().to_ascii_uppercase();
    if !trimmed.is_empty() && WINDOWS_DEVICE_NAMES.contains(&stem.as_str()) {
        return format!("_{}", trimmed);
    }

    trimmed.to_string()
}

pub fn validate_file_size(size: usize) -> UploadResult<()> {
    if size > MAX_FILE_SIZE {
        return Err(UploadError::FileTooLarge);
    }
    Ok(())
}

/// Check a part's declared Content-Type against the allow-list.
///
/// Parameters such as `charset` are ignored; the returned essence is what
/// gets stored as the object's content type.
pub fn validate_mime_type(declared: Option<&str>) -> UploadResult<String> {
    let essence = declared
        .and_then(|raw| raw.parse::<mime::Mime>().ok())
        .map(|m| m.essence_str().to_ascii_lowercase())
        .ok_or(UploadError::TypeNotAllowed)?;

    if ALLOWED_MIME_TYPES.contains(&essence.as_str()) {
        Ok(essence)
    } else {
        Err(UploadError::TypeNotAllowed)
    }
}
