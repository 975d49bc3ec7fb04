//! Upload naming rules.
//!
//! Pure functions deciding whether an uploaded file is accepted, what it is
//! stored as, and which names the file server is allowed to hand out.

use chrono::{DateTime, Utc};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Image extensions accepted for upload (lowercase, without the dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Reasons an uploaded file is dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Upload filename is empty after sanitization")]
    EmptyName,
    #[error("Unsupported image extension: {0:?}")]
    DisallowedExtension(Option<String>),
}

/// Reduces a client-supplied filename to a safe, flat ASCII name.
///
/// Accented letters are folded to ASCII (NFKD, then non-ASCII dropped),
/// `/` becomes a word break, whitespace runs collapse into `_`, anything
/// outside `[A-Za-z0-9_.-]` (including `\`) is dropped and leading/trailing
/// `.` and `_` are stripped. The result may be empty.
pub fn sanitize_filename(name: &str) -> String {
    let spaced: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Returns the lowercase extension of `name`, if it has one.
///
/// A leading dot does not start an extension, so `.png` has none.
pub fn extension(name: &str) -> Option<String> {
    let trimmed = name.trim_start_matches('.');
    match trimmed.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => Some(ext.to_ascii_lowercase()),
        _ => None,
    }
}

/// Whether `name` carries one of the [`ALLOWED_EXTENSIONS`].
pub fn has_allowed_extension(name: &str) -> bool {
    extension(name).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Builds the on-disk name: a microsecond UTC timestamp, a dash, then the
/// sanitized name.
pub fn stored_name(sanitized: &str, now: DateTime<Utc>) -> String {
    format!("{}-{sanitized}", now.format("%Y%m%d%H%M%S%6f"))
}

/// Decides what an uploaded file is stored as.
pub fn accept_upload(client_name: &str, now: DateTime<Utc>) -> Result<String, UploadRejection> {
    let sanitized = sanitize_filename(client_name);
    if sanitized.is_empty() {
        return Err(UploadRejection::EmptyName);
    }
    if !has_allowed_extension(&sanitized) {
        return Err(UploadRejection::DisallowedExtension(extension(&sanitized)));
    }
    Ok(stored_name(&sanitized, now))
}

/// Whether a requested name may be served from the upload directory.
///
/// Only flat, visible file names qualify: no separators, no NUL, no leading
/// dot (which also covers `.` and `..`).
pub fn is_servable_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}

/// Content type for a served upload, based on its extension.
pub fn content_type_for(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("cat.png"), "cat.png");
        assert_eq!(sanitize_filename("my-photo_01.JPG"), "my-photo_01.JPG");
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(sanitize_filename("My cool   photo.png"), "My_cool_photo.png");
    }

    #[test]
    fn test_sanitize_strips_path_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("/var/www/shell.svg"), "var_www_shell.svg");
    }

    #[test]
    fn test_sanitize_drops_unsafe_and_non_ascii() {
        assert_eq!(sanitize_filename("héllo wörld.gif"), "hello_world.gif");
        assert_eq!(sanitize_filename("a<b>c:d|e?.webp"), "abcde.webp");
        assert_eq!(sanitize_filename("__.hidden.png__"), "hidden.png");
    }

    #[test]
    fn test_sanitize_folds_accents() {
        assert_eq!(sanitize_filename("café.png"), "cafe.png");
        assert_eq!(sanitize_filename("Ångström ﬁle.jpg"), "Angstrom_file.jpg");
    }

    #[test]
    fn test_sanitize_strips_backslash_without_word_break() {
        assert_eq!(sanitize_filename("a\\b.png"), "ab.png");
    }

    #[test]
    fn test_sanitize_can_end_up_empty() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename("../.."), "");
        assert_eq!(sanitize_filename("日本語"), "");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("cat.PNG"), Some("png".to_string()));
        assert_eq!(extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension("README"), None);
        assert_eq!(extension(".png"), None);
    }

    #[test]
    fn test_allowed_extensions() {
        for name in ["a.png", "a.jpg", "a.JPEG", "a.gif", "a.webp", "a.svg"] {
            assert!(has_allowed_extension(name), "{name} should be allowed");
        }
        for name in ["a.exe", "a.html", "png", "a.png.txt"] {
            assert!(!has_allowed_extension(name), "{name} should be rejected");
        }
    }

    #[test]
    fn test_stored_name_prefixes_microsecond_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 9, 8, 7).unwrap()
            + chrono::Duration::microseconds(42);

        assert_eq!(stored_name("cat.png", now), "20240105090807000042-cat.png");
    }

    #[test]
    fn test_accept_upload() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();

        assert_eq!(
            accept_upload("my cat.png", now),
            Ok("20240105000000000000-my_cat.png".to_string())
        );
        assert_eq!(accept_upload("../..", now), Err(UploadRejection::EmptyName));
        assert_eq!(
            accept_upload("payload.exe", now),
            Err(UploadRejection::DisallowedExtension(Some("exe".to_string())))
        );
        assert_eq!(
            accept_upload("noext", now),
            Err(UploadRejection::DisallowedExtension(None))
        );
    }

    #[test]
    fn test_is_servable_name() {
        assert!(is_servable_name("20240105000000000000-cat.png"));
        assert!(!is_servable_name(""));
        assert!(!is_servable_name(".."));
        assert!(!is_servable_name("."));
        assert!(!is_servable_name("../../etc/passwd"));
        assert!(!is_servable_name("nested/cat.png"));
        assert!(!is_servable_name("..\\secret"));
        assert!(!is_servable_name(".env"));
        assert!(!is_servable_name("cat\0.png"));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.svg"), "image/svg+xml");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }
}
