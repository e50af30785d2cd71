//! Report attachment rules: extension whitelist, size ceiling, filename sanitisation and
//! owner-namespaced storage keys.

use uuid::Uuid;

use crate::id::DoctorId;

/// Extensions accepted for report attachments (compared lowercase).
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "pdf"];

/// Maximum attachment size in bytes (16 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 16 * 1024 * 1024;

/// Longest storage key accepted by common filesystems as a single path component.
pub const MAX_KEY_BYTES: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    #[error("attachment filename is empty")]
    EmptyName,
    #[error("attachment type is not allowed")]
    UnsupportedType,
    #[error("attachment exceeds 16 MiB")]
    TooLarge,
}

/// Reduce a client-supplied filename to a safe flat name.
///
/// Drops any directory part, turns whitespace into `_`, keeps only ASCII alphanumerics,
/// `.`, `_` and `-`, and trims leading/trailing dots and underscores.
///
/// ```
/// use carechart_domain::attachment::sanitize_filename;
///
/// assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_filename("chest x-ray.PNG"), "chest_x-ray.PNG");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    cleaned.trim_matches(|c| c == '.' || c == '_').to_owned()
}

/// Lowercased extension after the last dot, if any.
pub fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn is_allowed(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Validate an upload and derive its storage key `{doctor_id}_{upload_id}_{name}`.
///
/// `upload_id` must be fresh per upload so two uploads never share a blob. Long names
/// are shortened so the key stays within [`MAX_KEY_BYTES`]; the extension is kept.
pub fn storage_key(
    owner: DoctorId,
    upload_id: Uuid,
    original_name: &str,
    size: usize,
) -> Result<String, AttachmentError> {
    let name = sanitize_filename(original_name);
    if name.is_empty() {
        return Err(AttachmentError::EmptyName);
    }
    if !is_allowed(&name) {
        return Err(AttachmentError::UnsupportedType);
    }
    if size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge);
    }
    let prefix = format!("{owner}_{upload_id}_");
    let name = fit_name(&name, MAX_KEY_BYTES - prefix.len());
    Ok(format!("{prefix}{name}"))
}

/// Shorten the stem of an already sanitised, whitelisted name to at most `max` bytes.
fn fit_name(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_owned();
    }
    // Sanitised names are ASCII and whitelisted names always have a dot.
    let (stem, ext) = name.rsplit_once('.').unwrap_or((name, ""));
    let keep = max.saturating_sub(ext.len() + 1).min(stem.len());
    let stem = stem[..keep].trim_end_matches(['.', '_']);
    format!("{stem}.{ext}")
}

/// MIME type served for a stored attachment.
pub fn content_type(key: &str) -> &'static str {
    match extension(key).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
