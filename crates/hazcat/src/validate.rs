//! Input validation, run before any network call.

use crate::error::{Result, VerdictError};
use crate::media::MediaType;

/// Largest accepted image, measured after base64 decoding (50 MiB).
pub const MAX_IMAGE_BYTES: u64 = 50 * 1024 * 1024;

/// Number of bytes the base64 text decodes to.
///
/// Computed from the text length alone: up to two trailing `=` are
/// dropped and every four remaining characters count as three bytes.
/// The alphabet is not checked.
pub fn decoded_len(encoded: &str) -> u64 {
    let bytes = encoded.as_bytes();
    let mut len = bytes.len();
    if len > 0 && bytes[len - 1] == b'=' {
        len -= 1;
    }
    if len > 1 && bytes[len - 1] == b'=' {
        len -= 1;
    }
    (len as u64 * 3) >> 2
}

/// Fails with `PayloadTooLarge` when the decoded size exceeds the limit.
/// Returns the decoded size on success.
pub fn check_size(encoded: &str) -> Result<u64> {
    let decoded_bytes = decoded_len(encoded);
    if decoded_bytes > MAX_IMAGE_BYTES {
        return Err(VerdictError::PayloadTooLarge {
            decoded_bytes,
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(decoded_bytes)
}

/// Fails with `UnsupportedMediaType` unless `media_type` is one of the
/// four supported MIME strings, matched exactly.
pub fn check_media_type(media_type: &str) -> Result<MediaType> {
    media_type.parse()
}

pub fn is_file_small_enough(encoded: &str) -> bool {
    check_size(encoded).is_ok()
}

pub fn is_file_type_valid(media_type: &str) -> bool {
    check_media_type(media_type).is_ok()
}
