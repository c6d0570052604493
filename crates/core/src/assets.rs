//! Checks applied to uploaded game assets before anything is stored.
//!
//! Both checks only inspect headers / the central directory; nothing is
//! extracted or decoded.

use std::io::Cursor;

use image::ImageFormat;

use crate::validation::FieldErrors;

/// Multipart field carrying the game bundle.
pub const ARCHIVE_FIELD: &str = "zipfile";

/// Multipart field carrying the optional thumbnail.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Default upper bound for a game archive (10 MiB).
pub const DEFAULT_MAX_ARCHIVE_BYTES: usize = 10 * 1024 * 1024;

/// Default upper bound for a thumbnail (2 MiB).
pub const DEFAULT_MAX_THUMBNAIL_BYTES: usize = 2 * 1024 * 1024;

/// Thumbnail encodings accepted on upload. Stored as `thumbnail.png` regardless.
const ACCEPTED_THUMBNAIL_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Jpeg];

/// Validate a game archive: non-empty, within `max_bytes`, and a readable
/// zip with at least one entry. Problems are recorded under [`ARCHIVE_FIELD`].
pub fn validate_archive(data: &[u8], max_bytes: usize, errors: &mut FieldErrors) {
    if data.is_empty() {
        errors.add(ARCHIVE_FIELD, "The zipfile must not be empty.");
        return;
    }
    if data.len() > max_bytes {
        errors.add(
            ARCHIVE_FIELD,
            format!("The zipfile must not be larger than {} kilobytes.", max_bytes / 1024),
        );
        return;
    }
    match zip::ZipArchive::new(Cursor::new(data)) {
        Ok(archive) if archive.is_empty() => {
            errors.add(ARCHIVE_FIELD, "The zipfile must contain at least one file.");
        }
        Ok(_) => {}
        Err(_) => errors.add(ARCHIVE_FIELD, "The zipfile must be a file of type: zip."),
    }
}

/// Validate an optional thumbnail: within `max_bytes` and a PNG or JPEG
/// image. Problems are recorded under [`THUMBNAIL_FIELD`].
pub fn validate_thumbnail(data: &[u8], max_bytes: usize, errors: &mut FieldErrors) {
    if data.len() > max_bytes {
        errors.add(
            THUMBNAIL_FIELD,
            format!("The thumbnail must not be larger than {} kilobytes.", max_bytes / 1024),
        );
        return;
    }
    let accepted = image::guess_format(data)
        .map(|format| ACCEPTED_THUMBNAIL_FORMATS.contains(&format))
        .unwrap_or(false);
    if !accepted {
        errors.add(THUMBNAIL_FIELD, "The thumbnail must be a file of type: png, jpg.");
    }
}
