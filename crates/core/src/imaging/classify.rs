//! Content-type and file-name based image classification.

/// File extensions accepted as images, compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

/// Decide whether an uploaded file should be treated as an accepted image.
///
/// Both conditions must hold:
/// - the declared content type contains `"image"` (case-sensitive)
/// - the file name ends with one of [`ACCEPTED_EXTENSIONS`] (case-insensitive)
///
/// Only caller-supplied metadata is looked at. The bytes are never inspected,
/// so a client that lies about both values gets through.
#[must_use]
pub fn is_image(content_type: &str, file_name: &str) -> bool {
    content_type.contains("image") && has_accepted_extension(file_name)
}

fn has_accepted_extension(file_name: &str) -> bool {
    ACCEPTED_EXTENSIONS.iter().any(|ext| {
        file_name.len() >= ext.len()
            && file_name
                .get(file_name.len() - ext.len()..)
                .is_some_and(|tail| tail.eq_ignore_ascii_case(ext))
    })
}
