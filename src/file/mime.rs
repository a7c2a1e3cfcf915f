//! Content type classification by file extension.

use std::path::Path;

/// Extensions served as images.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "tiff", "bmp"];

const OCTET_STREAM: &str = "application/octet-stream";

/// Result of classifying a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// MIME type to send in `Content-Type`.
    pub content_type: String,
    /// Whether the file is one of the supported image types.
    pub is_image: bool,
}

/// Classify a filename by its (case-insensitive) extension.
///
/// Only the supported image extensions get a specific content type;
/// everything else is `application/octet-stream`.
pub fn classify(filename: &str) -> Classification {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Classification {
            content_type: mime_guess::from_ext(&ext)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
            is_image: true,
        },
        _ => Classification {
            content_type: OCTET_STREAM.to_string(),
            is_image: false,
        },
    }
}

/// Whether the filename has a supported image extension.
pub fn is_image(filename: &str) -> bool {
    classify(filename).is_image
}
