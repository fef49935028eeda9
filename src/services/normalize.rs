use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::path::Path;

/// Decode a captured still and correct its orientation from embedded
/// metadata.
///
/// Returns `None` when the file is missing or cannot be decoded. A missing
/// or unreadable orientation tag is not an error; the image is returned
/// unrotated. This never fails for any input.
pub fn normalize(path: &Path) -> Option<DynamicImage> {
    let reader = match ImageReader::open(path) {
        Ok(reader) => reader,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to open image file");
            return None;
        }
    };

    let reader = match reader.with_guessed_format() {
        Ok(reader) => reader,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to probe image format");
            return None;
        }
    };

    let mut decoder = match reader.into_decoder() {
        Ok(decoder) => decoder,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to decode image");
            return None;
        }
    };

    // Orientation correction is best-effort; fall back to the raw decode
    let orientation = match decoder.orientation() {
        Ok(orientation) => orientation,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no usable orientation tag");
            Orientation::NoTransforms
        }
    };

    let mut image = match DynamicImage::from_decoder(decoder) {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to decode image data");
            return None;
        }
    };

    image.apply_orientation(orientation);
    Some(image)
}
