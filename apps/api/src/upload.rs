//! Profile image validation and normalisation.
//!
//! Uploads are checked before the document is touched. Accepted images are decoded,
//! bounded to `MAX_AVATAR_PX` and re-encoded as PNG so every stored picture is
//! something the rasterizer can embed.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use thiserror::Error;
use tracing::debug;

/// Largest edge of a stored profile image.
pub const MAX_AVATAR_PX: u32 = 512;

const ACCEPTED_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("the uploaded file is empty")]
    Empty,

    #[error("the image is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("the uploaded file is not an image")]
    NotAnImage,

    #[error("{0} images are not supported; use PNG, JPEG or WebP")]
    UnsupportedFormat(String),

    #[error("the image could not be decoded: {0}")]
    Decode(String),

    #[error("the image could not be re-encoded: {0}")]
    Encode(String),
}

/// Validates raw upload bytes and returns a `data:image/png;base64,...` URI.
///
/// `content_type` is the client-declared MIME type, if any. It must be `image/*` when
/// present, but the bytes are sniffed regardless.
pub fn prepare_profile_image(
    bytes: &[u8],
    content_type: Option<&str>,
    max_bytes: usize,
) -> Result<String, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    if bytes.len() > max_bytes {
        return Err(UploadError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    if content_type.is_some_and(|ct| !ct.starts_with("image/")) {
        return Err(UploadError::NotAnImage);
    }

    let format = image::guess_format(bytes).map_err(|_| UploadError::NotAnImage)?;
    if !ACCEPTED_FORMATS.contains(&format) {
        return Err(UploadError::UnsupportedFormat(format!("{format:?}")));
    }

    let mut img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| UploadError::Decode(e.to_string()))?;
    if img.width() > MAX_AVATAR_PX || img.height() > MAX_AVATAR_PX {
        img = img.thumbnail(MAX_AVATAR_PX, MAX_AVATAR_PX);
    }

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| UploadError::Encode(e.to_string()))?;

    debug!(
        width = img.width(),
        height = img.height(),
        bytes = png.len(),
        "Profile image normalised"
    );
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 40, 40])));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), format).unwrap();
        out
    }

    fn decode_uri(uri: &str) -> DynamicImage {
        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = STANDARD.decode(payload).unwrap();
        image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap()
    }

    #[test]
    fn test_png_is_accepted() {
        let bytes = encoded(8, 8, ImageFormat::Png);
        let uri = prepare_profile_image(&bytes, Some("image/png"), 1 << 20).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(decode_uri(&uri).width(), 8);
    }

    #[test]
    fn test_jpeg_is_reencoded_as_png() {
        let bytes = encoded(16, 8, ImageFormat::Jpeg);
        let uri = prepare_profile_image(&bytes, None, 1 << 20).unwrap();
        let img = decode_uri(&uri);
        assert_eq!((img.width(), img.height()), (16, 8));
    }

    #[test]
    fn test_large_image_is_bounded() {
        let bytes = encoded(1024, 256, ImageFormat::Png);
        let uri = prepare_profile_image(&bytes, None, 8 << 20).unwrap();
        let img = decode_uri(&uri);
        assert!(img.width() <= MAX_AVATAR_PX && img.height() <= MAX_AVATAR_PX);
    }

    #[test]
    fn test_oversized_upload_is_rejected() {
        let bytes = encoded(8, 8, ImageFormat::Png);
        let err = prepare_profile_image(&bytes, None, 10).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { limit: 10, .. }));
    }

    #[test]
    fn test_non_image_bytes_are_rejected() {
        let err = prepare_profile_image(b"just some text", None, 1 << 20).unwrap_err();
        assert!(matches!(err, UploadError::NotAnImage));
    }

    #[test]
    fn test_non_image_content_type_is_rejected() {
        let bytes = encoded(8, 8, ImageFormat::Png);
        let err = prepare_profile_image(&bytes, Some("application/pdf"), 1 << 20).unwrap_err();
        assert!(matches!(err, UploadError::NotAnImage));
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        let err = prepare_profile_image(&[], None, 1 << 20).unwrap_err();
        assert!(matches!(err, UploadError::Empty));
    }

    #[test]
    fn test_truncated_png_fails_to_decode() {
        let bytes = encoded(8, 8, ImageFormat::Png);
        let err = prepare_profile_image(&bytes[..24], None, 1 << 20).unwrap_err();
        assert!(matches!(err, UploadError::Decode(_)));
    }
}
