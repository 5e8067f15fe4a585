//! Upload validation and decoding.
//!
//! The MIME type is detected from magic bytes, never trusted from headers or
//! filenames. Accepted formats are the ones a phone camera or screenshot tool
//! actually produces: PNG, JPEG, WebP.

use image::{DynamicImage, ImageFormat, RgbImage};

use super::ExtractionError;

/// A validated upload: the original bytes plus the RGB-normalized pixels.
///
/// The original bytes are kept because the remote OCR fallback sends them
/// verbatim; the pixel buffer feeds the local engine.
pub struct DecodedImage {
    raw: Vec<u8>,
    mime: &'static str,
    pixels: RgbImage,
}

impl DecodedImage {
    /// Decode and validate uploaded bytes.
    ///
    /// Fails with `UnsupportedFormat` when the magic bytes match none of the
    /// accepted formats, and `ImageProcessing` when the declared format does
    /// not actually decode.
    pub fn from_bytes(raw: Vec<u8>) -> Result<Self, ExtractionError> {
        let mime = detect_image_mime(&raw).ok_or(ExtractionError::UnsupportedFormat)?;

        let decoded = image::load_from_memory(&raw)
            .map_err(|e| ExtractionError::ImageProcessing(e.to_string()))?;

        Ok(Self {
            raw,
            mime,
            pixels: decoded.to_rgb8(),
        })
    }

    /// The original upload bytes, untouched.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Detected MIME type.
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// Pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Re-encode the normalized pixels as PNG.
    ///
    /// The local engine gets a single known format regardless of what was
    /// uploaded, so its format support never matters.
    pub fn to_png(&self) -> Result<Vec<u8>, ExtractionError> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(self.pixels.clone())
            .write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| ExtractionError::ImageProcessing(e.to_string()))?;
        Ok(buf)
    }
}

/// Detect an accepted image MIME type from file magic bytes.
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return None;
    }
    // JPEG: FF D8 FF
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    // PNG: 89 50 4E 47
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some("image/png");
    }
    // WebP: RIFF....WEBP
    if bytes.len() >= 12 && bytes[..4] == *b"RIFF" && bytes[8..12] == *b"WEBP" {
        return Some("image/webp");
    }
    None
}
