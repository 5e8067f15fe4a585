//! Extraction orchestrator — local OCR first, remote service on any failure.
//!
//! The local path is best-effort: whatever goes wrong there (engine not
//! compiled in, tessdata missing, runtime error) is logged at debug level
//! and the remote service gets one shot with the ORIGINAL upload bytes.
//! Only a remote failure reaches the caller.

use std::sync::Arc;

use super::decode::DecodedImage;
use super::sanitize::sanitize_extracted_text;
use super::types::{Extraction, ExtractionMethod, OcrEngine, RemoteOcr};
use super::ExtractionError;

pub struct ExtractionPipeline {
    local: Option<Box<dyn OcrEngine>>,
    remote: Arc<dyn RemoteOcr>,
    lang: String,
}

impl ExtractionPipeline {
    pub fn new(
        local: Option<Box<dyn OcrEngine>>,
        remote: Arc<dyn RemoteOcr>,
        lang: impl Into<String>,
    ) -> Self {
        Self {
            local,
            remote,
            lang: lang.into(),
        }
    }

    /// Whether a local engine is wired in at all.
    pub fn has_local_engine(&self) -> bool {
        self.local.is_some()
    }

    /// Extract text from uploaded image bytes.
    ///
    /// Decode problems are hard errors: neither OCR path runs on bytes that
    /// are not a supported image. After that, the local engine is tried once
    /// and the remote service is the fallback for ANY local failure.
    pub fn extract(
        &self,
        image_bytes: &[u8],
        filename: &str,
    ) -> Result<Extraction, ExtractionError> {
        let _span = tracing::info_span!(
            "extract",
            image_size = image_bytes.len(),
            lang = %self.lang,
        )
        .entered();
        let start = std::time::Instant::now();

        let decoded = DecodedImage::from_bytes(image_bytes.to_vec())?;
        let (width, height) = decoded.dimensions();
        tracing::debug!(mime = decoded.mime(), width, height, "image decoded");

        match &self.local {
            Some(engine) => match engine.recognize(&decoded, &self.lang) {
                Ok(text) => {
                    tracing::info!(
                        elapsed_ms = %start.elapsed().as_millis(),
                        chars = text.len(),
                        "local OCR succeeded"
                    );
                    return Ok(Extraction {
                        text: sanitize_extracted_text(&text),
                        method: ExtractionMethod::LocalTesseract,
                    });
                }
                Err(e) => {
                    tracing::debug!(error = %e, "local OCR failed, falling back to remote service");
                }
            },
            None => {
                tracing::debug!("no local OCR engine, using remote service");
            }
        }

        // Remote fallback gets the original bytes, not the re-encoded pixels.
        let text = self
            .remote
            .parse_image(decoded.raw_bytes(), filename, &self.lang)?;

        tracing::info!(
            elapsed_ms = %start.elapsed().as_millis(),
            chars = text.len(),
            "remote OCR succeeded"
        );

        Ok(Extraction {
            text: sanitize_extracted_text(&text),
            method: ExtractionMethod::RemoteApi,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::ocr::MockOcrEngine;
    use crate::pipeline::extraction::remote::MockRemoteOcr;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn sample_png() -> Vec<u8> {
        let pixels = RgbImage::from_pixel(6, 4, image::Rgb([10, 20, 30]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(pixels)
            .write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn local_success_skips_remote() {
        let remote = Arc::new(MockRemoteOcr::new("remote text"));
        let pipeline = ExtractionPipeline::new(
            Some(Box::new(MockOcrEngine::new("local text"))),
            remote.clone(),
            "eng",
        );

        let extraction = pipeline.extract(&sample_png(), "upload.png").unwrap();
        assert_eq!(extraction.text, "local text");
        assert_eq!(extraction.method, ExtractionMethod::LocalTesseract);
        assert_eq!(remote.call_count(), 0, "remote must not be called");
    }

    #[test]
    fn local_failure_falls_back_to_remote_once_with_original_bytes() {
        let remote = Arc::new(MockRemoteOcr::new("remote text"));
        let pipeline = ExtractionPipeline::new(
            Some(Box::new(MockOcrEngine::failing())),
            remote.clone(),
            "eng",
        );

        let bytes = sample_png();
        let extraction = pipeline.extract(&bytes, "upload.png").unwrap();
        assert_eq!(extraction.text, "remote text");
        assert_eq!(extraction.method, ExtractionMethod::RemoteApi);
        assert_eq!(remote.call_count(), 1);
        assert_eq!(
            remote.received_bytes(0),
            bytes,
            "remote must receive the original upload bytes"
        );
    }

    #[test]
    fn missing_local_engine_uses_remote() {
        let remote = Arc::new(MockRemoteOcr::new("remote text"));
        let pipeline = ExtractionPipeline::new(None, remote.clone(), "eng");
        assert!(!pipeline.has_local_engine());

        let extraction = pipeline.extract(&sample_png(), "upload.png").unwrap();
        assert_eq!(extraction.method, ExtractionMethod::RemoteApi);
        assert_eq!(remote.call_count(), 1);
    }

    #[test]
    fn both_paths_failing_surfaces_the_remote_error() {
        let remote = Arc::new(MockRemoteOcr::failing("remote says no"));
        let pipeline = ExtractionPipeline::new(
            Some(Box::new(MockOcrEngine::failing())),
            remote.clone(),
            "eng",
        );

        let err = pipeline.extract(&sample_png(), "upload.png").unwrap_err();
        assert!(
            matches!(err, ExtractionError::RemoteNoResult(_)),
            "surfaced error must come from the remote path, got: {err}"
        );
        assert!(err.to_string().contains("remote says no"));
        assert_eq!(remote.call_count(), 1);
    }

    #[test]
    fn undecodable_bytes_fail_before_either_path() {
        let remote = Arc::new(MockRemoteOcr::new("unused"));
        let pipeline = ExtractionPipeline::new(
            Some(Box::new(MockOcrEngine::new("unused"))),
            remote.clone(),
            "eng",
        );

        let err = pipeline
            .extract(b"definitely not an image", "note.txt")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat));
        assert_eq!(remote.call_count(), 0);
    }

    #[test]
    fn extracted_text_is_sanitized() {
        let remote = Arc::new(MockRemoteOcr::new("Line one  \r\n\r\n\r\nLine two\x00"));
        let pipeline = ExtractionPipeline::new(None, remote, "eng");

        let extraction = pipeline.extract(&sample_png(), "upload.png").unwrap();
        assert_eq!(extraction.text, "Line one\n\nLine two");
    }
}
