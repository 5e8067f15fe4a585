use super::decode::DecodedImage;
use super::types::OcrEngine;
use super::ExtractionError;

/// Bundled Tesseract OCR engine.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct BundledTesseract {
    tessdata_dir: std::path::PathBuf,
}

#[cfg(feature = "ocr")]
impl BundledTesseract {
    /// Initialize with a tessdata directory.
    ///
    /// English data must be present; additional languages work as long as
    /// their traineddata files sit in the same directory.
    pub fn new(tessdata_dir: &std::path::Path) -> Result<Self, ExtractionError> {
        if !tessdata_dir.join("eng.traineddata").exists() {
            return Err(ExtractionError::TessdataNotFound(tessdata_dir.to_path_buf()));
        }

        Ok(Self {
            tessdata_dir: tessdata_dir.to_path_buf(),
        })
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for BundledTesseract {
    fn recognize(&self, image: &DecodedImage, lang: &str) -> Result<String, ExtractionError> {
        let tessdata_str = self
            .tessdata_dir
            .to_str()
            .ok_or_else(|| ExtractionError::OcrInit("Invalid tessdata path".into()))?;

        // The engine gets a PNG re-encode of the normalized pixels so its
        // own format support never matters.
        let png = image.to_png()?;

        let tess = tesseract::Tesseract::new(Some(tessdata_str), Some(lang))
            .map_err(|e| ExtractionError::OcrInit(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(&png)
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        tess.get_text()
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))
    }
}

/// Mock OCR engine for unit testing without Tesseract.
pub struct MockOcrEngine {
    text: String,
    fail: bool,
}

impl MockOcrEngine {
    /// Engine that always succeeds with the configured text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail: false,
        }
    }

    /// Engine that always fails, like a missing or broken local install.
    pub fn failing() -> Self {
        Self {
            text: String::new(),
            fail: true,
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn recognize(&self, _image: &DecodedImage, _lang: &str) -> Result<String, ExtractionError> {
        if self.fail {
            return Err(ExtractionError::OcrProcessing(
                "mock engine configured to fail".into(),
            ));
        }
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn sample_image() -> DecodedImage {
        let pixels = RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(pixels)
            .write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        DecodedImage::from_bytes(buf).unwrap()
    }

    #[test]
    fn mock_ocr_returns_configured_text() {
        let engine = MockOcrEngine::new("Shopping list: eggs, flour");
        let text = engine.recognize(&sample_image(), "eng").unwrap();
        assert_eq!(text, "Shopping list: eggs, flour");
    }

    #[test]
    fn mock_ocr_failing_reports_processing_error() {
        let engine = MockOcrEngine::failing();
        let result = engine.recognize(&sample_image(), "eng");
        assert!(matches!(result, Err(ExtractionError::OcrProcessing(_))));
    }

    #[cfg(feature = "ocr")]
    #[test]
    fn bundled_tesseract_rejects_missing_tessdata() {
        let dir = tempfile::tempdir().unwrap();
        let result = BundledTesseract::new(dir.path());
        assert!(matches!(result, Err(ExtractionError::TessdataNotFound(_))));
    }

    #[cfg(feature = "ocr")]
    #[test]
    fn bundled_tesseract_initializes_with_system_tessdata() {
        let tessdata_dir = std::path::Path::new("/usr/share/tesseract-ocr/5/tessdata");
        if !tessdata_dir.exists() {
            return; // Skip on systems without Tesseract
        }
        assert!(BundledTesseract::new(tessdata_dir).is_ok());
    }
}
