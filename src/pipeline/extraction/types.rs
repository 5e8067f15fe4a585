use serde::{Deserialize, Serialize};

use super::decode::DecodedImage;
use super::ExtractionError;

/// Result of text extraction from one uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub text: String,
    pub method: ExtractionMethod,
}

/// Which OCR path produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    LocalTesseract,
    RemoteApi,
}

/// Local OCR engine abstraction (allows mocking for tests).
///
/// The engine works on the decoded, RGB-normalized image; decoding problems
/// are rejected before the engine ever runs.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &DecodedImage, lang: &str) -> Result<String, ExtractionError>;
}

/// Remote OCR service abstraction.
///
/// Receives the ORIGINAL upload bytes; the service does its own decoding,
/// and re-encoding could only lose information.
pub trait RemoteOcr: Send + Sync {
    fn parse_image(
        &self,
        image_bytes: &[u8],
        filename: &str,
        lang: &str,
    ) -> Result<String, ExtractionError>;
}
