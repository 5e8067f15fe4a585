pub mod decode;
pub mod ocr;
pub mod orchestrator;
pub mod remote;
pub mod sanitize;
pub mod types;

pub use decode::*;
pub use ocr::*;
pub use orchestrator::*;
pub use remote::*;
pub use sanitize::*;
pub use types::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("unsupported image format (expected PNG, JPEG, or WebP)")]
    UnsupportedFormat,

    #[error("image processing error: {0}")]
    ImageProcessing(String),

    #[error("Tesseract OCR initialization failed: {0}")]
    OcrInit(String),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("tessdata not found at: {0}")]
    TessdataNotFound(PathBuf),

    #[error("cannot reach OCR service at {0}")]
    RemoteUnreachable(String),

    #[error("OCR service request timed out after {0}s")]
    RemoteTimeout(u64),

    #[error("OCR service error (HTTP {status}): {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("OCR service returned no parsed text: {0}")]
    RemoteNoResult(String),

    #[error("failed to parse OCR service response: {0}")]
    ResponseParsing(String),
}
