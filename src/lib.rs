//! Snaptext — image-to-text extraction with a proofreading pass.
//!
//! Upload an image in the browser, extract its text (local Tesseract engine
//! with a remote OCR API fallback), then optionally run the text through a
//! chat-completion API for spelling/grammar correction. The heavy lifting is
//! delegated to the OCR engines and the correction service; this crate
//! sequences the calls, owns the fallback and JSON-repair logic, and serves
//! the HTTP surface.

pub mod api;
pub mod config;
pub mod pipeline;
pub mod session;
