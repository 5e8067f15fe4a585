//! Shared session state for the single-user demo.
//!
//! Holds the current extracted text and its correction behind an `RwLock`
//! so the axum handlers can read concurrently. The one invariant that
//! matters: a correction never outlives the text it was derived from;
//! storing a new extraction clears any stored correction.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::correction::CorrectionResult;
use crate::pipeline::extraction::{Extraction, ExtractionMethod};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session lock poisoned")]
    LockPoisoned,
}

/// Extracted text as owned by the session, with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
    pub extracted_at: chrono::NaiveDateTime,
}

#[derive(Default)]
struct SessionSlots {
    extracted: Option<ExtractedText>,
    correction: Option<CorrectionResult>,
}

/// Session store shared between handlers.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<SessionSlots>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, SessionSlots>, SessionError> {
        self.inner.read().map_err(|_| SessionError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SessionSlots>, SessionError> {
        self.inner.write().map_err(|_| SessionError::LockPoisoned)
    }

    /// Store a fresh extraction, clearing any correction derived from the
    /// previous text.
    pub fn store_extraction(&self, extraction: Extraction) -> Result<ExtractedText, SessionError> {
        let record = ExtractedText {
            text: extraction.text,
            method: extraction.method,
            extracted_at: chrono::Local::now().naive_local(),
        };

        let mut slots = self.write()?;
        if slots.correction.take().is_some() {
            tracing::debug!("stale correction cleared by new extraction");
        }
        slots.extracted = Some(record.clone());
        Ok(record)
    }

    /// Store the correction for the current text.
    pub fn store_correction(&self, correction: CorrectionResult) -> Result<(), SessionError> {
        self.write()?.correction = Some(correction);
        Ok(())
    }

    pub fn extracted(&self) -> Result<Option<ExtractedText>, SessionError> {
        Ok(self.read()?.extracted.clone())
    }

    pub fn correction(&self) -> Result<Option<CorrectionResult>, SessionError> {
        Ok(self.read()?.correction.clone())
    }
}
