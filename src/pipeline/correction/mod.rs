pub mod client;
pub mod corrector;
pub mod parser;
pub mod prompt;
pub mod types;

pub use client::*;
pub use corrector::*;
pub use parser::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorrectionError {
    #[error("no API credential configured for the correction service")]
    MissingCredential,

    #[error("nothing to correct: input text is empty")]
    EmptyInput,

    #[error("cannot reach correction service at {0}")]
    Unreachable(String),

    #[error("correction request timed out after {0}s")]
    Timeout(u64),

    #[error("correction service error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("correction response carried no message content")]
    MissingContent,

    #[error("failed to parse correction payload: {0}")]
    ResponseParsing(String),
}
