//! Host interface errors

use thiserror::Error;

/// Errors raised by the host while serving a stub call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StubError {
    #[error("World state backend error: {0}")]
    Backend(String),

    #[error("No invocation in progress")]
    NotInInvocation,

    #[error("Invalid range: start {start:?} is after end {end:?}")]
    InvalidRange { start: String, end: String },
}
