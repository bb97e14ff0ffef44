//! Error taxonomy for admission and service.
//!
//! Mirrors the shape of `maker_web`'s `errors.rs`: plain enums implementing
//! [`std::error::Error`]/[`std::fmt::Display`] by hand, with a `From<io::Error>`
//! bridge, rather than a `thiserror` derive. Neither error type crosses the
//! worker-loop boundary — no error propagates to the caller of `next` —
//! they exist so `admit` and `serve_slice` have a typed, matchable failure
//! shape instead of stringly-typed failure.

use std::fmt;
use std::io;

/// Failure during request admission.
#[derive(Debug)]
pub enum AdmitError {
    /// The request line did not start with `GET`, or had no second token.
    BadRequest,
    /// `stat` on the resolved path failed.
    NotFound,
    /// Reading the request line, or replying with an error status, failed.
    Io(io::Error),
}

impl fmt::Display for AdmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmitError::BadRequest => write!(f, "bad request"),
            AdmitError::NotFound => write!(f, "file not found"),
            AdmitError::Io(e) => write!(f, "admission I/O error: {e}"),
        }
    }
}

impl std::error::Error for AdmitError {}

impl From<io::Error> for AdmitError {
    fn from(e: io::Error) -> Self {
        AdmitError::Io(e)
    }
}

/// Failure during a service slice.
#[derive(Debug)]
pub enum ServeError {
    /// Reading from the request's file source failed.
    Read(io::Error),
    /// Writing to the client sink failed.
    Write(io::Error),
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::Read(e) => write!(f, "read error during service: {e}"),
            ServeError::Write(e) => write!(f, "write error during service: {e}"),
        }
    }
}

impl std::error::Error for ServeError {}
