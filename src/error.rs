//! Error types for the molseek crate.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the search client and entry point.
///
/// "No confident match" is not an error; it is `Ok(None)` from
/// [`Searcher::find`](crate::search::Searcher::find). The variants here cover
/// the engine being unreachable or answering with something unusable.
#[derive(Debug, Error)]
pub enum MolseekError {
    /// The engine did not answer within the configured bound.
    ///
    /// Carries the bound so callers can report it ("max request time is 5s")
    /// instead of conflating the outcome with "not found".
    #[error("search engine unavailable (timed out after {timeout:?})")]
    Unavailable { timeout: Duration },

    /// Transport-level failure other than a timeout, or a non-success
    /// status from the engine.
    #[error("engine error: {0}")]
    Engine(String),

    /// The engine answered, but the response body could not be decoded.
    #[error("malformed engine response: {0}")]
    Response(String),
}

impl MolseekError {
    pub fn unavailable(timeout: Duration) -> Self {
        MolseekError::Unavailable { timeout }
    }

    pub fn engine(msg: impl Into<String>) -> Self {
        MolseekError::Engine(msg.into())
    }

    pub fn response(msg: impl Into<String>) -> Self {
        MolseekError::Response(msg.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MolseekError>;
