//! Error taxonomy shared by the orchestrator components.

use thiserror::Error;

/// Convenience result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure categories surfaced by the orchestrator.
///
/// `Unauthenticated` and `Validation` are resolved before any network call
/// is attempted; `Remote` and `Network` distinguish a reachable-but-unhappy
/// service from a transport failure with no response at all.
#[derive(Debug, Error)]
pub enum Error {
    /// No credential in the session store, or the server rejected it.
    #[error("not authenticated; run `docgen auth login` first")]
    Unauthenticated,

    /// A required input was missing or malformed before submission.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The service answered with a non-2xx status.
    #[error("service error ({status}): {detail}")]
    Remote { status: u16, detail: String },

    /// Transport failure; no response arrived.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The job reached its failure terminal; carries the service detail.
    #[error("generation failed: {0}")]
    JobFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
