//! Error types for retrieval and verdict submission
//!
//! Decoding itself never fails; these errors only come from the
//! collaborators around the parser.

use thiserror::Error;

/// Errors surfaced to the caller of a review session
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Raw message could not be fetched from storage
    #[error("Failed to retrieve message {key}: {reason}")]
    Retrieval { key: String, reason: String },

    /// Listing of available message keys failed
    #[error("Failed to list messages: {0}")]
    Listing(String),

    /// The remote action could not be reached
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The remote action answered with an error field
    #[error("Verdict for {key} was rejected: {reason}")]
    Rejected { key: String, reason: String },

    /// The remote action answered with something that is not a response object
    #[error("Malformed action response: {0}")]
    MalformedResponse(String),

    /// Verdict payload could not be encoded
    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// Parse options could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for review operations
pub type Result<T> = std::result::Result<T, ReviewError>;
