//! Custom error types for the scan-bundle crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum BundleError {
    /// An error originating from I/O operations (blob store, config files).
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// JSON text could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more fields required for transmission are null.
    ///
    /// Raised before any key is written, so no partial bundle exists.
    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingRequiredParameters(Vec<&'static str>),

    /// The schema generation tag does not name a known key layout.
    #[error("Unsupported schema generation: {0}. Only generations 1 and 2 are supported.")]
    UnsupportedGeneration(u32),

    /// The dependent encoding name is neither `positional` nor `joined`.
    #[error("Unknown dependent encoding: {0}")]
    UnknownDependentScheme(String),

    /// The dependents source is not a JSON array.
    #[error("Malformed dependents source: {0}")]
    MalformedDependents(String),

    /// An image payload is not a usable `data:` URL.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// The base64 payload of a data URL failed to decode.
    #[error("Base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A stored resource could not be turned into a reference.
    #[error("Invalid resource reference: {0}")]
    InvalidResourceRef(#[from] url::ParseError),

    /// The bridge was not launched by the host with the expected action.
    #[error("Not launched by the host application (action: {0:?})")]
    UnexpectedLaunch(Option<String>),

    /// The transport refused or failed to deliver the envelope.
    #[error("Transport failed: {0}")]
    Transport(String),
}

/// A convenience `Result` type alias using the crate's `BundleError` type.
pub type Result<T> = std::result::Result<T, BundleError>;
