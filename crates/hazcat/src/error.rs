// Error types for hazcat

use thiserror::Error;

/// Result type for hazcat operations
pub type Result<T> = std::result::Result<T, VerdictError>;

/// Stage of a verdict call at which an error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Configuring,
    Calling,
    Parsing,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::Validating => "validating",
            Stage::Configuring => "configuring",
            Stage::Calling => "calling",
            Stage::Parsing => "parsing",
        }
    }
}

/// Structural problems with the remote reply envelope
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeDefect {
    #[error("missing response object")]
    MissingResponse,

    #[error("missing output text")]
    EmptyOutput,

    #[error("missing message content")]
    MissingMessageContent,

    #[error("missing text output")]
    MissingTextOutput,

    #[error("reply body is not a response envelope: {0}")]
    Undecodable(String),
}

/// Errors that can occur while checking an image
#[derive(Error, Debug)]
pub enum VerdictError {
    #[error("file size exceeds the limit: {decoded_bytes} bytes decoded, limit is {limit}")]
    PayloadTooLarge { decoded_bytes: u64, limit: u64 },

    #[error("invalid file type: {media_type}")]
    UnsupportedMediaType { media_type: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid response format: {0}")]
    MalformedEnvelope(#[from] EnvelopeDefect),

    #[error("model response was not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("model response JSON did not match the verdict shape: {0}")]
    SchemaMismatch(String),
}

impl VerdictError {
    /// The stage of the call that produced this error
    pub fn stage(&self) -> Stage {
        match self {
            VerdictError::PayloadTooLarge { .. } | VerdictError::UnsupportedMediaType { .. } => {
                Stage::Validating
            }
            VerdictError::Config(_) => Stage::Configuring,
            VerdictError::Http(_) | VerdictError::Api { .. } => Stage::Calling,
            VerdictError::MalformedEnvelope(_)
            | VerdictError::InvalidJson(_)
            | VerdictError::SchemaMismatch(_) => Stage::Parsing,
        }
    }
}
