use std::path::PathBuf;

use thiserror::Error;

/// Misuse of the form schema or of a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The path is not declared in the schema.
    #[error("unknown field path: {0}")]
    UnknownPath(String),

    /// The path string is not a well-formed dotted identifier.
    #[error("invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The schema already declares this path.
    #[error("duplicate field path: {0}")]
    DuplicatePath(String),

    /// One path is a prefix of another, so both cannot be leaves.
    #[error("field path '{path}' conflicts with '{existing}'")]
    ConflictingPath { path: String, existing: String },

    /// The snapshot does not match the requested payload type.
    #[error("snapshot decode failed: {0}")]
    Decode(String),
}

/// Why a submit trigger did not start a submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRefused {
    #[error("form has invalid fields (first: {first_invalid})")]
    NotSubmittable { first_invalid: String },

    #[error("a submission is already in flight")]
    AlreadySubmitting,
}

/// Failure reported by the submission sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("sink rejected payload with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("response decode failed: {0}")]
    Decode(String),
}

/// Failure reported by the user record source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("user records could not be decoded: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
