//! Error types for command validation, encoding and decoding.

/// A command failed its pre-encoding check.
///
/// Always recoverable: the command must not be encoded, and the error goes
/// back to whoever built it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{command}: {field} is not set")]
    MissingField {
        command: &'static str,
        field: &'static str,
    },

    #[error("{command}: {field} must be non-negative, got {value}")]
    OutOfRange {
        command: &'static str,
        field: &'static str,
        value: i64,
    },
}

impl ValidationError {
    /// Name of the command that failed validation.
    pub fn command(&self) -> &'static str {
        match self {
            Self::MissingField { command, .. } | Self::OutOfRange { command, .. } => command,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field, .. } | Self::OutOfRange { field, .. } => field,
        }
    }
}

/// A command could not be turned into a legacy frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// The command has no legacy wire form. Not retryable.
    #[error("{command} has no legacy wire encoding")]
    Unsupported { command: &'static str },

    /// A field was invalid at encode time, so validation was skipped or is
    /// out of step with the encoder.
    #[error("{command}: invalid field {field}: {reason}")]
    InvalidField {
        command: &'static str,
        field: &'static str,
        reason: String,
    },
}

impl EncodingError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// A frame could not be turned back into a command.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown command code: {0:?}")]
    UnknownCode(String),

    #[error("frame of {len} bytes is shorter than a command code")]
    Truncated { len: usize },

    #[error("{command} takes no payload")]
    UnexpectedPayload { command: &'static str },

    #[error("{command}: invalid payload: {reason}")]
    InvalidPayload {
        command: &'static str,
        reason: String,
    },

    #[error("{command}: malformed JSON payload: {source}")]
    Json {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
