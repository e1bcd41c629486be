//! Channel error type

use std::io;

use nni_command_protocol::{DecodeError, EncodingError, ValidationError};

/// Errors raised while moving frames over a byte stream
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Command failed validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("Command could not be encoded: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Frame could not be decoded: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Payload exceeds size limit: {size} bytes > {max} bytes")]
    PayloadTooLarge { size: u64, max: u64 },

    #[error("Malformed frame header: {0}")]
    MalformedHeader(String),

    #[error("Stream ended inside a frame header ({actual} bytes read)")]
    TruncatedHeader { actual: usize },

    #[error("Stream ended inside a payload: {actual} of {expected} bytes read")]
    TruncatedPayload { expected: u64, actual: u64 },

    #[error("{command} payload is not valid UTF-8")]
    InvalidUtf8 { command: &'static str },
}

impl ChannelError {
    /// Whether the command itself is at fault, as opposed to the stream.
    ///
    /// Command errors leave the stream usable; stream errors do not.
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Encoding(_) | Self::PayloadTooLarge { .. }
        )
    }
}
