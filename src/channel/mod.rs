//! Legacy command channel over a byte stream
//!
//! Wraps the pure protocol encoder with the stream framing used between the
//! experiment manager and tuner processes:
//! - `LegacyWriter`: validate, encode and write commands
//! - `LegacyReader`: read frames and decode them into commands
//! - `ChannelConfig`: payload limit and flush policy

mod config;
mod error;
mod stream;

pub use config::{ChannelConfig, ConfigError, DEFAULT_MAX_PAYLOAD_BYTES, MAX_LENGTH_FIELD};
pub use error::ChannelError;
pub use stream::{
    encode_stream_frame, parse_header, LegacyReader, LegacyWriter, HEADER_LEN, LENGTH_DIGITS,
};
