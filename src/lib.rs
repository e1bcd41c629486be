//! NNI Legacy Channel - tuner command channel
//!
//! Carries typed control and status commands between the experiment manager
//! and tuner processes over a byte stream, in the legacy format older peers
//! still speak. The command model and encoder live in
//! [`nni_command_protocol`], re-exported here as [`protocol`].

pub mod channel;

pub use nni_command_protocol as protocol;

pub use channel::{ChannelConfig, ChannelError, ConfigError, LegacyReader, LegacyWriter};
pub use protocol::{Command, CommandCode, Frame, WireCommand};
