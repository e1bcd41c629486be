//! Legacy frame primitives.
//!
//! A frame is a command code immediately followed by its payload. No length
//! or delimiter is added here; stream framing belongs to the transport.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::code::CommandCode;
use crate::error::DecodeError;

/// One encoded command: wire code plus payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    code: CommandCode,
    payload: String,
}

impl Frame {
    pub fn code(&self) -> CommandCode {
        self.code
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The frame as it appears on the wire.
    pub fn to_wire_string(&self) -> String {
        let mut wire = String::with_capacity(CommandCode::WIDTH + self.payload.len());
        wire.push_str(self.code.as_str());
        wire.push_str(&self.payload);
        wire
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.to_wire_string().into_bytes()
    }

    /// Split a wire string into its code and payload.
    pub fn parse(wire: &str) -> Result<Self, DecodeError> {
        if wire.len() < CommandCode::WIDTH {
            return Err(DecodeError::Truncated { len: wire.len() });
        }
        // Tokens are ASCII; a multi-byte char straddling the code is never one.
        if !wire.is_char_boundary(CommandCode::WIDTH) {
            return Err(DecodeError::UnknownCode(
                wire.chars().take(CommandCode::WIDTH).collect(),
            ));
        }
        let (token, payload) = wire.split_at(CommandCode::WIDTH);
        let code = token.parse::<CommandCode>()?;
        Ok(frame(code, payload))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.code, self.payload)
    }
}

/// Build a frame from a code and an already-encoded payload.
pub fn frame(code: CommandCode, payload: impl Into<String>) -> Frame {
    Frame {
        code,
        payload: payload.into(),
    }
}

/// Render string fields as a compact JSON object, keeping the given order.
pub fn encode_struct(fields: &[(&str, &str)]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&OrderedFields(fields))
}

struct OrderedFields<'a>(&'a [(&'a str, &'a str)]);

impl Serialize for OrderedFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_concatenates_without_delimiter() {
        let f = frame(CommandCode::KillTrialJob, "job-42");
        assert_eq!(f.to_wire_string(), "KIjob-42");
        assert_eq!(f.to_string(), "KIjob-42");
        assert_eq!(f.into_bytes(), b"KIjob-42".to_vec());
    }

    #[test]
    fn test_encode_struct_keeps_order() {
        let encoded = encode_struct(&[("zeta", "1"), ("alpha", "2"), ("mid", "3")]).unwrap();
        assert_eq!(encoded, r#"{"zeta":"1","alpha":"2","mid":"3"}"#);
    }

    #[test]
    fn test_encode_struct_escapes_values() {
        let encoded = encode_struct(&[("hyper_params", r#"{"lr":0.1}"#)]).unwrap();
        assert_eq!(encoded, r#"{"hyper_params":"{\"lr\":0.1}"}"#);
    }

    #[test]
    fn test_parse_splits_code() {
        let f = Frame::parse("GE12").unwrap();
        assert_eq!(f.code(), CommandCode::RequestTrialJobs);
        assert_eq!(f.payload(), "12");

        let empty = Frame::parse("PI").unwrap();
        assert_eq!(empty.code(), CommandCode::Ping);
        assert_eq!(empty.payload(), "");
    }

    #[test]
    fn test_parse_rejects_short_and_unknown() {
        assert!(matches!(Frame::parse("P"), Err(DecodeError::Truncated { len: 1 })));
        assert!(matches!(Frame::parse("QQpayload"), Err(DecodeError::UnknownCode(_))));
        assert!(matches!(Frame::parse("Iй"), Err(DecodeError::UnknownCode(_))));
    }
}
