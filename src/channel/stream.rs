//! Length-prefixed frames on a byte stream.
//!
//! Each frame on the stream is a 16-byte header followed by the UTF-8
//! payload. The header is the 2-byte command code and the payload byte
//! length as 14 zero-padded decimal digits.

use std::io::{self, Read, Write};

use nni_command_protocol::{frame, Command, CommandCode, Frame, WireCommand};
use tracing::{debug, trace};

use super::config::ChannelConfig;
use super::error::ChannelError;

/// Digits in the length field.
pub const LENGTH_DIGITS: usize = 14;

/// Bytes before every payload.
pub const HEADER_LEN: usize = CommandCode::WIDTH + LENGTH_DIGITS;

/// Serialize one frame with its stream header.
pub fn encode_stream_frame(frame: &Frame, max_payload_bytes: u64) -> Result<Vec<u8>, ChannelError> {
    let payload = frame.payload().as_bytes();
    let size = payload.len() as u64;
    if size > max_payload_bytes {
        return Err(ChannelError::PayloadTooLarge {
            size,
            max: max_payload_bytes,
        });
    }

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(frame.code().as_str().as_bytes());
    bytes.extend_from_slice(format!("{:0width$}", size, width = LENGTH_DIGITS).as_bytes());
    bytes.extend_from_slice(payload);
    Ok(bytes)
}

/// Split a stream header into its command code and payload length.
pub fn parse_header(header: &[u8; HEADER_LEN]) -> Result<(CommandCode, u64), ChannelError> {
    let (token, digits) = header.split_at(CommandCode::WIDTH);

    let token = std::str::from_utf8(token)
        .map_err(|_| ChannelError::MalformedHeader(format!("non-ASCII command code {:?}", token)))?;
    let code = token.parse::<CommandCode>()?;

    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(ChannelError::MalformedHeader(format!(
            "length field {:?} is not {} decimal digits",
            String::from_utf8_lossy(digits),
            LENGTH_DIGITS
        )));
    }
    // All ASCII digits, so both conversions hold.
    let length = std::str::from_utf8(digits)
        .ok()
        .and_then(|d| d.parse::<u64>().ok())
        .ok_or_else(|| ChannelError::MalformedHeader("unreadable length field".to_string()))?;

    Ok((code, length))
}

/// Read until `buf` is full or the stream ends. Returns the bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Outbound half of the legacy channel.
///
/// Owns the stream; callers sharing a channel must serialize access to the
/// writer themselves.
pub struct LegacyWriter<W> {
    writer: W,
    config: ChannelConfig,
}

impl<W: Write> LegacyWriter<W> {
    pub fn new(writer: W, config: ChannelConfig) -> Self {
        Self { writer, config }
    }

    /// Validate, encode and write one command.
    ///
    /// Nothing reaches the stream unless every step succeeds.
    pub fn send<C: WireCommand + ?Sized>(&mut self, command: &C) -> Result<(), ChannelError> {
        command.validate()?;
        let frame = command.to_wire_frame()?;
        self.send_frame(&frame)
    }

    /// Write an already-encoded frame.
    pub fn send_frame(&mut self, frame: &Frame) -> Result<(), ChannelError> {
        let bytes = encode_stream_frame(frame, self.config.max_payload_bytes)?;
        self.writer.write_all(&bytes)?;
        if self.config.flush_each_frame {
            self.writer.flush()?;
        }
        debug!(
            code = %frame.code(),
            payload_len = frame.payload().len(),
            "sent legacy frame"
        );
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ChannelError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Inbound half of the legacy channel.
pub struct LegacyReader<R> {
    reader: R,
    config: ChannelConfig,
}

impl<R: Read> LegacyReader<R> {
    pub fn new(reader: R, config: ChannelConfig) -> Self {
        Self { reader, config }
    }

    /// Read the next frame.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly between frames.
    pub fn receive(&mut self) -> Result<Option<Frame>, ChannelError> {
        let mut header = [0u8; HEADER_LEN];
        let read = read_full(&mut self.reader, &mut header)?;
        if read == 0 {
            trace!("legacy channel closed");
            return Ok(None);
        }
        if read < HEADER_LEN {
            return Err(ChannelError::TruncatedHeader { actual: read });
        }

        let (code, length) = parse_header(&header)?;
        if length > self.config.max_payload_bytes {
            // Drain the payload so the next header starts on a frame boundary.
            let skipped = io::copy(&mut (&mut self.reader).take(length), &mut io::sink())?;
            if skipped < length {
                return Err(ChannelError::TruncatedPayload {
                    expected: length,
                    actual: skipped,
                });
            }
            return Err(ChannelError::PayloadTooLarge {
                size: length,
                max: self.config.max_payload_bytes,
            });
        }

        // Grows with the bytes that actually arrive, not with the header's claim.
        let mut payload = Vec::new();
        let got = (&mut self.reader).take(length).read_to_end(&mut payload)? as u64;
        if got < length {
            return Err(ChannelError::TruncatedPayload {
                expected: length,
                actual: got,
            });
        }
        let payload = String::from_utf8(payload)
            .map_err(|_| ChannelError::InvalidUtf8 { command: code.name() })?;

        debug!(code = %code, payload_len = length, "received legacy frame");
        Ok(Some(frame(code, payload)))
    }

    /// Read the next frame and decode it into a command.
    pub fn receive_command(&mut self) -> Result<Option<Command>, ChannelError> {
        match self.receive()? {
            Some(frame) => Ok(Some(Command::from_frame(&frame)?)),
            None => Ok(None),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for LegacyReader<R> {
    type Item = Result<Command, ChannelError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.receive_command().transpose()
    }
}
