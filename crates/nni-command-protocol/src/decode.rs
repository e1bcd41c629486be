//! Inbound direction: legacy frames back into commands.
//!
//! Inverts every encoding in [`crate::command`]. Parameter commands that have
//! no outbound legacy form are still accepted here as JSON payloads.

use serde::de::DeserializeOwned;

use crate::code::CommandCode;
use crate::command::*;
use crate::error::DecodeError;
use crate::frame::Frame;

fn from_json<T: DeserializeOwned>(code: CommandCode, payload: &str) -> Result<T, DecodeError> {
    serde_json::from_str(payload).map_err(|source| DecodeError::Json {
        command: code.name(),
        source,
    })
}

fn empty<T>(code: CommandCode, payload: &str, command: T) -> Result<T, DecodeError> {
    if !payload.is_empty() {
        return Err(DecodeError::UnexpectedPayload {
            command: code.name(),
        });
    }
    Ok(command)
}

impl Command {
    /// Rebuild a command from a parsed frame.
    pub fn from_frame(frame: &Frame) -> Result<Self, DecodeError> {
        let code = frame.code();
        let payload = frame.payload();
        let command: Command = match code {
            CommandCode::Initialize => Initialize::new(payload).into(),
            CommandCode::RequestTrialJobs => {
                let job_num = payload.parse::<i64>().map_err(|e| DecodeError::InvalidPayload {
                    command: code.name(),
                    reason: format!("job count {:?}: {}", payload, e),
                })?;
                // Only the form the encoder emits: no sign, no leading zeros.
                if job_num < 0 || job_num.to_string() != payload {
                    return Err(DecodeError::InvalidPayload {
                        command: code.name(),
                        reason: format!("job count {:?} is not a canonical count", payload),
                    });
                }
                RequestTrialJobs::new(job_num).into()
            }
            CommandCode::ReportMetricData => ReportMetricData::new(payload).into(),
            CommandCode::UpdateSearchSpace => UpdateSearchSpace::new(payload).into(),
            CommandCode::ImportData => ImportData::new(payload).into(),
            CommandCode::AddCustomizedTrialJob => {
                empty(code, payload, AddCustomizedTrialJob)?.into()
            }
            CommandCode::TrialEnd => from_json::<TrialEnd>(code, payload)?.into(),
            CommandCode::Terminate => empty(code, payload, Terminate)?.into(),
            CommandCode::Ping => empty(code, payload, Ping)?.into(),
            CommandCode::Initialized => empty(code, payload, Initialized)?.into(),
            CommandCode::NewTrialJob => from_json::<NewTrialJob>(code, payload)?.into(),
            CommandCode::SendTrialJobParameter => {
                from_json::<SendTrialJobParameter>(code, payload)?.into()
            }
            CommandCode::NoMoreTrialJobs => {
                // Older tuners send the bare code.
                if payload.is_empty() {
                    NoMoreTrialJobs::default().into()
                } else {
                    from_json::<NoMoreTrialJobs>(code, payload)?.into()
                }
            }
            CommandCode::KillTrialJob => KillTrialJob::new(payload).into(),
        };
        Ok(command)
    }

    /// Parse a wire string and rebuild the command it carries.
    pub fn decode(wire: &str) -> Result<Self, DecodeError> {
        Self::from_frame(&Frame::parse(wire)?)
    }
}
