//! Command model.
//!
//! One struct per legacy command, wrapped by [`Command`]. Structured
//! variants are built from snake_case payloads through serde; optional
//! entries may be omitted and come back as `None`.

use serde::{Deserialize, Serialize};

use crate::code::CommandCode;
use crate::error::{EncodingError, ValidationError};
use crate::frame::{encode_struct, frame, Frame};

/// Capabilities shared by every command.
pub trait WireCommand {
    /// Registry code that prefixes this command's frame.
    fn code(&self) -> CommandCode;

    /// Check field constraints. Must pass before [`WireCommand::to_wire_frame`].
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Encode into a legacy frame.
    fn to_wire_frame(&self) -> Result<Frame, EncodingError>;
}

fn unsupported(code: CommandCode) -> EncodingError {
    EncodingError::Unsupported {
        command: code.name(),
    }
}

fn non_negative(
    code: CommandCode,
    field: &'static str,
    value: i64,
) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            command: code.name(),
            field,
            value,
        });
    }
    Ok(())
}

/// Initial search space, as pre-serialized JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Initialize {
    pub search_space: String,
}

impl Initialize {
    pub fn new(search_space: impl Into<String>) -> Self {
        Self {
            search_space: search_space.into(),
        }
    }
}

impl WireCommand for Initialize {
    fn code(&self) -> CommandCode {
        CommandCode::Initialize
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Ok(frame(self.code(), self.search_space.as_str()))
    }
}

/// Ask the tuner for `job_num` new trials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestTrialJobs {
    pub job_num: i64,
}

impl RequestTrialJobs {
    pub fn new(job_num: i64) -> Self {
        Self { job_num }
    }
}

impl WireCommand for RequestTrialJobs {
    fn code(&self) -> CommandCode {
        CommandCode::RequestTrialJobs
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_negative(self.code(), "job_num", self.job_num)
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        if self.job_num < 0 {
            return Err(EncodingError::InvalidField {
                command: self.code().name(),
                field: "job_num",
                reason: format!("negative job count {}", self.job_num),
            });
        }
        Ok(frame(self.code(), self.job_num.to_string()))
    }
}

/// Metric reported by a trial, as pre-serialized JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportMetricData {
    pub metric_data: String,
}

impl ReportMetricData {
    pub fn new(metric_data: impl Into<String>) -> Self {
        Self {
            metric_data: metric_data.into(),
        }
    }
}

impl WireCommand for ReportMetricData {
    fn code(&self) -> CommandCode {
        CommandCode::ReportMetricData
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Ok(frame(self.code(), self.metric_data.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSearchSpace {
    pub search_space: String,
}

impl UpdateSearchSpace {
    pub fn new(search_space: impl Into<String>) -> Self {
        Self {
            search_space: search_space.into(),
        }
    }
}

impl WireCommand for UpdateSearchSpace {
    fn code(&self) -> CommandCode {
        CommandCode::UpdateSearchSpace
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Ok(frame(self.code(), self.search_space.as_str()))
    }
}

/// Historical trial results, as a pre-serialized JSON list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportData {
    pub data: String,
}

impl ImportData {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

impl WireCommand for ImportData {
    fn code(&self) -> CommandCode {
        CommandCode::ImportData
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Ok(frame(self.code(), self.data.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCustomizedTrialJob;

impl WireCommand for AddCustomizedTrialJob {
    fn code(&self) -> CommandCode {
        CommandCode::AddCustomizedTrialJob
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Ok(frame(self.code(), ""))
    }
}

/// A trial reached a terminal state.
///
/// Encoded as a JSON object whose keys appear in declaration order; the
/// remote decoder depends on that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrialEnd {
    pub trial_job_id: String,
    /// Terminal event, e.g. `SUCCEEDED` or `FAILED`.
    pub event: String,
    /// Hyperparameters of the trial, as pre-serialized JSON.
    pub hyper_params: String,
}

impl TrialEnd {
    pub fn new(
        trial_job_id: impl Into<String>,
        event: impl Into<String>,
        hyper_params: impl Into<String>,
    ) -> Self {
        Self {
            trial_job_id: trial_job_id.into(),
            event: event.into(),
            hyper_params: hyper_params.into(),
        }
    }
}

impl WireCommand for TrialEnd {
    fn code(&self) -> CommandCode {
        CommandCode::TrialEnd
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        let payload = encode_struct(&[
            ("trial_job_id", self.trial_job_id.as_str()),
            ("event", self.event.as_str()),
            ("hyper_params", self.hyper_params.as_str()),
        ])
        .map_err(|e| EncodingError::InvalidField {
            command: self.code().name(),
            field: "hyper_params",
            reason: e.to_string(),
        })?;
        Ok(frame(self.code(), payload))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KillTrialJob {
    pub trial_job_id: String,
}

impl KillTrialJob {
    pub fn new(trial_job_id: impl Into<String>) -> Self {
        Self {
            trial_job_id: trial_job_id.into(),
        }
    }
}

impl WireCommand for KillTrialJob {
    fn code(&self) -> CommandCode {
        CommandCode::KillTrialJob
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Ok(frame(self.code(), self.trial_job_id.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terminate;

impl WireCommand for Terminate {
    fn code(&self) -> CommandCode {
        CommandCode::Terminate
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Ok(frame(self.code(), ""))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ping;

impl WireCommand for Ping {
    fn code(&self) -> CommandCode {
        CommandCode::Ping
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Ok(frame(self.code(), ""))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initialized;

impl WireCommand for Initialized {
    fn code(&self) -> CommandCode {
        CommandCode::Initialized
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Ok(frame(self.code(), ""))
    }
}

/// Where a trial may run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementConstraint {
    #[serde(rename = "type")]
    pub kind: PlacementKind,
    #[serde(default)]
    pub gpus: Vec<GpuPlacement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementKind {
    None,
    #[serde(rename = "GPUNumber")]
    GpuNumber,
    Device,
}

/// One `gpus` entry: a GPU count, or a `[host, gpu_index]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GpuPlacement {
    Count(u32),
    Device(String, u32),
}

/// A trial generated by the tuner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTrialJob {
    pub parameter_id: i64,
    pub parameters: serde_json::Value,
    pub parameter_source: String,
    #[serde(default)]
    pub parameter_index: Option<i64>,
    #[serde(default)]
    pub placement_constraint: Option<PlacementConstraint>,
    #[serde(default)]
    pub version_info: Option<String>,
}

impl WireCommand for NewTrialJob {
    fn code(&self) -> CommandCode {
        CommandCode::NewTrialJob
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Err(unsupported(self.code()))
    }
}

/// Extra parameters for a trial that is already running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendTrialJobParameter {
    #[serde(default)]
    pub trial_job_id: Option<String>,
    #[serde(default)]
    pub parameter_id: Option<i64>,
    pub parameter_source: String,
    pub parameters: serde_json::Value,
    pub parameter_index: i64,
}

impl WireCommand for SendTrialJobParameter {
    fn code(&self) -> CommandCode {
        CommandCode::SendTrialJobParameter
    }

    fn validate(&self) -> Result<(), ValidationError> {
        non_negative(self.code(), "parameter_index", self.parameter_index)?;
        if self.trial_job_id.is_none() {
            return Err(ValidationError::MissingField {
                command: self.code().name(),
                field: "trial_job_id",
            });
        }
        Ok(())
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Err(unsupported(self.code()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoMoreTrialJobs {
    #[serde(default)]
    pub parameter_id: Option<i64>,
    #[serde(default)]
    pub parameter_source: Option<String>,
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
    #[serde(default)]
    pub parameter_index: Option<i64>,
}

impl WireCommand for NoMoreTrialJobs {
    fn code(&self) -> CommandCode {
        CommandCode::NoMoreTrialJobs
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        Err(unsupported(self.code()))
    }
}

/// Any legacy command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Initialize(Initialize),
    RequestTrialJobs(RequestTrialJobs),
    ReportMetricData(ReportMetricData),
    UpdateSearchSpace(UpdateSearchSpace),
    ImportData(ImportData),
    AddCustomizedTrialJob(AddCustomizedTrialJob),
    TrialEnd(TrialEnd),
    KillTrialJob(KillTrialJob),
    Terminate(Terminate),
    Ping(Ping),
    Initialized(Initialized),
    NewTrialJob(NewTrialJob),
    SendTrialJobParameter(SendTrialJobParameter),
    NoMoreTrialJobs(NoMoreTrialJobs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        self.code().name()
    }
}

impl WireCommand for Command {
    fn code(&self) -> CommandCode {
        match self {
            Self::Initialize(c) => c.code(),
            Self::RequestTrialJobs(c) => c.code(),
            Self::ReportMetricData(c) => c.code(),
            Self::UpdateSearchSpace(c) => c.code(),
            Self::ImportData(c) => c.code(),
            Self::AddCustomizedTrialJob(c) => c.code(),
            Self::TrialEnd(c) => c.code(),
            Self::KillTrialJob(c) => c.code(),
            Self::Terminate(c) => c.code(),
            Self::Ping(c) => c.code(),
            Self::Initialized(c) => c.code(),
            Self::NewTrialJob(c) => c.code(),
            Self::SendTrialJobParameter(c) => c.code(),
            Self::NoMoreTrialJobs(c) => c.code(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Initialize(c) => c.validate(),
            Self::RequestTrialJobs(c) => c.validate(),
            Self::ReportMetricData(c) => c.validate(),
            Self::UpdateSearchSpace(c) => c.validate(),
            Self::ImportData(c) => c.validate(),
            Self::AddCustomizedTrialJob(c) => c.validate(),
            Self::TrialEnd(c) => c.validate(),
            Self::KillTrialJob(c) => c.validate(),
            Self::Terminate(c) => c.validate(),
            Self::Ping(c) => c.validate(),
            Self::Initialized(c) => c.validate(),
            Self::NewTrialJob(c) => c.validate(),
            Self::SendTrialJobParameter(c) => c.validate(),
            Self::NoMoreTrialJobs(c) => c.validate(),
        }
    }

    fn to_wire_frame(&self) -> Result<Frame, EncodingError> {
        match self {
            Self::Initialize(c) => c.to_wire_frame(),
            Self::RequestTrialJobs(c) => c.to_wire_frame(),
            Self::ReportMetricData(c) => c.to_wire_frame(),
            Self::UpdateSearchSpace(c) => c.to_wire_frame(),
            Self::ImportData(c) => c.to_wire_frame(),
            Self::AddCustomizedTrialJob(c) => c.to_wire_frame(),
            Self::TrialEnd(c) => c.to_wire_frame(),
            Self::KillTrialJob(c) => c.to_wire_frame(),
            Self::Terminate(c) => c.to_wire_frame(),
            Self::Ping(c) => c.to_wire_frame(),
            Self::Initialized(c) => c.to_wire_frame(),
            Self::NewTrialJob(c) => c.to_wire_frame(),
            Self::SendTrialJobParameter(c) => c.to_wire_frame(),
            Self::NoMoreTrialJobs(c) => c.to_wire_frame(),
        }
    }
}

impl From<Initialize> for Command {
    fn from(c: Initialize) -> Self {
        Self::Initialize(c)
    }
}

impl From<RequestTrialJobs> for Command {
    fn from(c: RequestTrialJobs) -> Self {
        Self::RequestTrialJobs(c)
    }
}

impl From<ReportMetricData> for Command {
    fn from(c: ReportMetricData) -> Self {
        Self::ReportMetricData(c)
    }
}

impl From<UpdateSearchSpace> for Command {
    fn from(c: UpdateSearchSpace) -> Self {
        Self::UpdateSearchSpace(c)
    }
}

impl From<ImportData> for Command {
    fn from(c: ImportData) -> Self {
        Self::ImportData(c)
    }
}

impl From<AddCustomizedTrialJob> for Command {
    fn from(c: AddCustomizedTrialJob) -> Self {
        Self::AddCustomizedTrialJob(c)
    }
}

impl From<TrialEnd> for Command {
    fn from(c: TrialEnd) -> Self {
        Self::TrialEnd(c)
    }
}

impl From<KillTrialJob> for Command {
    fn from(c: KillTrialJob) -> Self {
        Self::KillTrialJob(c)
    }
}

impl From<Terminate> for Command {
    fn from(c: Terminate) -> Self {
        Self::Terminate(c)
    }
}

impl From<Ping> for Command {
    fn from(c: Ping) -> Self {
        Self::Ping(c)
    }
}

impl From<Initialized> for Command {
    fn from(c: Initialized) -> Self {
        Self::Initialized(c)
    }
}

impl From<NewTrialJob> for Command {
    fn from(c: NewTrialJob) -> Self {
        Self::NewTrialJob(c)
    }
}

impl From<SendTrialJobParameter> for Command {
    fn from(c: SendTrialJobParameter) -> Self {
        Self::SendTrialJobParameter(c)
    }
}

impl From<NoMoreTrialJobs> for Command {
    fn from(c: NoMoreTrialJobs) -> Self {
        Self::NoMoreTrialJobs(c)
    }
}
