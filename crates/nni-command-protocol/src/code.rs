//! Wire-code registry.
//!
//! Every frame on the legacy channel starts with one of these fixed-width
//! tokens. The registry is closed and must match the decoder on the other
//! side of the channel exactly.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// Command codes shared by the encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandCode {
    /// Send the initial search space to the tuner.
    Initialize,
    /// Ask the tuner for a number of new trial jobs.
    RequestTrialJobs,
    /// Forward a metric reported by a trial.
    ReportMetricData,
    /// Replace the search space of a running experiment.
    UpdateSearchSpace,
    /// Import results from previous experiments.
    ImportData,
    /// A user added a trial with custom parameters.
    AddCustomizedTrialJob,
    /// A trial reached a terminal state.
    TrialEnd,
    /// Shut the tuner down.
    Terminate,
    /// Liveness check.
    Ping,
    /// The tuner finished initialization.
    Initialized,
    /// The tuner generated a new trial.
    NewTrialJob,
    /// The tuner sent extra parameters to a running trial.
    SendTrialJobParameter,
    /// The tuner has no more trials to hand out.
    NoMoreTrialJobs,
    /// Kill a running trial.
    KillTrialJob,
}

impl CommandCode {
    /// Byte width of every wire token.
    pub const WIDTH: usize = 2;

    /// The full registry, in declaration order.
    pub const ALL: [CommandCode; 14] = [
        Self::Initialize,
        Self::RequestTrialJobs,
        Self::ReportMetricData,
        Self::UpdateSearchSpace,
        Self::ImportData,
        Self::AddCustomizedTrialJob,
        Self::TrialEnd,
        Self::Terminate,
        Self::Ping,
        Self::Initialized,
        Self::NewTrialJob,
        Self::SendTrialJobParameter,
        Self::NoMoreTrialJobs,
        Self::KillTrialJob,
    ];

    /// Returns the wire token for this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "IN",
            Self::RequestTrialJobs => "GE",
            Self::ReportMetricData => "ME",
            Self::UpdateSearchSpace => "SS",
            Self::ImportData => "FD",
            Self::AddCustomizedTrialJob => "AD",
            Self::TrialEnd => "EN",
            Self::Terminate => "TE",
            Self::Ping => "PI",
            Self::Initialized => "ID",
            Self::NewTrialJob => "TR",
            Self::SendTrialJobParameter => "SP",
            Self::NoMoreTrialJobs => "NO",
            Self::KillTrialJob => "KI",
        }
    }

    /// Returns the command name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Initialize => "Initialize",
            Self::RequestTrialJobs => "RequestTrialJobs",
            Self::ReportMetricData => "ReportMetricData",
            Self::UpdateSearchSpace => "UpdateSearchSpace",
            Self::ImportData => "ImportData",
            Self::AddCustomizedTrialJob => "AddCustomizedTrialJob",
            Self::TrialEnd => "TrialEnd",
            Self::Terminate => "Terminate",
            Self::Ping => "Ping",
            Self::Initialized => "Initialized",
            Self::NewTrialJob => "NewTrialJob",
            Self::SendTrialJobParameter => "SendTrialJobParameter",
            Self::NoMoreTrialJobs => "NoMoreTrialJobs",
            Self::KillTrialJob => "KillTrialJob",
        }
    }

    /// Look up a code by its wire token.
    pub fn from_wire(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == token)
    }

    /// Whether outbound frames can be produced for this code.
    ///
    /// Tuner-originated parameter commands have no legacy outbound form yet.
    pub const fn has_legacy_encoding(self) -> bool {
        !matches!(
            self,
            Self::NewTrialJob | Self::SendTrialJobParameter | Self::NoMoreTrialJobs
        )
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandCode {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s).ok_or_else(|| DecodeError::UnknownCode(s.to_string()))
    }
}
