//! Legacy tuner command protocol.
//!
//! Defines the closed set of commands exchanged between the experiment
//! manager and the tuner over the legacy command channel, their validation
//! rules, and the frame encoding older peers expect.
//!
//! Lifecycle of an outbound command: construct, [`WireCommand::validate`],
//! then [`WireCommand::to_wire_frame`]. Everything here is pure.

pub mod code;
pub mod command;
pub mod decode;
pub mod error;
pub mod frame;

pub use code::CommandCode;
pub use command::{
    AddCustomizedTrialJob, Command, GpuPlacement, ImportData, Initialize, Initialized,
    KillTrialJob, NewTrialJob, NoMoreTrialJobs, Ping, PlacementConstraint, PlacementKind,
    ReportMetricData, RequestTrialJobs, SendTrialJobParameter, Terminate, TrialEnd,
    UpdateSearchSpace, WireCommand,
};
pub use error::{DecodeError, EncodingError, ValidationError};
pub use frame::{encode_struct, frame, Frame};
