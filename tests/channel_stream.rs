//! Legacy Channel Stream Tests
//!
//! Writer/reader behavior over in-memory streams and config loading from disk.

use std::io::{Cursor, Write};

use nni_legacy_channel::channel::{
    ChannelConfig, ChannelError, ConfigError, HEADER_LEN, MAX_LENGTH_FIELD,
};
use nni_legacy_channel::protocol::{
    Command, DecodeError, ImportData, KillTrialJob, NoMoreTrialJobs, Ping, RequestTrialJobs,
    SendTrialJobParameter, Terminate, TrialEnd,
};
use nni_legacy_channel::{LegacyReader, LegacyWriter};
use serde_json::json;

fn writer() -> LegacyWriter<Vec<u8>> {
    LegacyWriter::new(Vec::new(), ChannelConfig::default())
}

fn reader(bytes: Vec<u8>) -> LegacyReader<Cursor<Vec<u8>>> {
    LegacyReader::new(Cursor::new(bytes), ChannelConfig::default())
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_written_frames_read_back_in_order() {
    let commands: Vec<Command> = vec![
        RequestTrialJobs::new(3).into(),
        TrialEnd::new("job-9", "USER_CANCELED", r#"{"parameter_id":9}"#).into(),
        KillTrialJob::new("job-9").into(),
        Ping.into(),
        Terminate.into(),
    ];

    let mut w = writer();
    for cmd in &commands {
        w.send(cmd).unwrap();
    }

    let received: Vec<Command> = reader(w.into_inner())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(received, commands);
}

#[test]
fn test_wire_bytes_match_legacy_layout() {
    let mut w = writer();
    w.send(&RequestTrialJobs::new(12)).unwrap();
    w.send(&Ping).unwrap();
    assert_eq!(w.into_inner(), b"GE0000000000000212PI00000000000000".to_vec());
}

#[test]
fn test_empty_stream_is_clean_end() {
    let mut r = reader(Vec::new());
    assert!(r.receive().unwrap().is_none());
    assert!(r.receive_command().unwrap().is_none());
}

#[test]
fn test_reader_accepts_bare_no_more_trial_jobs() {
    let mut r = reader(b"NO00000000000000".to_vec());
    let cmd = r.receive_command().unwrap().unwrap();
    assert_eq!(cmd, Command::NoMoreTrialJobs(NoMoreTrialJobs::default()));
}

#[test]
fn test_reader_decodes_structured_parameter_frame() {
    let payload = json!({
        "trial_job_id": "job-3",
        "parameter_source": "customized",
        "parameters": {"lr": 0.5},
        "parameter_index": 1
    })
    .to_string();
    let mut bytes = format!("SP{:014}", payload.len()).into_bytes();
    bytes.extend_from_slice(payload.as_bytes());

    match reader(bytes).receive_command().unwrap().unwrap() {
        Command::SendTrialJobParameter(cmd) => {
            assert_eq!(cmd.trial_job_id.as_deref(), Some("job-3"));
            assert_eq!(cmd.parameter_index, 1);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

// =============================================================================
// Rejected commands never reach the stream
// =============================================================================

#[test]
fn test_invalid_command_writes_nothing() {
    let mut w = writer();
    let err = w.send(&RequestTrialJobs::new(-4)).unwrap_err();
    assert!(matches!(err, ChannelError::Validation(_)));
    assert!(err.is_command_error());
    assert!(w.get_ref().is_empty());
}

#[test]
fn test_unsupported_command_writes_nothing() {
    let cmd: SendTrialJobParameter = serde_json::from_value(json!({
        "trial_job_id": "job-1",
        "parameter_source": "algorithm",
        "parameters": {},
        "parameter_index": 0
    }))
    .unwrap();

    let mut w = writer();
    let err = w.send(&cmd).unwrap_err();
    match err {
        ChannelError::Encoding(e) => assert!(e.is_unsupported()),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(w.get_ref().is_empty());
}

#[test]
fn test_oversized_command_writes_nothing() {
    let config = ChannelConfig {
        max_payload_bytes: 8,
        ..ChannelConfig::default()
    };
    let mut w = LegacyWriter::new(Vec::new(), config);
    let err = w.send(&ImportData::new("[1,2,3,4,5]")).unwrap_err();
    assert!(matches!(err, ChannelError::PayloadTooLarge { size: 11, max: 8 }));
    assert!(w.get_ref().is_empty());

    // The channel stays usable after a rejected command.
    w.send(&Ping).unwrap();
    assert_eq!(w.get_ref().len(), HEADER_LEN);
}

// =============================================================================
// Damaged streams
// =============================================================================

#[test]
fn test_truncated_header() {
    let err = reader(b"KI0000".to_vec()).receive().unwrap_err();
    assert!(matches!(err, ChannelError::TruncatedHeader { actual: 6 }));
    assert!(!err.is_command_error());
}

#[test]
fn test_truncated_payload() {
    let err = reader(b"KI00000000000010job".to_vec()).receive().unwrap_err();
    assert!(matches!(
        err,
        ChannelError::TruncatedPayload { expected: 10, actual: 3 }
    ));
}

#[test]
fn test_unknown_code() {
    let err = reader(b"ZZ00000000000000".to_vec()).receive().unwrap_err();
    assert!(matches!(err, ChannelError::Decode(DecodeError::UnknownCode(_))));
}

#[test]
fn test_reader_enforces_limit_before_reading_payload() {
    let config = ChannelConfig {
        max_payload_bytes: 4,
        ..ChannelConfig::default()
    };
    let mut r = LegacyReader::new(Cursor::new(b"KI00000000000005job-1".to_vec()), config);
    let err = r.receive().unwrap_err();
    assert!(matches!(err, ChannelError::PayloadTooLarge { size: 5, max: 4 }));
}

#[test]
fn test_reader_stays_in_sync_after_oversized_frame() {
    let config = ChannelConfig {
        max_payload_bytes: 4,
        ..ChannelConfig::default()
    };
    let stream = b"KI00000000000005job-1PI00000000000000".to_vec();
    let mut r = LegacyReader::new(Cursor::new(stream), config);

    let err = r.receive_command().unwrap_err();
    assert!(matches!(err, ChannelError::PayloadTooLarge { size: 5, max: 4 }));
    assert!(err.is_command_error());

    // The next frame is read from its own header, not from the skipped payload.
    assert_eq!(r.receive_command().unwrap(), Some(Command::Ping(Ping)));
    assert!(r.receive().unwrap().is_none());
}

#[test]
fn test_oversized_frame_cut_short_is_truncation() {
    let config = ChannelConfig {
        max_payload_bytes: 4,
        ..ChannelConfig::default()
    };
    let mut r = LegacyReader::new(Cursor::new(b"KI00000000000009job".to_vec()), config);
    let err = r.receive().unwrap_err();
    assert!(matches!(
        err,
        ChannelError::TruncatedPayload { expected: 9, actual: 3 }
    ));
    assert!(!err.is_command_error());
}

#[test]
fn test_huge_declared_length_with_short_body() {
    let config = ChannelConfig {
        max_payload_bytes: MAX_LENGTH_FIELD,
        ..ChannelConfig::default()
    };
    let mut r = LegacyReader::new(Cursor::new(b"KI99999999999999abc".to_vec()), config);
    let err = r.receive().unwrap_err();
    assert!(matches!(
        err,
        ChannelError::TruncatedPayload { expected: 99_999_999_999_999, actual: 3 }
    ));
}

#[test]
fn test_invalid_utf8_payload() {
    let mut bytes = b"KI00000000000002".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    let err = reader(bytes).receive().unwrap_err();
    assert!(matches!(err, ChannelError::InvalidUtf8 { command: "KillTrialJob" }));
}

// =============================================================================
// Config file
// =============================================================================

#[test]
fn test_config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_payload_bytes = 65536").unwrap();
    writeln!(file, "flush_each_frame = false").unwrap();

    let config = ChannelConfig::load(file.path()).unwrap();
    assert_eq!(config.max_payload_bytes, 65536);
    assert!(!config.flush_each_frame);
}

#[test]
fn test_config_rejects_limit_beyond_length_field() {
    let result = ChannelConfig::from_toml_str("max_payload_bytes = 100000000000000");
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}
