//! End-to-end pipeline tests: scripted transport reads through the polling
//! loop, the frame parser, and the publisher into a recording sink.

use std::io::ErrorKind;
use std::time::{Duration, Instant};

use sonic3d_agent::agent::{Agent, AgentError, Iteration};
use sonic3d_agent::config::Config;
use sonic3d_agent::publish::{MISSING_VALUE, SENSOR_ID};
use sonic3d_agent::sink::fake::RecordingSink;
use sonic3d_agent::sink::{Scope, StatusKey};
use sonic3d_agent::transport::fake::{FakeReadEntry, FakeTransport};

const FRAME: &str = "M1;1.23;-0.45;0.02;21.7;extra";

fn config() -> Config {
    Config {
        parse_failure_wait: Duration::from_millis(25),
        ..Default::default()
    }
}

#[test]
fn test_one_frame_reaches_both_scopes() {
    let mut agent = Agent::new(
        FakeTransport::new(vec![FakeReadEntry::line(FRAME)]),
        RecordingSink::new(),
        config(),
    );

    // The good frame publishes; the exhausted script then reads as silence.
    let err = agent.run().unwrap_err();
    assert!(matches!(err, AgentError::DeviceSilent));

    let sink = agent.sink();
    assert_eq!(sink.measurements.len(), 8);

    let node: Vec<&str> = sink
        .measurements
        .iter()
        .filter(|m| m.scope == Scope::Node)
        .map(|m| m.name)
        .collect();
    let beehive: Vec<&str> = sink
        .measurements
        .iter()
        .filter(|m| m.scope == Scope::Beehive)
        .map(|m| m.name)
        .collect();

    let expected = vec![
        "sonic3d.uwind",
        "sonic3d.vwind",
        "sonic3d.wwind",
        "sonic3d.temp",
    ];
    assert_eq!(node, expected);
    assert_eq!(beehive, expected);

    // All eight measurements carry the frame's single timestamp.
    let ts = sink.measurements[0].timestamp;
    assert!(sink.measurements.iter().all(|m| m.timestamp == ts));
}

#[test]
fn test_decoded_values_and_metadata() {
    let mut agent = Agent::new(
        FakeTransport::new(vec![FakeReadEntry::line(FRAME)]),
        RecordingSink::new(),
        config(),
    );
    let _ = agent.run();

    let sink = agent.sink();
    let temp = sink
        .measurements
        .iter()
        .find(|m| m.name == "sonic3d.temp" && m.scope == Scope::Node)
        .expect("node temp measurement");

    assert_eq!(temp.value, 21.7);
    assert_eq!(temp.meta.units, "degrees Celsius");
    assert_eq!(temp.meta.sensor, SENSOR_ID);
    assert_eq!(temp.meta.missing, MISSING_VALUE);
    assert_eq!(temp.meta.description, "Ambient Temperature");

    let uwind = sink
        .measurements
        .iter()
        .find(|m| m.name == "sonic3d.uwind" && m.scope == Scope::Beehive)
        .expect("beehive uwind measurement");
    assert_eq!(uwind.value, 1.23);
    assert_eq!(uwind.meta.units, "m/s");
    assert_eq!(uwind.meta.description, "E/W wind");
}

#[test]
fn test_node_only_when_beehive_disabled() {
    let cfg = Config {
        beehive_publish_interval: -1.0,
        ..config()
    };
    let mut agent = Agent::new(
        FakeTransport::new(vec![FakeReadEntry::line(FRAME)]),
        RecordingSink::new(),
        cfg,
    );
    let _ = agent.run();

    let sink = agent.sink();
    assert_eq!(sink.measurements.len(), 4);
    assert!(sink.measurements.iter().all(|m| m.scope == Scope::Node));
}

#[test]
fn test_silent_device_publishes_nothing_and_exits() {
    let mut agent = Agent::new(
        FakeTransport::new(vec![FakeReadEntry::silence()]),
        RecordingSink::new(),
        config(),
    );

    let err = agent.run().unwrap_err();
    assert!(matches!(err, AgentError::DeviceSilent));

    let sink = agent.sink();
    assert!(sink.measurements.is_empty());
    assert_eq!(sink.statuses.len(), 1);
    assert_eq!(sink.statuses[0].key, StatusKey::DeviceError);
    assert_eq!(agent.transport().reads(), 1);
}

#[test]
fn test_decode_failure_waits_then_recovers() {
    let mut agent = Agent::new(
        FakeTransport::new(vec![
            FakeReadEntry::line("garbage line"),
            FakeReadEntry::line(FRAME),
        ]),
        RecordingSink::new(),
        config(),
    );

    let start = Instant::now();
    let err = agent.run().unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err, AgentError::DeviceSilent));
    assert!(
        elapsed >= Duration::from_millis(25),
        "next read happened after {elapsed:?}, before the configured wait",
    );

    let sink = agent.sink();
    assert_eq!(sink.measurements.len(), 8);

    let keys: Vec<StatusKey> = sink.statuses.iter().map(|s| s.key).collect();
    assert_eq!(keys, vec![StatusKey::ParsingError, StatusKey::DeviceError]);
}

#[test]
fn test_partial_timed_out_line_is_recoverable() {
    let mut agent = Agent::new(
        FakeTransport::new(vec![
            FakeReadEntry::raw(b"M1;1.23;-0."),
            FakeReadEntry::line(FRAME),
        ]),
        RecordingSink::new(),
        config(),
    );

    let _ = agent.run();

    let sink = agent.sink();
    assert_eq!(sink.measurements.len(), 8);
    assert_eq!(sink.statuses[0].key, StatusKey::ParsingError);
}

#[test]
fn test_transport_error_reports_agent_error() {
    let mut agent = Agent::new(
        FakeTransport::new(vec![FakeReadEntry::error(ErrorKind::Other, "usb reset")]),
        RecordingSink::new(),
        config(),
    );

    let err = agent.run().unwrap_err();
    assert!(matches!(err, AgentError::Transport(_)));

    let sink = agent.sink();
    assert!(sink.measurements.is_empty());
    assert_eq!(sink.statuses.len(), 1);
    assert_eq!(sink.statuses[0].key, StatusKey::AgentError);
}

#[test]
fn test_iterations_are_independent() {
    // Two identical frames publish identical values with distinct reads.
    let mut agent = Agent::new(
        FakeTransport::new(vec![FakeReadEntry::line(FRAME), FakeReadEntry::line(FRAME)]),
        RecordingSink::new(),
        config(),
    );
    let _ = agent.run();

    let sink = agent.sink();
    assert_eq!(sink.measurements.len(), 16);
    assert_eq!(agent.transport().reads(), 3);

    let first_temp = &sink.measurements[3];
    let second_temp = &sink.measurements[11];
    assert_eq!(first_temp.name, "sonic3d.temp");
    assert_eq!(second_temp.name, "sonic3d.temp");
    assert_eq!(first_temp.value, second_temp.value);
}

#[test]
fn test_run_once_outcome_counts() {
    let mut agent = Agent::new(
        FakeTransport::new(vec![FakeReadEntry::line(FRAME)]),
        RecordingSink::new(),
        config(),
    );

    let outcome = agent.run_once().unwrap();
    assert_eq!(outcome, Iteration::Published { fields: 8 });
}
