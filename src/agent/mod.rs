//! Polling loop and error policy.
//!
//! One iteration performs exactly one blocking read and ends in one of three
//! outcomes: a silent device (fatal for the process), a frame that failed to
//! decode (recoverable after a bounded pause), or a decoded sample published
//! to every enabled scope under one shared timestamp.

use std::io;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::frame::parse_frame;
use crate::publish::{publish_sample, METRIC_SPECS};
use crate::sink::{Scope, Sink, StatusEvent, StatusKey};
use crate::transport::Transport;

/// Errors that terminate the polling loop.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The device produced no bytes for a full read timeout. Later
    /// iterations cannot self-correct a dead link, so this ends the process.
    #[error("device silent: no bytes within the read timeout")]
    DeviceSilent,

    #[error("transport read failed")]
    Transport(#[source] io::Error),

    #[error("sink publish failed: {0}")]
    Sink(#[source] anyhow::Error),
}

/// Outcome of one recoverable loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iteration {
    /// A frame decoded and was published to every enabled scope.
    Published { fields: usize },
    /// A frame was read but failed to decode; retry after the configured wait.
    DecodeFailed,
}

/// Agent owns the transport and sink and drives the read cycle.
pub struct Agent<T: Transport, S: Sink> {
    transport: T,
    sink: S,
    cfg: Config,
    line: Vec<u8>,
}

impl<T: Transport, S: Sink> Agent<T, S> {
    pub fn new(transport: T, sink: S, cfg: Config) -> Self {
        Self {
            transport,
            sink,
            cfg,
            line: Vec::new(),
        }
    }

    /// The sink, for post-run inspection.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The transport, for post-run inspection.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the polling loop until a fatal error.
    ///
    /// Decode failures pause for the configured wait and continue; every
    /// other failure is reported once and terminates the loop.
    pub fn run(&mut self) -> Result<(), AgentError> {
        info!(sink = self.sink.name(), "agent started");

        loop {
            match self.run_once() {
                Ok(Iteration::Published { fields }) => {
                    info!(fields, "published frame");
                }
                Ok(Iteration::DecodeFailed) => {
                    std::thread::sleep(self.cfg.parse_failure_wait);
                }
                Err(err) => {
                    self.report_fatal(&err);
                    return Err(err);
                }
            }
        }
    }

    /// Execute exactly one read → parse → publish iteration.
    pub fn run_once(&mut self) -> Result<Iteration, AgentError> {
        let n = self
            .transport
            .read_line(&mut self.line)
            .map_err(AgentError::Transport)?;

        if n == 0 {
            if let Err(err) = self.sink.publish_status(&StatusEvent::new(
                StatusKey::DeviceError,
                "no bytes received within the read timeout",
            )) {
                // A failing sink must not mask the fatal device condition.
                error!(error = %err, "failed to publish device_error status");
            }
            return Err(AgentError::DeviceSilent);
        }

        // One timestamp per read, shared by every metric and scope below.
        let timestamp = Utc::now();

        let sample = match parse_frame(&self.line) {
            Ok(sample) => sample,
            Err(err) => {
                warn!(error = %err, "frame failed to decode");
                self.sink
                    .publish_status(&StatusEvent::new(StatusKey::ParsingError, err.to_string()))
                    .map_err(AgentError::Sink)?;
                return Ok(Iteration::DecodeFailed);
            }
        };

        let mut fields = 0;
        for scope in Scope::all() {
            if !self.cfg.scope_enabled(*scope) {
                continue;
            }

            let outcome = publish_sample(&mut self.sink, &sample, timestamp, *scope, &METRIC_SPECS)
                .map_err(AgentError::Sink)?;
            fields += outcome.published;
        }

        Ok(Iteration::Published { fields })
    }

    /// Top-level error boundary: report a fatal error exactly once.
    fn report_fatal(&mut self, err: &AgentError) {
        error!(error = %err, "agent terminating");

        // The device-silent path already carried its own status event.
        if matches!(err, AgentError::DeviceSilent) {
            return;
        }

        if let Err(status_err) = self
            .sink
            .publish_status(&StatusEvent::new(StatusKey::AgentError, err.to_string()))
        {
            error!(error = %status_err, "failed to publish agent_error status");
        }
    }
}
