use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;

use crate::sink::Scope;

/// Serial telemetry agent for a sonic 3D anemometer/thermometer.
#[derive(Debug, Parser)]
#[command(name = "sonic3d-agent", about, version)]
pub struct Cli {
    /// Serial device to read frames from.
    #[arg(long, default_value = "/dev/ttyUSB2")]
    pub device: String,

    /// Serial baud rate.
    #[arg(long, default_value_t = 57_600)]
    pub baudrate: u32,

    /// Cadence gate for the node scope, in seconds (non-positive disables it).
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub node_publish_interval: f64,

    /// Cadence gate for the beehive scope, in seconds (non-positive disables it).
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub beehive_publish_interval: f64,

    /// Pause before the next read after a frame fails to decode.
    #[arg(long, default_value = "3s", value_parser = humantime::parse_duration)]
    pub parse_failure_wait: Duration,

    /// Enable per-field publish trace output.
    #[arg(long)]
    pub debug: bool,

    /// Logging verbosity level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Validated runtime configuration for the agent.
#[derive(Debug, Clone)]
pub struct Config {
    /// Serial device path.
    pub device: String,

    /// Serial baud rate.
    pub baudrate: u32,

    /// Node scope cadence in seconds; non-positive disables the scope.
    pub node_publish_interval: f64,

    /// Beehive scope cadence in seconds; non-positive disables the scope.
    pub beehive_publish_interval: f64,

    /// Pause before the next read after a decode failure.
    pub parse_failure_wait: Duration,

    /// Per-field publish trace output.
    pub debug: bool,

    /// Tracing filter directive.
    pub log_level: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            device: cli.device,
            baudrate: cli.baudrate,
            node_publish_interval: cli.node_publish_interval,
            beehive_publish_interval: cli.beehive_publish_interval,
            parse_failure_wait: cli.parse_failure_wait,
            debug: cli.debug,
            log_level: cli.log_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: "/dev/ttyUSB2".to_string(),
            baudrate: 57_600,
            node_publish_interval: 1.0,
            beehive_publish_interval: 1.0,
            parse_failure_wait: Duration::from_secs(3),
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Validate the configuration for required fields and consistency.
    pub fn validate(&self) -> Result<()> {
        if self.device.is_empty() {
            bail!("device path is required");
        }

        if self.baudrate == 0 {
            bail!("baudrate must be positive");
        }

        Ok(())
    }

    /// Cadence gate: a scope publishes only while its interval is positive.
    pub fn scope_enabled(&self, scope: Scope) -> bool {
        match scope {
            Scope::Node => self.node_publish_interval > 0.0,
            Scope::Beehive => self.beehive_publish_interval > 0.0,
        }
    }

    /// Tracing filter directive; `--debug` forces debug verbosity.
    pub fn filter_directive(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }
}
