use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use sonic3d_agent::agent::Agent;
use sonic3d_agent::config::{Cli, Config};
use sonic3d_agent::sink::jsonl::JsonlSink;
use sonic3d_agent::transport::SerialTransport;

fn main() -> Result<()> {
    let cfg = Config::from(Cli::parse());

    // Initialize tracing. Logs go to stderr; stdout carries the JSONL
    // measurement stream.
    let filter = EnvFilter::try_new(cfg.filter_directive())
        .with_context(|| format!("invalid log level: {}", cfg.filter_directive()))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    cfg.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        device = %cfg.device,
        baudrate = cfg.baudrate,
        "starting sonic3d-agent",
    );

    let transport = SerialTransport::open(&cfg.device, cfg.baudrate)
        .with_context(|| format!("opening device {}", cfg.device))?;
    let sink = JsonlSink::stdout();

    // The loop only returns on a fatal condition; the transport and sink are
    // released on every exit path when the agent drops.
    let mut agent = Agent::new(transport, sink, cfg);
    agent.run().context("agent loop terminated")?;

    Ok(())
}
