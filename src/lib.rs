//! Serial telemetry agent for a sonic 3D anemometer/thermometer.
//!
//! Reads line-oriented ASCII frames from a serial-attached device, decodes
//! the {U, V, W, T} measurement set, and republishes each field as a named
//! metric to the node and beehive scopes.

pub mod agent;
pub mod config;
pub mod frame;
pub mod publish;
pub mod sink;
pub mod transport;
