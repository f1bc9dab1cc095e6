//! Serial port transport.

use std::io::{self, Read};
use std::time::Duration;

use anyhow::{Context, Result};
use serialport::SerialPort;
use tracing::debug;

use super::{Transport, LINE_DELIMITER};

/// Per-read timeout on the serial port. A device that stays silent for this
/// long produces an empty read, which the polling loop treats as fatal.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Transport over a physical serial port, 8N1 framing.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open `path` at `baud` with the fixed read timeout.
    pub fn open(path: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(path, baud)
            .timeout(READ_TIMEOUT)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None)
            .open()
            .with_context(|| format!("opening serial port {path}"))?;

        debug!(path, baud, "serial port open");

        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        buf.clear();

        let mut byte = [0u8; 1];
        loop {
            match self.port.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    buf.push(byte[0]);
                    if byte[0] == LINE_DELIMITER {
                        break;
                    }
                }
                // An exhausted read timeout surfaces as TimedOut; return
                // whatever arrived before it.
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(buf.len())
    }
}
