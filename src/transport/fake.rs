//! Scriptable transport used in tests.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use super::Transport;

/// One scripted read response.
pub struct FakeReadEntry {
    response: io::Result<Vec<u8>>,
    delay: Option<Duration>,
}

impl FakeReadEntry {
    /// A complete line; the delimiter is appended.
    pub fn line(text: &str) -> Self {
        Self {
            response: Ok(format!("{text}\n").into_bytes()),
            delay: None,
        }
    }

    /// Raw bytes as read, e.g. a timed-out partial line without a delimiter.
    pub fn raw(bytes: &[u8]) -> Self {
        Self {
            response: Ok(bytes.to_vec()),
            delay: None,
        }
    }

    /// A read cycle during which the device stayed silent.
    pub fn silence() -> Self {
        Self {
            response: Ok(Vec::new()),
            delay: None,
        }
    }

    /// A failing read.
    pub fn error(kind: io::ErrorKind, message: &str) -> Self {
        Self {
            response: Err(io::Error::new(kind, message.to_string())),
            delay: None,
        }
    }

    /// Delay the response, simulating a slow device.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Minimal fake transport that scripts successive reads.
///
/// An exhausted script reads as a silent device.
#[derive(Default)]
pub struct FakeTransport {
    script: VecDeque<FakeReadEntry>,
    reads: usize,
}

impl FakeTransport {
    pub fn new(script: Vec<FakeReadEntry>) -> Self {
        Self {
            script: script.into(),
            reads: 0,
        }
    }

    /// Number of read calls made so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Transport for FakeTransport {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        buf.clear();
        self.reads += 1;

        match self.script.pop_front() {
            Some(entry) => {
                if let Some(delay) = entry.delay {
                    std::thread::sleep(delay);
                }
                let bytes = entry.response?;
                buf.extend_from_slice(&bytes);
                Ok(buf.len())
            }
            None => Ok(0),
        }
    }
}
