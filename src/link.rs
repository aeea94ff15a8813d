use serialport::SerialPort;
use std::io::{Read, Write};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::{BAUD_RATE, SERIAL_TIMEOUT_MS};

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("failed to open port '{port}': {source}")]
    Open {
        port: String,
        source: serialport::Error,
    },
    #[error("serial write failed: {0}")]
    Write(#[source] std::io::Error),
    #[error("serial read failed: {0}")]
    Read(#[source] std::io::Error),
}

/// One blocking command/response exchange per call. The instrument speaks a
/// line-oriented protocol, so callers never have more than one command in
/// flight at a time.
pub trait Transport: Send {
    fn exchange(&mut self, command: &str) -> Result<String, LinkError>;

    /// Like [`Transport::exchange`], but a link failure is logged and
    /// degraded to an empty string instead of propagating.
    fn send(&mut self, command: &str) -> String {
        match self.exchange(command) {
            Ok(response) => response,
            Err(e) => {
                error!("command '{command}' failed: {e}");
                String::new()
            }
        }
    }
}

pub struct SerialLink {
    port: Box<dyn SerialPort>,
}

impl SerialLink {
    pub fn open(path: &str) -> Result<Self, LinkError> {
        let port = serialport::new(path, BAUD_RATE)
            .timeout(Duration::from_millis(SERIAL_TIMEOUT_MS))
            .open()
            .map_err(|source| LinkError::Open {
                port: path.to_string(),
                source,
            })?;
        Ok(Self { port })
    }
}

impl Transport for SerialLink {
    fn exchange(&mut self, command: &str) -> Result<String, LinkError> {
        exchange_line(&mut self.port, command)
    }
}

/// Writes `command` plus a newline, then reads until the first newline or
/// until the port read times out. A timeout is not an error: whatever
/// arrived so far (possibly nothing) is returned, the same as a blocking
/// readline with a timeout.
fn exchange_line<T: Read + Write>(port: &mut T, command: &str) -> Result<String, LinkError> {
    debug!("sending command: {command}");
    port.write_all(format!("{command}\n").as_bytes())
        .map_err(LinkError::Write)?;

    let mut raw = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match port.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                if byte[0] == b'\n' {
                    break;
                }
                raw.push(byte[0]);
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => break,
            Err(e) => return Err(LinkError::Read(e)),
        }
    }

    let response = String::from_utf8_lossy(&raw).trim().to_string();
    debug!("received response: {response}");
    Ok(response)
}
