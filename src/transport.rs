//! Delivery of instruction sequences to the robot.
//!
//! The link itself (Bluetooth serial on the competition robot) lives outside
//! this crate. Anything that can be opened as a `std::io::Write` works.

use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use log::{debug, info, warn};

use crate::instructions::Instructions;

/// Wait between attempts to open the link.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(3);

pub trait Transport {
    fn send(&mut self, instructions: &Instructions) -> anyhow::Result<()>;
}

/// Sends each instruction as one byte over a writer.
pub struct WriteTransport<W> {
    inner: W,
}

impl<W: Write> WriteTransport<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Read + Write> WriteTransport<W> {
    /// Reads the robot's one-byte reply. `None` when nothing arrived before
    /// the link timed out.
    pub fn receive(&mut self) -> anyhow::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    debug!("received {}", buf[0]);
                    return Ok(Some(buf[0]));
                }
                Err(e) => match e.kind() {
                    io::ErrorKind::Interrupted => {}
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => return Ok(None),
                    _ => return Err(e).context("Failed to read reply"),
                },
            }
        }
    }
}

impl<W: Write> Transport for WriteTransport<W> {
    fn send(&mut self, instructions: &Instructions) -> anyhow::Result<()> {
        for &instruction in instructions {
            let byte = instruction.token();
            debug!("sending {}({})", byte as char, byte);
            self.inner
                .write_all(&[byte])
                .with_context(|| format!("Failed to send {:?}", instruction))?;
        }
        self.inner.flush().context("Failed to flush link")?;
        info!("sent {} instructions", instructions.len());
        Ok(())
    }
}

/// Errors after which opening the link again may succeed, e.g. the robot is
/// not paired yet.
pub fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound
            | io::ErrorKind::PermissionDenied
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::TimedOut
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::Interrupted
    )
}

/// Calls `open` until it succeeds, sleeping `backoff` after each transient
/// failure. Any other failure is returned immediately.
pub fn connect_with_retry<T, F>(mut open: F, backoff: Duration) -> anyhow::Result<T>
where
    F: FnMut() -> io::Result<T>,
{
    info!("Connecting...");
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        match open() {
            Ok(link) => {
                info!("Connected after {} attempt(s).", attempts);
                return Ok(link);
            }
            Err(e) if is_transient(&e) => {
                warn!("Connection attempt {} failed: {}; retrying", attempts, e);
                thread::sleep(backoff);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Connection failed on attempt {}", attempts));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::Instruction::*;

    #[test]
    fn write_transport_sends_one_byte_per_instruction() {
        let mut transport = WriteTransport::new(Vec::new());
        let commands: Instructions = vec![EnterL6, SpinRight, Straight, PrepareToPut, Put].into();
        transport.send(&commands).unwrap();
        assert_eq!(transport.into_inner(), b"brspq".to_vec());
    }

    #[test]
    fn retries_transient_failures() {
        let mut calls = 0;
        let link = connect_with_retry(
            || {
                calls += 1;
                if calls < 3 {
                    Err(io::Error::from(io::ErrorKind::NotFound))
                } else {
                    Ok("link")
                }
            },
            Duration::ZERO,
        )
        .unwrap();
        assert_eq!(link, "link");
        assert_eq!(calls, 3);
    }

    #[test]
    fn other_failures_are_fatal() {
        let mut calls = 0;
        let result: anyhow::Result<()> = connect_with_retry(
            || {
                calls += 1;
                Err(io::Error::from(io::ErrorKind::InvalidInput))
            },
            Duration::ZERO,
        );
        let err = result.unwrap_err();
        assert_eq!(calls, 1);
        assert_eq!(
            err.downcast_ref::<io::Error>().map(|e| e.kind()),
            Some(io::ErrorKind::InvalidInput)
        );
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_reported() {
        let mut transport = WriteTransport::new(Broken);
        let commands: Instructions = vec![Put].into();
        assert!(transport.send(&commands).is_err());
    }

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    struct Quiet;

    impl Read for Quiet {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::TimedOut))
        }
    }

    impl Write for Quiet {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn receive_reads_one_byte_at_a_time() {
        let mut transport = WriteTransport::new(io::Cursor::new(vec![7u8, b'q']));
        assert_eq!(transport.receive().unwrap(), Some(7));
        assert_eq!(transport.receive().unwrap(), Some(b'q'));
        assert_eq!(transport.receive().unwrap(), None);
    }

    #[test]
    fn receive_timeout_is_not_an_error() {
        let mut transport = WriteTransport::new(Quiet);
        assert_eq!(transport.receive().unwrap(), None);
        assert!(WriteTransport::new(Broken).receive().is_err());
    }
}
