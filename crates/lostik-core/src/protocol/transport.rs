//! Line transport
//!
//! The protocol needs exactly two things from the link: write one line, and
//! block until one CRLF-terminated line comes back. [`Transport`] is that
//! capability; [`LineTransport`] implements it over any byte stream.

use std::io::{ErrorKind, Read, Write};

use tracing::trace;

use super::{ProtocolError, LINE_TERMINATOR, MAX_LINE_LENGTH};

/// Send and receive CRLF-terminated text lines
pub trait Transport {
    /// Write `line` followed by CRLF
    fn write_line(&mut self, line: &str) -> Result<(), ProtocolError>;

    /// Block until a full line arrives and return it without the CRLF
    fn read_line(&mut self) -> Result<String, ProtocolError>;

    /// Drop buffered bytes that have not formed a line yet
    fn discard_pending(&mut self) {}
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        (**self).write_line(line)
    }

    fn read_line(&mut self) -> Result<String, ProtocolError> {
        (**self).read_line()
    }
    fn discard_pending(&mut self) {
        (**self).discard_pending()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        (**self).write_line(line)
    }

    fn read_line(&mut self) -> Result<String, ProtocolError> {
        (**self).read_line()
    }
    fn discard_pending(&mut self) {
        (**self).discard_pending()
    }
}

/// CRLF line framing over a byte stream.
///
/// Bytes read past a terminator are kept for the next `read_line`.
pub struct LineTransport<P> {
    io: P,
    pending: Vec<u8>,
}

impl<P: Read + Write> LineTransport<P> {
    /// Frame lines over `io`
    pub fn new(io: P) -> Self {
        Self {
            io,
            pending: Vec::with_capacity(MAX_LINE_LENGTH),
        }
    }

    /// The underlying stream
    pub fn get_ref(&self) -> &P {
        &self.io
    }

    /// The underlying stream, mutably
    pub fn get_mut(&mut self) -> &mut P {
        &mut self.io
    }

    /// Give back the underlying stream, dropping buffered bytes
    pub fn into_inner(self) -> P {
        self.io
    }

    fn take_line(&mut self) -> Option<Result<String, ProtocolError>> {
        let end = self
            .pending
            .windows(LINE_TERMINATOR.len())
            .position(|w| w == LINE_TERMINATOR)?;
        let line: Vec<u8> = self.pending.drain(..end + LINE_TERMINATOR.len()).take(end).collect();
        Some(String::from_utf8(line).map_err(|_| ProtocolError::InvalidUtf8))
    }
}

impl<P: Read + Write> Transport for LineTransport<P> {
    fn write_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        let mut bytes = Vec::with_capacity(line.len() + LINE_TERMINATOR.len());
        bytes.extend_from_slice(line.as_bytes());
        bytes.extend_from_slice(LINE_TERMINATOR);

        trace!("write {} bytes: {:02x?}", bytes.len(), bytes);
        self.io.write_all(&bytes)?;
        self.io.flush()?;
        Ok(())
    }

    fn discard_pending(&mut self) {
        self.pending.clear();
    }

    fn read_line(&mut self) -> Result<String, ProtocolError> {
        let mut buffer = [0u8; 256];

        loop {
            if let Some(line) = self.take_line() {
                return line;
            }
            if self.pending.len() > MAX_LINE_LENGTH {
                self.pending.clear();
                return Err(ProtocolError::LineTooLong {
                    max: MAX_LINE_LENGTH,
                });
            }

            match self.io.read(&mut buffer) {
                Ok(0) => {
                    return Err(ProtocolError::IoError(std::io::Error::new(
                        ErrorKind::UnexpectedEof,
                        "link closed before end of line",
                    )));
                }
                Ok(n) => {
                    trace!("read {} bytes: {:02x?}", n, &buffer[..n]);
                    self.pending.extend_from_slice(&buffer[..n]);
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(ref e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => {
                    return Err(ProtocolError::Timeout);
                }
                Err(e) => return Err(ProtocolError::IoError(e)),
            }
        }
    }
}
