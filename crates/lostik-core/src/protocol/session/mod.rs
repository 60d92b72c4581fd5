//! Request/reply sessions
//!
//! A [`Session`] owns a [`Transport`] and runs one command at a time: render,
//! write, block for the reply, decode. Commands with a two-phase reply get a
//! second read once the acknowledgement is `ok`. The typed operations live in
//! the `system`, `mac` and `radio` submodules.

mod mac;
mod radio;
mod system;

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use super::commands::{Command, ReplyShape};
use super::response::decode_ok;
use super::serial::{self, SerialTransport};
use super::{ConnectionConfig, ProtocolError, Transport};

/// Cumulative traffic counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Command lines written
    pub lines_sent: u64,
    /// Reply lines read
    pub lines_received: u64,
    /// Bytes written, terminators included
    pub bytes_sent: u64,
    /// Bytes read, terminators included
    pub bytes_received: u64,
}

/// A blocking command session with one module
pub struct Session<T: Transport> {
    transport: T,
    stats: SessionStats,
}

impl Session<SerialTransport> {
    /// Open and configure the serial port named in `config`
    pub fn open(config: &ConnectionConfig) -> Result<Self, ProtocolError> {
        Ok(Self::new(serial::open(config)?))
    }
}

impl<T: Transport> Session<T> {
    /// Start a session over an already configured transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            stats: SessionStats::default(),
        }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The underlying transport, mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// End the session and give back the transport
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Traffic counters since the session started
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Write a command without waiting for any reply
    pub fn send(&mut self, command: &Command) -> Result<(), ProtocolError> {
        let line = command.to_line();
        debug!("-> {}", line);
        self.transport.write_line(&line)?;
        self.stats.lines_sent = self.stats.lines_sent.saturating_add(1);
        self.stats.bytes_sent = self
            .stats
            .bytes_sent
            .saturating_add(line.len() as u64 + 2);
        Ok(())
    }

    /// Block for the next reply line
    pub fn read_reply(&mut self) -> Result<String, ProtocolError> {
        let line = self.transport.read_line()?;
        debug!("<- {}", line);
        self.stats.lines_received = self.stats.lines_received.saturating_add(1);
        self.stats.bytes_received = self
            .stats
            .bytes_received
            .saturating_add(line.len() as u64 + 2);
        Ok(line)
    }

    /// Write a command and return its first reply line
    pub fn request(&mut self, command: &Command) -> Result<String, ProtocolError> {
        self.send(command)?;
        self.read_reply()
    }

    /// Run a single-reply command and decode the reply
    fn execute<R>(
        &mut self,
        command: Command,
        decode: impl FnOnce(&str) -> Result<R, ProtocolError>,
    ) -> Result<R, ProtocolError> {
        debug_assert_eq!(command.reply_shape(), ReplyShape::Single);
        let reply = self.request(&command)?;
        decode(&reply)
    }

    /// Run a two-phase command: expect `ok`, then decode the outcome line.
    ///
    /// A refused acknowledgement ends the exchange; the module sends nothing
    /// further in that case.
    fn execute_two_phase<R>(
        &mut self,
        command: Command,
        decode: impl FnOnce(&str) -> Result<R, ProtocolError>,
    ) -> Result<R, ProtocolError> {
        debug_assert_eq!(command.reply_shape(), ReplyShape::TwoPhase);
        let ack = self.request(&command)?;
        decode_ok(&ack)?;
        let outcome = self.read_reply()?;
        decode(&outcome)
    }

    /// Run any command and collect every reply line it produces
    pub fn exchange(&mut self, command: &Command) -> Result<Vec<String>, ProtocolError> {
        match command.reply_shape() {
            ReplyShape::None => {
                self.send(command)?;
                Ok(Vec::new())
            }
            ReplyShape::Single => Ok(vec![self.request(command)?]),
            ReplyShape::TwoPhase => {
                let ack = self.request(command)?;
                if decode_ok(&ack).is_err() {
                    return Ok(vec![ack]);
                }
                Ok(vec![ack, self.read_reply()?])
            }
        }
    }
}

/// A session shared between threads.
///
/// The lock is held for a whole operation, including the second read of a
/// two-phase command, so replies can never be interleaved.
pub struct SharedSession<T: Transport> {
    inner: Arc<Mutex<Session<T>>>,
}

impl<T: Transport> Clone for SharedSession<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> SharedSession<T> {
    /// Wrap a session for sharing
    pub fn new(session: Session<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Lock the session for the duration of `f`
    pub fn with<R>(&self, f: impl FnOnce(&mut Session<T>) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    fn lock(&self) -> MutexGuard<'_, Session<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            // A panic mid-exchange can leave a partial reply buffered
            warn!("session lock poisoned, discarding buffered input");
            let mut guard = poisoned.into_inner();
            guard.transport_mut().discard_pending();
            self.inner.clear_poison();
            guard
        })
    }

    /// Traffic counters of the shared session
    pub fn stats(&self) -> SessionStats {
        self.lock().stats()
    }
}

impl<T: Transport> From<Session<T>> for SharedSession<T> {
    fn from(session: Session<T>) -> Self {
        Self::new(session)
    }
}
