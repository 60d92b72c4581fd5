//! Serial Protocol Communication
//!
//! Implements the RN2903/RN2483 text command protocol spoken over the
//! LoStik's USB serial bridge.
//!
//! Every command is one ASCII line and every reply is one ASCII line, both
//! terminated by CRLF. A few commands answer twice: an immediate
//! acknowledgement, then the outcome once the radio operation finishes.

pub mod commands;
mod config;
mod error;
pub mod response;
pub mod serial;
mod session;
mod transport;

pub use commands::{Command, ReplyShape};
pub use config::ConnectionConfig;
pub use error::ProtocolError;
pub use response::{Downlink, ResponseCode, Status};
pub use serial::{clear_buffers, configure_port, list_ports, open_port, PortInfo, SerialTransport};
pub use session::{Session, SessionStats, SharedSession};
pub use transport::{LineTransport, Transport};

/// Baud rate of the module's UART
pub const DEFAULT_BAUD_RATE: u32 = 57600;

/// Default read timeout in milliseconds
/// `radio rx 0` and confirmed uplinks can legitimately take several seconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Line terminator for commands and replies
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Longest reply line accepted before giving up on finding a terminator
pub const MAX_LINE_LENGTH: usize = 1024;
