//! # LoStik Core Library
//!
//! Host-side driver for the LoStik USB LoRa stick and the Microchip
//! RN2903/RN2483 module on it.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - A typed model of the module's `sys`, `mac` and `radio` commands
//! - Reply decoding, including the version banner and two-phase replies
//! - CRLF line framing over a serial port (or any `Read + Write`)
//! - A blocking request/reply [`Session`](protocol::Session)
//!
//! ## Supported modules
//!
//! - RN2903 (915 MHz, Americas)
//! - RN2483 (868/433 MHz, Europe)
//!
//! ## Example
//!
//! ```rust,no_run
//! use lostik_core::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::open(&ConnectionConfig::new("/dev/ttyUSB0"))?;
//!
//! let version = session.version()?;
//! println!("{} firmware {}", version.model, version.firmware);
//!
//! session.pause()?;
//! session.transmit(Payload::new(b"hello".to_vec())?)?;
//! # Ok(())
//! # }
//! ```

pub mod hex;
pub mod protocol;
pub mod types;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::protocol::{
        Command, ConnectionConfig, Downlink, ProtocolError, ResponseCode, Session,
        SharedSession, Status, Transport,
    };
    pub use crate::types::{
        Band, EepromAddress, HardwareIdentifier, Payload, Pin, PinMode, PinState, Port, TxPower,
        UplinkPayloadType, ValidationError, Version,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
