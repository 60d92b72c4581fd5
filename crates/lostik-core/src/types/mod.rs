//! Module value types
//!
//! Constrained scalars used as command operands or decoded from replies.
//! Range-checked types validate at construction, so every value that reaches
//! the command model is already legal.

mod eeprom;
mod identifier;
mod mac;
mod payload;
mod pin;
mod radio;
mod version;

pub use eeprom::EepromAddress;
pub use identifier::HardwareIdentifier;
pub use mac::{Band, Port, UplinkPayloadType};
pub use payload::Payload;
pub use pin::{Pin, PinMode, PinState};
pub use radio::TxPower;
pub use version::{FirmwareVersion, Model, Version};

use thiserror::Error;

/// An operand was outside the range the module accepts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// User EEPROM address out of range
    #[error("EEPROM address {0:#05X} outside 0x300..=0x3FF")]
    EepromAddress(u16),

    /// Uplink port out of range
    #[error("Port {0} outside 1..=223")]
    Port(u8),

    /// Transmit power out of range
    #[error("Transmit power {0} dBm outside -3..=20")]
    TxPower(i8),

    /// Band other than 433 or 868 MHz
    #[error("Band {0} MHz is not 433 or 868")]
    Band(u16),

    /// Payload longer than one packet
    #[error("Payload of {0} bytes exceeds 255")]
    PayloadTooLarge(usize),

    /// Payload with no bytes
    #[error("Payload is empty")]
    EmptyPayload,

    /// Text that names no known value
    #[error("Unknown {kind}: '{value}'")]
    UnknownName {
        /// What was being parsed
        kind: &'static str,
        /// The rejected text
        value: String,
    },
}
