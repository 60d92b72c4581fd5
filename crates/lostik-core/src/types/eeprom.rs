//! User EEPROM addressing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;
use crate::hex;

/// Address in the module's user EEPROM, `0x300..=0x3FF`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct EepromAddress(u16);

impl EepromAddress {
    /// First user EEPROM address
    pub const MIN: EepromAddress = EepromAddress(0x300);

    /// Last user EEPROM address
    pub const MAX: EepromAddress = EepromAddress(0x3FF);

    /// Validate a raw address
    pub fn new(raw: u16) -> Result<Self, ValidationError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(ValidationError::EepromAddress(raw))
        }
    }

    /// Raw 16-bit address
    pub fn get(self) -> u16 {
        self.0
    }

    /// Every user EEPROM address in ascending order
    pub fn all() -> impl Iterator<Item = EepromAddress> {
        (Self::MIN.0..=Self::MAX.0).map(EepromAddress)
    }
}

impl TryFrom<u16> for EepromAddress {
    type Error = ValidationError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<EepromAddress> for u16 {
    fn from(address: EepromAddress) -> u16 {
        address.0
    }
}

impl fmt::Display for EepromAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_u16(self.0))
    }
}

/// Parses the hex form used on the wire, with or without a `0x` prefix
impl FromStr for EepromAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let raw = u16::from_str_radix(digits, 16).map_err(|_| ValidationError::UnknownName {
            kind: "EEPROM address",
            value: s.to_string(),
        })?;
        Self::new(raw)
    }
}
