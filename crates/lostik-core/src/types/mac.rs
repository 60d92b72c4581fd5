//! LoRaWAN stack operands

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Application port for uplinks, `1..=223`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Port(u8);

impl Port {
    /// Lowest application port
    pub const MIN: Port = Port(1);
    /// Highest application port
    pub const MAX: Port = Port(223);

    /// Validate a raw port number
    pub fn new(raw: u8) -> Result<Self, ValidationError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(ValidationError::Port(raw))
        }
    }

    /// Raw port number
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Port {
    type Error = ValidationError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Port> for u8 {
    fn from(port: Port) -> u8 {
        port.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an uplink asks the network server for an acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UplinkPayloadType {
    /// `cnf`
    Confirmed,
    /// `uncnf`
    Unconfirmed,
}

impl UplinkPayloadType {
    /// Wire token
    pub fn token(&self) -> &'static str {
        match self {
            UplinkPayloadType::Confirmed => "cnf",
            UplinkPayloadType::Unconfirmed => "uncnf",
        }
    }
}

/// Frequency band passed to `mac reset` on the RN2483
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Band {
    /// 433 MHz
    Mhz433,
    /// 868 MHz
    Mhz868,
}

impl Band {
    /// Validate a band given in MHz
    pub fn new(mhz: u16) -> Result<Self, ValidationError> {
        match mhz {
            433 => Ok(Band::Mhz433),
            868 => Ok(Band::Mhz868),
            _ => Err(ValidationError::Band(mhz)),
        }
    }

    /// Band in MHz
    pub fn mhz(self) -> u16 {
        match self {
            Band::Mhz433 => 433,
            Band::Mhz868 => 868,
        }
    }
}

impl TryFrom<u16> for Band {
    type Error = ValidationError;

    fn try_from(mhz: u16) -> Result<Self, Self::Error> {
        Self::new(mhz)
    }
}

impl From<Band> for u16 {
    fn from(band: Band) -> u16 {
        band.mhz()
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mhz())
    }
}

impl FromStr for Band {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mhz = s.parse::<u16>().map_err(|_| ValidationError::UnknownName {
            kind: "band",
            value: s.to_string(),
        })?;
        Self::new(mhz)
    }
}
