//! Firmware version banner
//!
//! `sys get ver`, `sys reset` and `sys factoryRESET` all answer with a line of
//! the form `RN2903 1.0.3 Aug 8 2017 15:11:09`: hardware model, firmware
//! version, then the firmware release date and time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::protocol::ProtocolError;

/// `strftime` pattern used when rendering the release timestamp
const RELEASE_FORMAT: &str = "%b %-d %Y %H:%M:%S";

/// Pattern used when parsing; `%d` accepts an unpadded day
const RELEASE_PARSE_FORMAT: &str = "%b %d %Y %H:%M:%S";

/// Certified hardware variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    /// RN2903, 915 MHz
    America,
    /// RN2483, 433/868 MHz
    Europe,
}

impl Model {
    /// Part number as printed in the banner
    pub fn part_number(&self) -> &'static str {
        match self {
            Model::America => "RN2903",
            Model::Europe => "RN2483",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.part_number())
    }
}

impl FromStr for Model {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RN2903" => Ok(Model::America),
            "RN2483" => Ok(Model::Europe),
            _ => Err(ProtocolError::MalformedVersion(s.to_string())),
        }
    }
}

/// `major.minor.patch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FirmwareVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch level
    pub patch: u32,
}

impl FirmwareVersion {
    /// Build a version from its parts
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for FirmwareVersion {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ProtocolError::MalformedVersion(s.to_string()))?;

        match parts.as_slice() {
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(ProtocolError::MalformedVersion(s.to_string())),
        }
    }
}

/// Hardware model, firmware version and firmware release time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Hardware model
    pub model: Model,
    /// Firmware version
    pub firmware: FirmwareVersion,
    /// Firmware build time
    pub release: NaiveDateTime,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.model,
            self.firmware,
            self.release.format(RELEASE_FORMAT)
        )
    }
}

impl FromStr for Version {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split(' ').collect();
        if tokens.len() < 3 {
            return Err(ProtocolError::MalformedVersion(s.to_string()));
        }

        let model: Model = tokens[0]
            .parse()
            .map_err(|_| ProtocolError::MalformedVersion(s.to_string()))?;
        let firmware: FirmwareVersion = tokens[1]
            .parse()
            .map_err(|_| ProtocolError::MalformedVersion(s.to_string()))?;

        // C-style build dates pad the day with a space ("Aug  8"), which
        // leaves an empty token behind.
        let release_text = tokens[2..]
            .iter()
            .filter(|token| !token.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let release = NaiveDateTime::parse_from_str(&release_text, RELEASE_PARSE_FORMAT)
            .map_err(|_| ProtocolError::MalformedTimestamp(release_text.clone()))?;

        Ok(Self {
            model,
            firmware,
            release,
        })
    }
}
