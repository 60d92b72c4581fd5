//! Preprogrammed EUI node address

use std::fmt;
use std::str::FromStr;

use crate::hex;
use crate::protocol::ProtocolError;

/// The module's read-only 64-bit EUI, as returned by `sys get hweui`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareIdentifier(u64);

impl HardwareIdentifier {
    /// Wrap a raw EUI
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw EUI value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HardwareIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_u64(self.0))
    }
}

impl FromStr for HardwareIdentifier {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode_u64(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_sixteen_digits() {
        let id = HardwareIdentifier::new(0x0004A30B0026A211);
        assert_eq!(id.to_string(), "0004A30B0026A211");
        assert_eq!(HardwareIdentifier::new(1).to_string(), "0000000000000001");
    }

    #[test]
    fn test_parse() {
        let id: HardwareIdentifier = "0004a30b0026a211".parse().unwrap();
        assert_eq!(id.get(), 0x0004A30B0026A211);
        assert!("0004A30B0026A2110".parse::<HardwareIdentifier>().is_err());
        assert!("not-hex".parse::<HardwareIdentifier>().is_err());
    }
}
