//! Raw radio operands

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Transceiver output power in dBm.
///
/// The RN2483 accepts -3..=15 and the RN2903 2..=20; this type admits the
/// union and leaves band limits to the module, which answers `invalid_param`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct TxPower(i8);

impl TxPower {
    /// Lowest power any model accepts
    pub const MIN: TxPower = TxPower(-3);
    /// Highest power any model accepts
    pub const MAX: TxPower = TxPower(20);

    /// Validate a power level
    pub fn new(dbm: i8) -> Result<Self, ValidationError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&dbm) {
            Ok(Self(dbm))
        } else {
            Err(ValidationError::TxPower(dbm))
        }
    }

    /// Power in dBm
    pub fn dbm(self) -> i8 {
        self.0
    }
}

impl TryFrom<i8> for TxPower {
    type Error = ValidationError;

    fn try_from(dbm: i8) -> Result<Self, Self::Error> {
        Self::new(dbm)
    }
}

impl From<TxPower> for i8 {
    fn from(power: TxPower) -> i8 {
        power.0
    }
}

impl fmt::Display for TxPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_bounds() {
        assert!(TxPower::new(-3).is_ok());
        assert!(TxPower::new(20).is_ok());
        assert_eq!(TxPower::new(-4), Err(ValidationError::TxPower(-4)));
        assert_eq!(TxPower::new(21), Err(ValidationError::TxPower(21)));
    }

    #[test]
    fn test_power_display() {
        assert_eq!(TxPower::new(-3).unwrap().to_string(), "-3");
        assert_eq!(TxPower::new(14).unwrap().to_string(), "14");
    }
}
