//! General purpose pins exposed by the module

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A pin addressable through `sys set pindig`, `sys set pinmode` and friends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pin {
    /// `GPIO0`
    Gpio0,
    /// `GPIO1`
    Gpio1,
    /// `GPIO2`
    Gpio2,
    /// `GPIO3`
    Gpio3,
    /// `GPIO4`
    Gpio4,
    /// `GPIO5`
    Gpio5,
    /// `GPIO6`
    Gpio6,
    /// `GPIO7`
    Gpio7,
    /// `GPIO8`
    Gpio8,
    /// `GPIO9`
    Gpio9,
    /// `GPIO10`, blue LED on the LoStik
    Gpio10,
    /// `GPIO11`, red LED on the LoStik
    Gpio11,
    /// `GPIO12`
    Gpio12,
    /// `GPIO13`
    Gpio13,
    /// `UART_CTS`
    UartCts,
    /// `UART_RTS`
    UartRts,
    /// `TEST0`
    Test0,
    /// `TEST1`
    Test1,
}

impl Pin {
    /// Every pin, in the module's documented order
    pub const ALL: [Pin; 18] = [
        Pin::Gpio0,
        Pin::Gpio1,
        Pin::Gpio2,
        Pin::Gpio3,
        Pin::Gpio4,
        Pin::Gpio5,
        Pin::Gpio6,
        Pin::Gpio7,
        Pin::Gpio8,
        Pin::Gpio9,
        Pin::Gpio10,
        Pin::Gpio11,
        Pin::Gpio12,
        Pin::Gpio13,
        Pin::UartCts,
        Pin::UartRts,
        Pin::Test0,
        Pin::Test1,
    ];

    /// Pin name as the module spells it
    pub fn name(&self) -> &'static str {
        match self {
            Pin::Gpio0 => "GPIO0",
            Pin::Gpio1 => "GPIO1",
            Pin::Gpio2 => "GPIO2",
            Pin::Gpio3 => "GPIO3",
            Pin::Gpio4 => "GPIO4",
            Pin::Gpio5 => "GPIO5",
            Pin::Gpio6 => "GPIO6",
            Pin::Gpio7 => "GPIO7",
            Pin::Gpio8 => "GPIO8",
            Pin::Gpio9 => "GPIO9",
            Pin::Gpio10 => "GPIO10",
            Pin::Gpio11 => "GPIO11",
            Pin::Gpio12 => "GPIO12",
            Pin::Gpio13 => "GPIO13",
            Pin::UartCts => "UART_CTS",
            Pin::UartRts => "UART_RTS",
            Pin::Test0 => "TEST0",
            Pin::Test1 => "TEST1",
        }
    }

    /// Only GPIO0-3 and GPIO5-13 can be switched to analog mode
    pub fn supports_analog(&self) -> bool {
        !matches!(
            self,
            Pin::Gpio4 | Pin::UartCts | Pin::UartRts | Pin::Test0 | Pin::Test1
        )
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive, so `gpio10` works from the command line
impl FromStr for Pin {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pin::ALL
            .iter()
            .copied()
            .find(|pin| pin.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownName {
                kind: "pin",
                value: s.to_string(),
            })
    }
}

/// Digital level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinState {
    /// Low, `0`
    Off,
    /// High, `1`
    On,
}

impl PinState {
    /// Wire digit, `0` or `1`
    pub fn as_digit(&self) -> u8 {
        match self {
            PinState::Off => 0,
            PinState::On => 1,
        }
    }

    /// Level for a wire digit
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(PinState::Off),
            1 => Some(PinState::On),
            _ => None,
        }
    }
}

impl From<bool> for PinState {
    fn from(high: bool) -> Self {
        if high {
            PinState::On
        } else {
            PinState::Off
        }
    }
}

/// Function assigned to a pin by `sys set pinmode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinMode {
    /// `digout`
    DigitalOut,
    /// `digin`
    DigitalIn,
    /// `ana`, analog input
    Analog,
}

impl PinMode {
    /// Wire token
    pub fn token(&self) -> &'static str {
        match self {
            PinMode::DigitalOut => "digout",
            PinMode::DigitalIn => "digin",
            PinMode::Analog => "ana",
        }
    }
}

impl FromStr for PinMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "digout" => Ok(PinMode::DigitalOut),
            "digin" => Ok(PinMode::DigitalIn),
            "ana" => Ok(PinMode::Analog),
            _ => Err(ValidationError::UnknownName {
                kind: "pin mode",
                value: s.to_string(),
            }),
        }
    }
}
