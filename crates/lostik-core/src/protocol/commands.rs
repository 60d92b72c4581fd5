//! Protocol commands
//!
//! Every command the driver can issue, as a closed tree of enums. Each level
//! contributes one token and the leaves contribute their operands, so a
//! command renders as `<category> <operation> [<sub-operation>] <operands...>`.
//! Operands are already-validated types, which makes rendering total.

use std::fmt;

use crate::hex;
use crate::types::{
    Band, EepromAddress, Payload, Pin, PinMode, PinState, Port, TxPower, UplinkPayloadType,
};

use super::LINE_TERMINATOR;

/// How many reply lines the module sends for a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// The module does not answer (`sys eraseFW`)
    None,
    /// One reply line
    Single,
    /// An acknowledgement followed later by the outcome
    TwoPhase,
}

/// A complete module command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// System behaviour, firmware/hardware information, user EEPROM and pins
    System(SystemCommand),
    /// LoRaWAN stack actions
    Mac(MacCommand),
    /// Direct transceiver access
    Radio(RadioCommand),
}

impl Command {
    /// Category token (`sys`, `mac` or `radio`)
    pub fn category(&self) -> &'static str {
        match self {
            Command::System(_) => "sys",
            Command::Mac(_) => "mac",
            Command::Radio(_) => "radio",
        }
    }

    /// All tokens of the command line, category first
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = vec![self.category().to_string()];
        match self {
            Command::System(cmd) => {
                tokens.push(cmd.token().to_string());
                tokens.extend(cmd.arguments());
            }
            Command::Mac(cmd) => {
                tokens.push(cmd.token().to_string());
                tokens.extend(cmd.arguments());
            }
            Command::Radio(cmd) => {
                tokens.push(cmd.token().to_string());
                tokens.extend(cmd.arguments());
            }
        }
        tokens
    }

    /// The command line without its terminator
    pub fn to_line(&self) -> String {
        self.tokens().join(" ")
    }

    /// Bytes to put on the wire, CRLF included
    pub fn encode(&self) -> Vec<u8> {
        let line = self.to_line();
        let mut bytes = Vec::with_capacity(line.len() + LINE_TERMINATOR.len());
        bytes.extend_from_slice(line.as_bytes());
        bytes.extend_from_slice(LINE_TERMINATOR);
        bytes
    }

    /// Reply lines the module produces for this command
    pub fn reply_shape(&self) -> ReplyShape {
        match self {
            Command::System(SystemCommand::EraseFirmware) => ReplyShape::None,
            Command::Mac(MacCommand::Transmit { .. })
            | Command::Radio(RadioCommand::Receive(_))
            | Command::Radio(RadioCommand::Transmit(_)) => ReplyShape::TwoPhase,
            _ => ReplyShape::Single,
        }
    }

    /// Check if this command expects a response
    pub fn expects_response(&self) -> bool {
        self.reply_shape() != ReplyShape::None
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

impl From<SystemCommand> for Command {
    fn from(cmd: SystemCommand) -> Self {
        Command::System(cmd)
    }
}

impl From<MacCommand> for Command {
    fn from(cmd: MacCommand) -> Self {
        Command::Mac(cmd)
    }
}

impl From<RadioCommand> for Command {
    fn from(cmd: RadioCommand) -> Self {
        Command::Radio(cmd)
    }
}

/// `sys` commands
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SystemCommand {
    /// Sleep for the given number of milliseconds
    Sleep(u32),
    /// Restart the module, reloading stored configuration
    Reset,
    /// Delete the application firmware and enter the bootloader. No reply.
    EraseFirmware,
    /// Restore factory defaults (including user EEPROM) and restart
    FactoryReset,
    /// `sys set ...`
    Set(SystemSet),
    /// `sys get ...`
    Get(SystemGet),
}

impl SystemCommand {
    /// Operation token
    pub fn token(&self) -> &'static str {
        match self {
            SystemCommand::Sleep(_) => "sleep",
            SystemCommand::Reset => "reset",
            SystemCommand::EraseFirmware => "eraseFW",
            SystemCommand::FactoryReset => "factoryRESET",
            SystemCommand::Set(_) => "set",
            SystemCommand::Get(_) => "get",
        }
    }

    /// Operands in wire order
    pub fn arguments(&self) -> Vec<String> {
        match self {
            SystemCommand::Sleep(ms) => vec![ms.to_string()],
            SystemCommand::Set(set) => {
                let mut args = vec![set.token().to_string()];
                args.extend(set.arguments());
                args
            }
            SystemCommand::Get(get) => {
                let mut args = vec![get.token().to_string()];
                args.extend(get.arguments());
                args
            }
            SystemCommand::Reset | SystemCommand::EraseFirmware | SystemCommand::FactoryReset => {
                Vec::new()
            }
        }
    }
}

/// `sys set` parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemSet {
    /// Store a byte in user EEPROM (`nvm`)
    Rom(EepromAddress, u8),
    /// Drive a digital pin high or low (`pindig`)
    DigitalPin(Pin, PinState),
    /// Configure a pin as digital out, digital in or analog (`pinmode`)
    PinMode(Pin, PinMode),
}

impl SystemSet {
    /// Operation token
    pub fn token(&self) -> &'static str {
        match self {
            SystemSet::Rom(..) => "nvm",
            SystemSet::DigitalPin(..) => "pindig",
            SystemSet::PinMode(..) => "pinmode",
        }
    }

    /// Operands in wire order
    pub fn arguments(&self) -> Vec<String> {
        match self {
            SystemSet::Rom(address, data) => vec![address.to_string(), hex::encode_u8(*data)],
            SystemSet::DigitalPin(pin, state) => {
                vec![pin.name().to_string(), state.as_digit().to_string()]
            }
            SystemSet::PinMode(pin, mode) => vec![pin.name().to_string(), mode.token().to_string()],
        }
    }
}

/// `sys get` parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemGet {
    /// Hardware model, firmware version and release date (`ver`)
    Version,
    /// Byte stored in user EEPROM (`nvm`)
    Rom(EepromAddress),
    /// Supply voltage in mV (`vdd`)
    Voltage,
    /// Preprogrammed EUI node address (`hweui`)
    Identifier,
    /// Digital level of a pin (`pindig`)
    DigitalPin(Pin),
    /// 10-bit ADC reading of a pin (`pinana`)
    AnalogPin(Pin),
}

impl SystemGet {
    /// Operation token
    pub fn token(&self) -> &'static str {
        match self {
            SystemGet::Version => "ver",
            SystemGet::Rom(_) => "nvm",
            SystemGet::Voltage => "vdd",
            SystemGet::Identifier => "hweui",
            SystemGet::DigitalPin(_) => "pindig",
            SystemGet::AnalogPin(_) => "pinana",
        }
    }

    /// Operands in wire order
    pub fn arguments(&self) -> Vec<String> {
        match self {
            SystemGet::Rom(address) => vec![address.to_string()],
            SystemGet::DigitalPin(pin) | SystemGet::AnalogPin(pin) => vec![pin.name().to_string()],
            SystemGet::Version | SystemGet::Voltage | SystemGet::Identifier => Vec::new(),
        }
    }
}

/// `mac` commands
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MacCommand {
    /// Reset the LoRaWAN stack to band defaults. The RN2483 takes the band
    /// to reset to; the RN2903 takes none.
    Reset(Option<Band>),
    /// Send an uplink on a port
    Transmit {
        /// Confirmed or unconfirmed
        kind: UplinkPayloadType,
        /// Application port
        port: Port,
        /// Frame payload
        payload: Payload,
    },
    /// Save LoRaWAN configuration to EEPROM
    Save,
    /// Re-enable the module after the network silenced it
    ForceEnable,
    /// Pause the stack so the radio can be driven directly
    Pause,
    /// Resume the stack after `Pause`
    Resume,
}

impl MacCommand {
    /// Operation token
    pub fn token(&self) -> &'static str {
        match self {
            MacCommand::Reset(_) => "reset",
            MacCommand::Transmit { .. } => "tx",
            MacCommand::Save => "save",
            MacCommand::ForceEnable => "forceENABLE",
            MacCommand::Pause => "pause",
            MacCommand::Resume => "resume",
        }
    }

    /// Operands in wire order
    pub fn arguments(&self) -> Vec<String> {
        match self {
            MacCommand::Transmit {
                kind,
                port,
                payload,
            } => vec![kind.token().to_string(), port.to_string(), hex::encode(payload.as_bytes())],
            MacCommand::Reset(band) => band.iter().map(Band::to_string).collect(),
            MacCommand::Save
            | MacCommand::ForceEnable
            | MacCommand::Pause
            | MacCommand::Resume => Vec::new(),
        }
    }
}

/// `radio` commands
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RadioCommand {
    /// Open the receiver for a window (symbols for LoRa, ms for FSK); 0 is continuous
    Receive(u16),
    /// Transmit a raw packet
    Transmit(Payload),
    /// Continuous-wave transmission for tuning and certification
    ContinuousWave(bool),
    /// `radio set ...`
    Set(RadioSet),
    /// `radio get ...`
    Get(RadioGet),
}

impl RadioCommand {
    /// Operation token
    pub fn token(&self) -> &'static str {
        match self {
            RadioCommand::Receive(_) => "rx",
            RadioCommand::Transmit(_) => "tx",
            RadioCommand::ContinuousWave(_) => "cw",
            RadioCommand::Set(_) => "set",
            RadioCommand::Get(_) => "get",
        }
    }

    /// Operands in wire order
    pub fn arguments(&self) -> Vec<String> {
        match self {
            RadioCommand::Receive(window) => vec![window.to_string()],
            RadioCommand::Transmit(payload) => vec![hex::encode(payload.as_bytes())],
            RadioCommand::ContinuousWave(on) => vec![if *on { "on" } else { "off" }.to_string()],
            RadioCommand::Set(set) => {
                let mut args = vec![set.token().to_string()];
                args.extend(set.arguments());
                args
            }
            RadioCommand::Get(get) => vec![get.token().to_string()],
        }
    }
}

/// `radio set` parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioSet {
    /// Output power in dBm (`pwr`)
    Power(TxPower),
}

impl RadioSet {
    /// Operation token
    pub fn token(&self) -> &'static str {
        match self {
            RadioSet::Power(_) => "pwr",
        }
    }

    /// Operands in wire order
    pub fn arguments(&self) -> Vec<String> {
        match self {
            RadioSet::Power(power) => vec![power.to_string()],
        }
    }
}

/// `radio get` parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioGet {
    /// Output power in dBm (`pwr`)
    Power,
    /// Modulation, `lora` or `fsk` (`mod`)
    Modulation,
    /// Operating frequency in Hz (`freq`)
    Frequency,
    /// Spreading factor, `sf7`..`sf12` (`sf`)
    SpreadingFactor,
}

impl RadioGet {
    /// Parameter token
    pub fn token(&self) -> &'static str {
        match self {
            RadioGet::Power => "pwr",
            RadioGet::Modulation => "mod",
            RadioGet::Frequency => "freq",
            RadioGet::SpreadingFactor => "sf",
        }
    }
}
