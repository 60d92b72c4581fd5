//! `sys` operations

use tracing::info;

use crate::protocol::commands::{Command, SystemCommand, SystemGet, SystemSet};
use crate::protocol::response::{
    decode_decimal, decode_hex_byte, decode_identifier, decode_ok, decode_pin_state,
    decode_version,
};
use crate::protocol::{ProtocolError, Transport};
use crate::types::{EepromAddress, HardwareIdentifier, Pin, PinMode, PinState, Version};

use super::Session;

impl<T: Transport> Session<T> {
    /// Put the module to sleep for `ms` milliseconds.
    ///
    /// The module answers `ok` when it wakes, so the read timeout must be
    /// longer than the sleep.
    pub fn sleep(&mut self, ms: u32) -> Result<(), ProtocolError> {
        self.execute(SystemCommand::Sleep(ms).into(), decode_ok)
    }

    /// Restart the module; it answers with its version banner
    pub fn reset(&mut self) -> Result<Version, ProtocolError> {
        self.execute(SystemCommand::Reset.into(), decode_version)
    }

    /// Delete the application firmware. The module drops into its bootloader
    /// and sends no reply.
    pub fn erase_firmware(&mut self) -> Result<(), ProtocolError> {
        info!("erasing module firmware");
        self.send(&SystemCommand::EraseFirmware.into())
    }

    /// Restore factory settings; answers with the version banner
    pub fn factory_reset(&mut self) -> Result<Version, ProtocolError> {
        self.execute(SystemCommand::FactoryReset.into(), decode_version)
    }

    /// Write one byte of user EEPROM
    pub fn set_rom(&mut self, address: EepromAddress, data: u8) -> Result<(), ProtocolError> {
        self.execute(set(SystemSet::Rom(address, data)), decode_ok)
    }

    /// Drive a digital output high or low
    pub fn set_pin_state(&mut self, pin: Pin, state: PinState) -> Result<(), ProtocolError> {
        self.execute(set(SystemSet::DigitalPin(pin, state)), decode_ok)
    }

    /// Configure what a pin is used for
    pub fn set_pin_mode(&mut self, pin: Pin, mode: PinMode) -> Result<(), ProtocolError> {
        self.execute(set(SystemSet::PinMode(pin, mode)), decode_ok)
    }

    /// Query the version banner
    pub fn version(&mut self) -> Result<Version, ProtocolError> {
        self.execute(get(SystemGet::Version), decode_version)
    }

    /// Read one byte of user EEPROM
    pub fn rom(&mut self, address: EepromAddress) -> Result<u8, ProtocolError> {
        self.execute(get(SystemGet::Rom(address)), decode_hex_byte)
    }

    /// Supply voltage in millivolts
    pub fn voltage(&mut self) -> Result<u16, ProtocolError> {
        self.execute(get(SystemGet::Voltage), decode_decimal)
    }

    /// The preprogrammed EUI
    pub fn hardware_identifier(&mut self) -> Result<HardwareIdentifier, ProtocolError> {
        self.execute(get(SystemGet::Identifier), decode_identifier)
    }

    /// Digital level of a pin
    pub fn pin_state(&mut self, pin: Pin) -> Result<PinState, ProtocolError> {
        self.execute(get(SystemGet::DigitalPin(pin)), decode_pin_state)
    }

    /// 10-bit ADC reading (0..=1023) of a pin configured as `ana`
    pub fn analog_value(&mut self, pin: Pin) -> Result<u16, ProtocolError> {
        self.execute(get(SystemGet::AnalogPin(pin)), decode_decimal)
    }
}

fn set(parameter: SystemSet) -> Command {
    SystemCommand::Set(parameter).into()
}

fn get(parameter: SystemGet) -> Command {
    SystemCommand::Get(parameter).into()
}
