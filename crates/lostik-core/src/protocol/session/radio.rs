//! `radio` operations
//!
//! The LoRaWAN stack owns the radio until `mac pause`; these fail with
//! `busy` otherwise.

use crate::protocol::commands::{RadioCommand, RadioGet, RadioSet};
use crate::protocol::response::{
    decode_decimal, decode_ok, decode_radio_rx, decode_radio_tx, decode_text,
};
use crate::protocol::{ProtocolError, Transport};
use crate::types::{Payload, TxPower};

use super::Session;

impl<T: Transport> Session<T> {
    /// Listen for one packet. `window` is in symbols (LoRa) or milliseconds
    /// (FSK); `0` listens until a packet arrives.
    ///
    /// A closed window without a packet fails with `radio_err`.
    pub fn receive(&mut self, window: u16) -> Result<Vec<u8>, ProtocolError> {
        self.execute_two_phase(RadioCommand::Receive(window).into(), decode_radio_rx)
    }

    /// Send one raw packet and wait for `radio_tx_ok`
    pub fn transmit(&mut self, payload: Payload) -> Result<(), ProtocolError> {
        self.execute_two_phase(RadioCommand::Transmit(payload).into(), decode_radio_tx)
    }

    /// Switch the continuous-wave test carrier on or off
    pub fn continuous_wave(&mut self, on: bool) -> Result<(), ProtocolError> {
        self.execute(RadioCommand::ContinuousWave(on).into(), decode_ok)
    }

    /// Set the output power
    pub fn set_power(&mut self, power: TxPower) -> Result<(), ProtocolError> {
        self.execute(RadioCommand::Set(RadioSet::Power(power)).into(), decode_ok)
    }

    /// Output power in dBm
    pub fn power(&mut self) -> Result<i8, ProtocolError> {
        self.execute(RadioCommand::Get(RadioGet::Power).into(), decode_decimal)
    }

    /// Modulation in use, `lora` or `fsk`
    pub fn modulation(&mut self) -> Result<String, ProtocolError> {
        self.execute(RadioCommand::Get(RadioGet::Modulation).into(), decode_text)
    }

    /// Carrier frequency in Hz
    pub fn frequency(&mut self) -> Result<u32, ProtocolError> {
        self.execute(RadioCommand::Get(RadioGet::Frequency).into(), decode_decimal)
    }

    /// Spreading factor as reported, `sf7` through `sf12`
    pub fn spreading_factor(&mut self) -> Result<String, ProtocolError> {
        self.execute(RadioCommand::Get(RadioGet::SpreadingFactor).into(), decode_text)
    }
}
