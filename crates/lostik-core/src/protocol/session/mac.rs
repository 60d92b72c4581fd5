//! `mac` operations

use crate::protocol::commands::MacCommand;
use crate::protocol::response::{decode_decimal, decode_mac_tx, decode_ok, Downlink};
use crate::protocol::{ProtocolError, Transport};
use crate::types::{Band, Payload, Port, UplinkPayloadType};

use super::Session;

impl<T: Transport> Session<T> {
    /// Reset the LoRaWAN stack to its band defaults. Pass a band on the
    /// RN2483; the RN2903 rejects one.
    pub fn mac_reset(&mut self, band: Option<Band>) -> Result<(), ProtocolError> {
        self.execute(MacCommand::Reset(band).into(), decode_ok)
    }

    /// Lift the transmit silence imposed by a network link-check failure
    pub fn force_enable(&mut self) -> Result<(), ProtocolError> {
        self.execute(MacCommand::ForceEnable.into(), decode_ok)
    }

    /// Pause the LoRaWAN stack so the radio can be driven directly.
    ///
    /// Returns how long, in milliseconds, the stack can stay paused; `0`
    /// means it is busy and cannot be paused right now.
    pub fn pause(&mut self) -> Result<u32, ProtocolError> {
        self.execute(MacCommand::Pause.into(), decode_decimal)
    }

    /// Hand the radio back to the LoRaWAN stack
    pub fn resume(&mut self) -> Result<(), ProtocolError> {
        self.execute(MacCommand::Resume.into(), decode_ok)
    }

    /// Persist LoRaWAN settings to EEPROM
    pub fn save(&mut self) -> Result<(), ProtocolError> {
        self.execute(MacCommand::Save.into(), decode_ok)
    }

    /// Send an uplink. Resolves once the transmission and its receive
    /// windows finish, with the downlink if the network sent one.
    pub fn transmit_uplink(
        &mut self,
        kind: UplinkPayloadType,
        port: Port,
        payload: Payload,
    ) -> Result<Option<Downlink>, ProtocolError> {
        self.execute_two_phase(
            MacCommand::Transmit {
                kind,
                port,
                payload,
            }
            .into(),
            decode_mac_tx,
        )
    }
}
