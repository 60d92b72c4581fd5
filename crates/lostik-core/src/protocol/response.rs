//! Reply decoding
//!
//! The module answers each command with one CRLF-terminated line (two for
//! `radio rx`, `radio tx` and `mac tx`). Replies are either a bare status
//! token, a status token followed by a payload, or a value whose shape
//! depends on the command that was sent. [`ResponseCode`] classifies the
//! first two kinds; the `decode_*` functions check a line against what a
//! particular command expects.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::hex;
use crate::types::{HardwareIdentifier, PinState, Port, Version};

use super::ProtocolError;

const RADIO_RX_PREFIX: &str = "radio_rx";
const MAC_RX_PREFIX: &str = "mac_rx";

/// Status tokens the module sends without a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// `ok`
    Ok,
    /// `invalid_param`
    InvalidParam,
    /// `not_joined`
    NotJoined,
    /// `no_free_ch`
    NoFreeChannel,
    /// `silent`
    Silent,
    /// `frame_counter_err_rejoin_needed`
    FrameCounterRejoinNeeded,
    /// `busy`
    Busy,
    /// `mac_paused`
    MacPaused,
    /// `invalid_data_len`
    InvalidDataLen,
    /// `mac_tx_ok`
    MacTxOk,
    /// `mac_err`
    MacErr,
    /// `radio_tx_ok`
    RadioTxOk,
    /// `radio_err`
    RadioErr,
}

impl Status {
    /// Wire token
    pub fn token(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::InvalidParam => "invalid_param",
            Status::NotJoined => "not_joined",
            Status::NoFreeChannel => "no_free_ch",
            Status::Silent => "silent",
            Status::FrameCounterRejoinNeeded => "frame_counter_err_rejoin_needed",
            Status::Busy => "busy",
            Status::MacPaused => "mac_paused",
            Status::InvalidDataLen => "invalid_data_len",
            Status::MacTxOk => "mac_tx_ok",
            Status::MacErr => "mac_err",
            Status::RadioTxOk => "radio_tx_ok",
            Status::RadioErr => "radio_err",
        }
    }

    /// Look up a bare token, `None` if it is not a status
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "ok" => Status::Ok,
            "invalid_param" => Status::InvalidParam,
            "not_joined" => Status::NotJoined,
            "no_free_ch" => Status::NoFreeChannel,
            "silent" => Status::Silent,
            "frame_counter_err_rejoin_needed" => Status::FrameCounterRejoinNeeded,
            "busy" => Status::Busy,
            "mac_paused" => Status::MacPaused,
            "invalid_data_len" => Status::InvalidDataLen,
            "mac_tx_ok" => Status::MacTxOk,
            "mac_err" => Status::MacErr,
            "radio_tx_ok" => Status::RadioTxOk,
            "radio_err" => Status::RadioErr,
            _ => return None,
        })
    }

    /// True for tokens that report a refusal or failure
    pub fn is_negative(&self) -> bool {
        !matches!(self, Status::Ok | Status::MacTxOk | Status::RadioTxOk)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A downlink delivered in answer to an uplink
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Downlink {
    /// Application port the network sent on
    pub port: Port,
    /// Decoded payload bytes
    pub payload: Vec<u8>,
}

/// A classified reply line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    /// A bare status token
    Status(Status),
    /// `radio_rx <hex>`: a packet received by `radio rx`
    RadioRx(Vec<u8>),
    /// `mac_rx <port> <hex>`: a downlink received after `mac tx`
    MacRx(Downlink),
    /// Anything else, verbatim (numbers, version banners, identifiers)
    Other(String),
}

impl ResponseCode {
    /// Classify a reply line (already stripped of CRLF).
    ///
    /// Fails only when a payload-bearing token carries a malformed payload.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        if let Some(status) = Status::from_token(line) {
            return Ok(ResponseCode::Status(status));
        }

        let mut parts = line.splitn(2, ' ');
        let head = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default().trim();

        match head {
            RADIO_RX_PREFIX => {
                if rest.is_empty() {
                    return Err(ProtocolError::UnexpectedResponse(line.to_string()));
                }
                Ok(ResponseCode::RadioRx(hex::decode(rest)?))
            }
            MAC_RX_PREFIX => {
                let (port, data) = rest
                    .split_once(' ')
                    .ok_or_else(|| ProtocolError::UnexpectedResponse(line.to_string()))?;
                let port = port
                    .parse::<u8>()
                    .ok()
                    .and_then(|p| Port::new(p).ok())
                    .ok_or_else(|| ProtocolError::UnexpectedResponse(line.to_string()))?;
                Ok(ResponseCode::MacRx(Downlink {
                    port,
                    payload: hex::decode(data.trim())?,
                }))
            }
            _ => Ok(ResponseCode::Other(line.to_string())),
        }
    }

    /// The status token, if this is a bare status
    pub fn status(&self) -> Option<Status> {
        match self {
            ResponseCode::Status(status) => Some(*status),
            _ => None,
        }
    }

    /// True for a bare `ok`
    pub fn is_ok(&self) -> bool {
        self.status() == Some(Status::Ok)
    }
}

impl FromStr for ResponseCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Status(status) => f.write_str(status.token()),
            ResponseCode::RadioRx(data) => write!(f, "{} {}", RADIO_RX_PREFIX, hex::encode(data)),
            ResponseCode::MacRx(downlink) => write!(
                f,
                "{} {} {}",
                MAC_RX_PREFIX,
                downlink.port,
                hex::encode(&downlink.payload)
            ),
            ResponseCode::Other(raw) => f.write_str(raw),
        }
    }
}

fn unexpected(line: &str) -> ProtocolError {
    if let Some(status) = Status::from_token(line) {
        if status.is_negative() {
            warn!("module refused command: {}", status);
        }
    }
    ProtocolError::UnexpectedResponse(line.to_string())
}

/// Expect exactly `ok`
pub fn decode_ok(line: &str) -> Result<(), ProtocolError> {
    if line == Status::Ok.token() {
        Ok(())
    } else {
        Err(unexpected(line))
    }
}

/// Expect a decimal number (`mac pause`, `sys get vdd`, `sys get pinana`, `radio get pwr`)
pub fn decode_decimal<T: FromStr>(line: &str) -> Result<T, ProtocolError> {
    line.parse::<T>().map_err(|_| unexpected(line))
}

/// Expect one hex byte (`sys get nvm`)
pub fn decode_hex_byte(line: &str) -> Result<u8, ProtocolError> {
    hex::decode_u8(line).map_err(|_| unexpected(line))
}

/// Expect `0` or `1` (`sys get pindig`)
pub fn decode_pin_state(line: &str) -> Result<PinState, ProtocolError> {
    line.parse::<u8>()
        .ok()
        .and_then(PinState::from_digit)
        .ok_or_else(|| unexpected(line))
}

/// Expect a version banner (`sys get ver`, `sys reset`, `sys factoryRESET`)
pub fn decode_version(line: &str) -> Result<Version, ProtocolError> {
    line.parse::<Version>().map_err(|_| unexpected(line))
}

/// Expect a 16-digit EUI (`sys get hweui`)
pub fn decode_identifier(line: &str) -> Result<HardwareIdentifier, ProtocolError> {
    line.parse::<HardwareIdentifier>().map_err(|_| unexpected(line))
}

/// Expect a free-form word (`radio get mod`, `radio get sf`)
pub fn decode_text(line: &str) -> Result<String, ProtocolError> {
    if line.is_empty() || Status::from_token(line).is_some() {
        return Err(unexpected(line));
    }
    Ok(line.to_string())
}

/// Second reply of `radio rx`: `radio_rx <hex>` on success
pub fn decode_radio_rx(line: &str) -> Result<Vec<u8>, ProtocolError> {
    match ResponseCode::parse(line)? {
        ResponseCode::RadioRx(data) => Ok(data),
        _ => Err(unexpected(line)),
    }
}

/// Second reply of `radio tx`: `radio_tx_ok` on success
pub fn decode_radio_tx(line: &str) -> Result<(), ProtocolError> {
    match ResponseCode::parse(line)? {
        ResponseCode::Status(Status::RadioTxOk) => Ok(()),
        _ => Err(unexpected(line)),
    }
}

/// Second reply of `mac tx`: `mac_tx_ok`, or `mac_rx <port> <hex>` when a downlink arrived
pub fn decode_mac_tx(line: &str) -> Result<Option<Downlink>, ProtocolError> {
    match ResponseCode::parse(line)? {
        ResponseCode::Status(Status::MacTxOk) => Ok(None),
        ResponseCode::MacRx(downlink) => Ok(Some(downlink)),
        _ => Err(unexpected(line)),
    }
}
