//! Hexadecimal text encoding
//!
//! The module speaks uppercase hex for addresses, EEPROM bytes, node
//! identifiers and radio payloads. Encoding is always uppercase; decoding
//! accepts either case.

use std::fmt::Write;

use crate::protocol::ProtocolError;

/// Encode a byte as exactly two uppercase hex digits.
pub fn encode_u8(value: u8) -> String {
    format!("{:02X}", value)
}

/// Encode a 16-bit value as uppercase hex, zero-padded to at least two digits.
///
/// Not fixed width: `0x300` renders as `300`, which is what `sys set nvm`
/// and `sys get nvm` expect.
pub fn encode_u16(value: u16) -> String {
    format!("{:02X}", value)
}

/// Encode a 64-bit value as exactly 16 uppercase hex digits.
pub fn encode_u64(value: u64) -> String {
    format!("{:016X}", value)
}

/// Encode a byte buffer as the concatenation of each byte's two-digit form.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Writing to a String cannot fail
        let _ = write!(out, "{:02X}", byte);
    }
    out
}

/// Decode hex text into bytes.
///
/// Odd-length input is treated as if it had a leading `0`. Any non-hex
/// character fails with [`ProtocolError::MalformedHex`].
pub fn decode(text: &str) -> Result<Vec<u8>, ProtocolError> {
    if !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ProtocolError::MalformedHex(text.to_string()));
    }

    let padded;
    let digits = if text.len() % 2 != 0 {
        padded = format!("0{}", text);
        padded.as_str()
    } else {
        text
    };

    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair)
                .map_err(|_| ProtocolError::MalformedHex(text.to_string()))?;
            u8::from_str_radix(pair, 16).map_err(|_| ProtocolError::MalformedHex(text.to_string()))
        })
        .collect()
}

/// Decode hex text into a single byte (as returned by `sys get nvm`).
pub fn decode_u8(text: &str) -> Result<u8, ProtocolError> {
    match decode(text)?.as_slice() {
        [byte] => Ok(*byte),
        _ => Err(ProtocolError::MalformedHex(text.to_string())),
    }
}

/// Decode hex text of up to 16 digits into a 64-bit value.
pub fn decode_u64(text: &str) -> Result<u64, ProtocolError> {
    let bytes = decode(text)?;
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(ProtocolError::MalformedHex(text.to_string()));
    }
    Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}
