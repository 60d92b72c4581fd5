//! Transmit payloads

use super::ValidationError;

/// Bytes for one `radio tx` or `mac tx`.
///
/// Between 1 and 255 bytes: an empty payload has no hex token to send, and
/// LoRa modulation caps a packet at 255 bytes. Tighter limits that depend on
/// data rate or FSK mode are enforced by the module (`invalid_param`,
/// `invalid_data_len`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload(Vec<u8>);

impl Payload {
    /// Largest payload the radio can carry
    pub const MAX_LEN: usize = 255;

    /// Validate payload bytes
    pub fn new(data: impl Into<Vec<u8>>) -> Result<Self, ValidationError> {
        let data = data.into();
        if data.is_empty() {
            return Err(ValidationError::EmptyPayload);
        }
        if data.len() > Self::MAX_LEN {
            return Err(ValidationError::PayloadTooLarge(data.len()));
        }
        Ok(Self(data))
    }

    /// Payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated payload
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the bytes back
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl TryFrom<Vec<u8>> for Payload {
    type Error = ValidationError;

    fn try_from(data: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}

impl TryFrom<&[u8]> for Payload {
    type Error = ValidationError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}
