//! Protocol errors

use thiserror::Error;

/// Errors that can occur while talking to the module
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The serial port could not be opened, configured or listed
    #[error("Serial port error: {0}")]
    SerialError(String),

    /// No port with the given name
    #[error("Port not found: {0}")]
    PortNotFound(String),

    /// No full line arrived within the read timeout
    #[error("Timed out waiting for a reply line")]
    Timeout,

    /// A reply line held bytes that are not UTF-8
    #[error("Reply line is not valid UTF-8")]
    InvalidUtf8,

    /// Too many bytes arrived without a CRLF
    #[error("Reply line exceeds {max} bytes without a terminator")]
    LineTooLong {
        /// Line length limit in bytes
        max: usize,
    },

    /// The reply does not fit the command, including refusals like `busy`
    #[error("Unexpected response from module: '{0}'")]
    UnexpectedResponse(String),

    /// Hex text with an odd length or a non-hex digit
    #[error("Malformed hexadecimal text: '{0}'")]
    MalformedHex(String),

    /// A version banner that could not be parsed
    #[error("Malformed version string: '{0}'")]
    MalformedVersion(String),

    /// A banner timestamp that could not be parsed
    #[error("Malformed release timestamp: '{0}'")]
    MalformedTimestamp(String),

    /// Any other read or write failure
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ProtocolError {
    /// True when the failure came from the transport rather than the reply text
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ProtocolError::SerialError(_)
                | ProtocolError::PortNotFound(_)
                | ProtocolError::Timeout
                | ProtocolError::InvalidUtf8
                | ProtocolError::LineTooLong { .. }
                | ProtocolError::IoError(_)
        )
    }

    /// The raw reply text carried by an `UnexpectedResponse`
    pub fn response(&self) -> Option<&str> {
        match self {
            ProtocolError::UnexpectedResponse(raw) => Some(raw),
            _ => None,
        }
    }
}

impl From<serialport::Error> for ProtocolError {
    fn from(e: serialport::Error) -> Self {
        match e.kind() {
            serialport::ErrorKind::NoDevice => ProtocolError::PortNotFound(e.to_string()),
            _ => ProtocolError::SerialError(e.to_string()),
        }
    }
}
