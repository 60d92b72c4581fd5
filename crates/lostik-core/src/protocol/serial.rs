//! Serial port handling
//!
//! Provides low-level serial port access for the LoStik's USB UART bridge.

use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::collections::HashMap;
#[cfg(target_os = "linux")]
use std::fs;
use tracing::{debug, info};

use super::{ConnectionConfig, LineTransport, ProtocolError};

/// USB vendor ID of the CH340 bridge fitted to the LoStik
pub const CH340_VID: u16 = 0x1A86;

/// USB product ID of the CH340 bridge fitted to the LoStik
pub const CH340_PID: u16 = 0x7523;

/// Line transport over an open serial port
pub type SerialTransport = LineTransport<Box<dyn SerialPort>>;

/// Information about an available serial port
#[derive(Debug, Clone)]
pub struct PortInfo {
    /// Port name (e.g., "/dev/ttyUSB0" or "COM3")
    pub name: String,

    /// USB vendor ID (if USB device)
    pub vid: Option<u16>,

    /// USB product ID (if USB device)
    pub pid: Option<u16>,

    /// Manufacturer name (if available)
    pub manufacturer: Option<String>,

    /// Product name (if available)
    pub product: Option<String>,

    /// Serial number (if available)
    pub serial_number: Option<String>,
}

impl PortInfo {
    fn bare(name: String) -> Self {
        Self {
            name,
            vid: None,
            pid: None,
            manufacturer: None,
            product: None,
            serial_number: None,
        }
    }

    /// True when the USB IDs match the bridge chip a LoStik enumerates as
    pub fn is_lostik(&self) -> bool {
        self.vid == Some(CH340_VID) && self.pid == Some(CH340_PID)
    }
}

impl From<SerialPortInfo> for PortInfo {
    fn from(info: SerialPortInfo) -> Self {
        let (vid, pid, manufacturer, product, serial_number) = match info.port_type {
            SerialPortType::UsbPort(usb_info) => (
                Some(usb_info.vid),
                Some(usb_info.pid),
                usb_info.manufacturer,
                usb_info.product,
                usb_info.serial_number,
            ),
            _ => (None, None, None, None, None),
        };

        Self {
            name: info.port_name,
            vid,
            pid,
            manufacturer,
            product,
            serial_number,
        }
    }
}

/// Sort key for port names: ttyUSB* first (the CH340 shows up there), then
/// ttyACM*, each numerically by suffix, then everything else by name
fn port_sort_key(name: &str) -> (u8, usize, String) {
    let basename = name.rsplit('/').next().unwrap_or(name);
    if let Some(rest) = basename.strip_prefix("ttyUSB") {
        let num = rest.parse::<usize>().unwrap_or(usize::MAX);
        return (0, num, basename.to_string());
    }
    if let Some(rest) = basename.strip_prefix("ttyACM") {
        let num = rest.parse::<usize>().unwrap_or(usize::MAX);
        return (1, num, basename.to_string());
    }
    (2, 0, basename.to_string())
}

/// List all available serial ports, with /dev fallbacks and deterministic ordering
pub fn list_ports() -> Vec<PortInfo> {
    let mut map: HashMap<String, PortInfo> = HashMap::new();
    for info in serialport::available_ports().unwrap_or_default() {
        let p = PortInfo::from(info);
        map.entry(p.name.clone()).or_insert(p);
    }

    // Linux: udev-less containers don't report these through the API
    #[cfg(target_os = "linux")]
    if let Ok(entries) = fs::read_dir("/dev") {
        for entry in entries.flatten() {
            if let Some(fname) = entry.file_name().to_str() {
                if fname.starts_with("ttyACM") || fname.starts_with("ttyUSB") {
                    let full = format!("/dev/{}", fname);
                    map.entry(full.clone())
                        .or_insert_with(|| PortInfo::bare(full));
                }
            }
        }
    }

    let mut v: Vec<PortInfo> = map.into_values().collect();
    v.sort_by_key(|p| port_sort_key(&p.name));
    v
}

/// Open the port named in `config` at its baud rate and read timeout
pub fn open_port(config: &ConnectionConfig) -> Result<Box<dyn SerialPort>, ProtocolError> {
    if config.port_name.is_empty() {
        return Err(ProtocolError::PortNotFound("no port name configured".into()));
    }

    debug!(
        "opening {} at {} baud, timeout {}ms",
        config.port_name, config.baud_rate, config.timeout_ms
    );
    let port = serialport::new(&config.port_name, config.baud_rate)
        .timeout(config.timeout())
        .open()?;
    Ok(port)
}

/// Configure a serial port for the module: 8 data bits, no parity, one stop bit
pub fn configure_port(port: &mut dyn SerialPort) -> Result<(), ProtocolError> {
    port.set_data_bits(serialport::DataBits::Eight)?;
    port.set_parity(serialport::Parity::None)?;
    port.set_stop_bits(serialport::StopBits::One)?;
    port.set_flow_control(serialport::FlowControl::None)?;
    debug!("configure_port: 8N1, no flow control");
    Ok(())
}

/// Clear the serial port buffers
pub fn clear_buffers(port: &mut dyn SerialPort) -> Result<(), ProtocolError> {
    port.clear(serialport::ClearBuffer::All)?;
    Ok(())
}

/// Open, configure and flush a port, ready for a session
pub fn open(config: &ConnectionConfig) -> Result<SerialTransport, ProtocolError> {
    let mut port = open_port(config)?;
    configure_port(port.as_mut())?;
    clear_buffers(port.as_mut())?;
    info!("connected to {}", config.port_name);
    Ok(LineTransport::new(port))
}
