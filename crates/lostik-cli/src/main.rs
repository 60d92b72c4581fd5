//! `lostik` - talk to a LoStik from the command line

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lostik_core::hex;
use lostik_core::protocol::commands::RadioCommand;
use lostik_core::protocol::response::{decode_ok, decode_radio_rx};
use lostik_core::protocol::{
    list_ports, Command, ConnectionConfig, ProtocolError, SerialTransport, Session, Status,
};
use lostik_core::types::{
    Band, EepromAddress, Payload, Pin, PinMode, PinState, Port, TxPower, UplinkPayloadType,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

type LoStik = Session<SerialTransport>;

#[derive(Parser)]
#[command(name = "lostik")]
#[command(about = "Drive a LoStik (RN2903 / RN2483) over its USB serial port", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Log every line exchanged with the module
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Serial port; defaults to the first attached LoStik
    #[arg(short, long, global = true)]
    port: Option<String>,

    /// Baud rate override
    #[arg(short, long, global = true)]
    baud: Option<u32>,

    /// Reply timeout override in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// JSON connection config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List serial ports
    Ports,

    #[command(flatten)]
    Device(DeviceCommand),
}

/// Commands that talk to an attached module
#[derive(Subcommand)]
enum DeviceCommand {
    /// Print the module's version banner
    Version {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Restart the module and print the banner it reports
    Reset,

    /// Print the preprogrammed EUI
    Hweui,

    /// Print the supply voltage in mV
    Vdd,

    /// Read or write user EEPROM (0x300..=0x3FF)
    Rom {
        #[command(subcommand)]
        action: RomAction,
    },

    /// Read, drive or configure a GPIO pin
    Pin {
        #[command(subcommand)]
        action: PinAction,
    },

    /// Blink one of the on-board LEDs (GPIO10 blue, GPIO11 red)
    Blink {
        #[arg(long, default_value = "GPIO10")]
        pin: Pin,

        /// Time the LED stays on, then off
        #[arg(short, long, default_value_t = 500)]
        delay_ms: u64,

        /// Number of blinks; blinks until interrupted when omitted
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },

    /// Pause the LoRaWAN stack and transmit a raw radio packet
    Send {
        /// Payload as hex, e.g. DEADBEEF
        #[arg(value_parser = parse_payload)]
        payload: Payload,

        /// Output power in dBm
        #[arg(long, allow_negative_numbers = true, value_parser = parse_power)]
        power: Option<TxPower>,
    },

    /// Pause the LoRaWAN stack and print received radio packets
    Receive {
        /// Receive window (symbols for LoRa, ms for FSK); 0 listens forever
        #[arg(short, long, default_value_t = 0)]
        window: u16,

        /// Stop after this many packets
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },

    /// Print the radio's modulation, frequency, spreading factor and power
    RadioInfo,

    /// Reset the LoRaWAN stack to band defaults
    MacReset {
        /// Band to reset to, 433 or 868 (RN2483 only)
        #[arg(long)]
        band: Option<Band>,
    },

    /// Send a LoRaWAN uplink (the module must already be joined)
    Uplink {
        /// Ask the network to acknowledge
        #[arg(long)]
        confirmed: bool,

        /// Application port, 1..=223
        #[arg(id = "app_port", value_name = "PORT", value_parser = parse_port)]
        port: Port,

        /// Payload as hex
        #[arg(value_parser = parse_payload)]
        payload: Payload,
    },
}

#[derive(Subcommand)]
enum RomAction {
    /// Read one byte
    Get { address: EepromAddress },
    /// Write one byte
    Set {
        address: EepromAddress,
        #[arg(value_parser = parse_byte)]
        value: u8,
    },
}

#[derive(Subcommand)]
enum PinAction {
    /// Read the digital level
    Get { pin: Pin },
    /// Read the analog level (0..=1023)
    Analog { pin: Pin },
    /// Drive the pin high (1) or low (0)
    Set {
        pin: Pin,
        #[arg(value_parser = parse_pin_state)]
        state: PinState,
    },
    /// Configure as digout, digin or ana
    Mode { pin: Pin, mode: PinMode },
}

fn parse_payload(s: &str) -> Result<Payload, String> {
    let bytes = hex::decode(s).map_err(|e| e.to_string())?;
    Payload::new(bytes).map_err(|e| e.to_string())
}

fn parse_port(s: &str) -> Result<Port, String> {
    let raw: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a port number", s))?;
    Port::new(raw).map_err(|e| e.to_string())
}

fn parse_power(s: &str) -> Result<TxPower, String> {
    let dbm: i8 = s.parse().map_err(|_| format!("'{}' is not a dBm value", s))?;
    TxPower::new(dbm).map_err(|e| e.to_string())
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u8::from_str_radix(digits, 16).map_err(|_| format!("'{}' is not a hex byte", s))
}

fn parse_pin_state(s: &str) -> Result<PinState, String> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "on" | "high" => Ok(PinState::On),
        "0" | "off" | "low" => Ok(PinState::Off),
        _ => Err(format!("'{}' is not 0 or 1", s)),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn connection_config(cli: &ConnectionArgs) -> Result<ConnectionConfig> {
    let mut config = match &cli.config {
        Some(path) => ConnectionConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ConnectionConfig::default(),
    };

    if let Some(port) = &cli.port {
        config.port_name = port.clone();
    }
    if let Some(baud) = cli.baud {
        config.baud_rate = baud;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    if config.port_name.is_empty() {
        let found = list_ports()
            .into_iter()
            .find(|p| p.is_lostik())
            .context("No LoStik found, pass --port")?;
        info!("Using {}", found.name);
        config.port_name = found.name;
    }

    Ok(config)
}

fn print_ports() {
    let ports = list_ports();
    if ports.is_empty() {
        println!("No serial ports found");
    }
    for port in ports {
        let ids = match (port.vid, port.pid) {
            (Some(vid), Some(pid)) => format!("{:04x}:{:04x}", vid, pid),
            _ => "-".to_string(),
        };
        let marker = if port.is_lostik() { " (LoStik)" } else { "" };
        println!(
            "{}\t{}\t{}{}",
            port.name,
            ids,
            port.product.as_deref().unwrap_or("-"),
            marker
        );
    }
}

fn pause_mac(session: &mut LoStik) -> Result<()> {
    let ms = session.pause()?;
    if ms == 0 {
        warn!("LoRaWAN stack is busy and could not be paused");
    } else {
        debug!("LoRaWAN stack paused for {}ms", ms);
    }
    Ok(())
}

fn print_packet(data: &[u8]) {
    println!("{}\t{}", hex::encode(data), String::from_utf8_lossy(data));
}

/// Listen repeatedly, re-arming the receiver whenever a window closes empty
fn receive(session: &mut LoStik, window: u16, count: Option<u32>) -> Result<()> {
    pause_mac(session)?;

    let command: Command = RadioCommand::Receive(window).into();
    let mut received = 0u32;

    while count.map_or(true, |n| received < n) {
        let ack = session.request(&command)?;
        decode_ok(&ack).with_context(|| format!("Module refused '{}'", command))?;

        // A continuous window outlasts any read timeout
        let line = loop {
            match session.read_reply() {
                Ok(line) => break line,
                Err(ProtocolError::Timeout) => debug!("Still listening"),
                Err(e) => return Err(e.into()),
            }
        };

        if line == Status::RadioErr.token() {
            debug!("Receive window closed, re-arming");
            continue;
        }
        print_packet(&decode_radio_rx(&line)?);
        received += 1;
    }

    Ok(())
}

fn run(session: &mut LoStik, command: DeviceCommand) -> Result<()> {
    match command {
        DeviceCommand::Version { json } => {
            let version = session.version()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&version)?);
            } else {
                println!("{}", version);
            }
        }
        DeviceCommand::Reset => println!("{}", session.reset()?),
        DeviceCommand::Hweui => println!("{}", session.hardware_identifier()?),
        DeviceCommand::Vdd => println!("{}", session.voltage()?),
        DeviceCommand::Rom { action } => match action {
            RomAction::Get { address } => println!("{}", hex::encode_u8(session.rom(address)?)),
            RomAction::Set { address, value } => session.set_rom(address, value)?,
        },
        DeviceCommand::Pin { action } => match action {
            PinAction::Get { pin } => println!("{}", session.pin_state(pin)?.as_digit()),
            PinAction::Analog { pin } => println!("{}", session.analog_value(pin)?),
            PinAction::Set { pin, state } => session.set_pin_state(pin, state)?,
            PinAction::Mode { pin, mode } => session.set_pin_mode(pin, mode)?,
        },
        DeviceCommand::Blink {
            pin,
            delay_ms,
            count,
        } => {
            let delay = Duration::from_millis(delay_ms);
            session.set_pin_mode(pin, PinMode::DigitalOut)?;

            let mut blinks = 0u32;
            while count.map_or(true, |n| blinks < n) {
                session.set_pin_state(pin, PinState::On)?;
                thread::sleep(delay);
                session.set_pin_state(pin, PinState::Off)?;
                thread::sleep(delay);
                blinks += 1;
            }
        }
        DeviceCommand::Send { payload, power } => {
            pause_mac(session)?;
            if let Some(power) = power {
                session.set_power(power)?;
            }
            let len = payload.len();
            session.transmit(payload)?;
            info!("Sent {} bytes", len);
        }
        DeviceCommand::Receive { window, count } => receive(session, window, count)?,
        DeviceCommand::RadioInfo => {
            pause_mac(session)?;
            println!("modulation\t{}", session.modulation()?);
            println!("frequency\t{} Hz", session.frequency()?);
            println!("sf\t{}", session.spreading_factor()?);
            println!("power\t{} dBm", session.power()?);
        }
        DeviceCommand::MacReset { band } => session.mac_reset(band)?,
        DeviceCommand::Uplink {
            confirmed,
            port,
            payload,
        } => {
            let kind = if confirmed {
                UplinkPayloadType::Confirmed
            } else {
                UplinkPayloadType::Unconfirmed
            };
            match session.transmit_uplink(kind, port, payload)? {
                Some(downlink) => {
                    println!("Downlink on port {}", downlink.port);
                    print_packet(&downlink.payload);
                }
                None => info!("Uplink sent, no downlink"),
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = match cli.command {
        Commands::Ports => {
            print_ports();
            return Ok(());
        }
        Commands::Device(command) => command,
    };

    let config = connection_config(&cli.connection)?;
    let mut session = Session::open(&config)
        .with_context(|| format!("Failed to open {}", config.port_name))?;

    run(&mut session, command)?;

    let stats = session.stats();
    debug!(
        "{} lines sent, {} lines received",
        stats.lines_sent, stats.lines_received
    );
    Ok(())
}
