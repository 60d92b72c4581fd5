//! Command rendering and reply classification through the public API

use lostik_core::hex;
use lostik_core::protocol::commands::{
    MacCommand, RadioCommand, RadioGet, RadioSet, SystemCommand, SystemGet, SystemSet,
};
use lostik_core::protocol::{Command, Downlink, ResponseCode, Status};
use lostik_core::types::{
    Band, EepromAddress, Payload, Pin, PinMode, PinState, Port, TxPower, UplinkPayloadType,
    ValidationError,
};
use pretty_assertions::assert_eq;

#[test]
fn test_reference_lines() {
    let rom: Command =
        SystemCommand::Set(SystemSet::Rom(EepromAddress::new(0x300).unwrap(), 0xA5)).into();
    assert_eq!(rom.to_line(), "sys set nvm 300 A5");
    assert_eq!(rom.encode(), b"sys set nvm 300 A5\r\n".to_vec());

    let sleep: Command = SystemCommand::Sleep(120).into();
    assert_eq!(sleep.to_line(), "sys sleep 120");

    let pin: Command = SystemCommand::Set(SystemSet::DigitalPin(Pin::Gpio5, PinState::On)).into();
    assert_eq!(pin.to_string(), "sys set pindig GPIO5 1");
}

#[test]
fn test_blink_sequence() {
    let lines: Vec<String> = [
        SystemCommand::Set(SystemSet::PinMode(Pin::Gpio11, PinMode::DigitalOut)),
        SystemCommand::Set(SystemSet::DigitalPin(Pin::Gpio11, PinState::On)),
        SystemCommand::Set(SystemSet::DigitalPin(Pin::Gpio11, PinState::Off)),
    ]
    .into_iter()
    .map(|cmd| Command::from(cmd).to_line())
    .collect();

    assert_eq!(
        lines,
        vec![
            "sys set pinmode GPIO11 digout",
            "sys set pindig GPIO11 1",
            "sys set pindig GPIO11 0",
        ]
    );
}

#[test]
fn test_every_pin_renders_its_name() {
    for pin in Pin::ALL {
        let line = Command::from(SystemCommand::Get(SystemGet::DigitalPin(pin))).to_line();
        assert_eq!(line, format!("sys get pindig {}", pin.name()));
    }
    assert_eq!(Pin::UartCts.name(), "UART_CTS");
}

#[test]
fn test_receiver_setup_lines() {
    let lines: Vec<String> = vec![
        Command::from(MacCommand::Pause),
        RadioCommand::Set(RadioSet::Power(TxPower::new(10).unwrap())).into(),
        RadioCommand::Get(RadioGet::Power).into(),
        RadioCommand::Receive(0).into(),
    ]
    .iter()
    .map(Command::to_line)
    .collect();

    assert_eq!(
        lines,
        vec!["mac pause", "radio set pwr 10", "radio get pwr", "radio rx 0"]
    );
}

#[test]
fn test_mac_reset_band() {
    let band: Band = "433".parse().unwrap();
    assert_eq!(
        Command::from(MacCommand::Reset(Some(band))).to_line(),
        "mac reset 433"
    );
    assert_eq!(Band::new(915), Err(ValidationError::Band(915)));
}

#[test]
fn test_negative_power() {
    let cmd: Command = RadioCommand::Set(RadioSet::Power(TxPower::new(-3).unwrap())).into();
    assert_eq!(cmd.to_line(), "radio set pwr -3");
    assert_eq!(TxPower::new(-4), Err(ValidationError::TxPower(-4)));
}

#[test]
fn test_uplink_line() {
    let cmd: Command = MacCommand::Transmit {
        kind: UplinkPayloadType::Confirmed,
        port: Port::MAX,
        payload: Payload::new(hex::decode("deadbeef").unwrap()).unwrap(),
    }
    .into();
    assert_eq!(cmd.to_line(), "mac tx cnf 223 DEADBEEF");
}

#[test]
fn test_operand_validation() {
    assert_eq!(
        EepromAddress::new(0x2FF),
        Err(ValidationError::EepromAddress(0x2FF))
    );
    assert_eq!(
        EepromAddress::new(0x400),
        Err(ValidationError::EepromAddress(0x400))
    );
    assert_eq!(Port::new(0), Err(ValidationError::Port(0)));
    assert_eq!(Port::new(224), Err(ValidationError::Port(224)));
    assert_eq!(Port::new(1).unwrap().get(), 1);
    assert_eq!(Port::new(223).unwrap().get(), 223);
    assert!(matches!(
        Payload::new(vec![0u8; 256]),
        Err(ValidationError::PayloadTooLarge(256))
    ));
}

#[test]
fn test_identifier_hex() {
    let text = hex::encode_u64(0x0004_A30B_0026_A211);
    assert_eq!(text, "0004A30B0026A211");
    assert_eq!(text.len(), 16);
    assert_eq!(hex::decode_u64(&text).unwrap(), 0x0004_A30B_0026_A211);
}

#[test]
fn test_reply_classification() {
    assert_eq!(
        ResponseCode::parse("invalid_param").unwrap(),
        ResponseCode::Status(Status::InvalidParam)
    );
    assert_eq!(
        ResponseCode::parse("mac_rx 1 00").unwrap(),
        ResponseCode::MacRx(Downlink {
            port: Port::MIN,
            payload: vec![0x00],
        })
    );
    assert_eq!(
        ResponseCode::parse("0004A30B0026A211").unwrap(),
        ResponseCode::Other("0004A30B0026A211".into())
    );
    assert!(Status::RadioErr.is_negative());
    assert!(!Status::RadioTxOk.is_negative());
}
