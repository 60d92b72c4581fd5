//! Session behaviour against a scripted module

use chrono::NaiveDate;
use lostik_core::protocol::{ProtocolError, Session, Transport};
use lostik_core::types::{
    Band, EepromAddress, FirmwareVersion, HardwareIdentifier, Model, Payload, Pin, PinMode, PinState,
    Port, TxPower, UplinkPayloadType,
};
use pretty_assertions::assert_eq;
use std::collections::VecDeque;

/// Mock module: replays canned reply lines and records what was written
struct MockTransport {
    replies: VecDeque<String>,
    written: Vec<String>,
    fail_on_write: bool,
}

impl MockTransport {
    fn with_replies(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|s| s.to_string()).collect(),
            written: Vec::new(),
            fail_on_write: false,
        }
    }

    fn unread(&self) -> usize {
        self.replies.len()
    }
}

impl Transport for MockTransport {
    fn write_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        if self.fail_on_write {
            return Err(ProtocolError::SerialError("Serial write failed".into()));
        }
        self.written.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ProtocolError> {
        self.replies.pop_front().ok_or(ProtocolError::Timeout)
    }
}

fn session(replies: &[&str]) -> Session<MockTransport> {
    Session::new(MockTransport::with_replies(replies))
}

fn written(session: &Session<MockTransport>) -> Vec<&str> {
    session
        .transport()
        .written
        .iter()
        .map(String::as_str)
        .collect()
}

#[test]
fn test_version_query() {
    let mut s = session(&["RN2903 1.0.3 Aug 8 2017 15:11:09"]);
    let version = s.version().unwrap();

    assert_eq!(written(&s), vec!["sys get ver"]);
    assert_eq!(version.model, Model::America);
    assert_eq!(version.firmware, FirmwareVersion::new(1, 0, 3));
    assert_eq!(
        version.release,
        NaiveDate::from_ymd_opt(2017, 8, 8)
            .unwrap()
            .and_hms_opt(15, 11, 9)
            .unwrap()
    );
    assert_eq!(version.to_string(), "RN2903 1.0.3 Aug 8 2017 15:11:09");
}

#[test]
fn test_reset_returns_banner() {
    let mut s = session(&["RN2483 1.0.4 Oct 12 2017 14:59:25"]);
    let version = s.reset().unwrap();
    assert_eq!(written(&s), vec!["sys reset"]);
    assert_eq!(version.model, Model::Europe);
}

#[test]
fn test_factory_reset_returns_banner() {
    let mut s = session(&["RN2903 1.0.3 Aug 8 2017 15:11:09"]);
    s.factory_reset().unwrap();
    assert_eq!(written(&s), vec!["sys factoryRESET"]);
}

#[test]
fn test_garbled_banner_is_unexpected() {
    let mut s = session(&["RN9999 1.0.3 Aug 8 2017 15:11:09"]);
    let err = s.version().unwrap_err();
    assert_eq!(err.response(), Some("RN9999 1.0.3 Aug 8 2017 15:11:09"));
}

#[test]
fn test_set_rom() {
    let mut s = session(&["ok"]);
    s.set_rom(EepromAddress::new(0x300).unwrap(), 0xA5).unwrap();
    assert_eq!(written(&s), vec!["sys set nvm 300 A5"]);
}

#[test]
fn test_set_rom_refused() {
    let mut s = session(&["invalid_param"]);
    let err = s
        .set_rom(EepromAddress::new(0x300).unwrap(), 0xA5)
        .unwrap_err();
    assert!(matches!(err, ProtocolError::UnexpectedResponse(ref raw) if raw == "invalid_param"));
}

#[test]
fn test_read_rom() {
    let mut s = session(&["A5", "0f"]);
    assert_eq!(s.rom(EepromAddress::MAX).unwrap(), 0xA5);
    assert_eq!(s.rom(EepromAddress::MIN).unwrap(), 0x0F);
    assert_eq!(written(&s), vec!["sys get nvm 3FF", "sys get nvm 300"]);
}

#[test]
fn test_voltage_and_identifier() {
    let mut s = session(&["3312", "0004A30B0026A211"]);
    assert_eq!(s.voltage().unwrap(), 3312);
    assert_eq!(
        s.hardware_identifier().unwrap(),
        HardwareIdentifier::new(0x0004_A30B_0026_A211)
    );
    assert_eq!(written(&s), vec!["sys get vdd", "sys get hweui"]);
}

#[test]
fn test_non_numeric_voltage() {
    let mut s = session(&["invalid_param"]);
    assert!(matches!(
        s.voltage(),
        Err(ProtocolError::UnexpectedResponse(_))
    ));
}

#[test]
fn test_pins() {
    let mut s = session(&["ok", "ok", "1", "ok", "512"]);
    s.set_pin_mode(Pin::Gpio10, PinMode::DigitalOut).unwrap();
    s.set_pin_state(Pin::Gpio10, PinState::On).unwrap();
    assert_eq!(s.pin_state(Pin::Gpio10).unwrap(), PinState::On);
    s.set_pin_mode(Pin::Gpio0, PinMode::Analog).unwrap();
    assert_eq!(s.analog_value(Pin::Gpio0).unwrap(), 512);

    assert_eq!(
        written(&s),
        vec![
            "sys set pinmode GPIO10 digout",
            "sys set pindig GPIO10 1",
            "sys get pindig GPIO10",
            "sys set pinmode GPIO0 ana",
            "sys get pinana GPIO0",
        ]
    );
}

#[test]
fn test_sleep() {
    let mut s = session(&["ok"]);
    s.sleep(120).unwrap();
    assert_eq!(written(&s), vec!["sys sleep 120"]);
}

#[test]
fn test_erase_firmware_reads_nothing() {
    let mut s = session(&["RN2903 1.0.3 Aug 8 2017 15:11:09"]);
    s.erase_firmware().unwrap();
    assert_eq!(written(&s), vec!["sys eraseFW"]);
    assert_eq!(s.transport().unread(), 1);
    assert_eq!(s.stats().lines_received, 0);
}

#[test]
fn test_radio_transmit_success() {
    let mut s = session(&["ok", "radio_tx_ok"]);
    s.transmit(Payload::new(b"Hi".to_vec()).unwrap()).unwrap();
    assert_eq!(written(&s), vec!["radio tx 4869"]);
    assert_eq!(s.stats().lines_received, 2);
}

#[test]
fn test_radio_transmit_failure() {
    let mut s = session(&["ok", "radio_err"]);
    let err = s.transmit(Payload::new(vec![0x01]).unwrap()).unwrap_err();
    assert_eq!(err.response(), Some("radio_err"));
}

#[test]
fn test_refused_acknowledgement_skips_second_read() {
    let mut s = session(&["busy", "radio_tx_ok"]);
    let err = s.transmit(Payload::new(vec![0x01]).unwrap()).unwrap_err();
    assert_eq!(err.response(), Some("busy"));
    assert_eq!(s.transport().unread(), 1);
}

#[test]
fn test_radio_receive() {
    let mut s = session(&["ok", "radio_rx  48656C6C6F"]);
    assert_eq!(s.receive(0).unwrap(), b"Hello".to_vec());
    assert_eq!(written(&s), vec!["radio rx 0"]);
}

#[test]
fn test_radio_receive_window_closed() {
    let mut s = session(&["ok", "radio_err"]);
    assert!(matches!(
        s.receive(1000),
        Err(ProtocolError::UnexpectedResponse(_))
    ));
}

#[test]
fn test_radio_receive_bad_payload() {
    let mut s = session(&["ok", "radio_rx XYZ"]);
    assert!(matches!(s.receive(0), Err(ProtocolError::MalformedHex(_))));
}

#[test]
fn test_radio_receive_empty_packet() {
    let mut s = session(&["ok", "radio_rx"]);
    let err = s.receive(0).unwrap_err();
    assert_eq!(err.response(), Some("radio_rx"));
    assert_eq!(s.stats().lines_received, 2);
}

#[test]
fn test_radio_power() {
    let mut s = session(&["ok", "10", "ok", "ok"]);
    s.set_power(TxPower::new(10).unwrap()).unwrap();
    assert_eq!(s.power().unwrap(), 10);
    s.continuous_wave(true).unwrap();
    s.continuous_wave(false).unwrap();
    assert_eq!(
        written(&s),
        vec![
            "radio set pwr 10",
            "radio get pwr",
            "radio cw on",
            "radio cw off"
        ]
    );
}

#[test]
fn test_radio_settings() {
    let mut s = session(&["lora", "868100000", "sf12"]);
    assert_eq!(s.modulation().unwrap(), "lora");
    assert_eq!(s.frequency().unwrap(), 868_100_000);
    assert_eq!(s.spreading_factor().unwrap(), "sf12");
    assert_eq!(
        written(&s),
        vec!["radio get mod", "radio get freq", "radio get sf"]
    );
}

#[test]
fn test_radio_settings_refused() {
    let mut s = session(&["busy", "invalid_param"]);
    assert_eq!(s.modulation().unwrap_err().response(), Some("busy"));
    assert_eq!(s.frequency().unwrap_err().response(), Some("invalid_param"));
}

#[test]
fn test_mac_pause_resume() {
    let mut s = session(&["4294967245", "ok"]);
    assert_eq!(s.pause().unwrap(), 4_294_967_245);
    s.resume().unwrap();
    assert_eq!(written(&s), vec!["mac pause", "mac resume"]);
}

#[test]
fn test_mac_misc() {
    let mut s = session(&["ok", "ok", "ok"]);
    s.mac_reset(None).unwrap();
    s.save().unwrap();
    s.force_enable().unwrap();
    assert_eq!(
        written(&s),
        vec!["mac reset", "mac save", "mac forceENABLE"]
    );
}

#[test]
fn test_mac_reset_with_band() {
    let mut s = session(&["ok", "invalid_param"]);
    s.mac_reset(Some(Band::Mhz868)).unwrap();
    let err = s.mac_reset(Some(Band::Mhz433)).unwrap_err();
    assert_eq!(err.response(), Some("invalid_param"));
    assert_eq!(written(&s), vec!["mac reset 868", "mac reset 433"]);
}

#[test]
fn test_uplink_without_downlink() {
    let mut s = session(&["ok", "mac_tx_ok"]);
    let downlink = s
        .transmit_uplink(
            UplinkPayloadType::Unconfirmed,
            Port::new(1).unwrap(),
            Payload::new(vec![0x5C, 0x8B, 0x1E, 0x60]).unwrap(),
        )
        .unwrap();
    assert_eq!(downlink, None);
    assert_eq!(written(&s), vec!["mac tx uncnf 1 5C8B1E60"]);
}

#[test]
fn test_uplink_with_downlink() {
    let mut s = session(&["ok", "mac_rx 4 AABB"]);
    let downlink = s
        .transmit_uplink(
            UplinkPayloadType::Confirmed,
            Port::new(223).unwrap(),
            Payload::new(vec![0x01]).unwrap(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(downlink.port.get(), 4);
    assert_eq!(downlink.payload, vec![0xAA, 0xBB]);
    assert_eq!(written(&s), vec!["mac tx cnf 223 01"]);
}

#[test]
fn test_uplink_not_joined() {
    let mut s = session(&["not_joined"]);
    let err = s
        .transmit_uplink(
            UplinkPayloadType::Unconfirmed,
            Port::new(1).unwrap(),
            Payload::new(vec![0x01]).unwrap(),
        )
        .unwrap_err();
    assert_eq!(err.response(), Some("not_joined"));
}

#[test]
fn test_timeout_propagates() {
    let mut s = session(&[]);
    assert!(matches!(s.version(), Err(ProtocolError::Timeout)));
}

#[test]
fn test_write_failure_propagates() {
    let mut transport = MockTransport::with_replies(&["ok"]);
    transport.fail_on_write = true;
    let mut s = Session::new(transport);
    let err = s.sleep(10).unwrap_err();
    assert!(err.is_transport());
    assert_eq!(s.stats().lines_sent, 0);
}

#[test]
fn test_session_over_borrowed_transport() {
    let mut transport = MockTransport::with_replies(&["3300"]);
    {
        let mut s = Session::new(&mut transport);
        assert_eq!(s.voltage().unwrap(), 3300);
    }
    assert_eq!(transport.written, vec!["sys get vdd".to_string()]);
}
