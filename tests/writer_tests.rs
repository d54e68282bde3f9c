//! Writer tests: payload validation, write sweep, report rendering.

mod common;

use common::MockDevice;
use eeprom_probe::writer::{write_image, PayloadError, WriteFailure, PAYLOAD_LEN};

fn payload_of(byte_pair: &str) -> String {
    byte_pair.repeat(PAYLOAD_LEN / 2)
}

#[test]
fn test_write_rejects_short_payload() {
    let mut device = MockDevice::new();
    let result = write_image(&mut device, "abc");

    assert_eq!(result, Err(PayloadError::InvalidLength { actual: 3 }));
    assert!(device.transmits.is_empty());
}

#[test]
fn test_write_rejects_long_payload() {
    let mut device = MockDevice::new();
    let payload = "0".repeat(PAYLOAD_LEN + 1);
    let result = write_image(&mut device, &payload);

    assert_eq!(
        result,
        Err(PayloadError::InvalidLength {
            actual: PAYLOAD_LEN + 1
        })
    );
    assert!(device.transmits.is_empty());
}

#[test]
fn test_write_rejects_empty_payload() {
    let mut device = MockDevice::new();
    assert_eq!(
        write_image(&mut device, ""),
        Err(PayloadError::InvalidLength { actual: 0 })
    );
    assert!(device.transmits.is_empty());
}

#[test]
fn test_write_rejects_non_hex_payload() {
    let mut device = MockDevice::new();
    let mut payload = payload_of("00");
    payload.replace_range(10..11, "x");

    let result = write_image(&mut device, &payload);
    assert_eq!(result, Err(PayloadError::InvalidEncoding { offset: 10 }));
    assert!(device.transmits.is_empty());
}

#[test]
fn test_write_all_zeroes_succeeds() {
    let mut device = MockDevice::filled(0xFF);
    let report = write_image(&mut device, &payload_of("00")).unwrap();

    assert_eq!(report.written(), 256);
    assert!(report.failures().is_empty());
    assert_eq!(device.regs, [0u8; 256]);

    let mut out = String::new();
    report.render(&mut out);
    assert_eq!(out, "256/256 bytes succeeded\n");
}

#[test]
fn test_write_transactions_ascending() {
    let mut device = MockDevice::new();
    write_image(&mut device, &payload_of("a5")).unwrap();

    assert_eq!(device.transmits.len(), 256);
    for (i, frame) in device.transmits.iter().enumerate() {
        assert_eq!(frame.as_slice(), &[i as u8, 0xA5]);
    }
}

#[test]
fn test_write_decodes_case_insensitive_hex() {
    let mut device = MockDevice::new();
    let mut payload = payload_of("00");
    payload.replace_range(0..4, "aBCd");

    write_image(&mut device, &payload).unwrap();
    assert_eq!(device.regs[0], 0xAB);
    assert_eq!(device.regs[1], 0xCD);
}

#[test]
fn test_write_records_failures_and_continues() {
    let mut device = MockDevice::new();
    device.fail_transmit.extend([0x05, 0xFA]);

    let report = write_image(&mut device, &payload_of("11")).unwrap();

    assert_eq!(device.transmits.len(), 256);
    assert_eq!(report.written(), 254);
    assert_eq!(
        report.failures(),
        &[
            WriteFailure {
                addr: 0x05,
                value: 0x11
            },
            WriteFailure {
                addr: 0xFA,
                value: 0x11
            }
        ]
    );
}

#[test]
fn test_write_report_renders_failures_before_summary() {
    let mut device = MockDevice::new();
    device.fail_transmit.push(0x42);

    let report = write_image(&mut device, &payload_of("33")).unwrap();
    let mut out = String::new();
    report.render(&mut out);

    assert_eq!(
        out,
        "write failed @ 0x42 (value 0x33)\n255/256 bytes succeeded\n"
    );
}
