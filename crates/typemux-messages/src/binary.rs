//! Binary encoding/decoding for the demo message types.
//!
//! One message per buffer, big-endian fields. There is no per-type tag:
//!
//! ```text
//! Heartbeat
//! ---------
//! [0]      layout version (= LAYOUT_VERSION)
//! [1..9]   seq (u64 BE)
//! [9..13]  uptime_secs (u32 BE)
//!
//! SensorReading
//! -------------
//! [0]      layout version
//! [1..5]   sensor_id (u32 BE)
//! [5..13]  reading_micro (i64 BE)
//! [13]     unit_len (u8, 1..=MAX_LABEL_LEN)
//! [14..]   unit bytes (UTF-8)
//!
//! AlertEvent
//! ----------
//! [0]      layout version
//! [1..3]   code (u16 BE)
//! [3]      severity (0=Info, 1=Warning, 2=Critical)
//! [4]      label_len (u8, 1..=MAX_LABEL_LEN)
//! [5..]    label bytes (UTF-8)
//! ```
//!
//! Decoders check a minimum length and ignore trailing bytes. Nothing
//! here establishes which type a buffer belongs to; that decision is
//! the codec's, made from configuration or headers before a decoder is
//! ever invoked.

use crate::messages::{AlertEvent, Heartbeat, SensorReading, Severity};
use crate::wire::{validate_label_len, WireError, LAYOUT_VERSION, MAX_LABEL_LEN};

// ============================================================================
// Heartbeat
// ============================================================================

/// Encode a heartbeat, appending to `out`.
pub fn encode_heartbeat(h: &Heartbeat, out: &mut Vec<u8>) -> Result<(), WireError> {
    out.push(LAYOUT_VERSION);
    out.extend_from_slice(&h.seq.to_be_bytes());
    out.extend_from_slice(&h.uptime_secs.to_be_bytes());
    Ok(())
}

/// Decode a heartbeat from a binary buffer.
pub fn decode_heartbeat(buf: &[u8]) -> Result<Heartbeat, WireError> {
    if buf.len() < 13 {
        return Err(WireError::Truncated);
    }

    let version = buf[0];
    if version != LAYOUT_VERSION {
        return Err(WireError::VersionMismatch(version));
    }

    let seq = read_u64_be(&buf[1..9]);
    let uptime_secs = read_u32_be(&buf[9..13]);

    Ok(Heartbeat { seq, uptime_secs })
}

// ============================================================================
// SensorReading
// ============================================================================

/// Encode a sensor reading, appending to `out`.
pub fn encode_sensor_reading(r: &SensorReading, out: &mut Vec<u8>) -> Result<(), WireError> {
    let unit_bytes = r.unit.as_bytes();
    if !validate_label_len(unit_bytes.len()) {
        return Err(WireError::InvalidLabel);
    }

    out.push(LAYOUT_VERSION);
    out.extend_from_slice(&r.sensor_id.to_be_bytes());
    out.extend_from_slice(&r.reading_micro.to_be_bytes());

    out.push(u8::try_from(unit_bytes.len()).unwrap());
    out.extend_from_slice(unit_bytes);

    Ok(())
}

/// Decode a sensor reading from a binary buffer.
pub fn decode_sensor_reading(buf: &[u8]) -> Result<SensorReading, WireError> {
    if buf.len() < 14 {
        return Err(WireError::Truncated);
    }

    let version = buf[0];
    if version != LAYOUT_VERSION {
        return Err(WireError::VersionMismatch(version));
    }

    let sensor_id = read_u32_be(&buf[1..5]);
    let reading_micro = read_i64_be(&buf[5..13]);

    let unit_len = buf[13] as usize;
    if !validate_label_len(unit_len) {
        return Err(WireError::InvalidLabel);
    }
    if buf.len() < 14 + unit_len {
        return Err(WireError::Truncated);
    }

    let unit_bytes = &buf[14..14 + unit_len];
    let unit = std::str::from_utf8(unit_bytes)
        .map_err(|_| WireError::InvalidLabel)?
        .to_string();

    Ok(SensorReading {
        sensor_id,
        reading_micro,
        unit,
    })
}

// ============================================================================
// AlertEvent
// ============================================================================

/// Encode an alert event, appending to `out`.
pub fn encode_alert_event(a: &AlertEvent, out: &mut Vec<u8>) -> Result<(), WireError> {
    let label_bytes = a.label.as_bytes();
    if label_bytes.is_empty() || label_bytes.len() > MAX_LABEL_LEN {
        return Err(WireError::InvalidLabel);
    }

    out.push(LAYOUT_VERSION);
    out.extend_from_slice(&a.code.to_be_bytes());
    out.push(a.severity.as_u8());

    out.push(u8::try_from(label_bytes.len()).unwrap());
    out.extend_from_slice(label_bytes);

    Ok(())
}

/// Decode an alert event from a binary buffer.
pub fn decode_alert_event(buf: &[u8]) -> Result<AlertEvent, WireError> {
    if buf.len() < 5 {
        return Err(WireError::Truncated);
    }

    let version = buf[0];
    if version != LAYOUT_VERSION {
        return Err(WireError::VersionMismatch(version));
    }

    let code = read_u16_be(&buf[1..3]);

    let severity_raw = buf[3];
    let severity =
        Severity::from_u8(severity_raw).ok_or(WireError::InvalidField("severity"))?;

    let label_len = buf[4] as usize;
    if !validate_label_len(label_len) {
        return Err(WireError::InvalidLabel);
    }
    if buf.len() < 5 + label_len {
        return Err(WireError::Truncated);
    }

    let label_bytes = &buf[5..5 + label_len];
    let label = std::str::from_utf8(label_bytes)
        .map_err(|_| WireError::InvalidLabel)?
        .to_string();

    Ok(AlertEvent {
        code,
        severity,
        label,
    })
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn read_u16_be(bytes: &[u8]) -> u16 {
    let arr: [u8; 2] = bytes[0..2].try_into().expect("slice with incorrect length");
    u16::from_be_bytes(arr)
}

fn read_u32_be(bytes: &[u8]) -> u32 {
    let arr: [u8; 4] = bytes[0..4].try_into().expect("slice with incorrect length");
    u32::from_be_bytes(arr)
}

fn read_u64_be(bytes: &[u8]) -> u64 {
    let arr: [u8; 8] = bytes[0..8].try_into().expect("slice with incorrect length");
    u64::from_be_bytes(arr)
}

fn read_i64_be(bytes: &[u8]) -> i64 {
    let arr: [u8; 8] = bytes[0..8].try_into().expect("slice with incorrect length");
    i64::from_be_bytes(arr)
}
