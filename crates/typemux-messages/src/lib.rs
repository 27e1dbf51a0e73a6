//! typemux-messages
//!
//! Demo telemetry message family for the typemux codec:
//! - [`messages`] : the logical message types
//! - [`wire`]     : shared wire constants and the wire error type
//! - [`binary`]   : per-type binary encode/decode
//!
//! Each type implements the `Message` capability and exports a
//! `TypeRecord` so it can be registered into a type universe at
//! startup. Type identity never travels inside the payload bytes; it
//! is configuration or headers that decide which decoder runs.

pub mod binary;
pub mod messages;
pub mod wire;

pub use messages::{AlertEvent, Heartbeat, SensorReading, Severity};
pub use wire::WireError;

use typemux_core::{BoxError, BoxMessage, TypeRecord, TypeTable};

/// Register every demo message type into `table`.
pub fn register_all(table: &mut TypeTable) {
    table.register(TypeRecord::message(Heartbeat::TYPE_NAME, decode_heartbeat));
    table.register(TypeRecord::message(
        SensorReading::TYPE_NAME,
        decode_sensor_reading,
    ));
    table.register(TypeRecord::message(AlertEvent::TYPE_NAME, decode_alert_event));
}

/// A fresh type universe holding every demo message type.
pub fn default_type_table() -> TypeTable {
    let mut table = TypeTable::new();
    register_all(&mut table);
    table
}

// Registered decode entries: typed decoders boxed up behind the
// registry's uniform signature.

fn decode_heartbeat(buf: &[u8]) -> Result<BoxMessage, BoxError> {
    Ok(Box::new(binary::decode_heartbeat(buf)?))
}

fn decode_sensor_reading(buf: &[u8]) -> Result<BoxMessage, BoxError> {
    Ok(Box::new(binary::decode_sensor_reading(buf)?))
}

fn decode_alert_event(buf: &[u8]) -> Result<BoxMessage, BoxError> {
    Ok(Box::new(binary::decode_alert_event(buf)?))
}
