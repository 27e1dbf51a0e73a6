//! The logical demo message types.
//!
//! These are transport-agnostic values; their binary layouts live in
//! [`crate::binary`]. Each type carries a fully-qualified, stable
//! `TYPE_NAME` used as configuration value, header value, and registry
//! key.

use std::any::Any;

use typemux_core::{BoxError, Message};

use crate::binary;

/// Liveness beacon from a telemetry source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heartbeat {
    /// Monotonic sequence number of this beacon.
    pub seq: u64,

    /// Seconds the source has been up.
    pub uptime_secs: u32,
}

impl Heartbeat {
    /// Stable wire-facing name of this type.
    pub const TYPE_NAME: &'static str = "telemetry.v1.Heartbeat";
}

impl Message for Heartbeat {
    fn type_name(&self) -> &'static str {
        Heartbeat::TYPE_NAME
    }

    fn encode_to_bytes(&self) -> Result<Vec<u8>, BoxError> {
        let mut out = Vec::with_capacity(16);
        binary::encode_heartbeat(self, &mut out)?;
        Ok(out)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One sampled measurement from a sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    /// Numeric sensor identifier.
    pub sensor_id: u32,

    /// Measured value in millionths of the unit (fixed-point).
    pub reading_micro: i64,

    /// Unit label, e.g. `"C"` or `"hPa"`. 1..=64 bytes UTF-8.
    pub unit: String,
}

impl SensorReading {
    /// Stable wire-facing name of this type.
    pub const TYPE_NAME: &'static str = "telemetry.v1.SensorReading";

    /// Convenience constructor.
    pub fn new(sensor_id: u32, reading_micro: i64, unit: impl Into<String>) -> Self {
        SensorReading {
            sensor_id,
            reading_micro,
            unit: unit.into(),
        }
    }
}

impl Message for SensorReading {
    fn type_name(&self) -> &'static str {
        SensorReading::TYPE_NAME
    }

    fn encode_to_bytes(&self) -> Result<Vec<u8>, BoxError> {
        let mut out = Vec::with_capacity(32);
        binary::encode_sensor_reading(self, &mut out)?;
        Ok(out)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Alert severity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// Wire byte for this severity.
    pub fn as_u8(self) -> u8 {
        match self {
            Severity::Info => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
        }
    }

    /// Parse a wire byte back into a severity.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Severity::Info),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Critical),
            _ => None,
        }
    }
}

/// An operator-facing alert raised by a telemetry source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEvent {
    /// Numeric alert code.
    pub code: u16,

    /// How urgent the alert is.
    pub severity: Severity,

    /// Short human-readable label. 1..=64 bytes UTF-8.
    pub label: String,
}

impl AlertEvent {
    /// Stable wire-facing name of this type.
    pub const TYPE_NAME: &'static str = "telemetry.v1.AlertEvent";

    /// Convenience constructor.
    pub fn new(code: u16, severity: Severity, label: impl Into<String>) -> Self {
        AlertEvent {
            code,
            severity,
            label: label.into(),
        }
    }
}

impl Message for AlertEvent {
    fn type_name(&self) -> &'static str {
        AlertEvent::TYPE_NAME
    }

    fn encode_to_bytes(&self) -> Result<Vec<u8>, BoxError> {
        let mut out = Vec::with_capacity(32);
        binary::encode_alert_event(self, &mut out)?;
        Ok(out)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
