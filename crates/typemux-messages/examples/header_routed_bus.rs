//! In-process bus demo: headers pick the decoder.
//!
//! A producer encodes three telemetry messages and sends each as a
//! `(Headers, payload)` pair over an mpsc channel, the stand-in for a
//! real transport. The consumer holds a codec configured with a default
//! type and header resolution enabled, so payloads carrying a type-info
//! header decode as the named type and the rest fall back to the
//! default.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use typemux_core::config::{VALUE_DEFAULT_TYPE, VALUE_TYPE, VALUE_USE_TYPE_INFO};
use typemux_core::{Headers, Message, Role, TypedCodec};
use typemux_messages::{default_type_table, AlertEvent, Heartbeat, SensorReading, Severity};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let universe = Arc::new(default_type_table());

    // Producer side: encoding never resolves, an unconfigured codec will do.
    let producer_codec = TypedCodec::new(universe.clone());

    // Consumer side: default to SensorReading, let headers override.
    let mut config = HashMap::new();
    config.insert(
        VALUE_DEFAULT_TYPE.to_string(),
        SensorReading::TYPE_NAME.to_string(),
    );
    config.insert(VALUE_USE_TYPE_INFO.to_string(), "true".to_string());

    let mut consumer_codec = TypedCodec::new(universe);
    consumer_codec.configure(&config, Role::Value);

    let (tx, mut rx) = mpsc::unbounded_channel::<(Headers, Vec<u8>)>();

    let consumer = tokio::spawn(async move {
        while let Some((headers, payload)) = rx.recv().await {
            match consumer_codec.decode_with_headers(Some(payload.as_slice()), &headers) {
                Ok(msg) => {
                    if let Some(hb) = msg.downcast_ref::<Heartbeat>() {
                        info!(seq = hb.seq, uptime_secs = hb.uptime_secs, "heartbeat");
                    } else if let Some(r) = msg.downcast_ref::<SensorReading>() {
                        info!(
                            sensor_id = r.sensor_id,
                            reading_micro = r.reading_micro,
                            unit = %r.unit,
                            "sensor reading"
                        );
                    } else if let Some(a) = msg.downcast_ref::<AlertEvent>() {
                        info!(code = a.code, severity = ?a.severity, label = %a.label, "alert");
                    }
                }
                Err(e) => eprintln!("decode error: {}", e),
            }
        }
        consumer_codec.close();
    });

    // No header: the consumer falls back to its default type.
    let reading = SensorReading::new(7, 21_500_000, "C");
    tx.send((Headers::new(), producer_codec.encode(Some(&reading))?))?;

    // Type-info header: decodes as the named type, default ignored.
    let heartbeat = Heartbeat {
        seq: 1,
        uptime_secs: 3600,
    };
    let mut headers = Headers::new();
    headers.append(VALUE_TYPE, heartbeat.type_name());
    tx.send((headers, producer_codec.encode(Some(&heartbeat))?))?;

    let alert = AlertEvent::new(404, Severity::Warning, "link down");
    let mut headers = Headers::new();
    headers.append(VALUE_TYPE, alert.type_name());
    tx.send((headers, producer_codec.encode(Some(&alert))?))?;

    drop(tx);
    consumer.await?;

    Ok(())
}
