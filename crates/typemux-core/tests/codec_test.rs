// crates/typemux-core/tests/codec_test.rs
//
// End-to-end codec behavior against the demo telemetry types:
// resolution precedence, fallbacks, lazy default validation, and the
// documented cross-type decode hazard.

use std::collections::HashMap;
use std::sync::Arc;

use typemux_core::config::{
    KEY_DEFAULT_TYPE, KEY_TYPE, KEY_USE_TYPE_INFO, VALUE_DEFAULT_TYPE, VALUE_TYPE,
    VALUE_USE_TYPE_INFO,
};
use typemux_core::{CodecError, Headers, Role, TypedCodec};
use typemux_messages::{default_type_table, AlertEvent, Heartbeat, SensorReading, Severity};

fn codec() -> TypedCodec {
    TypedCodec::new(Arc::new(default_type_table()))
}

fn configure(codec: &mut TypedCodec, entries: &[(&str, &str)], role: Role) {
    let config: HashMap<String, String> = entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    codec.configure(&config, role);
}

#[test]
fn round_trip_with_configured_default() {
    let mut codec = codec();
    configure(
        &mut codec,
        &[(VALUE_DEFAULT_TYPE, SensorReading::TYPE_NAME)],
        Role::Value,
    );

    let reading = SensorReading::new(12, 993_250_000, "hPa");
    let bytes = codec.encode(Some(&reading)).unwrap();

    let decoded = codec.decode(Some(&bytes)).unwrap();
    assert_eq!(decoded.downcast_ref::<SensorReading>(), Some(&reading));

    codec.close();
}

#[test]
fn header_type_info_wins_over_default() {
    let mut codec = codec();
    configure(
        &mut codec,
        &[
            (VALUE_DEFAULT_TYPE, SensorReading::TYPE_NAME),
            (VALUE_USE_TYPE_INFO, "true"),
        ],
        Role::Value,
    );

    let hb = Heartbeat {
        seq: 77,
        uptime_secs: 120,
    };
    let bytes = codec.encode(Some(&hb)).unwrap();

    let mut headers = Headers::new();
    headers.append(VALUE_TYPE, Heartbeat::TYPE_NAME);

    let decoded = codec.decode_with_headers(Some(&bytes), &headers).unwrap();
    assert_eq!(decoded.downcast_ref::<Heartbeat>(), Some(&hb));
}

#[test]
fn header_resolution_falls_back_to_default() {
    let mut codec = codec();
    configure(
        &mut codec,
        &[
            (VALUE_DEFAULT_TYPE, SensorReading::TYPE_NAME),
            (VALUE_USE_TYPE_INFO, "true"),
        ],
        Role::Value,
    );

    let reading = SensorReading::new(3, 100, "C");
    let bytes = codec.encode(Some(&reading)).unwrap();

    // No type-info entry at all: the configured default applies.
    let decoded = codec
        .decode_with_headers(Some(&bytes), &Headers::new())
        .unwrap();
    assert_eq!(decoded.downcast_ref::<SensorReading>(), Some(&reading));
}

#[test]
fn metadata_less_decode_never_consults_headers() {
    let mut codec = codec();
    configure(
        &mut codec,
        &[
            (VALUE_DEFAULT_TYPE, SensorReading::TYPE_NAME),
            (VALUE_USE_TYPE_INFO, "true"),
        ],
        Role::Value,
    );

    let reading = SensorReading::new(8, 12_000_000, "V");
    let bytes = codec.encode(Some(&reading)).unwrap();

    // use_type_info is on, but the metadata-less entry point still
    // resolves through the static default.
    let decoded = codec.decode(Some(&bytes)).unwrap();
    assert_eq!(decoded.downcast_ref::<SensorReading>(), Some(&reading));
}

#[test]
fn no_default_and_no_metadata_is_fatal() {
    let codec = codec();

    let result = codec.decode(Some(&[0u8; 16]));
    assert!(matches!(result, Err(CodecError::NoDecoderAvailable)));

    // Same terminal state through the header-aware entry point when
    // type info is enabled but nothing usable is present.
    let mut codec = TypedCodec::new(Arc::new(default_type_table()));
    configure(&mut codec, &[(VALUE_USE_TYPE_INFO, "true")], Role::Value);
    let result = codec.decode_with_headers(Some(&[0u8; 16]), &Headers::new());
    assert!(matches!(result, Err(CodecError::NoDecoderAvailable)));
}

#[test]
fn bad_default_type_surfaces_at_decode_not_configure() {
    let mut codec = codec();

    // Configure accepts the name without looking at it.
    configure(
        &mut codec,
        &[(VALUE_DEFAULT_TYPE, "telemetry.v1.Retired")],
        Role::Value,
    );

    let result = codec.decode(Some(&[1u8, 2, 3]));
    assert!(matches!(
        result,
        Err(CodecError::UnknownType(name)) if name == "telemetry.v1.Retired"
    ));
}

#[test]
fn first_header_entry_wins() {
    let mut codec = codec();
    configure(
        &mut codec,
        &[
            (VALUE_DEFAULT_TYPE, SensorReading::TYPE_NAME),
            (VALUE_USE_TYPE_INFO, "true"),
        ],
        Role::Value,
    );

    let hb = Heartbeat {
        seq: 5,
        uptime_secs: 60,
    };
    let bytes = codec.encode(Some(&hb)).unwrap();

    let mut headers = Headers::new();
    headers.append(VALUE_TYPE, Heartbeat::TYPE_NAME);
    headers.append(VALUE_TYPE, AlertEvent::TYPE_NAME);

    let decoded = codec.decode_with_headers(Some(&bytes), &headers).unwrap();
    assert!(decoded.is::<Heartbeat>());
}

#[test]
fn key_role_reads_its_own_keys_and_header() {
    let mut codec = codec();

    // Both roles configured at once; the key-role codec must only see
    // the key-side trio.
    configure(
        &mut codec,
        &[
            (KEY_DEFAULT_TYPE, Heartbeat::TYPE_NAME),
            (KEY_USE_TYPE_INFO, "true"),
            (VALUE_DEFAULT_TYPE, SensorReading::TYPE_NAME),
            (VALUE_USE_TYPE_INFO, "true"),
        ],
        Role::Key,
    );

    let alert = AlertEvent::new(17, Severity::Info, "fan speed");
    let bytes = codec.encode(Some(&alert)).unwrap();

    // The value-side header key is not this role's key; it is ignored
    // and the key-side entry decides.
    let mut headers = Headers::new();
    headers.append(VALUE_TYPE, SensorReading::TYPE_NAME);
    headers.append(KEY_TYPE, AlertEvent::TYPE_NAME);

    let decoded = codec.decode_with_headers(Some(&bytes), &headers).unwrap();
    assert_eq!(decoded.downcast_ref::<AlertEvent>(), Some(&alert));
}

#[test]
fn cross_type_decode_is_not_validated() {
    // Decoders perform no cross-type validation: bytes of one type
    // parsed as another succeed with bytes-determined garbage.
    let mut codec = codec();
    configure(
        &mut codec,
        &[(VALUE_DEFAULT_TYPE, Heartbeat::TYPE_NAME)],
        Role::Value,
    );

    let reading = SensorReading::new(0xDEAD_BEEF, 42_000_000, "C");
    let bytes = codec.encode(Some(&reading)).unwrap();

    let decoded = codec.decode(Some(&bytes)).unwrap();
    let hb = decoded.downcast_ref::<Heartbeat>().unwrap();

    // The fields are whatever the foreign bytes happen to spell.
    let expected_seq = u64::from_be_bytes(bytes[1..9].try_into().unwrap());
    let expected_uptime = u32::from_be_bytes(bytes[9..13].try_into().unwrap());
    assert_eq!(hb.seq, expected_seq);
    assert_eq!(hb.uptime_secs, expected_uptime);
}

#[test]
fn absent_payload_and_message_are_rejected() {
    let mut codec = codec();
    configure(
        &mut codec,
        &[(VALUE_DEFAULT_TYPE, Heartbeat::TYPE_NAME)],
        Role::Value,
    );

    assert!(matches!(
        codec.encode(None),
        Err(CodecError::MissingPayload)
    ));
    assert!(matches!(
        codec.decode(None),
        Err(CodecError::MissingPayload)
    ));
    assert!(matches!(
        codec.decode_with_headers(None, &Headers::new()),
        Err(CodecError::MissingPayload)
    ));
}

#[test]
fn per_type_decoder_failures_propagate() {
    let mut codec = codec();
    configure(
        &mut codec,
        &[(VALUE_DEFAULT_TYPE, SensorReading::TYPE_NAME)],
        Role::Value,
    );

    // Far too short for a sensor reading; the type's own decoder
    // rejects it and the codec wraps the failure.
    let result = codec.decode(Some(&[1u8, 0, 0]));
    match result {
        Err(CodecError::Decode { type_name, .. }) => {
            assert_eq!(type_name, SensorReading::TYPE_NAME);
        }
        other => panic!("expected Decode error, got {:?}", other),
    }
}

#[test]
fn encoder_failures_propagate() {
    let codec = codec();

    // Empty unit label is invalid for the type's own encoder.
    let bad = SensorReading::new(1, 1, "");
    assert!(matches!(
        codec.encode(Some(&bad)),
        Err(CodecError::Encode(_))
    ));
}

#[test]
fn reconfigure_is_last_write_wins_and_keeps_cache() {
    let mut codec = codec();
    configure(
        &mut codec,
        &[(VALUE_DEFAULT_TYPE, Heartbeat::TYPE_NAME)],
        Role::Value,
    );

    let hb = Heartbeat {
        seq: 2,
        uptime_secs: 10,
    };
    let hb_bytes = codec.encode(Some(&hb)).unwrap();
    assert!(codec.decode(Some(&hb_bytes)).unwrap().is::<Heartbeat>());

    // Second configure call: the new default takes over.
    configure(
        &mut codec,
        &[(VALUE_DEFAULT_TYPE, SensorReading::TYPE_NAME)],
        Role::Value,
    );

    let reading = SensorReading::new(9, 500, "lux");
    let bytes = codec.encode(Some(&reading)).unwrap();
    assert!(codec.decode(Some(&bytes)).unwrap().is::<SensorReading>());

    // A configure call without the default key keeps the prior default.
    configure(&mut codec, &[(VALUE_USE_TYPE_INFO, "true")], Role::Value);
    assert!(codec.decode(Some(&bytes)).unwrap().is::<SensorReading>());
}

#[test]
fn close_is_an_idempotent_no_op() {
    let mut codec = codec();
    configure(
        &mut codec,
        &[(VALUE_DEFAULT_TYPE, Heartbeat::TYPE_NAME)],
        Role::Value,
    );

    codec.close();
    codec.close();

    let hb = Heartbeat {
        seq: 1,
        uptime_secs: 1,
    };
    let bytes = codec.encode(Some(&hb)).unwrap();
    assert!(codec.decode(Some(&bytes)).unwrap().is::<Heartbeat>());
}
