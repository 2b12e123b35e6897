//! End-to-end tests for compact mode: bare integral numbers and the
//! 32-bit range boundaries.

use jolt_rs::{Codec, CodecConfig, Error, Mode, Value, ValueKind};
use pretty_assertions::assert_eq;

fn compact() -> Codec {
    Codec::new(Mode::Compact)
}

// ============================================================================
// 1. Range boundaries
// ============================================================================

#[test]
fn test_lower_bound_is_bare() {
    let min = -(1_i64 << 31);
    assert_eq!(compact().to_json(&Value::Int(min)), "-2147483648");
    assert_eq!(compact().from_json("-2147483648", ValueKind::Integer).unwrap(), Value::Int(min));
}

#[test]
fn test_below_lower_bound_is_tagged() {
    assert_eq!(compact().to_json(&Value::Int(-(1_i64 << 31) - 1)), r#"{"R":"-2147483649"}"#);
}

#[test]
fn test_upper_bound_is_exclusive() {
    let max = (1_i64 << 31) - 1;
    assert_eq!(compact().to_json(&Value::Int(max)), r#"{"R":"2147483647"}"#);
    assert_eq!(compact().from_json(r#"{"R":"2147483647"}"#, ValueKind::WideNumber).unwrap(), Value::Int(max));
}

#[test]
fn test_just_below_upper_bound_is_bare() {
    let value = (1_i64 << 31) - 2;
    assert_eq!(compact().to_json(&Value::Int(value)), "2147483646");
    assert_eq!(compact().from_json("2147483646", ValueKind::Integer).unwrap(), Value::Int(value));
}

// ============================================================================
// 2. Everything else stays tagged
// ============================================================================

#[test]
fn test_floats_stay_tagged() {
    assert_eq!(compact().to_json(&Value::Float(1.0)), r#"{"R":"1.0"}"#);
}

#[test]
fn test_non_numeric_kinds_unaffected() {
    assert_eq!(compact().to_json(&Value::from("x")), r#"{"U":"x"}"#);
    assert_eq!(compact().to_json(&Value::Bool(true)), r#"{"?":"true"}"#);
}

#[test]
fn test_list_mixes_bare_and_tagged() {
    let list = Value::from(vec![Value::Int(1), Value::Int(1 << 40), Value::from("s")]);
    let json = compact().to_json(&list);
    assert_eq!(json, r#"{"[]":[1,{"R":"1099511627776"},{"U":"s"}]}"#);
    assert_eq!(compact().from_json(&json, ValueKind::List).unwrap(), list);
}

#[test]
fn test_tagged_integers_still_decode() {
    assert_eq!(compact().from_json(r#"{"Z":"12"}"#, ValueKind::Integer).unwrap(), Value::Int(12));
}

// ============================================================================
// 3. Verbose streams reject bare numbers
// ============================================================================

#[test]
fn test_verbose_rejects_bare_number() {
    let verbose = Codec::new(Mode::Verbose);
    assert!(matches!(verbose.from_json("12", ValueKind::Integer), Err(Error::StructureExpected { .. })));
    assert!(matches!(
        verbose.from_json(r#"{"{}":{"a":12}}"#, ValueKind::Map),
        Err(Error::StructureExpected { .. })
    ));
}

// ============================================================================
// 4. Configuration
// ============================================================================

#[test]
fn test_mode_from_config() {
    let config: CodecConfig = serde_json::from_str(r#"{"mode":"compact"}"#).unwrap();
    assert_eq!(Codec::from_config(&config).to_json(&Value::Int(5)), "5");

    let config: CodecConfig = serde_json::from_str(r#"{"mode":"verbose"}"#).unwrap();
    assert_eq!(Codec::from_config(&config).to_json(&Value::Int(5)), r#"{"Z":"5"}"#);
}

#[test]
fn test_mode_aliases() {
    assert_eq!("sparse".parse::<Mode>().unwrap(), Mode::Compact);
    assert_eq!("strict".parse::<Mode>().unwrap(), Mode::Verbose);
    assert!(matches!("chatty".parse::<Mode>(), Err(Error::InvalidMode(_))));
}
