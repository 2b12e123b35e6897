//! Property-based round trips: decode(encode(v)) == v for every kind, in
//! both modes.

#![allow(clippy::float_cmp)]

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use jolt_rs::{
    Codec, IsoDuration, Mode, Node, NodeId, OffsetTime, Path, RelId, Relationship, Value, ValueKind,
    ZonedDateTime,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1_i32..=9999, 1_u32..=365).prop_filter_map("valid ordinal", |(y, d)| NaiveDate::from_yo_opt(y, d))
}

fn arb_time() -> impl Strategy<Value = NaiveTime> {
    (0_u32..86_400, prop_oneof![Just(0_u32), 0_u32..1_000_000_000])
        .prop_filter_map("valid time", |(secs, nanos)| NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos))
}

fn arb_offset() -> impl Strategy<Value = FixedOffset> {
    (-18 * 60_i32..=18 * 60).prop_filter_map("valid offset", |minutes| FixedOffset::east_opt(minutes * 60))
}

fn arb_instant() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_date().prop_map(Value::Date),
        (arb_time(), arb_offset()).prop_map(|(t, o)| Value::Time(OffsetTime::new(t, o))),
        arb_time().prop_map(Value::LocalTime),
        (arb_date(), arb_time(), arb_offset(), proptest::option::of("[A-Z][a-z]{2,8}/[A-Z][a-z]{2,8}"))
            .prop_filter_map("unambiguous local time", |(d, t, o, zone)| {
                let datetime = o.from_local_datetime(&NaiveDateTime::new(d, t)).single()?;
                let zoned = ZonedDateTime::new(datetime);
                Some(Value::DateTime(match zone {
                    Some(zone) => zoned.with_zone(zone),
                    None => zoned,
                }))
            }),
        (arb_date(), arb_time()).prop_map(|(d, t)| Value::LocalDateTime(NaiveDateTime::new(d, t))),
    ]
}

fn arb_duration() -> impl Strategy<Value = IsoDuration> {
    (
        -10_000_i64..10_000,
        -10_000_i64..10_000,
        -1_000_000_000_i64..1_000_000_000,
        0_i64..1_000_000_000,
    )
        .prop_map(|(m, d, s, n)| IsoDuration::new(m, d, s, n))
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        // NaN != NaN
        any::<f64>().prop_filter("not NaN", |f| !f.is_nan()).prop_map(Value::Float),
        ".*".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Value::Bytes),
        arb_instant(),
        arb_duration().prop_map(Value::Duration),
        (any::<u32>(), -1e6_f64..1e6, -1e6_f64..1e6).prop_map(|(srid, x, y)| Value::Point2D { srid, x, y }),
        (any::<u32>(), -1e6_f64..1e6, -1e6_f64..1e6, -1e6_f64..1e6)
            .prop_map(|(srid, x, y, z)| Value::Point3D { srid, x, y, z }),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::List),
            prop::collection::btree_map("[a-zA-Z_][a-zA-Z0-9_]{0,8}", inner, 0..8).prop_map(Value::Map),
        ]
    })
}

fn arb_properties() -> impl Strategy<Value = jolt_rs::PropertyMap> {
    prop::collection::btree_map("[a-z]{1,8}", arb_scalar(), 0..4)
}

fn arb_node() -> impl Strategy<Value = Node> {
    (any::<i64>(), prop::collection::vec("[A-Z][a-zA-Z]{0,8}", 0..4), arb_properties()).prop_map(
        |(id, labels, properties)| Node { id: NodeId(id), labels, properties },
    )
}

fn arb_relationship() -> impl Strategy<Value = Relationship> {
    (any::<i64>(), any::<i64>(), any::<i64>(), "[A-Z][A-Z_]{0,8}", arb_properties()).prop_map(
        |(id, start, end, rel_type, properties)| Relationship {
            id: RelId(id),
            start_node_id: NodeId(start),
            end_node_id: NodeId(end),
            rel_type,
            properties,
        },
    )
}

/// A path whose relationships point forwards or backwards at random.
fn arb_path() -> impl Strategy<Value = Path> {
    (arb_node(), prop::collection::vec((arb_node(), arb_relationship(), any::<bool>()), 0..4)).prop_map(
        |(first, steps)| {
            let mut path = Path::single(first);
            for (node, mut rel, forward) in steps {
                let last = path.nodes.last().map_or(NodeId(0), |n| n.id);
                (rel.start_node_id, rel.end_node_id) = if forward { (last, node.id) } else { (node.id, last) };
                path.append(rel, node);
            }
            path
        },
    )
}

fn arb_entity() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_node().prop_map(Value::from),
        arb_relationship().prop_map(Value::from),
        arb_path().prop_map(Value::from),
    ]
}

fn arb_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Verbose), Just(Mode::Compact)]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn value_round_trips(mode in arb_mode(), value in arb_value()) {
        let codec = Codec::new(mode);
        let json = codec.to_json(&value);
        prop_assert_eq!(codec.from_json_any(&json).unwrap(), value);
    }

    #[test]
    fn value_round_trips_against_its_own_kind(mode in arb_mode(), value in arb_value()) {
        let codec = Codec::new(mode);
        let kind = ValueKind::of(&value);
        let json = codec.to_json(&value);
        prop_assert_eq!(codec.from_json(&json, kind).unwrap(), value);
    }

    #[test]
    fn entity_round_trips(mode in arb_mode(), value in arb_entity()) {
        let codec = Codec::new(mode);
        let json = codec.to_json(&value);
        prop_assert_eq!(codec.from_json_any(&json).unwrap(), value);
    }

    #[test]
    fn top_level_number_array_round_trips(mode in arb_mode(), numbers in prop::collection::vec(any::<i64>(), 0..16)) {
        let codec = Codec::new(mode);
        let values: Vec<Value> = numbers.into_iter().map(Value::Int).collect();
        let json = codec.encode_array(&values);
        prop_assert_eq!(codec.decode_array(&json, ValueKind::WideNumber).unwrap(), values);
    }

    #[test]
    fn compact_integral_is_bare_exactly_in_range(value in any::<i64>()) {
        let json = Codec::new(Mode::Compact).to_json(&Value::Int(value));
        let in_range = (-(1_i64 << 31)..(1_i64 << 31) - 1).contains(&value);
        prop_assert_eq!(!json.starts_with('{'), in_range);
    }
}
