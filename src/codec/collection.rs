//! Lists and maps. Every element and every map value goes back through
//! full kind dispatch, so collections may be heterogeneous.

use crate::model::{PropertyMap, Value};
use crate::{Error, Result};
use super::decode::{Decoder, Target};
use super::scalar::payload_error;
use super::token::describe;
use super::{Encoder, Sigil, Token, TokenSink, TokenSource};

pub(crate) fn encode_list(encoder: &Encoder<'_>, items: &[Value], sink: &mut dyn TokenSink) {
    encoder.open_struct(Sigil::List, sink);
    write_elements(encoder, items, sink);
    sink.end_object();
}

pub(crate) fn write_elements(encoder: &Encoder<'_>, items: &[Value], sink: &mut dyn TokenSink) {
    sink.start_array();
    for item in items {
        encoder.encode(item, sink);
    }
    sink.end_array();
}

pub(crate) fn encode_map(encoder: &Encoder<'_>, map: &PropertyMap, sink: &mut dyn TokenSink) {
    encoder.open_struct(Sigil::Map, sink);
    write_entries(encoder, map, sink);
    sink.end_object();
}

/// A raw JSON object, one field per entry.
pub(crate) fn write_entries(encoder: &Encoder<'_>, map: &PropertyMap, sink: &mut dyn TokenSink) {
    sink.start_object();
    for (key, value) in map {
        sink.field_name(key);
        encoder.encode(value, sink);
    }
    sink.end_object();
}

/// Read a JSON array whose elements are decoded against `target`.
///
/// Elements must be tagged structs. A bare `null` is the wire form of
/// null and is always allowed; bare integral numbers only in compact mode.
/// `sigil` names the enclosing struct in payload errors.
pub(crate) fn decode_elements(
    decoder: &Decoder<'_>,
    source: &mut dyn TokenSource,
    sigil: Sigil,
    target: Target,
) -> Result<Vec<Value>> {
    match source.next_token() {
        Some(Token::StartArray) => {}
        other => return Err(payload_error(sigil, &describe(other.as_ref()), "expected an array")),
    }
    let bare_numbers = !decoder.mode().is_strict();
    let mut items = Vec::new();
    loop {
        match source.peek_token() {
            Some(Token::EndArray) => {
                source.next_token();
                return Ok(items);
            }
            Some(Token::StartObject | Token::Null) => items.push(decoder.decode_value(source, target)?),
            Some(Token::Number(_)) if bare_numbers => items.push(decoder.decode_value(source, target)?),
            other => return Err(Error::UnsupportedBareListElement { found: describe(other) }),
        }
    }
}

/// Read a raw JSON object whose values are decoded by their own tags.
pub(crate) fn decode_entries(
    decoder: &Decoder<'_>,
    source: &mut dyn TokenSource,
    sigil: Sigil,
) -> Result<PropertyMap> {
    match source.next_token() {
        Some(Token::StartObject) => {}
        other => return Err(payload_error(sigil, &describe(other.as_ref()), "expected an object")),
    }
    let mut map = PropertyMap::new();
    loop {
        match source.next_token() {
            Some(Token::EndObject) => return Ok(map),
            Some(Token::FieldName(key)) => {
                let value = decoder.decode_value(source, Target::Any)?;
                map.insert(key, value);
            }
            other => return Err(Error::StructureExpected { found: describe(other.as_ref()) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::codec::{Codec, Mode, ValueKind};
    use crate::model::{property_map, Value};
    use crate::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heterogeneous_list() {
        let codec = Codec::new(Mode::Verbose);
        let list = Value::from(vec![Value::from("A"), Value::from(21), Value::from(42.3)]);
        let json = codec.to_json(&list);
        assert_eq!(json, r#"{"[]":[{"U":"A"},{"Z":"21"},{"R":"42.3"}]}"#);
        assert_eq!(codec.from_json(&json, ValueKind::List).unwrap(), list);
    }

    #[test]
    fn test_map_entries_keep_their_tags() {
        let codec = Codec::new(Mode::Verbose);
        let map = Value::Map(property_map([("a", Value::from(1)), ("b", Value::Null)]));
        let json = codec.to_json(&map);
        assert_eq!(json, r#"{"{}":{"a":{"Z":"1"},"b":null}}"#);
        assert_eq!(codec.from_json(&json, ValueKind::Map).unwrap(), map);
    }

    #[test]
    fn test_bare_list_element_is_rejected() {
        let codec = Codec::new(Mode::Verbose);
        match codec.from_json(r#"{"[]":["A"]}"#, ValueKind::List) {
            Err(Error::UnsupportedBareListElement { found }) => assert_eq!(found, "string \"A\""),
            other => panic!("expected UnsupportedBareListElement, got {other:?}"),
        }
        assert!(matches!(
            codec.from_json(r#"{"[]":[1]}"#, ValueKind::List),
            Err(Error::UnsupportedBareListElement { .. })
        ));
    }

    #[test]
    fn test_compact_list_accepts_bare_numbers_and_null() {
        let codec = Codec::new(Mode::Compact);
        assert_eq!(
            codec.from_json(r#"{"[]":[1,null,{"U":"x"}]}"#, ValueKind::List).unwrap(),
            Value::from(vec![Value::Int(1), Value::Null, Value::from("x")])
        );
    }

    #[test]
    fn test_list_payload_must_be_an_array() {
        let codec = Codec::new(Mode::Verbose);
        assert!(matches!(
            codec.from_json(r#"{"[]":{"U":"x"}}"#, ValueKind::List),
            Err(Error::PayloadFormatError { .. })
        ));
    }
}
