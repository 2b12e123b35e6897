//! Value → tokens.

use std::borrow::Cow;

use crate::model::Value;
use super::mode::IntegralForm;
use super::scalar::{format_boolean, format_duration, format_float, format_hex, format_instant, format_point};
use super::entity::{self, RelationshipParts};
use super::{collection, Mode, Registry, Sigil, TokenSink};

/// Writes values to a [`TokenSink`]. Encoding never fails.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'r> {
    registry: &'r Registry,
    mode: Mode,
}

impl<'r> Encoder<'r> {
    pub fn new(registry: &'r Registry, mode: Mode) -> Self {
        Self { registry, mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn encode(&self, value: &Value, sink: &mut dyn TokenSink) {
        match value {
            Value::Null => sink.null(),
            Value::Int(i) => match self.mode.integral_form(*i) {
                IntegralForm::Bare(n) => sink.number(n),
                IntegralForm::Tagged { sigil, payload } => self.write_tagged(sigil, &payload, sink),
            },
            Value::List(items) => collection::encode_list(self, items, sink),
            Value::Map(map) => collection::encode_map(self, map, sink),
            Value::Node(node) => entity::encode_node(self, node, sink),
            Value::Relationship(rel) => entity::encode_relationship(self, RelationshipParts::from(&**rel), sink),
            Value::Path(path) => entity::encode_path(self, path, sink),
            scalar => {
                let sigil = self.registry.sigil_for_value(scalar);
                if let Some(payload) = scalar_payload(scalar) {
                    self.write_tagged(sigil, &payload, sink);
                }
            }
        }
    }

    /// Raw JSON array of tagged elements, no list tag around it.
    pub fn encode_array(&self, values: &[Value], sink: &mut dyn TokenSink) {
        collection::write_elements(self, values, sink);
    }

    /// `{"<tag>": "<payload>"}`
    pub(crate) fn write_tagged(&self, sigil: Sigil, payload: &str, sink: &mut dyn TokenSink) {
        self.open_struct(sigil, sink);
        sink.string(payload);
        sink.end_object();
    }

    /// `{"<tag>":`; the caller writes the payload and closes the object.
    pub(crate) fn open_struct(&self, sigil: Sigil, sink: &mut dyn TokenSink) {
        sink.start_object();
        sink.field_name(sigil.wire_literal());
    }
}

/// String payload of a scalar, `None` for values with structured payloads.
fn scalar_payload(value: &Value) -> Option<Cow<'_, str>> {
    let payload = match value {
        Value::Bool(b) => Cow::Owned(format_boolean(*b)),
        Value::Float(f) => Cow::Owned(format_float(*f)),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Bytes(bytes) => Cow::Owned(format_hex(bytes)),
        Value::Duration(d) => Cow::Owned(format_duration(d)),
        Value::Point2D { .. } | Value::Point3D { .. } => Cow::Owned(format_point(value)?),
        temporal if temporal.is_temporal() => Cow::Owned(format_instant(temporal)?),
        _ => return None,
    };
    Some(payload)
}
