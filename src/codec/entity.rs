//! Nodes, relationships and paths.
//!
//! Relationships have two wire profiles, chosen by mode:
//!
//! ```text
//! verbose  {"->":[id, start, "TYPE", end, {props}]}
//! compact  {"->":{"id":…,"type":…,"startNodeId":…,"endNodeId":…,"properties":{…}}}
//! ```
//!
//! Decoding accepts either profile in any mode.

use crate::model::{Direction, Node, NodeId, Path, PathElement, PropertyMap, RelId, Relationship, ReversedRelationship, Value};
use crate::{Error, Result};
use super::collection::{decode_elements, decode_entries, write_entries};
use super::decode::{Decoder, Target};
use super::scalar::payload_error;
use super::token::describe;
use super::{Encoder, Mode, Sigil, Token, TokenSink, TokenSource, ValueKind};

// ============================================================================
// Node
// ============================================================================

pub(crate) fn encode_node(encoder: &Encoder<'_>, node: &Node, sink: &mut dyn TokenSink) {
    encoder.open_struct(Sigil::Node, sink);
    sink.start_object();

    sink.field_name("id");
    encoder.encode(&Value::Int(node.id.0), sink);

    sink.field_name("labels");
    encoder.open_struct(Sigil::List, sink);
    sink.start_array();
    for label in &node.labels {
        encoder.write_tagged(Sigil::Unicode, label, sink);
    }
    sink.end_array();
    sink.end_object();

    sink.field_name("properties");
    encoder.open_struct(Sigil::Map, sink);
    write_entries(encoder, &node.properties, sink);
    sink.end_object();

    sink.end_object();
    sink.end_object();
}

pub(crate) fn decode_node(decoder: &Decoder<'_>, source: &mut dyn TokenSource) -> Result<Node> {
    expect_object(source, Sigil::Node)?;
    let mut id = None;
    let mut labels = Vec::new();
    let mut properties = PropertyMap::new();
    loop {
        match source.next_token() {
            Some(Token::EndObject) => break,
            Some(Token::FieldName(field)) => match field.as_str() {
                "id" => id = Some(decode_node_id(decoder, source)?),
                "labels" => labels = decode_labels(decoder, source)?,
                "properties" => properties = decode_properties(decoder, source)?,
                other => return Err(payload_error(Sigil::Node, other, "unknown field")),
            },
            other => return Err(Error::StructureExpected { found: describe(other.as_ref()) }),
        }
    }
    let id = id.ok_or_else(|| payload_error(Sigil::Node, "", "missing field 'id'"))?;
    Ok(Node { id: NodeId(id), labels, properties })
}

fn expect_object(source: &mut dyn TokenSource, sigil: Sigil) -> Result<()> {
    match source.next_token() {
        Some(Token::StartObject) => Ok(()),
        other => Err(payload_error(sigil, &describe(other.as_ref()), "expected an object")),
    }
}

fn decode_node_id(decoder: &Decoder<'_>, source: &mut dyn TokenSource) -> Result<i64> {
    match decoder.decode_value(source, Target::Kind(ValueKind::WideNumber))? {
        Value::Int(id) => Ok(id),
        other => Err(payload_error(Sigil::Node, other.type_name(), "node id must be integral")),
    }
}

fn decode_labels(decoder: &Decoder<'_>, source: &mut dyn TokenSource) -> Result<Vec<String>> {
    match decoder.decode_value(source, Target::Kind(ValueKind::List))? {
        Value::Null => Ok(Vec::new()),
        Value::List(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(label) => Ok(label),
                other => Err(payload_error(Sigil::Node, other.type_name(), "labels must be text")),
            })
            .collect(),
        other => Err(payload_error(Sigil::Node, other.type_name(), "labels must be a list")),
    }
}

fn decode_properties(decoder: &Decoder<'_>, source: &mut dyn TokenSource) -> Result<PropertyMap> {
    match decoder.decode_value(source, Target::Kind(ValueKind::Map))? {
        Value::Null => Ok(PropertyMap::new()),
        Value::Map(map) => Ok(map),
        other => Err(payload_error(Sigil::Node, other.type_name(), "properties must be a map")),
    }
}

// ============================================================================
// Relationship
// ============================================================================

/// The fields a relationship is written with, in wire orientation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RelationshipParts<'a> {
    sigil: Sigil,
    id: RelId,
    start: NodeId,
    end: NodeId,
    rel_type: &'a str,
    properties: &'a PropertyMap,
}

impl<'a> From<&'a Relationship> for RelationshipParts<'a> {
    fn from(rel: &'a Relationship) -> Self {
        Self {
            sigil: Sigil::Relationship,
            id: rel.id,
            start: rel.start_node_id,
            end: rel.end_node_id,
            rel_type: &rel.rel_type,
            properties: &rel.properties,
        }
    }
}

impl<'a> From<ReversedRelationship<'a>> for RelationshipParts<'a> {
    fn from(rel: ReversedRelationship<'a>) -> Self {
        Self {
            sigil: Sigil::RelationshipReversed,
            id: rel.id(),
            start: rel.start_node_id(),
            end: rel.end_node_id(),
            rel_type: rel.rel_type(),
            properties: rel.properties(),
        }
    }
}

pub(crate) fn encode_relationship(encoder: &Encoder<'_>, parts: RelationshipParts<'_>, sink: &mut dyn TokenSink) {
    encoder.open_struct(parts.sigil, sink);
    match encoder.mode() {
        Mode::Verbose => write_positional(encoder, &parts, sink),
        Mode::Compact => write_named(encoder, &parts, sink),
    }
    sink.end_object();
}

fn write_positional(encoder: &Encoder<'_>, parts: &RelationshipParts<'_>, sink: &mut dyn TokenSink) {
    sink.start_array();
    sink.number(parts.id.0);
    sink.number(parts.start.0);
    sink.string(parts.rel_type);
    sink.number(parts.end.0);
    write_entries(encoder, parts.properties, sink);
    sink.end_array();
}

fn write_named(encoder: &Encoder<'_>, parts: &RelationshipParts<'_>, sink: &mut dyn TokenSink) {
    sink.start_object();
    sink.field_name("id");
    sink.number(parts.id.0);
    sink.field_name("type");
    sink.string(parts.rel_type);
    sink.field_name("startNodeId");
    sink.number(parts.start.0);
    sink.field_name("endNodeId");
    sink.number(parts.end.0);
    sink.field_name("properties");
    write_entries(encoder, parts.properties, sink);
    sink.end_object();
}

/// Decode either profile. A reversed relationship comes back in its
/// stored orientation.
pub(crate) fn decode_relationship(
    decoder: &Decoder<'_>,
    source: &mut dyn TokenSource,
    sigil: Sigil,
) -> Result<Relationship> {
    let mut rel = match source.peek_token() {
        Some(Token::StartArray) => read_positional(decoder, source, sigil)?,
        Some(Token::StartObject) => read_named(decoder, source, sigil)?,
        other => return Err(payload_error(sigil, &describe(other), "expected a relationship array or object")),
    };
    if sigil == Sigil::RelationshipReversed {
        std::mem::swap(&mut rel.start_node_id, &mut rel.end_node_id);
    }
    Ok(rel)
}

fn read_positional(decoder: &Decoder<'_>, source: &mut dyn TokenSource, sigil: Sigil) -> Result<Relationship> {
    source.next_token();
    let id = read_raw_id(source, sigil)?;
    let start = read_raw_id(source, sigil)?;
    let rel_type = read_raw_string(source, sigil)?;
    let end = read_raw_id(source, sigil)?;
    let properties = decode_entries(decoder, source, sigil)?;
    match source.next_token() {
        Some(Token::EndArray) => {}
        other => return Err(payload_error(sigil, &describe(other.as_ref()), "relationship array has five items")),
    }
    Ok(Relationship {
        id: RelId(id),
        start_node_id: NodeId(start),
        end_node_id: NodeId(end),
        rel_type,
        properties,
    })
}

fn read_named(decoder: &Decoder<'_>, source: &mut dyn TokenSource, sigil: Sigil) -> Result<Relationship> {
    source.next_token();
    let (mut id, mut start, mut end, mut rel_type) = (None, None, None, None);
    let mut properties = PropertyMap::new();
    loop {
        match source.next_token() {
            Some(Token::EndObject) => break,
            Some(Token::FieldName(field)) => match field.as_str() {
                "id" => id = Some(read_raw_id(source, sigil)?),
                "type" => rel_type = Some(read_raw_string(source, sigil)?),
                "startNodeId" => start = Some(read_raw_id(source, sigil)?),
                "endNodeId" => end = Some(read_raw_id(source, sigil)?),
                "properties" => properties = decode_entries(decoder, source, sigil)?,
                other => return Err(payload_error(sigil, other, "unknown field")),
            },
            other => return Err(Error::StructureExpected { found: describe(other.as_ref()) }),
        }
    }
    let missing = |field: &str| payload_error(sigil, "", format!("missing field '{field}'"));
    Ok(Relationship {
        id: RelId(id.ok_or_else(|| missing("id"))?),
        start_node_id: NodeId(start.ok_or_else(|| missing("startNodeId"))?),
        end_node_id: NodeId(end.ok_or_else(|| missing("endNodeId"))?),
        rel_type: rel_type.ok_or_else(|| missing("type"))?,
        properties,
    })
}

fn read_raw_id(source: &mut dyn TokenSource, sigil: Sigil) -> Result<i64> {
    match source.next_token() {
        Some(Token::Number(n)) => n
            .as_i64()
            .ok_or_else(|| payload_error(sigil, &n.to_string(), "ids are integral")),
        other => Err(payload_error(sigil, &describe(other.as_ref()), "expected a numeric id")),
    }
}

fn read_raw_string(source: &mut dyn TokenSource, sigil: Sigil) -> Result<String> {
    match source.next_token() {
        Some(Token::String(s)) => Ok(s),
        other => Err(payload_error(sigil, &describe(other.as_ref()), "expected a relationship type")),
    }
}

// ============================================================================
// Path
// ============================================================================

/// Write the path left to right. A relationship that does not start at
/// the node just written is written reversed, so every edge on the wire
/// points in traversal order.
pub(crate) fn encode_path(encoder: &Encoder<'_>, path: &Path, sink: &mut dyn TokenSink) {
    encoder.open_struct(Sigil::Path, sink);
    sink.start_array();
    let mut last_node_id = path.nodes.first().map(|n| n.id);
    for element in path.elements() {
        match element {
            PathElement::Node(node) => {
                encode_node(encoder, node, sink);
                last_node_id = Some(node.id);
            }
            PathElement::Relationship(rel) => {
                let parts = match last_node_id {
                    Some(id) if rel.direction_from(id) == Direction::Incoming => {
                        RelationshipParts::from(rel.reversed())
                    }
                    _ => RelationshipParts::from(rel),
                };
                encode_relationship(encoder, parts, sink);
            }
        }
    }
    sink.end_array();
    sink.end_object();
}

pub(crate) fn decode_path(decoder: &Decoder<'_>, source: &mut dyn TokenSource) -> Result<Path> {
    let mut elements = decode_elements(decoder, source, Sigil::Path, Target::Any)?.into_iter();
    let mut path = match elements.next() {
        Some(Value::Node(node)) => Path::single(*node),
        other => return Err(path_error(other.as_ref(), "a path starts with a node")),
    };
    while let Some(element) = elements.next() {
        let rel = match element {
            Value::Relationship(rel) => *rel,
            other => return Err(path_error(Some(&other), "expected a relationship")),
        };
        let node = match elements.next() {
            Some(Value::Node(node)) => *node,
            other => return Err(path_error(other.as_ref(), "a relationship is followed by a node")),
        };
        path.append(rel, node);
    }
    Ok(path)
}

fn path_error(found: Option<&Value>, message: &str) -> Error {
    payload_error(Sigil::Path, found.map_or("end of path", Value::type_name), message)
}
