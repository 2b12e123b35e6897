//! End-to-end tests for nodes, relationships and paths.
//!
//! Covers the wire shape in both modes and the direction normalization of
//! paths that cross a relationship backwards.

use jolt_rs::{Codec, Mode, Node, NodeId, Path, RelId, Relationship, Token, Value, ValueKind};
use pretty_assertions::assert_eq;

// ============================================================================
// Helper: (A)-[:REL]->(B)<-[:REL2]-(C)
// ============================================================================

fn node(id: i64, label: &str) -> Node {
    Node::new(NodeId(id)).with_labels([label])
}

fn zigzag() -> Path {
    let mut path = Path::single(node(1, "A"));
    path.append(Relationship::new(RelId(10), NodeId(1), NodeId(2), "REL"), node(2, "B"));
    path.append(Relationship::new(RelId(11), NodeId(3), NodeId(2), "REL2"), node(3, "C"));
    path
}

/// The relationship tags of an encoded path, in order.
fn relationship_tags(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::FieldName(name) if name == "->" || name == "<-" => Some(name.as_str()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// 1. Nodes
// ============================================================================

#[test]
fn test_empty_node_has_empty_labels_and_properties() {
    let json = Codec::new(Mode::Verbose).to_json(&Value::from(Node::new(NodeId(4711))));
    assert_eq!(json, r#"{"()":{"id":{"Z":"4711"},"labels":{"[]":[]},"properties":{"{}":{}}}}"#);
}

#[test]
fn test_empty_node_compact() {
    let json = Codec::new(Mode::Compact).to_json(&Value::from(Node::new(NodeId(4711))));
    assert_eq!(json, r#"{"()":{"id":4711,"labels":{"[]":[]},"properties":{"{}":{}}}}"#);
}

#[test]
fn test_node_with_wide_id() {
    let node = Node::new(NodeId(1 << 40)).with_labels(["Big"]);
    let codec = Codec::new(Mode::Compact);
    let json = codec.to_json(&Value::from(node.clone()));
    assert!(json.starts_with(r#"{"()":{"id":{"R":"1099511627776"}"#));
    assert_eq!(codec.from_json(&json, ValueKind::Node).unwrap(), Value::from(node));
}

#[test]
fn test_node_label_order_is_kept() {
    let node = Node::new(NodeId(1)).with_labels(["Z", "A", "M"]);
    let codec = Codec::new(Mode::Verbose);
    let decoded = codec.from_json(&codec.to_json(&Value::from(node)), ValueKind::Node).unwrap();
    match decoded {
        Value::Node(n) => assert_eq!(n.labels, ["Z", "A", "M"]),
        other => panic!("expected a node, got {other:?}"),
    }
}

#[test]
fn test_node_fields_in_any_order() {
    let json = r#"{"()":{"properties":{"{}":{"x":{"?":"true"}}},"labels":{"[]":[{"U":"L"}]},"id":{"Z":"7"}}}"#;
    assert_eq!(
        Codec::new(Mode::Verbose).from_json(json, ValueKind::Node).unwrap(),
        Value::from(Node::new(NodeId(7)).with_labels(["L"]).with_property("x", true))
    );
}

// ============================================================================
// 2. Relationships
// ============================================================================

#[test]
fn test_relationship_profile_follows_mode() {
    let rel = Relationship::new(RelId(3), NodeId(1), NodeId(2), "LIKES");
    assert_eq!(Codec::new(Mode::Verbose).to_json(&Value::from(rel.clone())), r#"{"->":[3,1,"LIKES",2,{}]}"#);
    assert_eq!(
        Codec::new(Mode::Compact).to_json(&Value::from(rel)),
        r#"{"->":{"id":3,"type":"LIKES","startNodeId":1,"endNodeId":2,"properties":{}}}"#
    );
}

#[test]
fn test_either_profile_decodes_in_either_mode() {
    let rel = Value::from(Relationship::new(RelId(3), NodeId(1), NodeId(2), "LIKES"));
    for mode in [Mode::Verbose, Mode::Compact] {
        let codec = Codec::new(mode);
        assert_eq!(codec.from_json(r#"{"->":[3,1,"LIKES",2,{}]}"#, ValueKind::Relationship).unwrap(), rel);
        assert_eq!(
            codec
                .from_json(
                    r#"{"->":{"type":"LIKES","id":3,"endNodeId":2,"startNodeId":1}}"#,
                    ValueKind::Relationship
                )
                .unwrap(),
            rel
        );
    }
}

// ============================================================================
// 3. Paths
// ============================================================================

#[test]
fn test_path_reverses_backward_relationship() {
    for mode in [Mode::Verbose, Mode::Compact] {
        let tokens = Codec::new(mode).to_tokens(&Value::from(zigzag()));
        assert_eq!(relationship_tags(&tokens), ["->", "<-"]);
    }
}

#[test]
fn test_path_verbose_wire_form() {
    let json = Codec::new(Mode::Verbose).to_json(&Value::from(zigzag()));
    let expected = concat!(
        r#"{"..":["#,
        r#"{"()":{"id":{"Z":"1"},"labels":{"[]":[{"U":"A"}]},"properties":{"{}":{}}}},"#,
        r#"{"->":[10,1,"REL",2,{}]},"#,
        r#"{"()":{"id":{"Z":"2"},"labels":{"[]":[{"U":"B"}]},"properties":{"{}":{}}}},"#,
        r#"{"<-":[11,2,"REL2",3,{}]},"#,
        r#"{"()":{"id":{"Z":"3"},"labels":{"[]":[{"U":"C"}]},"properties":{"{}":{}}}}"#,
        r#"]}"#,
    );
    assert_eq!(json, expected);
}

#[test]
fn test_path_round_trip_restores_stored_orientation() {
    for mode in [Mode::Verbose, Mode::Compact] {
        let codec = Codec::new(mode);
        let json = codec.to_json(&Value::from(zigzag()));
        assert_eq!(codec.from_json(&json, ValueKind::Path).unwrap(), Value::from(zigzag()));
    }
}

#[test]
fn test_forward_path_has_no_reversed_relationships() {
    let mut path = Path::single(node(1, "A"));
    path.append(Relationship::new(RelId(10), NodeId(1), NodeId(2), "REL"), node(2, "B"));
    path.append(Relationship::new(RelId(11), NodeId(2), NodeId(3), "REL"), node(3, "C"));
    let tokens = Codec::new(Mode::Verbose).to_tokens(&Value::from(path));
    assert_eq!(relationship_tags(&tokens), ["->", "->"]);
}

#[test]
fn test_path_inside_a_map_decodes_by_tag() {
    let codec = Codec::new(Mode::Compact);
    let map = Value::from(jolt_rs::property_map([("p", Value::from(zigzag()))]));
    assert_eq!(codec.from_json_any(&codec.to_json(&map)).unwrap(), map);
}
