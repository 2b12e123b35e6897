//! Relationship (edge) in the property graph.

use super::{NodeId, PropertyMap, Value};

/// Opaque relationship identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RelId(pub i64);

impl std::fmt::Display for RelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a relationship relative to a node it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// A relationship (directed edge) in the property graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: RelId,
    pub start_node_id: NodeId,
    pub end_node_id: NodeId,
    pub rel_type: String,
    pub properties: PropertyMap,
}

impl Relationship {
    pub fn new(id: RelId, start: NodeId, end: NodeId, rel_type: impl Into<String>) -> Self {
        Self {
            id,
            start_node_id: start,
            end_node_id: end,
            rel_type: rel_type.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// `Outgoing` when the relationship starts at `node`, `Incoming` otherwise.
    pub fn direction_from(&self, node: NodeId) -> Direction {
        if self.start_node_id == node { Direction::Outgoing } else { Direction::Incoming }
    }

    /// View this relationship with start and end swapped.
    pub fn reversed(&self) -> ReversedRelationship<'_> {
        ReversedRelationship(self)
    }
}

/// Read-only projection of a relationship with start and end swapped.
///
/// Only exists so a path can be written as a chain whose edges all point
/// in traversal order. Type, id and properties are those of the original.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReversedRelationship<'a>(&'a Relationship);

impl<'a> ReversedRelationship<'a> {
    pub fn id(&self) -> RelId { self.0.id }
    pub fn start_node_id(&self) -> NodeId { self.0.end_node_id }
    pub fn end_node_id(&self) -> NodeId { self.0.start_node_id }
    pub fn rel_type(&self) -> &'a str { &self.0.rel_type }
    pub fn properties(&self) -> &'a PropertyMap { &self.0.properties }

    /// The relationship as stored, in its original orientation.
    pub fn original(&self) -> &'a Relationship { self.0 }
}
