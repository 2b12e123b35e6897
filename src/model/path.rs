//! Path: a sequence of alternating nodes and relationships.

use super::{Node, Relationship};

/// A path in the graph: node -[rel]- node -[rel]- node ...
///
/// Relationships keep their stored orientation; a traversal may cross
/// some of them backwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Nodes along the path. Always has one more element than `relationships`.
    pub nodes: Vec<Node>,
    /// Relationships connecting consecutive nodes.
    pub relationships: Vec<Relationship>,
}

/// One step of a path walked left to right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement<'a> {
    Node(&'a Node),
    Relationship(&'a Relationship),
}

impl Path {
    pub fn single(node: Node) -> Self {
        Self { nodes: vec![node], relationships: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Extend path with a relationship and its target node.
    pub fn append(&mut self, rel: Relationship, node: Node) {
        self.relationships.push(rel);
        self.nodes.push(node);
    }

    /// The alternating node/relationship sequence, starting with a node.
    pub fn elements(&self) -> impl Iterator<Item = PathElement<'_>> {
        self.nodes.iter().enumerate().flat_map(move |(i, node)| {
            std::iter::once(PathElement::Node(node))
                .chain(self.relationships.get(i).map(PathElement::Relationship))
        })
    }
}
