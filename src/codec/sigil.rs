//! Tag registry: the bidirectional mapping between kinds and tag literals.

use hashbrown::HashMap;

use crate::model::Value;
use crate::{Error, Result};
use super::{mode, ValueKind};

/// A Jolt tag ("sigil").
///
/// Every sigil has its own literal so decode can name it, but
/// [`Sigil::TemporalAmount`] is written on the wire with the literal of
/// [`Sigil::Time`]. Decoding the shared `T` therefore needs the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    Integer,
    Real,
    Unicode,
    Binary,
    List,
    Map,
    Time,
    TemporalAmount,
    Spatial,
    Node,
    Relationship,
    RelationshipReversed,
    Path,
    Boolean,
    Null,
}

impl Sigil {
    pub const ALL: [Sigil; 15] = [
        Sigil::Integer,
        Sigil::Real,
        Sigil::Unicode,
        Sigil::Binary,
        Sigil::List,
        Sigil::Map,
        Sigil::Time,
        Sigil::TemporalAmount,
        Sigil::Spatial,
        Sigil::Node,
        Sigil::Relationship,
        Sigil::RelationshipReversed,
        Sigil::Path,
        Sigil::Boolean,
        Sigil::Null,
    ];

    /// The literal that identifies this sigil when read.
    pub const fn literal(self) -> &'static str {
        match self {
            Sigil::Integer => "Z",
            Sigil::Real => "R",
            Sigil::Unicode => "U",
            Sigil::Binary => "#",
            Sigil::List => "[]",
            Sigil::Map => "{}",
            Sigil::Time => "T",
            Sigil::TemporalAmount => "TA",
            Sigil::Spatial => "@",
            Sigil::Node => "()",
            Sigil::Relationship => "->",
            Sigil::RelationshipReversed => "<-",
            Sigil::Path => "..",
            Sigil::Boolean => "?",
            Sigil::Null => "",
        }
    }

    /// The literal written on the wire, following the alias if there is one.
    pub const fn wire_literal(self) -> &'static str {
        match self.alias_for() {
            Some(target) => target.literal(),
            None => self.literal(),
        }
    }

    pub const fn alias_for(self) -> Option<Sigil> {
        match self {
            Sigil::TemporalAmount => Some(Sigil::Time),
            _ => None,
        }
    }

    /// The kind a value carrying this sigil is decoded as by default.
    pub const fn kind(self) -> ValueKind {
        match self {
            Sigil::Integer => ValueKind::Integer,
            Sigil::Real => ValueKind::WideNumber,
            Sigil::Unicode => ValueKind::Text,
            Sigil::Binary => ValueKind::Binary,
            Sigil::List => ValueKind::List,
            Sigil::Map => ValueKind::Map,
            Sigil::Time => ValueKind::Instant,
            Sigil::TemporalAmount => ValueKind::Duration,
            Sigil::Spatial => ValueKind::SpatialPoint,
            Sigil::Node => ValueKind::Node,
            Sigil::Relationship => ValueKind::Relationship,
            Sigil::RelationshipReversed => ValueKind::ReversedRelationship,
            Sigil::Path => ValueKind::Path,
            Sigil::Boolean => ValueKind::Boolean,
            Sigil::Null => ValueKind::Null,
        }
    }

    /// True when another sigil is written with this sigil's literal.
    pub fn is_shared(self) -> bool {
        Sigil::ALL.iter().any(|s| s.alias_for() == Some(self))
    }

    /// Sigil for a kind.
    pub const fn for_kind(kind: ValueKind) -> Sigil {
        match kind {
            ValueKind::Null => Sigil::Null,
            ValueKind::Boolean => Sigil::Boolean,
            ValueKind::Integer => Sigil::Integer,
            ValueKind::WideNumber => Sigil::Real,
            ValueKind::Text => Sigil::Unicode,
            ValueKind::Binary => Sigil::Binary,
            ValueKind::List => Sigil::List,
            ValueKind::Map => Sigil::Map,
            ValueKind::Instant => Sigil::Time,
            ValueKind::Duration => Sigil::TemporalAmount,
            ValueKind::SpatialPoint => Sigil::Spatial,
            ValueKind::Node => Sigil::Node,
            ValueKind::Relationship => Sigil::Relationship,
            ValueKind::ReversedRelationship => Sigil::RelationshipReversed,
            ValueKind::Path => Sigil::Path,
        }
    }
}

/// Immutable lookup table between tag literals and sigils.
///
/// Built once and shared read-only by every encoder and decoder of a codec.
#[derive(Debug, Clone)]
pub struct Registry {
    by_literal: HashMap<&'static str, Sigil>,
}

impl Registry {
    pub fn new() -> Self {
        let by_literal = Sigil::ALL.iter().map(|s| (s.literal(), *s)).collect();
        Self { by_literal }
    }

    /// Resolve a tag literal read from the wire. Surrounding whitespace is ignored.
    pub fn sigil_for_tag(&self, tag: &str) -> Result<Sigil> {
        self.by_literal
            .get(tag.trim())
            .copied()
            .ok_or_else(|| Error::UnknownTag { tag: tag.to_owned() })
    }

    /// The candidate kind for a tag. The shared `T` resolves to `Instant`.
    pub fn kind_for(&self, tag: &str) -> Result<ValueKind> {
        self.sigil_for_tag(tag).map(Sigil::kind)
    }

    /// The wire tag for a kind.
    pub fn tag_for(&self, kind: ValueKind) -> &'static str {
        Sigil::for_kind(kind).wire_literal()
    }

    /// The sigil a concrete value is written with.
    ///
    /// Integral values defer to the mode policy, since their tag depends on
    /// their magnitude rather than on their type.
    pub fn sigil_for_value(&self, value: &Value) -> Sigil {
        match value {
            Value::Int(i) => mode::integral_sigil(*i),
            other => Sigil::for_kind(ValueKind::of(other)),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
