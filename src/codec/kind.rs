//! The closed set of value kinds the registry can tag.

use std::fmt;

use crate::model::Value;
use super::mode;

/// Logical kind of a value, as identified by its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    /// Integral value inside the 32-bit tag range.
    Integer,
    /// Integral value outside the 32-bit tag range, or any float.
    WideNumber,
    Text,
    Binary,
    List,
    Map,
    /// Any of the date/time variants.
    Instant,
    Duration,
    SpatialPoint,
    Node,
    Relationship,
    ReversedRelationship,
    Path,
}

impl ValueKind {
    /// Kind of a concrete value.
    ///
    /// Integral values are classified by the same range check the encoder
    /// uses to pick their tag, so `of` always agrees with what gets written.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Int(i) if mode::fits_integer(*i) => ValueKind::Integer,
            Value::Int(_) | Value::Float(_) => ValueKind::WideNumber,
            Value::String(_) => ValueKind::Text,
            Value::Bytes(_) => ValueKind::Binary,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Node(_) => ValueKind::Node,
            Value::Relationship(_) => ValueKind::Relationship,
            Value::Path(_) => ValueKind::Path,
            Value::Date(_) | Value::Time(_) | Value::LocalTime(_)
            | Value::DateTime(_) | Value::LocalDateTime(_) => ValueKind::Instant,
            Value::Duration(_) => ValueKind::Duration,
            Value::Point2D { .. } | Value::Point3D { .. } => ValueKind::SpatialPoint,
        }
    }

    /// Whether a value of kind `found` may be returned where `self` was requested.
    ///
    /// Every 32-bit integer is also a wide number, and a reversed
    /// relationship decodes back into a plain relationship.
    pub fn accepts(self, found: ValueKind) -> bool {
        self == found
            || matches!(
                (self, found),
                (ValueKind::WideNumber, ValueKind::Integer)
                    | (ValueKind::Relationship, ValueKind::ReversedRelationship)
            )
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "Null",
            ValueKind::Boolean => "Boolean",
            ValueKind::Integer => "Integer",
            ValueKind::WideNumber => "WideNumber",
            ValueKind::Text => "Text",
            ValueKind::Binary => "Binary",
            ValueKind::List => "List",
            ValueKind::Map => "Map",
            ValueKind::Instant => "Instant",
            ValueKind::Duration => "Duration",
            ValueKind::SpatialPoint => "SpatialPoint",
            ValueKind::Node => "Node",
            ValueKind::Relationship => "Relationship",
            ValueKind::ReversedRelationship => "ReversedRelationship",
            ValueKind::Path => "Path",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
