//! Universal value type matching Neo4j's type system.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{IsoDuration, Node, OffsetTime, Path, PropertyMap, Relationship, ZonedDateTime};

/// Neo4j-compatible value type.
///
/// Covers every type a Jolt stream can carry:
/// - Scalars: Bool, Int, Float, String, Bytes
/// - Containers: List, Map
/// - Graph: Node, Relationship, Path
/// - Temporal: Date, Time, LocalTime, DateTime, LocalDateTime, Duration
/// - Spatial: Point2D, Point3D
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(PropertyMap),

    // Graph types
    Node(Box<Node>),
    Relationship(Box<Relationship>),
    Path(Box<Path>),

    // Temporal types
    Date(NaiveDate),
    Time(OffsetTime),
    LocalTime(NaiveTime),
    DateTime(ZonedDateTime),
    LocalDateTime(NaiveDateTime),
    Duration(IsoDuration),

    // Spatial types
    Point2D { srid: u32, x: f64, y: f64 },
    Point3D { srid: u32, x: f64, y: f64, z: f64 },
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::Bytes(_) => "BYTES",
            Value::List(_) => "LIST",
            Value::Map(_) => "MAP",
            Value::Node(_) => "NODE",
            Value::Relationship(_) => "RELATIONSHIP",
            Value::Path(_) => "PATH",
            Value::Date(_) => "DATE",
            Value::Time(_) => "TIME",
            Value::LocalTime(_) => "LOCAL_TIME",
            Value::DateTime(_) => "DATETIME",
            Value::LocalDateTime(_) => "LOCAL_DATETIME",
            Value::Duration(_) => "DURATION",
            Value::Point2D { .. } => "POINT",
            Value::Point3D { .. } => "POINT",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// True for the five date/time variants that share the instant tag.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Value::Date(_) | Value::Time(_) | Value::LocalTime(_)
                | Value::DateTime(_) | Value::LocalDateTime(_)
        )
    }

    /// Attempt to extract as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempt to extract as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<NaiveDate> for Value { fn from(v: NaiveDate) -> Self { Value::Date(v) } }
impl From<NaiveTime> for Value { fn from(v: NaiveTime) -> Self { Value::LocalTime(v) } }
impl From<NaiveDateTime> for Value { fn from(v: NaiveDateTime) -> Self { Value::LocalDateTime(v) } }
impl From<OffsetTime> for Value { fn from(v: OffsetTime) -> Self { Value::Time(v) } }
impl From<ZonedDateTime> for Value { fn from(v: ZonedDateTime) -> Self { Value::DateTime(v) } }
impl From<IsoDuration> for Value { fn from(v: IsoDuration) -> Self { Value::Duration(v) } }
impl From<Node> for Value { fn from(v: Node) -> Self { Value::Node(Box::new(v)) } }
impl From<Relationship> for Value { fn from(v: Relationship) -> Self { Value::Relationship(Box::new(v)) } }
impl From<Path> for Value { fn from(v: Path) -> Self { Value::Path(Box::new(v)) } }
impl From<PropertyMap> for Value { fn from(v: PropertyMap) -> Self { Value::Map(v) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}
