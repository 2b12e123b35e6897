//! # jolt-rs: Tagged JSON for Property Graph Values
//!
//! Converts property-graph values (scalars, collections, temporal and
//! spatial values, nodes, relationships, paths) to and from Jolt, a JSON
//! dialect where every value is a single-key object whose key (the *tag*)
//! names the value's kind.
//!
//! ## Design Principles
//!
//! 1. **Closed value model**: `Value` is one enum; dispatch is a `match`, never a runtime lookup
//! 2. **Explicit registry**: the tag table is built once and handed to encoders and decoders
//! 3. **Token streams at the seams**: the codec reads `TokenSource` and writes `TokenSink`
//! 4. **One speculative retry**: only the tag shared by instants and durations is decoded twice
//!
//! ## Quick Start
//!
//! ```rust
//! use jolt_rs::{Codec, Mode, Value, ValueKind};
//!
//! # fn example() -> jolt_rs::Result<()> {
//! let codec = Codec::new(Mode::Verbose);
//! let json = codec.to_json(&Value::from(vec![Value::from("A"), Value::from(21), Value::from(42.3)]));
//! assert_eq!(json, r#"{"[]":[{"U":"A"},{"Z":"21"},{"R":"42.3"}]}"#);
//!
//! let back = codec.from_json(&json, ValueKind::List)?;
//! assert_eq!(back.as_list().map(|items| items.len()), Some(3));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Modes
//!
//! | Mode | Integral in range | Other scalars |
//! |------|-------------------|---------------|
//! | Verbose | `{"Z":"123"}` | tagged, string payload |
//! | Compact (default) | `123` | tagged, string payload |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod codec;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, Relationship, ReversedRelationship, Path, PathElement, Value, PropertyMap,
    NodeId, RelId, Direction, IsoDuration, OffsetTime, ZonedDateTime, property_map,
};

// ============================================================================
// Re-exports: Codec
// ============================================================================

pub use codec::{
    Codec, CodecConfig, Decoder, Encoder, Mode, Registry, Sigil, ValueKind,
    JsonWriter, Sequence, Token, TokenSink, TokenSource, TokenStream,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Expected a tagged struct, found {found}")]
    StructureExpected { found: String },

    #[error("Unknown tag '{tag}'")]
    UnknownTag { tag: String },

    #[error("Tag '{tag}' denotes {found}, expected {expected}")]
    TagKindMismatch { tag: String, expected: ValueKind, found: ValueKind },

    #[error("Malformed payload for tag '{tag}': {message} (payload: {payload})")]
    PayloadFormatError { tag: String, payload: String, message: String },

    #[error("Blank payload for tag '{tag}', expected a {expected}")]
    NullOrBlankPrimitive { tag: String, expected: ValueKind },

    #[error("Struct tagged '{tag}' must end after its payload, found {found}")]
    TrailingDataError { tag: String, found: String },

    #[error("Malformed spatial literal: {payload}")]
    MalformedSpatialLiteral { payload: String },

    #[error("No temporal profile matches '{payload}'")]
    NoTemporalProfileMatched { payload: String },

    #[error("Hex literal of odd length: {payload}")]
    OddLengthHexLiteral { payload: String },

    #[error("List elements must be tagged structs, found {found}")]
    UnsupportedBareListElement { found: String },

    #[error("Tag '{tag}' decodes neither as an instant ({primary}) nor as a duration ({retry})")]
    AmbiguousTagResolutionFailure { tag: String, primary: Box<Error>, retry: Box<Error> },

    #[error("Invalid mode '{0}', expected verbose, strict, compact or sparse")]
    InvalidMode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
