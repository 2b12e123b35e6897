//! Tokens → value.
//!
//! Every tagged struct goes through the same steps:
//!
//! ```text
//! StartObject → tag → registry lookup → kind check → payload → EndObject
//! ```
//!
//! Any deviation ends the call with an error. The one exception is the tag
//! shared by instants and durations, which is handed to the resolver.

use crate::model::Value;
use crate::{Error, Result};
use super::scalar::{
    parse_boolean, parse_duration, parse_hex, parse_instant, parse_integer, parse_number,
    parse_point, payload_error,
};
use super::token::describe;
use super::{collection, entity, resolver, Mode, Registry, Sigil, Token, TokenSource, ValueKind};

/// What the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// Whatever the tag says.
    Any,
    Kind(ValueKind),
}

impl Target {
    fn accepts(self, found: ValueKind) -> bool {
        match self {
            Target::Any => true,
            Target::Kind(kind) => kind.accepts(found),
        }
    }
}

/// Reads values from a [`TokenSource`].
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'r> {
    registry: &'r Registry,
    mode: Mode,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r Registry, mode: Mode) -> Self {
        Self { registry, mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn decode(&self, source: &mut dyn TokenSource, kind: ValueKind) -> Result<Value> {
        self.decode_value(source, Target::Kind(kind))
    }

    pub fn decode_any(&self, source: &mut dyn TokenSource) -> Result<Value> {
        self.decode_value(source, Target::Any)
    }

    /// Read a raw JSON array of tagged elements, each decoded as `element_kind`.
    pub fn decode_array(&self, source: &mut dyn TokenSource, element_kind: ValueKind) -> Result<Vec<Value>> {
        match source.peek_token() {
            Some(Token::StartArray) => {
                collection::decode_elements(self, source, Sigil::List, Target::Kind(element_kind))
            }
            other => Err(Error::StructureExpected { found: describe(other) }),
        }
    }

    /// One value at any position: bare `null`, a compact bare number, or a tagged struct.
    pub(crate) fn decode_value(&self, source: &mut dyn TokenSource, target: Target) -> Result<Value> {
        match source.peek_token() {
            Some(Token::Null) => {
                source.next_token();
                Ok(Value::Null)
            }
            Some(Token::StartObject) => self.decode_struct(source, target),
            Some(Token::Number(n)) if !self.mode.is_strict() && target.accepts(ValueKind::Integer) => {
                let value = bare_integral(n, target)?;
                source.next_token();
                Ok(value)
            }
            other => Err(Error::StructureExpected { found: describe(other) }),
        }
    }

    pub(crate) fn decode_struct(&self, source: &mut dyn TokenSource, target: Target) -> Result<Value> {
        match source.next_token() {
            Some(Token::StartObject) => {}
            other => return Err(Error::StructureExpected { found: describe(other.as_ref()) }),
        }
        let tag = read_tag(source)?;
        let sigil = self.registry.sigil_for_tag(&tag)?;
        if sigil.is_shared() {
            return resolver::resolve_shared(self, source, &tag, target);
        }
        self.decode_tagged(source, sigil, &tag, target)
    }

    /// Payload and closing brace of a struct whose tag has been read.
    pub(crate) fn decode_tagged(
        &self,
        source: &mut dyn TokenSource,
        sigil: Sigil,
        tag: &str,
        target: Target,
    ) -> Result<Value> {
        let kind = sigil.kind();
        if kind != ValueKind::Null && !target.accepts(kind) {
            return Err(mismatch(tag, target, kind));
        }
        let value = match sigil {
            Sigil::Null => {
                source.next_token();
                Value::Null
            }
            Sigil::List => Value::List(collection::decode_elements(self, source, sigil, Target::Any)?),
            Sigil::Map => Value::Map(collection::decode_entries(self, source, sigil)?),
            Sigil::Node => Value::from(entity::decode_node(self, source)?),
            Sigil::Relationship | Sigil::RelationshipReversed => {
                Value::from(entity::decode_relationship(self, source, sigil)?)
            }
            Sigil::Path => Value::from(entity::decode_path(self, source)?),
            scalar => {
                let token = source.next_token();
                convert_scalar(scalar, tag, token.as_ref())?
            }
        };
        expect_struct_end(source, tag)?;
        Ok(value)
    }
}

/// Convert the payload token of a scalar struct.
///
/// Text is taken verbatim; every other payload is trimmed and must not be
/// blank, except that an empty hex literal is an empty byte array.
pub(crate) fn convert_scalar(sigil: Sigil, tag: &str, token: Option<&Token>) -> Result<Value> {
    let raw = match token {
        Some(Token::String(s)) => s.as_str(),
        other => {
            return Err(Error::PayloadFormatError {
                tag: tag.to_owned(),
                payload: describe(other),
                message: "expected a string payload".into(),
            });
        }
    };
    if sigil == Sigil::Unicode {
        return Ok(Value::String(raw.to_owned()));
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() && sigil != Sigil::Binary {
        return Err(Error::NullOrBlankPrimitive { tag: tag.to_owned(), expected: sigil.kind() });
    }
    match sigil {
        Sigil::Boolean => parse_boolean(trimmed).map(Value::Bool),
        Sigil::Integer => parse_integer(trimmed).map(Value::Int),
        Sigil::Real => parse_number(trimmed),
        Sigil::Binary => parse_hex(trimmed).map(Value::Bytes),
        Sigil::Time => parse_instant(trimmed),
        Sigil::TemporalAmount => parse_duration(trimmed).map(Value::Duration),
        Sigil::Spatial => parse_point(trimmed),
        _ => Err(payload_error(sigil, raw, "not a scalar tag")),
    }
}

/// Field name of a struct, i.e. its tag. Returned untrimmed for error messages.
fn read_tag(source: &mut dyn TokenSource) -> Result<String> {
    match source.next_token() {
        Some(Token::FieldName(tag)) => Ok(tag),
        other => Err(Error::StructureExpected { found: describe(other.as_ref()) }),
    }
}

pub(crate) fn expect_struct_end(source: &mut dyn TokenSource, tag: &str) -> Result<()> {
    match source.next_token() {
        Some(Token::EndObject) => Ok(()),
        other => Err(Error::TrailingDataError { tag: tag.to_owned(), found: describe(other.as_ref()) }),
    }
}

fn mismatch(tag: &str, target: Target, found: ValueKind) -> Error {
    let expected = match target {
        Target::Kind(kind) => kind,
        Target::Any => found,
    };
    Error::TagKindMismatch { tag: tag.to_owned(), expected, found }
}

/// A compact-mode bare number. `Integer` targets keep the 32-bit range.
fn bare_integral(n: &serde_json::Number, target: Target) -> Result<Value> {
    let value = n
        .as_i64()
        .ok_or_else(|| Error::StructureExpected { found: format!("number {n}") })?;
    if target == Target::Kind(ValueKind::Integer) && i32::try_from(value).is_err() {
        return Err(payload_error(Sigil::Integer, &n.to_string(), "out of 32-bit range"));
    }
    Ok(Value::Int(value))
}
