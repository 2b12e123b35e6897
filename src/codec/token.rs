//! JSON token streams, the primitive the codec reads from and writes to.
//!
//! ```text
//! JSON text ──serde──▶ TokenStream ──▶ Decoder ──▶ Value
//! Value ──▶ Encoder ──▶ TokenSink (Vec<Token> | JsonWriter) ──▶ JSON text
//! ```
//!
//! [`Sequence`] is the look-behind helper: it replays tokens that were
//! already consumed in front of a live source, so a struct can be read a
//! second time under a different tag.

use std::collections::VecDeque;
use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::Result;

/// A single JSON token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName(String),
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl Token {
    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::StartObject => "start of object".into(),
            Token::EndObject => "end of object".into(),
            Token::StartArray => "start of array".into(),
            Token::EndArray => "end of array".into(),
            Token::FieldName(name) => format!("field '{name}'"),
            Token::String(s) => format!("string \"{s}\""),
            Token::Number(n) => format!("number {n}"),
            Token::Bool(b) => format!("boolean {b}"),
            Token::Null => "null".into(),
        }
    }
}

/// Describe an optional token, treating `None` as end of input.
pub(crate) fn describe(token: Option<&Token>) -> String {
    token.map_or_else(|| "end of input".into(), Token::describe)
}

// ============================================================================
// Sinks
// ============================================================================

/// Anything tokens can be written to.
pub trait TokenSink {
    fn write_token(&mut self, token: Token);

    fn start_object(&mut self) { self.write_token(Token::StartObject) }
    fn end_object(&mut self) { self.write_token(Token::EndObject) }
    fn start_array(&mut self) { self.write_token(Token::StartArray) }
    fn end_array(&mut self) { self.write_token(Token::EndArray) }
    fn field_name(&mut self, name: &str) { self.write_token(Token::FieldName(name.to_owned())) }
    fn string(&mut self, value: &str) { self.write_token(Token::String(value.to_owned())) }
    fn number(&mut self, value: i64) { self.write_token(Token::Number(value.into())) }
    fn boolean(&mut self, value: bool) { self.write_token(Token::Bool(value)) }
    fn null(&mut self) { self.write_token(Token::Null) }
}

impl TokenSink for Vec<Token> {
    fn write_token(&mut self, token: Token) {
        self.push(token);
    }
}

/// Writes tokens as compact JSON text.
#[derive(Debug, Default)]
pub struct JsonWriter {
    out: String,
    /// One entry per open object/array: whether it already holds an item.
    scopes: Vec<bool>,
    /// A field name was just written; the next token is its value.
    after_field: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn separate(&mut self) {
        if self.after_field {
            self.after_field = false;
            return;
        }
        if let Some(has_items) = self.scopes.last_mut() {
            if *has_items {
                self.out.push(',');
            }
            *has_items = true;
        }
    }

    fn push_quoted(&mut self, s: String) {
        self.out.push_str(&serde_json::Value::String(s).to_string());
    }
}

impl TokenSink for JsonWriter {
    fn write_token(&mut self, token: Token) {
        match token {
            Token::StartObject => {
                self.separate();
                self.out.push('{');
                self.scopes.push(false);
            }
            Token::StartArray => {
                self.separate();
                self.out.push('[');
                self.scopes.push(false);
            }
            Token::EndObject => {
                self.scopes.pop();
                self.out.push('}');
            }
            Token::EndArray => {
                self.scopes.pop();
                self.out.push(']');
            }
            Token::FieldName(name) => {
                self.separate();
                self.push_quoted(name);
                self.out.push(':');
                self.after_field = true;
            }
            Token::String(s) => {
                self.separate();
                self.push_quoted(s);
            }
            Token::Number(n) => {
                self.separate();
                self.out.push_str(&n.to_string());
            }
            Token::Bool(b) => {
                self.separate();
                self.out.push_str(if b { "true" } else { "false" });
            }
            Token::Null => {
                self.separate();
                self.out.push_str("null");
            }
        }
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Anything tokens can be read from, with one token of look-ahead.
pub trait TokenSource {
    fn next_token(&mut self) -> Option<Token>;
    fn peek_token(&self) -> Option<&Token>;
}

/// An in-memory token source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    /// Tokenize JSON text. Object keys keep their textual order.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_exhausted(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens: tokens.into() }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    fn peek_token(&self) -> Option<&Token> {
        self.tokens.front()
    }
}

/// Replays buffered tokens, then continues with a live source.
pub struct Sequence<'a> {
    /// Stored back to front so the next token is popped off the end.
    replay: SmallVec<[Token; 4]>,
    live: &'a mut dyn TokenSource,
}

impl<'a> Sequence<'a> {
    pub fn new(replay: impl IntoIterator<Item = Token>, live: &'a mut dyn TokenSource) -> Self {
        let mut replay: SmallVec<[Token; 4]> = replay.into_iter().collect();
        replay.reverse();
        Self { replay, live }
    }
}

impl TokenSource for Sequence<'_> {
    fn next_token(&mut self) -> Option<Token> {
        self.replay.pop().or_else(|| self.live.next_token())
    }

    fn peek_token(&self) -> Option<&Token> {
        self.replay.last().or_else(|| self.live.peek_token())
    }
}

// ============================================================================
// serde bridge: JSON text → tokens
// ============================================================================

impl<'de> Deserialize<'de> for TokenStream {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut tokens = Vec::new();
        TokenSeed(&mut tokens).deserialize(deserializer)?;
        Ok(TokenStream::from(tokens))
    }
}

/// Appends the tokens of one JSON value to a buffer.
struct TokenSeed<'v>(&'v mut Vec<Token>);

impl<'de> DeserializeSeed<'de> for TokenSeed<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for TokenSeed<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<(), E> {
        self.0.push(Token::Bool(v));
        Ok(())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<(), E> {
        self.0.push(Token::Number(v.into()));
        Ok(())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<(), E> {
        self.0.push(Token::Number(v.into()));
        Ok(())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<(), E> {
        let n = serde_json::Number::from_f64(v)
            .ok_or_else(|| E::custom("non-finite number"))?;
        self.0.push(Token::Number(n));
        Ok(())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<(), E> {
        self.0.push(Token::String(v.to_owned()));
        Ok(())
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<(), E> {
        self.0.push(Token::String(v));
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<(), E> {
        self.0.push(Token::Null);
        Ok(())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<(), E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<(), A::Error> {
        let tokens = self.0;
        tokens.push(Token::StartArray);
        while seq.next_element_seed(TokenSeed(&mut *tokens))?.is_some() {}
        tokens.push(Token::EndArray);
        Ok(())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<(), A::Error> {
        let tokens = self.0;
        tokens.push(Token::StartObject);
        while let Some(key) = map.next_key::<String>()? {
            tokens.push(Token::FieldName(key));
            map.next_value_seed(TokenSeed(&mut *tokens))?;
        }
        tokens.push(Token::EndObject);
        Ok(())
    }
}
