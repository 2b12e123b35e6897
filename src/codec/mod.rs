//! # Jolt codec
//!
//! ```text
//! Value ──▶ Encoder ──(Registry, Mode)──▶ TokenSink
//! TokenSource ──▶ Decoder ──(Registry, Mode, resolver)──▶ Value
//! ```
//!
//! A [`Codec`] owns the immutable [`Registry`] and the [`Mode`]; encoders and
//! decoders borrow both and hold no other state, so one codec can serve any
//! number of independent calls.

pub mod kind;
pub mod sigil;
pub mod mode;
pub mod token;
pub mod scalar;
pub mod encode;
pub mod decode;
mod collection;
mod entity;
mod resolver;

pub use kind::ValueKind;
pub use sigil::{Registry, Sigil};
pub use mode::{IntegralForm, Mode};
pub use token::{JsonWriter, Sequence, Token, TokenSink, TokenSource, TokenStream};
pub use encode::Encoder;
pub use decode::Decoder;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::Value;
use crate::Result;

/// Codec settings, typically read from the host's configuration file.
///
/// ```toml
/// mode = "verbose"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub mode: Mode,
}

/// Entry point: a registry plus a representation mode.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    registry: Registry,
    mode: Mode,
}

impl Codec {
    pub fn new(mode: Mode) -> Self {
        Self { registry: Registry::new(), mode }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.mode)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.registry, self.mode)
    }

    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.registry, self.mode)
    }

    // ========================================================================
    // Encode
    // ========================================================================

    pub fn encode(&self, value: &Value, sink: &mut dyn TokenSink) {
        trace!(mode = %self.mode, kind = %ValueKind::of(value), "encode");
        self.encoder().encode(value, sink);
    }

    pub fn to_tokens(&self, value: &Value) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.encode(value, &mut tokens);
        tokens
    }

    pub fn to_json(&self, value: &Value) -> String {
        let mut writer = JsonWriter::new();
        self.encode(value, &mut writer);
        writer.into_string()
    }

    /// Write `values` as a raw JSON array of tagged elements, without the list tag.
    pub fn encode_array(&self, values: &[Value]) -> String {
        trace!(mode = %self.mode, len = values.len(), "encode array");
        let mut writer = JsonWriter::new();
        self.encoder().encode_array(values, &mut writer);
        writer.into_string()
    }

    // ========================================================================
    // Decode
    // ========================================================================

    /// Decode one value that must be of (or acceptable as) `kind`.
    pub fn decode(&self, source: &mut dyn TokenSource, kind: ValueKind) -> Result<Value> {
        trace!(mode = %self.mode, %kind, "decode");
        self.decoder().decode(source, kind)
    }

    /// Decode one value of whatever kind its tag names.
    pub fn decode_any(&self, source: &mut dyn TokenSource) -> Result<Value> {
        trace!(mode = %self.mode, "decode any");
        self.decoder().decode_any(source)
    }

    pub fn from_json(&self, json: &str, kind: ValueKind) -> Result<Value> {
        let mut stream = TokenStream::parse(json)?;
        self.decode(&mut stream, kind)
    }

    pub fn from_json_any(&self, json: &str) -> Result<Value> {
        let mut stream = TokenStream::parse(json)?;
        self.decode_any(&mut stream)
    }

    /// Read a raw JSON array, decoding every element as `element_kind`.
    pub fn decode_array(&self, json: &str, element_kind: ValueKind) -> Result<Vec<Value>> {
        trace!(mode = %self.mode, %element_kind, "decode array");
        let mut stream = TokenStream::parse(json)?;
        self.decoder().decode_array(&mut stream, element_kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_codec_is_compact() {
        assert_eq!(Codec::default().mode(), Mode::Compact);
        assert_eq!(Codec::from_config(&CodecConfig::default()).mode(), Mode::Compact);
    }

    #[test]
    fn test_registry_knows_the_shared_tag() {
        let codec = Codec::new(Mode::Verbose);
        assert_eq!(codec.registry().tag_for(ValueKind::Duration), "T");
        assert_eq!(codec.registry().kind_for("T").unwrap(), ValueKind::Instant);
        assert_eq!(codec.registry().kind_for("TA").unwrap(), ValueKind::Duration);
    }

    #[test]
    fn test_config_from_json() {
        let config: CodecConfig = serde_json::from_str(r#"{"mode":"verbose"}"#).unwrap();
        assert_eq!(Codec::from_config(&config).mode(), Mode::Verbose);

        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.mode, Mode::Compact);

        assert!(serde_json::from_str::<CodecConfig>(r#"{"mode":"loud"}"#).is_err());
    }

    #[test]
    fn test_to_tokens_and_to_json_agree() {
        let codec = Codec::new(Mode::Verbose);
        let value = Value::from("x");
        assert_eq!(
            codec.to_tokens(&value),
            vec![
                Token::StartObject,
                Token::FieldName("U".into()),
                Token::String("x".into()),
                Token::EndObject,
            ]
        );
        assert_eq!(codec.to_json(&value), r#"{"U":"x"}"#);
    }
}
