//! Scalar codec: canonical string forms of scalar values.
//!
//! Every function here is pure: a value in, its payload string out, or a
//! payload string in and a value (or a precise error) out. Tags and token
//! shapes are the decoder's business.

pub mod duration;
pub mod spatial;
pub mod temporal;

pub use duration::{format_duration, parse_duration};
pub use spatial::{format_point, parse_point};
pub use temporal::{format_instant, parse_instant, TemporalProfile};

use crate::model::Value;
use crate::{Error, Result};
use super::Sigil;

pub fn format_boolean(value: bool) -> String {
    value.to_string()
}

pub fn parse_boolean(raw: &str) -> Result<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(payload_error(Sigil::Boolean, raw, "expected 'true' or 'false'"))
    }
}

pub fn format_integral(value: i64) -> String {
    value.to_string()
}

/// Floats always keep a fractional part or an exponent (`3.0`, `1e300`),
/// so that the integer-first parse of [`parse_number`] gives them back as floats.
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}

/// Payload of the 32-bit integer tag.
pub fn parse_integer(raw: &str) -> Result<i64> {
    raw.parse::<i32>()
        .map(i64::from)
        .map_err(|e| payload_error(Sigil::Integer, raw, e))
}

/// Payload of the wide-number tag: integral first, floating point otherwise.
pub fn parse_number(raw: &str) -> Result<Value> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    raw.parse::<f64>()
        .map(Value::Float)
        .map_err(|e| payload_error(Sigil::Real, raw, e))
}

/// Uppercase hex, two digits per byte, no separators.
pub fn format_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Upper or lower case digits; odd lengths are reported separately.
pub fn parse_hex(raw: &str) -> Result<Vec<u8>> {
    hex::decode(raw).map_err(|e| match e {
        hex::FromHexError::OddLength => Error::OddLengthHexLiteral { payload: raw.to_owned() },
        other => payload_error(Sigil::Binary, raw, other),
    })
}

pub(crate) fn payload_error(sigil: Sigil, raw: &str, message: impl ToString) -> Error {
    Error::PayloadFormatError {
        tag: sigil.wire_literal().to_owned(),
        payload: raw.to_owned(),
        message: message.to_string(),
    }
}
