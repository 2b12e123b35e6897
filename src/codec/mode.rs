//! Mode policy: whether a tag is written and which tag an integral gets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};
use super::scalar::format_integral;
use super::Sigil;

/// Smallest integral value that still gets the 32-bit tag.
pub const INTEGER_MIN: i64 = i32::MIN as i64;

/// Integral values must stay *below* this to get the 32-bit tag.
///
/// The bound is exclusive, so `i32::MAX` itself is written as a wide
/// number. Jolt readers expect exactly this split.
pub const INTEGER_MAX_EXCLUSIVE: i64 = i32::MAX as i64;

/// Representation mode of a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every value is paired with its tag and every scalar payload is a string.
    Verbose,
    /// In-range integral values are written as bare JSON numbers.
    #[default]
    Compact,
}

/// How an integral value appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegralForm {
    Bare(i64),
    Tagged { sigil: Sigil, payload: String },
}

impl Mode {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Mode::Verbose } else { Mode::Compact }
    }

    pub fn is_strict(self) -> bool {
        self == Mode::Verbose
    }

    /// Decide the wire form of an integral value.
    pub fn integral_form(self, value: i64) -> IntegralForm {
        match self {
            Mode::Compact if fits_integer(value) => IntegralForm::Bare(value),
            _ => IntegralForm::Tagged {
                sigil: integral_sigil(value),
                payload: format_integral(value),
            },
        }
    }
}

/// Range check shared by both modes: `INTEGER_MIN <= value < INTEGER_MAX_EXCLUSIVE`.
pub fn fits_integer(value: i64) -> bool {
    (INTEGER_MIN..INTEGER_MAX_EXCLUSIVE).contains(&value)
}

/// The tag an integral value is written with when it is tagged.
pub fn integral_sigil(value: i64) -> Sigil {
    if fits_integer(value) { Sigil::Integer } else { Sigil::Real }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Verbose => f.write_str("verbose"),
            Mode::Compact => f.write_str("compact"),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbose" | "strict" => Ok(Mode::Verbose),
            "compact" | "sparse" => Ok(Mode::Compact),
            other => Err(Error::InvalidMode(other.to_owned())),
        }
    }
}
