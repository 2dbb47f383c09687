use std::fmt;

use crate::constants::{FALSE_LITERAL, TRUE_LITERAL};
use crate::error::{Error, ValueKind};
use crate::num::number;
use crate::Result;

/// Typed view over a stored property value.
///
/// Values are kept as text; numbers and booleans are read from it on demand.
/// The `as_*` readers never fail (see [`crate::num::number`]), the `parse_*`
/// readers require the whole string to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Value<'a>(&'a str);

impl<'a> Value<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_int(&self) -> i64 {
        number::leading_int(self.0)
    }

    pub fn as_float(&self) -> f64 {
        number::leading_float(self.0)
    }

    /// `true` only for the exact text `true`.
    pub fn as_bool(&self) -> bool {
        self.0 == TRUE_LITERAL
    }

    pub fn parse_int(&self) -> Result<i64> {
        number::strict_int(self.0)
    }

    pub fn parse_float(&self) -> Result<f64> {
        number::strict_float(self.0)
    }

    pub fn parse_bool(&self) -> Result<bool> {
        match self.0 {
            TRUE_LITERAL => Ok(true),
            FALSE_LITERAL => Ok(false),
            other => Err(Error::conversion(ValueKind::Bool, other)),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for Value<'_> {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl PartialEq<str> for Value<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Value<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
