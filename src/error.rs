use std::{fmt, io, str::Utf8Error};

use thiserror::Error;

/// Target of a strict value conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => "integer".fmt(f),
            ValueKind::Float => "float".fmt(f),
            ValueKind::Bool => "boolean".fmt(f),
        }
    }
}

/// Failures raised at the edges of the crate.
///
/// Parsing itself never fails; these come from loading bytes or readers and
/// from the strict typed accessors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("read failed: {0}")]
    Read(#[from] io::Error),
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("invalid {kind} value: {value:?}")]
    Conversion { kind: ValueKind, value: String },
}

impl Error {
    pub fn conversion(kind: ValueKind, value: impl Into<String>) -> Self {
        Self::Conversion {
            kind,
            value: value.into(),
        }
    }
}
