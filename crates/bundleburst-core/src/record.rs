//! Flat `(path, size)` records as supplied by a build-stats artifact.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A size cell that has not been validated yet.
///
/// Stats artifacts and two-column text exports mix numbers with header or
/// label cells, so sizes stay raw until the tree builder looks at them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSize {
    /// A numeric cell.
    Number(f64),
    /// An unparsed text cell.
    Text(String),
    /// No size at all (`null` or an absent field).
    #[default]
    Missing,
}

impl RawSize {
    /// Numeric value of this cell, if it is a number at all.
    ///
    /// Text is trimmed before parsing. Empty text, NaN and a missing size are
    /// not numbers.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawSize::Number(n) => *n,
            RawSize::Text(text) => text.trim().parse::<f64>().ok()?,
            RawSize::Missing => return None,
        };
        (!value.is_nan()).then_some(value)
    }
}

impl From<f64> for RawSize {
    fn from(value: f64) -> Self {
        RawSize::Number(value)
    }
}

impl From<u64> for RawSize {
    fn from(value: u64) -> Self {
        RawSize::Number(value as f64)
    }
}

impl From<i64> for RawSize {
    fn from(value: i64) -> Self {
        RawSize::Number(value as f64)
    }
}

impl From<&str> for RawSize {
    fn from(value: &str) -> Self {
        RawSize::Text(value.to_string())
    }
}

impl From<String> for RawSize {
    fn from(value: String) -> Self {
        RawSize::Text(value)
    }
}

/// One row of build output: a slash-delimited module path and its size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Module path, `/` separated.
    pub path: CompactString,
    /// Size cell, validated by the builder.
    pub size: RawSize,
}

impl RawRecord {
    /// Create a record from anything path-like and size-like.
    pub fn new(path: impl Into<CompactString>, size: impl Into<RawSize>) -> Self {
        Self {
            path: path.into(),
            size: size.into(),
        }
    }
}

impl<P, S> From<(P, S)> for RawRecord
where
    P: Into<CompactString>,
    S: Into<RawSize>,
{
    fn from((path, size): (P, S)) -> Self {
        Self::new(path, size)
    }
}
