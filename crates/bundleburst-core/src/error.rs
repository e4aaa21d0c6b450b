//! Warning types for tree construction.
//!
//! Building a tree never fails. Rows that cannot be placed are dropped and
//! reported here so callers can surface them if they care.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Why a record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Size cell is not a number (header or label row).
    InvalidSize,
    /// Size is below zero.
    NegativeSize,
    /// Size is infinite.
    NonFiniteSize,
}

/// A record that the builder skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Position of the record in the input sequence.
    pub index: usize,
    /// Path of the skipped record.
    pub path: CompactString,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl SkippedRecord {
    /// Create a new skipped-record warning.
    pub fn new(
        index: usize,
        path: impl Into<CompactString>,
        message: impl Into<String>,
        kind: WarningKind,
    ) -> Self {
        Self {
            index,
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create an invalid size warning.
    pub fn invalid_size(index: usize, path: impl Into<CompactString>, raw: &str) -> Self {
        let path = path.into();
        Self {
            message: format!("Invalid size for {path}: {raw:?}"),
            index,
            path,
            kind: WarningKind::InvalidSize,
        }
    }

    /// Create a negative size warning.
    pub fn negative_size(index: usize, path: impl Into<CompactString>, size: f64) -> Self {
        let path = path.into();
        Self {
            message: format!("Negative size for {path}: {size}"),
            index,
            path,
            kind: WarningKind::NegativeSize,
        }
    }

    /// Create a non-finite size warning.
    pub fn non_finite_size(index: usize, path: impl Into<CompactString>, size: f64) -> Self {
        let path = path.into();
        Self {
            message: format!("Non-finite size for {path}: {size}"),
            index,
            path,
            kind: WarningKind::NonFiniteSize,
        }
    }
}
