#![forbid(unsafe_code)]

//! Non-fatal configuration problems.
//!
//! Warnings never stop composition. They are logged at `warn` level where
//! they are detected and, where the API allows, handed back to the caller.

use std::fmt;

use panelkit_core::Sides;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationWarning {
    /// Two columns share a key. Both stay in render order; the later one's
    /// geometry shadows the earlier one.
    DuplicateColumnKey {
        key: String,
        first: usize,
        shadowed_by: usize,
    },
    /// A body widget asked for its own inset; the chrome's padding is used
    /// instead.
    BodySelfInset { object_name: String, inset: Sides },
    /// A persisted width list does not match the column count.
    PersistedWidthCount { expected: usize, found: usize },
}

impl ConfigurationWarning {
    /// Log this warning.
    pub fn emit(&self) {
        tracing::warn!(warning = %self, "configuration warning");
    }
}

impl fmt::Display for ConfigurationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateColumnKey {
                key,
                first,
                shadowed_by,
            } => write!(
                f,
                "duplicate column key {key:?}: column {shadowed_by} shadows column {first}"
            ),
            Self::BodySelfInset { object_name, inset } => write!(
                f,
                "body widget {object_name:?} requests self inset {}/{}/{}/{}; chrome body padding is used instead",
                inset.top, inset.right, inset.bottom, inset.left
            ),
            Self::PersistedWidthCount { expected, found } => write!(
                f,
                "persisted {found} column widths, expected {expected}; unmatched entries ignored"
            ),
        }
    }
}
