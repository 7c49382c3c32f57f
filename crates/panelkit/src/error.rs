#![forbid(unsafe_code)]

//! Panelkit error model.
//!
//! Composition mistakes (bad placements, bad column definitions) are
//! programmer errors: they surface immediately and should be fixed in page
//! code. Settings errors describe bad persisted data and are recoverable;
//! the affected entry is skipped.

use std::fmt;

use panelkit_layout::LayoutError;
use panelkit_widgets::ColumnSetError;

use crate::settings::SettingsError;

/// Top-level error type for panelkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Grid placement rejected.
    Layout(LayoutError),
    /// Column definitions rejected.
    Columns(ColumnSetError),
    /// Persisted settings could not be read.
    Settings(SettingsError),
}

/// Standard result type for panelkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error type label for tracing.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Layout(LayoutError::OutOfBounds { .. }) => "layout.out_of_bounds",
            Self::Layout(LayoutError::Overlap { .. }) => "layout.overlap",
            Self::Columns(_) => "columns",
            Self::Settings(_) => "settings",
        }
    }

    /// Whether the error points at page composition code rather than data.
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, Self::Layout(_) | Self::Columns(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "layout: {err}"),
            Self::Columns(err) => write!(f, "columns: {err}"),
            Self::Settings(err) => write!(f, "settings: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Columns(err) => Some(err),
            Self::Settings(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<ColumnSetError> for Error {
    fn from(err: ColumnSetError) -> Self {
        Self::Columns(err)
    }
}

impl From<SettingsError> for Error {
    fn from(err: SettingsError) -> Self {
        Self::Settings(err)
    }
}
