#![forbid(unsafe_code)]

//! Placeholder bodies for empty, loading and failed surfaces.

use panelkit_style::{StyleHooks, attr};

use crate::Widget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Empty,
    Loading,
    Error,
}

impl StateKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loading => "loading",
            Self::Error => "error",
        }
    }

    const fn object_name(self) -> &'static str {
        match self {
            Self::Empty => "EmptyState",
            Self::Loading => "LoadingState",
            Self::Error => "ErrorState",
        }
    }
}

/// A centered message with an optional detail line.
#[derive(Debug, Clone)]
pub struct StatePanel {
    kind: StateKind,
    message: String,
    detail: Option<String>,
    hooks: StyleHooks,
}

impl StatePanel {
    pub fn new(kind: StateKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            hooks: StyleHooks::new(kind.object_name()).with_attr(attr::STATE_KIND, kind.as_str()),
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(StateKind::Empty, message)
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(StateKind::Loading, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StateKind::Error, message)
    }

    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.detail = (!detail.trim().is_empty()).then_some(detail);
        self
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail_text(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl Widget for StatePanel {
    fn style_hooks(&self) -> &StyleHooks {
        &self.hooks
    }
}
