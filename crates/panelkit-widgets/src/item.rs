#![forbid(unsafe_code)]

//! Slot contents for bars.

use crate::Widget;

/// A clickable control in a bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionControl {
    id: String,
    label: String,
    enabled: bool,
}

impl ActionControl {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
        }
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// The closed set of things a bar slot can hold.
#[derive(Debug)]
pub enum Item {
    Text(String),
    Action(ActionControl),
    Embedded(Box<dyn Widget>),
}

impl Item {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn action(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Action(ActionControl::new(id, label))
    }

    pub fn embedded(widget: impl Widget) -> Self {
        Self::Embedded(Box::new(widget))
    }

    /// Blank text carries no content and never makes a bar visible.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&ActionControl> {
        match self {
            Self::Action(action) => Some(action),
            _ => None,
        }
    }

    pub fn as_widget(&self) -> Option<&(dyn Widget + 'static)> {
        match self {
            Self::Embedded(widget) => Some(widget.as_ref()),
            _ => None,
        }
    }
}

impl From<ActionControl> for Item {
    fn from(action: ActionControl) -> Self {
        Self::Action(action)
    }
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
