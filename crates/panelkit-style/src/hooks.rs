#![forbid(unsafe_code)]

//! Identity and attribute hooks consumed by the theming layer.

use std::collections::BTreeMap;
use std::fmt;

/// Attribute names set by panelkit.
pub mod attr {
    /// `card` or `table` on a panel chrome.
    pub const PANEL_VARIANT: &str = "panelVariant";
    /// `primary`, `secondary`, `tertiary` or `footer` on a bar.
    pub const BAR_ROLE: &str = "barRole";
    /// `true` on scroll regions that want their scrollbar hidden.
    pub const HIDDEN_SCROLLBAR: &str = "hiddenScrollbar";
    /// Free-form scroll styling variant chosen by the owning page.
    pub const SCROLL_VARIANT: &str = "scrollVariant";
    /// `empty`, `loading` or `error` on state placeholder bodies.
    pub const STATE_KIND: &str = "stateKind";
    /// `start`, `center` or `end` on header and row cells.
    pub const CELL_ALIGN: &str = "cellAlign";
}

/// Value of a named attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    Bool(bool),
    Text(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Stable identity plus dynamic attributes for one styled element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleHooks {
    object_name: String,
    attributes: BTreeMap<String, AttrValue>,
}

impl StyleHooks {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder form of [`set_attr`](Self::set_attr).
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.set_attr(name, value);
        self
    }

    #[inline]
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn set_object_name(&mut self, name: impl Into<String>) {
        self.object_name = name.into();
    }

    /// Set an attribute. Returns `true` if the stored value changed.
    pub fn set_attr(&mut self, name: &str, value: impl Into<AttrValue>) -> bool {
        let value = value.into();
        if self.attributes.get(name) == Some(&value) {
            return false;
        }
        self.attributes.insert(name.to_owned(), value);
        true
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<AttrValue> {
        self.attributes.remove(name)
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Whether `name` is set to `value`.
    pub fn has_attr(&self, name: &str, value: &AttrValue) -> bool {
        self.attributes.get(name) == Some(value)
    }

    /// Attributes in name order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}
