#![forbid(unsafe_code)]

//! Style resolution service and the reference [`StyleSheet`].
//!
//! The resolver is read-only: layout code writes hooks, the host reads
//! resolved properties when drawing. Resolution is a pure function of the
//! hooks and the registered rules.

use std::collections::BTreeMap;
use std::fmt;

use ahash::AHashMap;
use tracing::debug;

use crate::hooks::{AttrValue, StyleHooks};

/// Opaque property bag produced by a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedStyle {
    properties: BTreeMap<String, String>,
}

impl ResolvedStyle {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Read-only style resolution, injected into the root page.
pub trait StyleResolver: fmt::Debug + Send + Sync {
    fn resolve(&self, hooks: &StyleHooks) -> ResolvedStyle;
}

/// Matches hooks by object name and/or attribute values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    object_name: Option<String>,
    attributes: Vec<(String, AttrValue)>,
}

impl Selector {
    /// Matches every element.
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches elements with this object name.
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            object_name: Some(name.into()),
            attributes: Vec::new(),
        }
    }

    /// Additionally require an attribute value.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.push((name.to_owned(), value.into()));
        self
    }

    pub fn matches(&self, hooks: &StyleHooks) -> bool {
        self.object_name
            .as_deref()
            .is_none_or(|name| name == hooks.object_name())
            && self
                .attributes
                .iter()
                .all(|(name, value)| hooks.has_attr(name, value))
    }

    /// Object name counts 1, each attribute counts 1.
    pub fn specificity(&self) -> usize {
        usize::from(self.object_name.is_some()) + self.attributes.len()
    }
}

#[derive(Debug, Clone)]
struct Rule {
    selector: Selector,
    properties: Vec<(String, String)>,
}

/// Ordered rule list with CSS-like cascade.
///
/// Matching rules apply in ascending specificity; ties go to the rule
/// registered last.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<Rule>,
    by_object: AHashMap<String, Vec<usize>>,
    universal: Vec<usize>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule.
    pub fn rule<K, V>(
        &mut self,
        selector: Selector,
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let idx = self.rules.len();
        match &selector.object_name {
            Some(name) => self.by_object.entry(name.clone()).or_default().push(idx),
            None => self.universal.push(idx),
        }
        let properties: Vec<(String, String)> = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        debug!(
            rule = idx,
            object = selector.object_name.as_deref().unwrap_or("*"),
            properties = properties.len(),
            "style rule registered"
        );
        self.rules.push(Rule {
            selector,
            properties,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl StyleResolver for StyleSheet {
    fn resolve(&self, hooks: &StyleHooks) -> ResolvedStyle {
        let mut candidates: Vec<usize> = self
            .universal
            .iter()
            .chain(self.by_object.get(hooks.object_name()).into_iter().flatten())
            .copied()
            .filter(|&idx| self.rules[idx].selector.matches(hooks))
            .collect();
        candidates.sort_by_key(|&idx| (self.rules[idx].selector.specificity(), idx));

        let mut properties = BTreeMap::new();
        for idx in candidates {
            for (k, v) in &self.rules[idx].properties {
                properties.insert(k.clone(), v.clone());
            }
        }
        ResolvedStyle { properties }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::attr;

    fn sheet() -> StyleSheet {
        let mut sheet = StyleSheet::new();
        sheet
            .rule(
                Selector::object("PanelChrome").with_attr(attr::PANEL_VARIANT, "table"),
                [("background", "#1b1b1b")],
            )
            .rule(
                Selector::object("PanelChrome"),
                [("background", "#252525"), ("radius", "12")],
            )
            .rule(Selector::any(), [("font", "default")]);
        sheet
    }

    #[test]
    fn more_specific_rule_wins_regardless_of_order() {
        let hooks = StyleHooks::new("PanelChrome").with_attr(attr::PANEL_VARIANT, "table");
        let resolved = sheet().resolve(&hooks);
        assert_eq!(resolved.get("background"), Some("#1b1b1b"));
        assert_eq!(resolved.get("radius"), Some("12"));
        assert_eq!(resolved.get("font"), Some("default"));
    }

    #[test]
    fn attribute_mismatch_falls_back() {
        let hooks = StyleHooks::new("PanelChrome").with_attr(attr::PANEL_VARIANT, "card");
        assert_eq!(sheet().resolve(&hooks).get("background"), Some("#252525"));
    }

    #[test]
    fn unknown_object_gets_universal_rules_only() {
        let resolved = sheet().resolve(&StyleHooks::new("Nothing"));
        assert_eq!(resolved.iter().count(), 1);
    }

    #[test]
    fn later_rule_wins_on_equal_specificity() {
        let mut sheet = StyleSheet::new();
        sheet
            .rule(Selector::object("Bar"), [("height", "30")])
            .rule(Selector::object("Bar"), [("height", "32")]);
        assert_eq!(
            sheet.resolve(&StyleHooks::new("Bar")).get("height"),
            Some("32")
        );
    }
}
