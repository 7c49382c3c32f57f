#![forbid(unsafe_code)]

//! Chrome bars with content-driven visibility.
//!
//! [`PanelBar`] is crate-private. Pages change bar content only through
//! [`PanelChrome`](crate::PanelChrome) and read it back through [`BarView`].
//!
//! # Invariants
//!
//! 1. Visibility is recomputed inside every mutating call, before it returns.
//! 2. Non-primary bars are visible iff either slot holds an item.
//! 3. The primary bar is also visible when it has a title, so a title alone
//!    keeps the identity row up after actions are cleared.
//! 4. `force_hidden` wins over content and is the only manual override.

use std::fmt;

use panelkit_style::{StyleHooks, attr};

use crate::item::Item;

/// Which chrome row a bar occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarRole {
    /// Title and actions.
    Primary,
    /// Filters.
    Secondary,
    /// Column header.
    Tertiary,
    Footer,
}

impl BarRole {
    pub const ALL: [BarRole; 4] = [
        BarRole::Primary,
        BarRole::Secondary,
        BarRole::Tertiary,
        BarRole::Footer,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Footer => "footer",
        }
    }

    pub(crate) const fn object_name(self) -> &'static str {
        match self {
            Self::Primary => "PrimaryHeaderBar",
            Self::Secondary => "SecondaryHeaderBar",
            Self::Tertiary => "TertiaryHeaderBar",
            Self::Footer => "FooterBar",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Tertiary => 2,
            Self::Footer => 3,
        }
    }
}

impl fmt::Display for BarRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived visibility state of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarVisibility {
    #[default]
    Hidden,
    VisibleByContent,
    /// Suppressed by an explicit override while holding content or not.
    ForcedHidden,
}

impl BarVisibility {
    #[inline]
    pub fn is_visible(self) -> bool {
        self == Self::VisibleByContent
    }
}

#[derive(Debug)]
pub(crate) struct PanelBar {
    role: BarRole,
    hooks: StyleHooks,
    title: String,
    left: Vec<Item>,
    right: Vec<Item>,
    forced_hidden: bool,
    visibility: BarVisibility,
}

impl PanelBar {
    pub(crate) fn new(role: BarRole) -> Self {
        Self {
            role,
            hooks: StyleHooks::new(role.object_name()).with_attr(attr::BAR_ROLE, role.as_str()),
            title: String::new(),
            left: Vec::new(),
            right: Vec::new(),
            forced_hidden: false,
            visibility: BarVisibility::Hidden,
        }
    }

    pub(crate) fn visibility(&self) -> BarVisibility {
        self.visibility
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Only the primary bar keeps a title; other roles ignore it.
    pub(crate) fn set_title(&mut self, title: &str) {
        if self.role == BarRole::Primary {
            title.trim().clone_into(&mut self.title);
        }
        self.recompute();
    }

    pub(crate) fn add_left(&mut self, item: Item) {
        if !item.is_blank() {
            self.left.push(item);
        }
        self.recompute();
    }

    pub(crate) fn add_right(&mut self, item: Item) {
        if !item.is_blank() {
            self.right.push(item);
        }
        self.recompute();
    }

    pub(crate) fn set_left(&mut self, items: impl IntoIterator<Item = Item>) {
        self.left.clear();
        self.left
            .extend(items.into_iter().filter(|item| !item.is_blank()));
        self.recompute();
    }

    pub(crate) fn set_right(&mut self, items: impl IntoIterator<Item = Item>) {
        self.right.clear();
        self.right
            .extend(items.into_iter().filter(|item| !item.is_blank()));
        self.recompute();
    }

    /// Drop both slots. The title survives.
    pub(crate) fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.recompute();
    }

    pub(crate) fn set_forced_hidden(&mut self, hidden: bool) {
        self.forced_hidden = hidden;
        self.recompute();
    }

    pub(crate) fn has_content(&self) -> bool {
        !self.left.is_empty()
            || !self.right.is_empty()
            || (self.role == BarRole::Primary && !self.title.is_empty())
    }

    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.left.iter_mut().chain(self.right.iter_mut())
    }

    pub(crate) fn view(&self) -> BarView<'_> {
        BarView { bar: self }
    }

    fn recompute(&mut self) {
        self.visibility = if self.forced_hidden {
            BarVisibility::ForcedHidden
        } else if self.has_content() {
            BarVisibility::VisibleByContent
        } else {
            BarVisibility::Hidden
        };
    }
}

/// Read-only view of one chrome bar.
#[derive(Debug, Clone, Copy)]
pub struct BarView<'a> {
    bar: &'a PanelBar,
}

impl<'a> BarView<'a> {
    pub fn role(&self) -> BarRole {
        self.bar.role
    }

    /// Empty for every role but primary.
    pub fn title(&self) -> &'a str {
        &self.bar.title
    }

    pub fn left(&self) -> &'a [Item] {
        &self.bar.left
    }

    pub fn right(&self) -> &'a [Item] {
        &self.bar.right
    }

    pub fn has_content(&self) -> bool {
        self.bar.has_content()
    }

    pub fn visibility(&self) -> BarVisibility {
        self.bar.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_visible()
    }

    pub fn style_hooks(&self) -> &'a StyleHooks {
        &self.bar.hooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bars_are_hidden() {
        for role in BarRole::ALL {
            let bar = PanelBar::new(role);
            assert_eq!(bar.visibility(), BarVisibility::Hidden);
            assert_eq!(bar.view().style_hooks().object_name(), role.object_name());
        }
    }

    #[test]
    fn content_drives_visibility() {
        let mut bar = PanelBar::new(BarRole::Secondary);
        bar.add_right(Item::text("Season"));
        assert!(bar.is_visible());
        bar.clear();
        assert!(!bar.is_visible());
        bar.set_left([Item::text("A"), Item::text("B")]);
        assert_eq!(bar.view().left().len(), 2);
        assert!(bar.is_visible());
        bar.set_left([]);
        assert!(!bar.is_visible());
    }

    #[test]
    fn blank_text_is_not_content() {
        let mut bar = PanelBar::new(BarRole::Footer);
        bar.add_left(Item::text("   "));
        assert!(!bar.is_visible());
        assert!(bar.view().left().is_empty());
    }

    #[test]
    fn title_only_counts_for_primary() {
        let mut primary = PanelBar::new(BarRole::Primary);
        primary.set_title("Standings");
        assert!(primary.is_visible());
        primary.add_right(Item::action("refresh", "Refresh"));
        primary.clear();
        assert!(primary.is_visible());
        assert_eq!(primary.view().title(), "Standings");

        let mut tertiary = PanelBar::new(BarRole::Tertiary);
        tertiary.set_title("ignored");
        assert!(!tertiary.is_visible());
        assert_eq!(tertiary.view().title(), "");
    }

    #[test]
    fn forced_hidden_overrides_content() {
        let mut bar = PanelBar::new(BarRole::Secondary);
        bar.add_left(Item::text("Filter"));
        bar.set_forced_hidden(true);
        assert_eq!(bar.visibility(), BarVisibility::ForcedHidden);
        bar.add_left(Item::text("More"));
        assert!(!bar.is_visible());
        bar.set_forced_hidden(false);
        assert_eq!(bar.visibility(), BarVisibility::VisibleByContent);
    }
}
