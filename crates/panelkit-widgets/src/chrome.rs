#![forbid(unsafe_code)]

//! The panel composition contract.
//!
//! A [`PanelChrome`] stacks, top to bottom:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Primary   title · actions    │  visible with a title or any action
//! │ Secondary filters            │  visible with content
//! │ Tertiary  column header      │  visible with content
//! │                              │
//! │ Body      (padding applied)  │  takes the remaining height
//! │                              │
//! │ Footer    text · right item  │  visible with content
//! └──────────────────────────────┘
//! ```
//!
//! Hidden bars take no space. Bars are private; every change goes through the
//! verbs on this type and bar visibility is settled before each call returns.
//!
//! # Body inset
//!
//! The chrome's body padding is the only inset between the chrome edge and
//! body content. Body widgets are laid out flush inside the padded rectangle
//! and their own [`Widget::self_inset`] is ignored; a non-zero value is
//! logged as a [`ConfigurationWarning`]. Bars add no horizontal inset of their
//! own, except that the tertiary bar's content rectangle reuses the body's
//! left and right padding so header cells line up with row cells.
//!
//! `table` chromes default to zero padding, `card` chromes to
//! [`Tokens::card_padding`]. An explicit [`PanelChrome::set_body_padding`]
//! sticks across later variant changes until
//! [`PanelChrome::reset_body_padding`].

use std::fmt;

use panelkit_core::{Rect, Sides};
use panelkit_layout::{Constraint, Flex};
use panelkit_style::{StyleHooks, Tokens, attr};
use tracing::{debug, warn};

use crate::Widget;
use crate::bar::{BarRole, BarView, PanelBar};
use crate::column::ColumnSet;
use crate::item::Item;
use crate::table::{HeaderRow, TableBody};
use crate::warning::ConfigurationWarning;

/// Spacing preset of a chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelVariant {
    #[default]
    Card,
    /// Flush body so rows align under header columns.
    Table,
}

impl PanelVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for PanelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyPadding {
    VariantDefault,
    Explicit(Sides),
}

/// Rectangles produced by one [`PanelChrome::layout`] pass.
///
/// Bars that are hidden have no rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChromeLayout {
    pub primary: Option<Rect>,
    pub secondary: Option<Rect>,
    pub tertiary: Option<Rect>,
    /// Tertiary rectangle with the body's horizontal padding applied.
    pub tertiary_content: Option<Rect>,
    pub body: Rect,
    /// Body rectangle with body padding applied.
    pub body_content: Rect,
    /// One rectangle per body widget, in insertion order.
    pub body_children: Vec<Rect>,
    pub footer: Option<Rect>,
}

impl ChromeLayout {
    pub fn bar(&self, role: BarRole) -> Option<Rect> {
        match role {
            BarRole::Primary => self.primary,
            BarRole::Secondary => self.secondary,
            BarRole::Tertiary => self.tertiary,
            BarRole::Footer => self.footer,
        }
    }
}

#[derive(Debug)]
pub struct PanelChrome {
    hooks: StyleHooks,
    variant: PanelVariant,
    padding: BodyPadding,
    tokens: Tokens,
    bars: [PanelBar; 4],
    body: Vec<Box<dyn Widget>>,
}

impl PanelChrome {
    pub fn new(variant: PanelVariant) -> Self {
        Self::with_tokens(variant, Tokens::default())
    }

    pub fn with_tokens(variant: PanelVariant, tokens: Tokens) -> Self {
        Self {
            hooks: StyleHooks::new("PanelChrome").with_attr(attr::PANEL_VARIANT, variant.as_str()),
            variant,
            padding: BodyPadding::VariantDefault,
            tokens,
            bars: BarRole::ALL.map(PanelBar::new),
            body: Vec::new(),
        }
    }

    /// Chrome with its identity row already titled.
    pub fn with_title(variant: PanelVariant, title: &str) -> Self {
        let mut chrome = Self::new(variant);
        chrome.set_title(title);
        chrome
    }

    fn bar_mut(&mut self, role: BarRole) -> &mut PanelBar {
        &mut self.bars[role.index()]
    }

    pub fn bar(&self, role: BarRole) -> BarView<'_> {
        self.bars[role.index()].view()
    }

    pub fn style_hooks(&self) -> &StyleHooks {
        &self.hooks
    }

    /// Stable identity for the theming layer, e.g. the panel id.
    pub fn set_object_name(&mut self, name: impl Into<String>) {
        self.hooks.set_object_name(name);
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    // --- primary -----------------------------------------------------------

    /// Replace title and both action clusters at once.
    pub fn set_primary(
        &mut self,
        title: &str,
        left: impl IntoIterator<Item = Item>,
        right: impl IntoIterator<Item = Item>,
    ) {
        let bar = self.bar_mut(BarRole::Primary);
        bar.set_title(title);
        bar.set_left(left);
        bar.set_right(right);
    }

    pub fn set_title(&mut self, title: &str) {
        self.bar_mut(BarRole::Primary).set_title(title);
    }

    pub fn add_action_left(&mut self, item: impl Into<Item>) {
        self.bar_mut(BarRole::Primary).add_left(item.into());
    }

    pub fn add_action_right(&mut self, item: impl Into<Item>) {
        self.bar_mut(BarRole::Primary).add_right(item.into());
    }

    /// Drop primary actions. The title stays, and with it the identity row.
    pub fn clear_actions(&mut self) {
        self.bar_mut(BarRole::Primary).clear();
    }

    // --- secondary ---------------------------------------------------------

    pub fn set_filters_left(&mut self, items: impl IntoIterator<Item = Item>) {
        self.bar_mut(BarRole::Secondary).set_left(items);
    }

    pub fn set_filters_right(&mut self, items: impl IntoIterator<Item = Item>) {
        self.bar_mut(BarRole::Secondary).set_right(items);
    }

    pub fn clear_filters(&mut self) {
        self.bar_mut(BarRole::Secondary).clear();
    }

    // --- tertiary ----------------------------------------------------------

    pub fn set_columns_left(&mut self, items: impl IntoIterator<Item = Item>) {
        self.bar_mut(BarRole::Tertiary).set_left(items);
    }

    pub fn set_columns_right(&mut self, items: impl IntoIterator<Item = Item>) {
        self.bar_mut(BarRole::Tertiary).set_right(items);
    }

    pub fn clear_columns(&mut self) {
        self.bar_mut(BarRole::Tertiary).clear();
    }

    /// Put a header row for `columns` in the tertiary bar and hand the same
    /// set to every [`TableBody`] in the body.
    ///
    /// An empty set clears the tertiary bar.
    pub fn set_table_columns(&mut self, columns: &ColumnSet) {
        if columns.is_empty() {
            self.clear_columns();
        } else {
            self.set_columns_left([Item::embedded(HeaderRow::new(columns.clone()))]);
            self.bar_mut(BarRole::Tertiary).set_right([]);
        }
        for child in &mut self.body {
            if let Some(table) = child.downcast_mut::<TableBody>() {
                table.set_columns(columns.clone());
            }
        }
    }

    /// Header row currently embedded in the tertiary bar.
    pub fn header_row(&self) -> Option<&HeaderRow> {
        self.bar(BarRole::Tertiary)
            .left()
            .iter()
            .find_map(|item| item.as_widget()?.downcast_ref::<HeaderRow>())
    }

    // --- body --------------------------------------------------------------

    /// Replace the body with a single widget.
    pub fn set_body(&mut self, widget: impl Widget) {
        self.set_body_boxed(Some(Box::new(widget)));
    }

    /// Replace the body; `None` clears it.
    pub fn set_body_boxed(&mut self, widget: Option<Box<dyn Widget>>) {
        let replaced = self.body.len();
        self.body.clear();
        if let Some(widget) = widget {
            self.push_body(widget);
        }
        debug!(
            panel = self.hooks.object_name(),
            replaced,
            children = self.body.len(),
            "panel body replaced"
        );
    }

    /// Append another body widget below the existing ones.
    pub fn add_body(&mut self, widget: impl Widget) {
        self.push_body(Box::new(widget));
    }

    pub fn clear_body(&mut self) {
        self.set_body_boxed(None);
    }

    fn push_body(&mut self, mut widget: Box<dyn Widget>) {
        let header_columns = self.header_row().map(|header| header.columns().clone());
        if let Some(table) = widget.downcast_mut::<TableBody>() {
            table.adopt_tokens(&self.tokens);
            if let Some(columns) = header_columns {
                table.set_columns(columns);
            }
        }
        let inset = widget.self_inset();
        if !inset.is_zero() {
            ConfigurationWarning::BodySelfInset {
                object_name: widget.style_hooks().object_name().to_owned(),
                inset,
            }
            .emit();
        }
        self.body.push(widget);
    }

    pub fn body(&self) -> &[Box<dyn Widget>] {
        &self.body
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// First body widget of type `T`.
    pub fn body_as<T: Widget>(&self) -> Option<&T> {
        self.body.iter().find_map(|child| child.downcast_ref::<T>())
    }

    pub fn body_as_mut<T: Widget>(&mut self) -> Option<&mut T> {
        self.body
            .iter_mut()
            .find_map(|child| child.downcast_mut::<T>())
    }

    // --- footer ------------------------------------------------------------

    /// Footer text on the left and an optional item on the right. Both
    /// `None` hides the footer.
    pub fn set_footer(&mut self, text: Option<&str>, right: Option<Item>) {
        let bar = self.bar_mut(BarRole::Footer);
        bar.set_left(text.map(Item::text));
        bar.set_right(right);
    }

    pub fn clear_footer(&mut self) {
        self.bar_mut(BarRole::Footer).clear();
    }

    // --- variant and padding ------------------------------------------------

    pub fn variant(&self) -> PanelVariant {
        self.variant
    }

    /// Switch variant. Default padding follows immediately; explicit padding
    /// is kept.
    pub fn set_variant(&mut self, variant: PanelVariant) {
        self.variant = variant;
        self.hooks.set_attr(attr::PANEL_VARIANT, variant.as_str());
    }

    pub fn set_body_padding(&mut self, padding: impl Into<Sides>) {
        self.padding = BodyPadding::Explicit(padding.into());
    }

    /// Return to the variant's default padding.
    pub fn reset_body_padding(&mut self) {
        self.padding = BodyPadding::VariantDefault;
    }

    pub fn has_explicit_padding(&self) -> bool {
        matches!(self.padding, BodyPadding::Explicit(_))
    }

    /// Effective body padding.
    pub fn body_padding(&self) -> Sides {
        match self.padding {
            BodyPadding::Explicit(sides) => sides,
            BodyPadding::VariantDefault => match self.variant {
                PanelVariant::Table => Sides::ZERO,
                PanelVariant::Card => self.tokens.card_padding,
            },
        }
    }

    // --- visibility override -----------------------------------------------

    /// Suppress a bar regardless of content. Every use is logged.
    pub fn force_hide_bar(&mut self, role: BarRole, hidden: bool) {
        if hidden {
            warn!(
                panel = self.hooks.object_name(),
                bar = role.as_str(),
                "bar visibility forced hidden"
            );
        }
        self.bar_mut(role).set_forced_hidden(hidden);
    }

    // --- geometry ----------------------------------------------------------

    /// Lay the chrome out in `area` and push rectangles down to the body
    /// widgets and embedded bar items.
    pub fn layout(&mut self, area: Rect) -> ChromeLayout {
        let heights = self.tokens.bar_heights;
        let bar_heights = [
            heights.primary,
            heights.secondary,
            heights.tertiary,
            heights.footer,
        ];

        // Fixed rows for visible bars, remaining space for the body.
        let mut constraints = Vec::with_capacity(5);
        let mut slots: Vec<Option<BarRole>> = Vec::with_capacity(5);
        for role in [BarRole::Primary, BarRole::Secondary, BarRole::Tertiary] {
            if self.bars[role.index()].is_visible() {
                constraints.push(Constraint::Fixed(bar_heights[role.index()]));
                slots.push(Some(role));
            }
        }
        constraints.push(Constraint::Min(0));
        slots.push(None);
        if self.bars[BarRole::Footer.index()].is_visible() {
            constraints.push(Constraint::Fixed(heights.footer));
            slots.push(Some(BarRole::Footer));
        }

        let rects = Flex::vertical().constraints(constraints).split(area);
        let padding = self.body_padding();
        let mut out = ChromeLayout::default();
        for (slot, rect) in slots.into_iter().zip(rects) {
            match slot {
                Some(BarRole::Primary) => out.primary = Some(rect),
                Some(BarRole::Secondary) => out.secondary = Some(rect),
                Some(BarRole::Tertiary) => {
                    out.tertiary = Some(rect);
                    out.tertiary_content = Some(rect.inner(padding.horizontal_only()));
                }
                Some(BarRole::Footer) => out.footer = Some(rect),
                None => out.body = rect,
            }
        }
        out.body_content = out.body.inner(padding);

        let children = Flex::vertical()
            .constraints(self.body.iter().map(|child| {
                match child.preferred_height(out.body_content.width) {
                    Some(height) => Constraint::Fixed(height),
                    None => Constraint::Min(0),
                }
            }))
            .split(out.body_content);
        for (child, &rect) in self.body.iter_mut().zip(&children) {
            child.layout(rect);
        }
        out.body_children = children;

        for role in BarRole::ALL {
            let rect = match role {
                BarRole::Tertiary => out.tertiary_content,
                _ => out.bar(role),
            };
            if let Some(rect) = rect {
                for item in self.bars[role.index()].items_mut() {
                    if let Item::Embedded(widget) = item {
                        widget.layout(rect);
                    }
                }
            }
        }

        out
    }
}
