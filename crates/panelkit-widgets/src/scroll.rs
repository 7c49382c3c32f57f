#![forbid(unsafe_code)]

//! Locked-surface scroll wrapper.
//!
//! [`LockedScroll`] binds a [`ScrollRegion`] to the `hiddenScrollbar` style
//! hook. Hiding the scrollbar is purely visual: wheel, keyboard and trackpad
//! input keep working whenever the guard reports real overflow.

use bitflags::bitflags;
use panelkit_layout::{ScrollDecision, ScrollOverflowGuard, ScrollRegion};
use panelkit_style::{StyleHooks, attr};

bitflags! {
    /// Input paths that can move a scroll region.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScrollInputs: u8 {
        const WHEEL    = 0b001;
        const KEYBOARD = 0b010;
        const TRACKPAD = 0b100;
    }
}

/// Keyboard navigation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollKey {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Home,
    End,
}

const DEFAULT_LINE_STEP_PX: f32 = 24.0;
/// Lines moved per wheel notch.
const WHEEL_LINES_PER_NOTCH: f32 = 3.0;

#[derive(Debug, Clone)]
pub struct LockedScroll {
    region: ScrollRegion,
    hooks: StyleHooks,
    line_step: f32,
}

impl Default for LockedScroll {
    fn default() -> Self {
        Self::new(ScrollOverflowGuard::default())
    }
}

impl LockedScroll {
    pub fn new(guard: ScrollOverflowGuard) -> Self {
        Self {
            region: ScrollRegion::new(guard),
            hooks: StyleHooks::new("LockedScroll").with_attr(attr::HIDDEN_SCROLLBAR, true),
            line_step: DEFAULT_LINE_STEP_PX,
        }
    }

    /// Step used by line keys and wheel notches. Non-positive values are
    /// ignored.
    #[must_use]
    pub fn line_step(mut self, step_px: f32) -> Self {
        self.set_line_step(step_px);
        self
    }

    pub fn set_line_step(&mut self, step_px: f32) {
        if step_px.is_finite() && step_px > 0.0 {
            self.line_step = step_px;
        }
    }

    /// Styling variant chosen by the owning page.
    #[must_use]
    pub fn variant(mut self, variant: &str) -> Self {
        self.hooks.set_attr(attr::SCROLL_VARIANT, variant);
        self
    }

    pub fn style_hooks(&self) -> &StyleHooks {
        &self.hooks
    }

    pub fn set_object_name(&mut self, name: impl Into<String>) {
        self.hooks.set_object_name(name);
    }

    /// Always `true`: the scrollbar stays hidden even while scrolling works.
    pub fn scrollbar_hidden(&self) -> bool {
        matches!(
            self.hooks.attr(attr::HIDDEN_SCROLLBAR),
            Some(panelkit_style::AttrValue::Bool(true))
        )
    }

    /// Input paths currently accepted. Never narrowed by scrollbar styling.
    pub fn inputs(&self) -> ScrollInputs {
        ScrollInputs::all()
    }

    pub fn set_viewport_extent(&mut self, extent: f32) -> ScrollDecision {
        self.region.set_viewport_extent(extent)
    }

    pub fn set_content_extent(&mut self, extent: f32) -> ScrollDecision {
        self.region.set_content_extent(extent)
    }

    pub fn set_extents(&mut self, viewport: f32, content: f32) -> ScrollDecision {
        self.region.set_extents(viewport, content)
    }

    /// Swap the overflow guard, keeping extents, offset and hooks.
    pub fn set_guard(&mut self, guard: ScrollOverflowGuard) -> ScrollDecision {
        let offset = self.region.offset();
        let (viewport, content) = (self.region.viewport_extent(), self.region.content_extent());
        self.region = ScrollRegion::new(guard);
        self.region.set_extents(viewport, content);
        self.region.scroll_to(offset);
        self.region.decision()
    }

    pub fn region(&self) -> &ScrollRegion {
        &self.region
    }

    pub fn decision(&self) -> ScrollDecision {
        self.region.decision()
    }

    pub fn is_overflowing(&self) -> bool {
        self.region.is_overflowing()
    }

    pub fn range(&self) -> f32 {
        self.region.scroll_range()
    }

    pub fn offset(&self) -> f32 {
        self.region.offset()
    }

    /// Wheel notches; positive scrolls down. Returns the distance moved.
    pub fn wheel(&mut self, notches: f32) -> f32 {
        self.region
            .scroll_by(notches * WHEEL_LINES_PER_NOTCH * self.line_step)
    }

    /// Raw pixel delta from a trackpad.
    pub fn trackpad(&mut self, delta_px: f32) -> f32 {
        self.region.scroll_by(delta_px)
    }

    pub fn key(&mut self, key: ScrollKey) -> f32 {
        let page = (self.region.viewport_extent() - self.line_step).max(self.line_step);
        let before = self.region.offset();
        match key {
            ScrollKey::LineUp => self.region.scroll_by(-self.line_step),
            ScrollKey::LineDown => self.region.scroll_by(self.line_step),
            ScrollKey::PageUp => self.region.scroll_by(-page),
            ScrollKey::PageDown => self.region.scroll_by(page),
            ScrollKey::Home => {
                self.region.scroll_to(0.0);
                self.region.offset() - before
            }
            ScrollKey::End => {
                self.region.scroll_to(self.region.scroll_range());
                self.region.offset() - before
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_scrollbar_does_not_disable_input() {
        let mut scroll = LockedScroll::default();
        scroll.set_extents(100.0, 500.0);
        assert!(scroll.scrollbar_hidden());
        assert_eq!(scroll.inputs(), ScrollInputs::all());
        assert_eq!(scroll.wheel(1.0), 72.0);
        assert_eq!(scroll.trackpad(8.0), 8.0);
        assert_eq!(scroll.key(ScrollKey::LineDown), 24.0);
        assert_eq!(scroll.key(ScrollKey::End), 400.0 - 104.0);
        assert_eq!(scroll.offset(), 400.0);
        assert_eq!(scroll.key(ScrollKey::PageUp), -76.0);
        scroll.key(ScrollKey::Home);
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn fitting_content_does_not_move() {
        let mut scroll = LockedScroll::default();
        scroll.set_extents(100.0, 101.0);
        assert!(!scroll.is_overflowing());
        assert_eq!(scroll.wheel(5.0), 0.0);
        assert_eq!(scroll.key(ScrollKey::End), 0.0);
        assert!(scroll.scrollbar_hidden());
    }

    #[test]
    fn variant_hook_is_recorded() {
        let scroll = LockedScroll::default().variant("dense").line_step(-3.0);
        assert_eq!(
            scroll.style_hooks().attr(attr::SCROLL_VARIANT).map(ToString::to_string),
            Some("dense".to_owned())
        );
        assert_eq!(scroll.line_step, DEFAULT_LINE_STEP_PX);
    }
}
