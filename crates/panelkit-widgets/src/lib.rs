#![forbid(unsafe_code)]

//! Panel composition for panelkit.
//!
//! A [`PanelChrome`] stacks Primary → Secondary → Tertiary bars, a body and a
//! footer. Pages talk to the chrome only; the bar type itself is private to
//! this crate, and callers observe bars through read-only [`BarView`]s.
//!
//! Bodies are [`Widget`]s. [`TableBody`] and [`HeaderRow`] both take their
//! column geometry from one shared [`ColumnSet`], so header cells and row
//! cells cannot drift apart.

use std::any::Any;
use std::fmt;

use panelkit_core::{Rect, Sides};
use panelkit_style::StyleHooks;

mod bar;
pub mod chrome;
pub mod column;
pub mod item;
pub mod scroll;
pub mod state;
pub mod table;
pub mod warning;

pub use bar::{BarRole, BarView, BarVisibility};
pub use chrome::{ChromeLayout, PanelChrome, PanelVariant};
pub use column::{
    CellAlignment, ColumnGeometry, ColumnSet, ColumnSetError, ColumnSpec, HorizontalAlignment,
    VerticalAlignment,
};
pub use item::{ActionControl, Item};
pub use scroll::{LockedScroll, ScrollInputs, ScrollKey};
pub use state::{StateKind, StatePanel};
pub use table::{Cell, CellValue, HeaderRow, Record, SortOrder, TableBody};
pub use warning::ConfigurationWarning;

/// Anything a chrome can host as a body or embed in a bar slot.
///
/// Widgets never style themselves; they expose [`StyleHooks`] and let the
/// host's resolver decide appearance.
pub trait Widget: Any + fmt::Debug {
    /// Identity and attributes for the theming layer.
    fn style_hooks(&self) -> &StyleHooks;

    /// Inset the widget would apply around its own content.
    ///
    /// Inside a chrome this is ignored: the chrome's body padding is the only
    /// inset. A non-zero value is reported as a configuration warning.
    fn self_inset(&self) -> Sides {
        Sides::ZERO
    }

    /// Fixed height the widget wants for a given width, or `None` to stretch.
    fn preferred_height(&self, _width: u32) -> Option<u32> {
        None
    }

    /// Receive the rectangle assigned by the current layout pass.
    fn layout(&mut self, _area: Rect) {}
}

impl dyn Widget {
    pub fn downcast_ref<T: Widget>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Widget>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}
