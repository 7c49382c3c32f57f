#![forbid(unsafe_code)]

//! Panelkit public facade.
//!
//! Screens are composed as page → grid → panel chrome → body:
//!
//! ```ignore
//! use std::sync::Arc;
//! use panelkit::prelude::*;
//!
//! let mut page = Page::new("standings", Arc::new(StyleSheet::new()));
//! let mut chrome = PanelChrome::with_title(PanelVariant::Table, "League");
//! chrome.set_table_columns(&columns);
//! chrome.set_body(TableBody::new(columns.clone()));
//! page.add_panel(chrome, GridPlacement::new(0, 0, 24, 1))?;
//! page.resize(Size::new(1280, 800));
//! ```

pub mod error;
pub mod page;
pub mod settings;

pub use error::{Error, Result};
pub use page::Page;
pub use settings::{
    MemorySettings, PersistedTableState, Restored, SettingsBackend, SettingsError, SettingsStore,
    TableKey, TablePersistence,
};

// --- Re-exports -----------------------------------------------------------

pub use panelkit_core::{Rect, Sides, Size};
pub use panelkit_layout::{
    GridCanvas, GridConfig, GridLines, GridOverlay, GridOverlayConfig, GridPlacement, LayoutError,
    PlacementHandle, ScrollDecision, ScrollMode, ScrollOverflowGuard, ScrollRegion,
};
pub use panelkit_style::{
    AttrValue, ResolvedStyle, Selector, StyleHooks, StyleResolver, StyleSheet, Tokens,
};
pub use panelkit_widgets::{
    ActionControl, BarRole, BarView, BarVisibility, CellAlignment, CellValue, ChromeLayout,
    ColumnSet, ColumnSetError, ColumnSpec, ConfigurationWarning, HeaderRow, Item, LockedScroll,
    PanelChrome, PanelVariant, Record, ScrollKey, SortOrder, StatePanel, TableBody, Widget,
};

pub mod prelude {
    pub use crate::{
        BarRole, CellAlignment, ColumnSet, ColumnSpec, Error, GridPlacement, Item, Page,
        PanelChrome, PanelVariant, Record, Rect, Result, Sides, Size, SortOrder, StatePanel,
        StyleSheet, TableBody, TableKey, TablePersistence, Widget,
    };

    pub use crate::{core, layout, style, widgets};
}

pub use panelkit_core as core;
pub use panelkit_layout as layout;
pub use panelkit_style as style;
pub use panelkit_widgets as widgets;
