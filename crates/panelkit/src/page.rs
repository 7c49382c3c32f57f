#![forbid(unsafe_code)]

//! A page: one grid canvas of panel chromes plus the injected style service.
//!
//! Panels are placed by grid cell. Placement errors come back before the
//! panel joins the canvas, and [`Page::add_panels`] checks a whole batch
//! first, so a page is never half-built.

use std::fmt;
use std::sync::Arc;

use panelkit_core::{Rect, Size};
use panelkit_layout::{
    GridCanvas, GridConfig, GridLines, GridOverlay, GridOverlayConfig, GridPlacement,
    PlacementHandle,
};
use panelkit_style::{ResolvedStyle, StyleHooks, StyleResolver, Tokens};
use panelkit_widgets::{ChromeLayout, PanelChrome};
use tracing::debug;

use crate::error::Result;

/// Root of one screen.
pub struct Page {
    id: String,
    canvas: GridCanvas<PanelChrome>,
    resolver: Arc<dyn StyleResolver>,
    tokens: Tokens,
    overlay: GridOverlayConfig,
    canvas_area: Option<Rect>,
    layouts: Vec<(PlacementHandle, ChromeLayout)>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id)
            .field("panels", &self.canvas.len())
            .field("canvas_area", &self.canvas_area)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Page with default tokens and an unbounded row count.
    pub fn new(id: impl Into<String>, resolver: Arc<dyn StyleResolver>) -> Self {
        Self::with_tokens(id, resolver, Tokens::default())
    }

    pub fn with_tokens(
        id: impl Into<String>,
        resolver: Arc<dyn StyleResolver>,
        tokens: Tokens,
    ) -> Self {
        let grid = GridConfig::new(tokens.grid_cols).gap(tokens.grid_gap_px);
        Self::with_grid(id, resolver, tokens, grid)
    }

    pub fn with_grid(
        id: impl Into<String>,
        resolver: Arc<dyn StyleResolver>,
        tokens: Tokens,
        grid: GridConfig,
    ) -> Self {
        Self {
            id: id.into(),
            canvas: GridCanvas::new(grid),
            resolver,
            tokens,
            overlay: GridOverlayConfig::default(),
            canvas_area: None,
            layouts: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    pub fn canvas(&self) -> &GridCanvas<PanelChrome> {
        &self.canvas
    }

    /// Declare or clear the row count.
    pub fn set_rows(&mut self, rows: Option<u16>) -> Result<()> {
        self.canvas.set_rows(rows)?;
        self.relayout_panels();
        Ok(())
    }

    /// Place one panel.
    pub fn add_panel(
        &mut self,
        panel: PanelChrome,
        placement: GridPlacement,
    ) -> Result<PlacementHandle> {
        let handle = self.canvas.place(panel, placement)?;
        self.relayout_panels();
        Ok(handle)
    }

    /// Place several panels, or none if any placement is invalid.
    pub fn add_panels(
        &mut self,
        panels: impl IntoIterator<Item = (PanelChrome, GridPlacement)>,
    ) -> Result<Vec<PlacementHandle>> {
        let handles = self.canvas.place_all(panels)?;
        self.relayout_panels();
        Ok(handles)
    }

    pub fn remove_panel(&mut self, handle: PlacementHandle) -> Option<PanelChrome> {
        let panel = self.canvas.remove(handle)?;
        self.relayout_panels();
        Some(panel)
    }

    pub fn panel(&self, handle: PlacementHandle) -> Option<&PanelChrome> {
        self.canvas.get(handle)
    }

    /// Mutable access to a panel. Call [`Page::relayout`] afterwards if the
    /// change affects geometry.
    pub fn panel_mut(&mut self, handle: PlacementHandle) -> Option<&mut PanelChrome> {
        self.canvas.get_mut(handle)
    }

    pub fn len(&self) -> usize {
        self.canvas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canvas.is_empty()
    }

    /// Lay the page out for a new window size.
    ///
    /// Idempotent: the same size always yields the same geometry.
    pub fn resize(&mut self, size: Size) {
        let area = Rect::from_size(size).inner(self.tokens.page_margins);
        debug!(page = %self.id, width = area.width, height = area.height, "page resized");
        self.canvas_area = Some(area);
        self.canvas.resize(area.size());
        self.relayout_panels();
    }

    /// Re-run chrome layout at the current size.
    pub fn relayout(&mut self) {
        self.relayout_panels();
    }

    fn relayout_panels(&mut self) {
        let Some(origin) = self.canvas_area else {
            return;
        };
        self.layouts.clear();
        for (handle, bounds, chrome) in self.canvas.iter_mut() {
            if let Some(bounds) = bounds {
                let absolute = Rect::new(
                    origin.x.saturating_add(bounds.x),
                    origin.y.saturating_add(bounds.y),
                    bounds.width,
                    bounds.height,
                );
                self.layouts.push((handle, chrome.layout(absolute)));
            }
        }
    }

    /// The canvas rectangle inside the page margins, once sized.
    pub fn canvas_area(&self) -> Option<Rect> {
        self.canvas_area
    }

    /// Absolute bounds of a panel.
    pub fn panel_bounds(&self, handle: PlacementHandle) -> Option<Rect> {
        let origin = self.canvas_area?;
        let bounds = self.canvas.bounds(handle)?;
        Some(Rect::new(
            origin.x + bounds.x,
            origin.y + bounds.y,
            bounds.width,
            bounds.height,
        ))
    }

    /// Chrome geometry from the most recent layout pass.
    pub fn panel_layout(&self, handle: PlacementHandle) -> Option<&ChromeLayout> {
        self.layouts
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, layout)| layout)
    }

    pub fn style_resolver(&self) -> &Arc<dyn StyleResolver> {
        &self.resolver
    }

    /// Resolve hooks through the page's style service.
    pub fn resolve(&self, hooks: &StyleHooks) -> ResolvedStyle {
        self.resolver.resolve(hooks)
    }

    pub fn overlay(&self) -> &GridOverlayConfig {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut GridOverlayConfig {
        &mut self.overlay
    }

    /// Debug grid lines in absolute coordinates.
    pub fn overlay_lines(&self) -> GridLines {
        let Some(area) = self.canvas_area else {
            return GridLines::default();
        };
        let mut lines = GridOverlay::lines(area, self.canvas.cols(), &self.overlay);
        for x in &mut lines.vertical {
            *x += area.x;
        }
        for y in &mut lines.horizontal {
            *y += area.y;
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use panelkit_style::StyleSheet;
    use panelkit_widgets::PanelVariant;

    use super::*;

    fn page() -> Page {
        Page::new("standings", Arc::new(StyleSheet::new()))
    }

    #[test]
    fn margins_offset_panels() {
        let mut page = page();
        let handle = page
            .add_panel(
                PanelChrome::with_title(PanelVariant::Card, "League"),
                GridPlacement::new(0, 0, 36, 1),
            )
            .unwrap();
        assert_eq!(page.panel_bounds(handle), None);

        page.resize(Size::new(1000, 600));
        assert_eq!(page.canvas_area(), Some(Rect::new(16, 0, 968, 584)));
        assert_eq!(page.panel_bounds(handle), Some(Rect::new(16, 0, 968, 584)));
        let layout = page.panel_layout(handle).unwrap();
        assert_eq!(layout.primary, Some(Rect::new(16, 0, 968, 32)));
    }

    #[test]
    fn overlay_lines_are_absolute() {
        let mut page = page();
        page.resize(Size::new(392, 300));
        assert!(page.overlay_lines().is_empty());
        page.overlay_mut().set_enabled(true);
        let lines = page.overlay_lines();
        assert_eq!(lines.vertical.len(), 35);
        assert_eq!(lines.vertical[0], 16 + 10);
        assert_eq!(lines.horizontal[0], 28);
    }
}
