#![forbid(unsafe_code)]

//! Fixed-column grid canvas.
//!
//! A [`GridCanvas`] owns items placed by `(col, row, col_span, row_span)`.
//! Every column (and every row) stretches uniformly; a resize recomputes the
//! pixel bounds of each placement but never touches its grid coordinates.
//!
//! # Invariants
//!
//! 1. `col + col_span <= cols` for every placement.
//! 2. When rows are declared, `row + row_span <= rows` for every placement.
//! 3. No two placements share a grid cell.
//! 4. Spans are at least 1.
//! 5. Resizing is idempotent: the same size always yields the same bounds.
//!
//! # Failure Modes
//!
//! [`GridCanvas::place`] fails fast with [`LayoutError::OutOfBounds`] or
//! [`LayoutError::Overlap`]. Both indicate a page composition bug; nothing is
//! inserted when validation fails.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Constraint, Flex, Rect, Size};

/// Default column count for page grids.
pub const DEFAULT_GRID_COLS: u16 = 36;

/// Default gap between grid tracks in pixels.
pub const DEFAULT_GRID_GAP_PX: u32 = 12;

/// Sizing parameters for a [`GridCanvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of uniformly stretched columns (at least 1).
    pub cols: u16,
    /// Declared row count. `None` sizes rows to the highest row in use.
    #[serde(default)]
    pub rows: Option<u16>,
    /// Gap between adjacent tracks, both axes.
    #[serde(default = "default_gap")]
    pub gap_px: u32,
}

fn default_gap() -> u32 {
    DEFAULT_GRID_GAP_PX
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_GRID_COLS,
            rows: None,
            gap_px: DEFAULT_GRID_GAP_PX,
        }
    }
}

impl GridConfig {
    /// Grid with `cols` columns (clamped to at least 1) and undeclared rows.
    #[must_use]
    pub fn new(cols: u16) -> Self {
        Self {
            cols: cols.max(1),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn rows(mut self, rows: u16) -> Self {
        self.rows = Some(rows.max(1));
        self
    }

    #[must_use]
    pub fn gap(mut self, gap_px: u32) -> Self {
        self.gap_px = gap_px;
        self
    }
}

/// A rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPlacement {
    pub col: u16,
    pub row: u16,
    pub col_span: u16,
    pub row_span: u16,
}

impl GridPlacement {
    pub const fn new(col: u16, row: u16, col_span: u16, row_span: u16) -> Self {
        Self {
            col,
            row,
            col_span,
            row_span,
        }
    }

    /// A single 1x1 cell.
    pub const fn cell(col: u16, row: u16) -> Self {
        Self::new(col, row, 1, 1)
    }

    /// One past the last column covered.
    #[inline]
    pub const fn col_end(&self) -> u32 {
        self.col as u32 + self.col_span as u32
    }

    /// One past the last row covered.
    #[inline]
    pub const fn row_end(&self) -> u32 {
        self.row as u32 + self.row_span as u32
    }

    /// Whether the two placements share any cell.
    pub const fn overlaps(&self, other: &GridPlacement) -> bool {
        (self.col as u32) < other.col_end()
            && (other.col as u32) < self.col_end()
            && (self.row as u32) < other.row_end()
            && (other.row as u32) < self.row_end()
    }

    fn cells(&self) -> impl Iterator<Item = (u16, u16)> + use<> {
        let (col, row) = (self.col, self.row);
        let (col_span, row_span) = (self.col_span, self.row_span);
        (row..row.saturating_add(row_span))
            .flat_map(move |r| (col..col.saturating_add(col_span)).map(move |c| (c, r)))
    }
}

impl fmt::Display for GridPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(col={}, row={}, col_span={}, row_span={})",
            self.col, self.row, self.col_span, self.row_span
        )
    }
}

/// Opaque handle to a placed item. Handles are never reused by a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementHandle(u64);

impl PlacementHandle {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Grid placement failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The rectangle leaves the grid, or has a zero span.
    OutOfBounds {
        placement: GridPlacement,
        cols: u16,
        rows: Option<u16>,
    },
    /// The rectangle shares a cell with an existing placement.
    Overlap {
        placement: GridPlacement,
        existing: GridPlacement,
        handle: Option<PlacementHandle>,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                placement,
                cols,
                rows: Some(rows),
            } => write!(
                f,
                "placement {placement} is out of bounds for a {cols}x{rows} grid"
            ),
            Self::OutOfBounds {
                placement,
                cols,
                rows: None,
            } => write!(
                f,
                "placement {placement} is out of bounds for a {cols}-column grid"
            ),
            Self::Overlap {
                placement,
                existing,
                ..
            } => write!(f, "placement {placement} overlaps {existing}"),
        }
    }
}

impl std::error::Error for LayoutError {}

#[derive(Debug)]
struct Entry<T> {
    handle: PlacementHandle,
    placement: GridPlacement,
    bounds: Option<Rect>,
    item: T,
}

/// A borrowed view of one placement.
#[derive(Debug)]
pub struct Placed<'a, T> {
    pub handle: PlacementHandle,
    pub placement: GridPlacement,
    /// Pixel bounds; `None` until the canvas has been resized once.
    pub bounds: Option<Rect>,
    pub item: &'a T,
}

/// A fixed-column grid that owns its placed items.
#[derive(Debug)]
pub struct GridCanvas<T> {
    config: GridConfig,
    entries: Vec<Entry<T>>,
    occupied: FxHashMap<(u16, u16), PlacementHandle>,
    size: Option<Size>,
    next_handle: u64,
}

impl<T> Default for GridCanvas<T> {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl<T> GridCanvas<T> {
    /// Create an empty canvas.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config: GridConfig {
                cols: config.cols.max(1),
                rows: config.rows.map(|r| r.max(1)),
                gap_px: config.gap_px,
            },
            entries: Vec::new(),
            occupied: FxHashMap::default(),
            size: None,
            next_handle: 1,
        }
    }

    #[inline]
    pub fn config(&self) -> GridConfig {
        self.config
    }

    #[inline]
    pub fn cols(&self) -> u16 {
        self.config.cols
    }

    /// Row count used for geometry: declared rows, or the highest row in use.
    pub fn effective_rows(&self) -> u16 {
        self.config.rows.unwrap_or_else(|| {
            let used = self
                .entries
                .iter()
                .map(|e| e.placement.row_end())
                .max()
                .unwrap_or(1);
            u16::try_from(used).unwrap_or(u16::MAX).max(1)
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last size passed to [`resize`](Self::resize).
    #[inline]
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Check a placement against the grid bounds and existing placements.
    pub fn validate(&self, placement: GridPlacement) -> Result<(), LayoutError> {
        self.check_bounds(placement)?;
        for (col, row) in placement.cells() {
            if let Some(&handle) = self.occupied.get(&(col, row)) {
                let existing = self
                    .entries
                    .iter()
                    .find(|e| e.handle == handle)
                    .map_or(placement, |e| e.placement);
                return Err(LayoutError::Overlap {
                    placement,
                    existing,
                    handle: Some(handle),
                });
            }
        }
        Ok(())
    }

    fn check_bounds(&self, placement: GridPlacement) -> Result<(), LayoutError> {
        let out_of_bounds = placement.col_span == 0
            || placement.row_span == 0
            || placement.col_end() > u32::from(self.config.cols)
            || self
                .config
                .rows
                .is_some_and(|rows| placement.row_end() > u32::from(rows))
            || placement.row_end() > u32::from(u16::MAX);
        if out_of_bounds {
            return Err(LayoutError::OutOfBounds {
                placement,
                cols: self.config.cols,
                rows: self.config.rows,
            });
        }
        Ok(())
    }

    /// Place an item, failing fast on bounds or overlap violations.
    pub fn place(
        &mut self,
        item: T,
        placement: GridPlacement,
    ) -> Result<PlacementHandle, LayoutError> {
        self.validate(placement)?;
        let handle = self.insert(item, placement);
        self.relayout();
        Ok(handle)
    }

    /// Place a batch of items atomically.
    ///
    /// Each placement is validated against the canvas and against the earlier
    /// members of the batch. On error nothing is inserted.
    pub fn place_all(
        &mut self,
        items: impl IntoIterator<Item = (T, GridPlacement)>,
    ) -> Result<Vec<PlacementHandle>, LayoutError> {
        let batch: Vec<(T, GridPlacement)> = items.into_iter().collect();
        for (i, (_, placement)) in batch.iter().enumerate() {
            self.validate(*placement)?;
            if let Some((_, earlier)) = batch[..i].iter().find(|(_, p)| p.overlaps(placement)) {
                return Err(LayoutError::Overlap {
                    placement: *placement,
                    existing: *earlier,
                    handle: None,
                });
            }
        }

        let handles = batch
            .into_iter()
            .map(|(item, placement)| self.insert(item, placement))
            .collect();
        self.relayout();
        Ok(handles)
    }

    fn insert(&mut self, item: T, placement: GridPlacement) -> PlacementHandle {
        let handle = PlacementHandle(self.next_handle);
        self.next_handle += 1;
        for cell in placement.cells() {
            self.occupied.insert(cell, handle);
        }
        debug!(handle = handle.0, %placement, "grid placement added");
        self.entries.push(Entry {
            handle,
            placement,
            bounds: None,
            item,
        });
        handle
    }

    /// Remove a placement. Other placements keep their cells and bounds
    /// (unless undeclared rows shrink, which only changes pixel geometry).
    pub fn remove(&mut self, handle: PlacementHandle) -> Option<T> {
        let idx = self.entries.iter().position(|e| e.handle == handle)?;
        let entry = self.entries.remove(idx);
        for cell in entry.placement.cells() {
            self.occupied.remove(&cell);
        }
        debug!(handle = handle.0, placement = %entry.placement, "grid placement removed");
        if self.config.rows.is_none() {
            self.relayout();
        }
        Some(entry.item)
    }

    /// Remove every placement.
    pub fn clear(&mut self) -> Vec<T> {
        self.occupied.clear();
        self.entries.drain(..).map(|e| e.item).collect()
    }

    /// Change the declared row count.
    ///
    /// Shrinking below a placed row is refused and leaves the canvas unchanged.
    pub fn set_rows(&mut self, rows: Option<u16>) -> Result<(), LayoutError> {
        let rows = rows.map(|r| r.max(1));
        if let Some(limit) = rows
            && let Some(entry) = self
                .entries
                .iter()
                .find(|e| e.placement.row_end() > u32::from(limit))
        {
            return Err(LayoutError::OutOfBounds {
                placement: entry.placement,
                cols: self.config.cols,
                rows: Some(limit),
            });
        }
        self.config.rows = rows;
        self.relayout();
        Ok(())
    }

    /// Change the gap between tracks.
    pub fn set_gap(&mut self, gap_px: u32) {
        self.config.gap_px = gap_px;
        self.relayout();
    }

    /// Recompute pixel bounds for a new canvas size.
    pub fn resize(&mut self, size: Size) {
        if self.size != Some(size) {
            debug!(width = size.width, height = size.height, "grid canvas resized");
        }
        self.size = Some(size);
        self.relayout();
    }

    fn relayout(&mut self) {
        let Some(size) = self.size else {
            return;
        };
        let area = Rect::from_size(size);
        let cols = Flex::horizontal()
            .gap(self.config.gap_px)
            .constraints(vec![Constraint::Ratio(1, 1); usize::from(self.config.cols)])
            .split(area);
        let rows = Flex::vertical()
            .gap(self.config.gap_px)
            .constraints(vec![Constraint::Ratio(1, 1); usize::from(self.effective_rows())])
            .split(area);

        for entry in &mut self.entries {
            entry.bounds = span_bounds(&cols, &rows, entry.placement);
        }
    }

    pub fn get(&self, handle: PlacementHandle) -> Option<&T> {
        self.entry(handle).map(|e| &e.item)
    }

    pub fn get_mut(&mut self, handle: PlacementHandle) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|e| e.handle == handle)
            .map(|e| &mut e.item)
    }

    pub fn placement(&self, handle: PlacementHandle) -> Option<GridPlacement> {
        self.entry(handle).map(|e| e.placement)
    }

    /// Pixel bounds of a placement, once the canvas has a size.
    pub fn bounds(&self, handle: PlacementHandle) -> Option<Rect> {
        self.entry(handle).and_then(|e| e.bounds)
    }

    fn entry(&self, handle: PlacementHandle) -> Option<&Entry<T>> {
        self.entries.iter().find(|e| e.handle == handle)
    }

    /// Placements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Placed<'_, T>> {
        self.entries.iter().map(|e| Placed {
            handle: e.handle,
            placement: e.placement,
            bounds: e.bounds,
            item: &e.item,
        })
    }

    /// Mutable access to items with their bounds, in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlacementHandle, Option<Rect>, &mut T)> {
        self.entries
            .iter_mut()
            .map(|e| (e.handle, e.bounds, &mut e.item))
    }

    /// Distance between the left edges of adjacent columns.
    pub fn column_pitch_px(&self) -> Option<u32> {
        let size = self.size.filter(|s| s.width > 0)?;
        Some(pitch(size.width, self.config.gap_px, u32::from(self.config.cols)))
    }

    /// Distance between the top edges of adjacent rows. Requires declared rows.
    pub fn row_pitch_px(&self) -> Option<u32> {
        let rows = self.config.rows?;
        let size = self.size.filter(|s| s.height > 0)?;
        Some(pitch(size.height, self.config.gap_px, u32::from(rows)))
    }
}

fn pitch(extent: u32, gap: u32, tracks: u32) -> u32 {
    let pitch = (f64::from(extent) + f64::from(gap)) / f64::from(tracks.max(1));
    (pitch.round() as u32).max(1)
}

fn span_bounds(cols: &[Rect], rows: &[Rect], placement: GridPlacement) -> Option<Rect> {
    let first_col = cols.get(usize::from(placement.col))?;
    let last_col = cols.get(placement.col_end().checked_sub(1)? as usize)?;
    let first_row = rows.get(usize::from(placement.row))?;
    let last_row = rows.get(placement.row_end().checked_sub(1)? as usize)?;
    Some(Rect::new(
        first_col.x,
        first_row.y,
        last_col.right().saturating_sub(first_col.x),
        last_row.bottom().saturating_sub(first_row.y),
    ))
}
