#![forbid(unsafe_code)]

//! Header and row builders over one shared [`ColumnSet`].
//!
//! [`HeaderRow`] sits in a chrome's tertiary bar, [`TableBody`] in its body.
//! Both produce [`Cell`]s through [`ColumnSet::cell_rects`], so for any
//! column index the header cell and every row cell share x, width and
//! alignment as long as both rows span the same horizontal extent.
//!
//! # Scroll behavior
//!
//! Every row mutation and every layout pass updates the body's
//! [`LockedScroll`] before returning. Content height is
//! `rows × row_height`; the guard decides whether that overflows.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use ahash::AHashMap;
use panelkit_core::Rect;
use panelkit_layout::{ScrollDecision, ScrollOverflowGuard};
use panelkit_style::{StyleHooks, Tokens, attr};
use tracing::debug;

use crate::Widget;
use crate::column::{CellAlignment, ColumnSet};
use crate::scroll::LockedScroll;

/// One normalized value handed over by the data layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Integer(v) => Some(v as f64),
            Self::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// A row as `{column key → value}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    values: AHashMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Sort direction. Persisted as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
#[repr(u8)]
pub enum SortOrder {
    #[default]
    Ascending = 0,
    Descending = 1,
}

impl SortOrder {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Ascending),
            1 => Some(Self::Descending),
            _ => None,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// One positioned cell of a header or body row.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<'a> {
    pub key: &'a str,
    pub text: String,
    pub rect: Rect,
    pub alignment: CellAlignment,
    /// `TableHeaderCell` or `TableCell`, carrying `cellAlign`.
    pub hooks: StyleHooks,
}

fn cell_hooks(object_name: &str, alignment: CellAlignment) -> StyleHooks {
    StyleHooks::new(object_name).with_attr(attr::CELL_ALIGN, alignment.as_str())
}

/// Column header built from a [`ColumnSet`].
#[derive(Debug, Clone)]
pub struct HeaderRow {
    columns: ColumnSet,
    hooks: StyleHooks,
    area: Rect,
}

impl HeaderRow {
    pub fn new(columns: ColumnSet) -> Self {
        Self {
            columns,
            hooks: StyleHooks::new("TableHeaderRow"),
            area: Rect::default(),
        }
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: ColumnSet) {
        self.columns = columns;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Header cells for the last laid-out area.
    pub fn cells(&self) -> Vec<Cell<'_>> {
        self.cells_in(self.area)
    }

    /// Header cells for an explicit row rectangle.
    pub fn cells_in(&self, row: Rect) -> Vec<Cell<'_>> {
        self.columns
            .cell_rects(row)
            .into_iter()
            .map(|(slot, rect)| {
                let spec = &self.columns.specs()[slot.index];
                Cell {
                    key: spec.key(),
                    text: spec.label().to_owned(),
                    rect,
                    alignment: slot.alignment,
                    hooks: cell_hooks("TableHeaderCell", slot.alignment),
                }
            })
            .collect()
    }
}

impl Widget for HeaderRow {
    fn style_hooks(&self) -> &StyleHooks {
        &self.hooks
    }

    fn layout(&mut self, area: Rect) {
        self.area = area;
    }
}

/// Scrollable table body over shared columns.
///
/// Row height and overflow threshold come from [`Tokens`]. A body placed in a
/// [`PanelChrome`](crate::PanelChrome) takes the chrome's tokens unless
/// [`row_height`](Self::row_height) or [`guard`](Self::guard) set them
/// explicitly.
#[derive(Debug, Clone)]
pub struct TableBody {
    hooks: StyleHooks,
    columns: ColumnSet,
    rows: Vec<Record>,
    row_height: u32,
    custom_row_height: bool,
    custom_guard: bool,
    scroll: LockedScroll,
    sort: Option<(usize, SortOrder)>,
    viewport: Rect,
}

impl TableBody {
    pub fn new(columns: ColumnSet) -> Self {
        Self::with_tokens(columns, &Tokens::default())
    }

    pub fn with_tokens(columns: ColumnSet, tokens: &Tokens) -> Self {
        let row_height = tokens.row_height_px.max(1);
        Self {
            hooks: StyleHooks::new("TableBody").with_attr(attr::HIDDEN_SCROLLBAR, true),
            columns,
            rows: Vec::new(),
            row_height,
            custom_row_height: false,
            custom_guard: false,
            scroll: LockedScroll::new(ScrollOverflowGuard::new(tokens.overflow_threshold_px))
                .line_step(row_height as f32),
            sort: None,
            viewport: Rect::default(),
        }
    }

    /// Row height in pixels, at least 1.
    #[must_use]
    pub fn row_height(mut self, row_height: u32) -> Self {
        self.custom_row_height = true;
        self.apply_row_height(row_height);
        self
    }

    /// Replace the overflow guard, keeping extents.
    #[must_use]
    pub fn guard(mut self, guard: ScrollOverflowGuard) -> Self {
        self.custom_guard = true;
        self.scroll.set_guard(guard);
        self
    }

    /// Take row height and threshold from `tokens` where they were not set
    /// explicitly.
    pub(crate) fn adopt_tokens(&mut self, tokens: &Tokens) {
        if !self.custom_row_height {
            self.apply_row_height(tokens.row_height_px);
        }
        if !self.custom_guard {
            self.scroll
                .set_guard(ScrollOverflowGuard::new(tokens.overflow_threshold_px));
        }
    }

    fn apply_row_height(&mut self, row_height: u32) {
        self.row_height = row_height.max(1);
        self.scroll.set_line_step(self.row_height as f32);
        self.refresh_scroll();
    }

    pub fn row_height_px(&self) -> u32 {
        self.row_height
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Swap in a new column set. A sort on a column past the new end is
    /// dropped.
    pub fn set_columns(&mut self, columns: ColumnSet) {
        if self
            .sort
            .is_some_and(|(column, _)| column >= columns.len())
        {
            self.sort = None;
        }
        self.columns = columns;
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn set_rows(&mut self, rows: impl IntoIterator<Item = Record>) -> ScrollDecision {
        self.rows = rows.into_iter().collect();
        self.apply_sort();
        self.refresh_scroll()
    }

    pub fn push_row(&mut self, row: Record) -> ScrollDecision {
        self.rows.push(row);
        self.apply_sort();
        self.refresh_scroll()
    }

    pub fn remove_row(&mut self, index: usize) -> Option<Record> {
        if index >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(index);
        self.refresh_scroll();
        Some(row)
    }

    pub fn clear_rows(&mut self) -> ScrollDecision {
        self.rows.clear();
        self.refresh_scroll()
    }

    pub fn content_height(&self) -> u32 {
        u32::try_from(self.rows.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(self.row_height)
    }

    /// Sort rows by column position. Returns `false` for an unknown column.
    pub fn sort_by(&mut self, column: usize, order: SortOrder) -> bool {
        if column >= self.columns.len() {
            return false;
        }
        self.sort = Some((column, order));
        self.apply_sort();
        true
    }

    pub fn sort(&self) -> Option<(usize, SortOrder)> {
        self.sort
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    fn apply_sort(&mut self) {
        let Some((column, order)) = self.sort else {
            return;
        };
        let Some(spec) = self.columns.specs().get(column) else {
            return;
        };
        let key = spec.key();
        self.rows.sort_by(|a, b| {
            let ord = compare_values(a.get(key), b.get(key));
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }

    pub fn scroll(&self) -> &LockedScroll {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut LockedScroll {
        &mut self.scroll
    }

    pub fn is_overflowing(&self) -> bool {
        self.scroll.is_overflowing()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Row rectangle in content coordinates (unscrolled). Subtract
    /// [`LockedScroll::offset`] to draw.
    pub fn row_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.rows.len() {
            return None;
        }
        let top = u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.row_height);
        Some(Rect::new(
            self.viewport.x,
            self.viewport.y.saturating_add(top),
            self.viewport.width,
            self.row_height,
        ))
    }

    /// Cells of one row, using the same geometry as the header.
    pub fn row_cells(&self, index: usize) -> Option<Vec<Cell<'_>>> {
        let row_rect = self.row_rect(index)?;
        let record = &self.rows[index];
        Some(
            self.columns
                .cell_rects(row_rect)
                .into_iter()
                .map(|(slot, rect)| {
                    let key = self.columns.specs()[slot.index].key();
                    Cell {
                        key,
                        text: record.get(key).map(ToString::to_string).unwrap_or_default(),
                        rect,
                        alignment: slot.alignment,
                        hooks: cell_hooks("TableCell", slot.alignment),
                    }
                })
                .collect(),
        )
    }

    /// Rows at least partly inside the viewport at the current offset.
    pub fn visible_rows(&self) -> Range<usize> {
        let row_height = self.row_height as f32;
        let offset = self.scroll.offset();
        let first = (offset / row_height).floor() as usize;
        let last = ((offset + self.viewport.height as f32) / row_height).ceil() as usize;
        first.min(self.rows.len())..last.min(self.rows.len())
    }

    fn refresh_scroll(&mut self) -> ScrollDecision {
        self.scroll.set_content_extent(self.content_height() as f32)
    }
}

fn compare_values(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    let a = a.filter(|v| !v.is_empty());
    let b = b.filter(|v| !v.is_empty());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a
                .to_string()
                .to_lowercase()
                .cmp(&b.to_string().to_lowercase()),
        },
    }
}

impl Widget for TableBody {
    fn style_hooks(&self) -> &StyleHooks {
        &self.hooks
    }

    fn layout(&mut self, area: Rect) {
        self.viewport = area;
        let decision = self.scroll.set_viewport_extent(area.height as f32);
        debug!(
            rows = self.rows.len(),
            viewport = area.height,
            range = decision.range,
            "table body laid out"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnSpec;

    fn columns() -> ColumnSet {
        ColumnSet::new([
            ColumnSpec::new("team", "Team", 120),
            ColumnSpec::new("pts", "Pts", 40).align(CellAlignment::END),
        ])
        .unwrap()
    }

    fn team(name: &str, pts: Option<i64>) -> Record {
        Record::new().with("team", name).with("pts", pts)
    }

    #[test]
    fn row_changes_rerun_guard() {
        let mut body = TableBody::new(columns());
        body.layout(Rect::new(0, 0, 160, 48));
        body.set_rows([team("a", Some(1)), team("b", Some(2))]);
        assert!(!body.is_overflowing());
        body.push_row(team("c", Some(3)));
        assert!(body.is_overflowing());
        assert_eq!(body.scroll().range(), 24.0);
        body.remove_row(0);
        assert!(!body.is_overflowing());
        assert_eq!(body.remove_row(9), None);
    }

    #[test]
    fn sort_numbers_text_and_empties() {
        let mut body = TableBody::new(columns());
        body.set_rows([
            team("beta", Some(10)),
            team("Alpha", None),
            team("gamma", Some(2)),
        ]);
        assert!(body.sort_by(1, SortOrder::Ascending));
        let names: Vec<String> = (0..3)
            .map(|i| body.rows()[i].get("team").unwrap().to_string())
            .collect();
        assert_eq!(names, ["Alpha", "gamma", "beta"]);

        body.sort_by(0, SortOrder::Descending);
        assert_eq!(body.rows()[0].get("team"), Some(&CellValue::from("gamma")));
        assert_eq!(body.rows()[2].get("team"), Some(&CellValue::from("Alpha")));
        assert!(!body.sort_by(5, SortOrder::Ascending));
    }

    #[test]
    fn sorted_body_keeps_order_on_push() {
        let mut body = TableBody::new(columns());
        body.sort_by(1, SortOrder::Descending);
        body.push_row(team("a", Some(1)));
        body.push_row(team("b", Some(5)));
        assert_eq!(body.rows()[0].get("pts"), Some(&CellValue::Integer(5)));
    }

    #[test]
    fn row_cells_follow_columns() {
        let mut body = TableBody::new(columns());
        body.layout(Rect::new(12, 100, 160, 200));
        body.push_row(team("a", Some(7)));
        let cells = body.row_cells(0).unwrap();
        assert_eq!(cells[1].rect, Rect::new(132, 100, 40, 24));
        assert_eq!(cells[1].text, "7");
        assert_eq!(cells[1].alignment, CellAlignment::END);
        assert!(body.row_cells(1).is_none());
    }

    #[test]
    fn visible_rows_track_offset() {
        let mut body = TableBody::new(columns());
        body.layout(Rect::new(0, 0, 160, 60));
        body.set_rows((0..10).map(|i| team("t", Some(i))));
        assert_eq!(body.visible_rows(), 0..3);
        body.scroll_mut().trackpad(30.0);
        assert_eq!(body.visible_rows(), 1..4);
    }

    #[test]
    fn sort_order_codes() {
        assert_eq!(SortOrder::Descending.as_u8(), 1);
        assert_eq!(SortOrder::from_u8(0), Some(SortOrder::Ascending));
        assert_eq!(SortOrder::from_u8(7), None);
        assert_eq!(SortOrder::Ascending.reversed(), SortOrder::Descending);
    }
}
