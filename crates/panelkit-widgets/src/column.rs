#![forbid(unsafe_code)]

//! Shared column geometry for header and row builders.
//!
//! A [`ColumnSet`] is the only place widths, order and alignment live. Both
//! [`HeaderRow`](crate::HeaderRow) and [`TableBody`](crate::TableBody) hold a
//! clone of the same set (the specs sit behind an `Arc`, so clones share one
//! sequence) and compute cell rectangles with the same function. Neither
//! accepts a width from anywhere else.
//!
//! # Invariants
//!
//! 1. Every spec has a non-empty key and a width above zero.
//! 2. Keys are unique unless the caller opted in with
//!    [`ColumnSet::allowing_duplicates`]; the later duplicate then shadows the
//!    earlier one for key lookups while both keep their slot in render order.
//! 3. Column `i` starts at the sum of the widths of columns `0..i`.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use panelkit_core::Rect;

use crate::warning::ConfigurationWarning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum HorizontalAlignment {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Horizontal × vertical placement of content inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CellAlignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl CellAlignment {
    /// Text columns.
    pub const START: Self = Self::new(HorizontalAlignment::Start, VerticalAlignment::Middle);
    pub const CENTER: Self = Self::new(HorizontalAlignment::Center, VerticalAlignment::Middle);
    /// Numeric columns.
    pub const END: Self = Self::new(HorizontalAlignment::End, VerticalAlignment::Middle);

    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Hook value for the `cellAlign` attribute.
    pub const fn as_str(self) -> &'static str {
        match self.horizontal {
            HorizontalAlignment::Start => "start",
            HorizontalAlignment::Center => "center",
            HorizontalAlignment::End => "end",
        }
    }
}

/// One column: key, label, width in pixels and alignment.
///
/// A column without a natural label (a leading logo cell, say) keeps an empty
/// label rather than being left out.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ColumnSpec {
    key: String,
    label: String,
    width: u32,
    alignment: CellAlignment,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>, width: u32) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width,
            alignment: CellAlignment::START,
        }
    }

    #[must_use]
    pub fn align(mut self, alignment: CellAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn alignment(&self) -> CellAlignment {
        self.alignment
    }
}

/// Resolved horizontal slot of one column, relative to the row's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnGeometry {
    pub index: usize,
    pub x: u32,
    pub width: u32,
    pub alignment: CellAlignment,
}

/// Rejected column definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSetError {
    DuplicateKey {
        key: String,
        first: usize,
        second: usize,
    },
    ZeroWidth {
        key: String,
    },
    EmptyKey {
        index: usize,
    },
}

impl fmt::Display for ColumnSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key, first, second } => write!(
                f,
                "duplicate column key {key:?} at positions {first} and {second}"
            ),
            Self::ZeroWidth { key } => write!(f, "column {key:?} has zero width"),
            Self::EmptyKey { index } => write!(f, "column at position {index} has an empty key"),
        }
    }
}

impl std::error::Error for ColumnSetError {}

/// Immutable, cheaply clonable ordered column sequence.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    specs: Arc<[ColumnSpec]>,
    geometry: Arc<[ColumnGeometry]>,
    by_key: Arc<AHashMap<String, usize>>,
    stretch_last: bool,
}

impl PartialEq for ColumnSet {
    fn eq(&self, other: &Self) -> bool {
        self.specs == other.specs && self.stretch_last == other.stretch_last
    }
}

impl Eq for ColumnSet {}

impl ColumnSet {
    /// Build a set, rejecting duplicate keys.
    pub fn new(specs: impl IntoIterator<Item = ColumnSpec>) -> Result<Self, ColumnSetError> {
        let specs: Vec<ColumnSpec> = specs.into_iter().collect();
        validate_specs(&specs)?;
        let mut seen: AHashMap<&str, usize> = AHashMap::with_capacity(specs.len());
        for (idx, spec) in specs.iter().enumerate() {
            if let Some(&first) = seen.get(spec.key()) {
                return Err(ColumnSetError::DuplicateKey {
                    key: spec.key.clone(),
                    first,
                    second: idx,
                });
            }
            seen.insert(spec.key(), idx);
        }
        Ok(Self::from_specs(specs.into(), false))
    }

    /// Build a set that keeps duplicate keys.
    ///
    /// Each duplicate yields a logged [`ConfigurationWarning`]; lookups by key
    /// resolve to the last column with that key.
    pub fn allowing_duplicates(
        specs: impl IntoIterator<Item = ColumnSpec>,
    ) -> Result<(Self, Vec<ConfigurationWarning>), ColumnSetError> {
        let specs: Vec<ColumnSpec> = specs.into_iter().collect();
        validate_specs(&specs)?;
        let mut warnings = Vec::new();
        let mut seen: AHashMap<&str, usize> = AHashMap::with_capacity(specs.len());
        for (idx, spec) in specs.iter().enumerate() {
            if let Some(first) = seen.insert(spec.key(), idx) {
                let warning = ConfigurationWarning::DuplicateColumnKey {
                    key: spec.key.clone(),
                    first,
                    shadowed_by: idx,
                };
                warning.emit();
                warnings.push(warning);
            }
        }
        Ok((Self::from_specs(specs.into(), false), warnings))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    fn from_specs(specs: Arc<[ColumnSpec]>, stretch_last: bool) -> Self {
        let mut x = 0u32;
        let geometry: Vec<ColumnGeometry> = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let slot = ColumnGeometry {
                    index,
                    x,
                    width: spec.width,
                    alignment: spec.alignment,
                };
                x = x.saturating_add(spec.width);
                slot
            })
            .collect();
        let by_key = specs
            .iter()
            .enumerate()
            .map(|(idx, spec)| (spec.key.clone(), idx))
            .collect();
        Self {
            specs,
            geometry: geometry.into(),
            by_key: Arc::new(by_key),
            stretch_last,
        }
    }

    /// Let the last column absorb leftover row width.
    #[must_use]
    pub fn stretch_last(mut self, stretch: bool) -> Self {
        self.stretch_last = stretch;
        self
    }

    #[inline]
    pub fn stretches_last(&self) -> bool {
        self.stretch_last
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    #[inline]
    pub fn specs(&self) -> &[ColumnSpec] {
        &self.specs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnSpec> {
        self.specs.iter()
    }

    pub fn get(&self, key: &str) -> Option<&ColumnSpec> {
        self.index_of(key).map(|idx| &self.specs[idx])
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// Unstretched column slots in render order.
    #[inline]
    pub fn geometry(&self) -> &[ColumnGeometry] {
        &self.geometry
    }

    /// Sum of declared widths.
    pub fn total_width(&self) -> u32 {
        self.geometry
            .last()
            .map_or(0, |last| last.x.saturating_add(last.width))
    }

    pub fn widths(&self) -> Vec<u32> {
        self.specs.iter().map(ColumnSpec::width).collect()
    }

    /// New set with widths replaced position by position.
    ///
    /// Zero entries and positions past the end of `widths` keep their current
    /// width; entries past the last column are ignored.
    #[must_use]
    pub fn with_widths(&self, widths: &[u32]) -> Self {
        let specs: Vec<ColumnSpec> = self
            .specs
            .iter()
            .enumerate()
            .map(|(idx, spec)| match widths.get(idx) {
                Some(&width) if width > 0 => ColumnSpec {
                    width,
                    ..spec.clone()
                },
                _ => spec.clone(),
            })
            .collect();
        Self::from_specs(specs.into(), self.stretch_last)
    }

    /// Whether two sets share one underlying sequence.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.specs, &b.specs)
    }

    /// Cell rectangles for one row, clipped to the row.
    ///
    /// Header and body rows both go through here, which is what keeps their
    /// cells identical.
    pub fn cell_rects(&self, row: Rect) -> Vec<(ColumnGeometry, Rect)> {
        let last = self.geometry.len().saturating_sub(1);
        self.geometry
            .iter()
            .map(|&slot| {
                let mut width = slot.width;
                if self.stretch_last && slot.index == last {
                    width = width.max(row.width.saturating_sub(slot.x));
                }
                let x = row.x.saturating_add(slot.x).min(row.right());
                let width = width.min(row.right() - x);
                (slot, Rect::new(x, row.y, width, row.height))
            })
            .collect()
    }
}

fn validate_specs(specs: &[ColumnSpec]) -> Result<(), ColumnSetError> {
    for (index, spec) in specs.iter().enumerate() {
        if spec.key.trim().is_empty() {
            return Err(ColumnSetError::EmptyKey { index });
        }
        if spec.width == 0 {
            return Err(ColumnSetError::ZeroWidth {
                key: spec.key.clone(),
            });
        }
    }
    Ok(())
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a ColumnSpec;
    type IntoIter = std::slice::Iter<'a, ColumnSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standings() -> ColumnSet {
        ColumnSet::new([
            ColumnSpec::new("logo", "", 28),
            ColumnSpec::new("team", "Team", 160),
            ColumnSpec::new("w", "W", 40).align(CellAlignment::END),
            ColumnSpec::new("l", "L", 40).align(CellAlignment::END),
        ])
        .unwrap()
    }

    #[test]
    fn offsets_accumulate() {
        let set = standings();
        let xs: Vec<u32> = set.geometry().iter().map(|g| g.x).collect();
        assert_eq!(xs, vec![0, 28, 188, 228]);
        assert_eq!(set.total_width(), 268);
        assert_eq!(set.get("logo").map(ColumnSpec::label), Some(""));
    }

    #[test]
    fn rejects_bad_specs() {
        assert_eq!(
            ColumnSet::new([ColumnSpec::new("a", "A", 10), ColumnSpec::new("a", "B", 10)]),
            Err(ColumnSetError::DuplicateKey {
                key: "a".into(),
                first: 0,
                second: 1
            })
        );
        assert_eq!(
            ColumnSet::new([ColumnSpec::new("a", "A", 0)]),
            Err(ColumnSetError::ZeroWidth { key: "a".into() })
        );
        assert_eq!(
            ColumnSet::new([ColumnSpec::new(" ", "A", 5)]),
            Err(ColumnSetError::EmptyKey { index: 0 })
        );
    }

    #[test]
    fn duplicates_shadow_when_allowed() {
        let (set, warnings) = ColumnSet::allowing_duplicates([
            ColumnSpec::new("pts", "Pts", 40),
            ColumnSpec::new("gp", "GP", 30),
            ColumnSpec::new("pts", "Points", 60),
        ])
        .unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.index_of("pts"), Some(2));
        assert_eq!(set.get("pts").map(ColumnSpec::width), Some(60));
        assert_eq!(
            warnings,
            vec![ConfigurationWarning::DuplicateColumnKey {
                key: "pts".into(),
                first: 0,
                shadowed_by: 2
            }]
        );
    }

    #[test]
    fn with_widths_keeps_zero_and_missing() {
        let set = standings();
        let resized = set.with_widths(&[0, 200, 50]);
        assert_eq!(resized.widths(), vec![28, 200, 50, 40]);
        assert!(!ColumnSet::ptr_eq(&set, &resized));
        let clone = resized.clone();
        assert!(ColumnSet::ptr_eq(&clone, &resized));
    }

    #[test]
    fn cell_rects_clip_and_stretch() {
        let set = standings();
        let row = Rect::new(10, 5, 250, 24);
        let cells = set.cell_rects(row);
        assert_eq!(cells[0].1, Rect::new(10, 5, 28, 24));
        assert_eq!(cells[3].1, Rect::new(238, 5, 22, 24));

        let stretched = standings().stretch_last(true).cell_rects(Rect::new(0, 0, 400, 24));
        assert_eq!(stretched[3].1.width, 172);
    }

    #[test]
    fn empty_set_has_no_cells() {
        let set = ColumnSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.total_width(), 0);
        assert!(set.cell_rects(Rect::new(0, 0, 100, 20)).is_empty());
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn specs_load_from_json_and_still_validate() {
        let json = r#"[
            {"key": "team", "label": "Team", "width": 160,
             "alignment": {"horizontal": "Start", "vertical": "Middle"}},
            {"key": "w", "label": "W", "width": 40,
             "alignment": {"horizontal": "End", "vertical": "Middle"}}
        ]"#;
        let specs: Vec<ColumnSpec> = serde_json::from_str(json).unwrap();
        assert_eq!(specs[1].alignment(), CellAlignment::END);
        let set = ColumnSet::new(specs.clone()).unwrap();
        assert_eq!(set.widths(), vec![160, 40]);

        let back: Vec<ColumnSpec> =
            serde_json::from_str(&serde_json::to_string(set.specs()).unwrap()).unwrap();
        assert_eq!(back, specs);

        let zero = r#"[{"key": "x", "label": "X", "width": 0,
            "alignment": {"horizontal": "Start", "vertical": "Middle"}}]"#;
        let specs: Vec<ColumnSpec> = serde_json::from_str(zero).unwrap();
        assert!(matches!(
            ColumnSet::new(specs),
            Err(ColumnSetError::ZeroWidth { .. })
        ));
    }
}
