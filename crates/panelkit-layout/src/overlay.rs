#![forbid(unsafe_code)]

//! Debug grid overlay geometry.
//!
//! The overlay is pure output: given a canvas area, a column count and a
//! [`GridOverlayConfig`], [`GridOverlay::lines`] returns where grid lines go.
//! It has no coupling to placement logic; the host draws the lines itself.

use serde::{Deserialize, Serialize};

use crate::Rect;

const DEFAULT_OPACITY: f32 = 0.18;
const DEFAULT_COLOR_HEX: &str = "#2563eb";
const DEFAULT_CELL_SIZE_PX: u32 = 28;
const MIN_CELL_SIZE_PX: u32 = 6;
const MAX_CELL_SIZE_PX: u32 = 200;

/// Overlay settings. Setters normalize their input and report whether
/// anything changed so callers know when to repaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridOverlayConfig {
    enabled: bool,
    opacity: f32,
    color_hex: String,
    cell_size_px: u32,
}

impl Default for GridOverlayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            opacity: DEFAULT_OPACITY,
            color_hex: DEFAULT_COLOR_HEX.to_owned(),
            cell_size_px: DEFAULT_CELL_SIZE_PX,
        }
    }
}

impl GridOverlayConfig {
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    #[inline]
    pub fn color_hex(&self) -> &str {
        &self.color_hex
    }

    #[inline]
    pub fn cell_size_px(&self) -> u32 {
        self.cell_size_px
    }

    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.enabled != enabled;
        self.enabled = enabled;
        changed
    }

    /// Clamped to `0.0..=1.0`; non-finite input is ignored.
    pub fn set_opacity(&mut self, opacity: f32) -> bool {
        if !opacity.is_finite() {
            return false;
        }
        let value = opacity.clamp(0.0, 1.0);
        if (value - self.opacity).abs() < 1e-6 {
            return false;
        }
        self.opacity = value;
        true
    }

    /// Accepts `#rgb`, `#rrggbb` (hash optional). Anything else resets to the
    /// default color.
    pub fn set_color_hex(&mut self, color_hex: &str) -> bool {
        let value = normalize_hex(color_hex);
        if value == self.color_hex {
            return false;
        }
        self.color_hex = value;
        true
    }

    /// Clamped to `6..=200`.
    pub fn set_cell_size_px(&mut self, cell_size_px: u32) -> bool {
        let value = cell_size_px.clamp(MIN_CELL_SIZE_PX, MAX_CELL_SIZE_PX);
        if value == self.cell_size_px {
            return false;
        }
        self.cell_size_px = value;
        true
    }
}

fn normalize_hex(text: &str) -> String {
    let value = text.trim().trim_start_matches('#');
    let valid = matches!(value.len(), 3 | 6) && value.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return DEFAULT_COLOR_HEX.to_owned();
    }
    let expanded: String = if value.len() == 3 {
        value.chars().flat_map(|c| [c, c]).collect()
    } else {
        value.to_owned()
    };
    format!("#{}", expanded.to_ascii_lowercase())
}

/// Line positions relative to the overlay area's origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridLines {
    /// X offsets of vertical column separators.
    pub vertical: Vec<u32>,
    /// Y offsets of horizontal cell-size lines.
    pub horizontal: Vec<u32>,
}

impl GridLines {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// Computes overlay line geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridOverlay;

impl GridOverlay {
    /// Column separators at `round(col / cols * width)` for `col in 1..cols`,
    /// and horizontal lines every `cell_size_px`.
    pub fn lines(area: Rect, cols: u16, config: &GridOverlayConfig) -> GridLines {
        if !config.enabled || area.is_empty() {
            return GridLines::default();
        }
        let cols = u32::from(cols.max(1));
        let width = f64::from(area.width);
        let vertical = (1..cols)
            .map(|col| (f64::from(col) / f64::from(cols) * width).round() as u32)
            .collect();

        let step = config.cell_size_px.max(MIN_CELL_SIZE_PX);
        let horizontal = (step..area.height).step_by(step as usize).collect();

        GridLines {
            vertical,
            horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_overlay_draws_nothing() {
        let lines = GridOverlay::lines(Rect::new(0, 0, 100, 100), 4, &GridOverlayConfig::default());
        assert!(lines.is_empty());
    }

    #[test]
    fn enabled_overlay_lines() {
        let mut config = GridOverlayConfig::default();
        assert!(config.set_enabled(true));
        assert!(config.set_cell_size_px(30));
        let lines = GridOverlay::lines(Rect::new(0, 0, 100, 95), 4, &config);
        assert_eq!(lines.vertical, vec![25, 50, 75]);
        assert_eq!(lines.horizontal, vec![30, 60, 90]);
    }

    #[test]
    fn empty_area_draws_nothing() {
        let mut config = GridOverlayConfig::default();
        config.set_enabled(true);
        assert!(GridOverlay::lines(Rect::new(0, 0, 0, 50), 36, &config).is_empty());
    }

    #[test]
    fn setters_normalize() {
        let mut config = GridOverlayConfig::default();
        assert!(config.set_opacity(3.0));
        assert_eq!(config.opacity(), 1.0);
        assert!(!config.set_opacity(f32::NAN));
        assert!(!config.set_opacity(1.0));

        assert!(config.set_color_hex("F0A"));
        assert_eq!(config.color_hex(), "#ff00aa");
        assert!(config.set_color_hex("not a color"));
        assert_eq!(config.color_hex(), DEFAULT_COLOR_HEX);

        assert!(config.set_cell_size_px(1));
        assert_eq!(config.cell_size_px(), 6);
        assert!(config.set_cell_size_px(10_000));
        assert_eq!(config.cell_size_px(), 200);
        assert!(!config.set_enabled(false));
    }
}
