#![forbid(unsafe_code)]

//! Spacing and sizing tokens.
//!
//! These are geometry, not appearance: layout code needs them to stack bars
//! and place panels. Colors and fonts stay with the [`StyleResolver`].
//!
//! [`StyleResolver`]: crate::StyleResolver

use panelkit_core::Sides;

/// Fixed heights of the chrome bars in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarHeights {
    pub primary: u32,
    pub secondary: u32,
    pub tertiary: u32,
    pub footer: u32,
}

impl Default for BarHeights {
    fn default() -> Self {
        Self {
            primary: 32,
            secondary: 30,
            tertiary: 26,
            footer: 24,
        }
    }
}

/// Shared layout metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tokens {
    /// Inset between the page edge and its grid canvas.
    pub page_margins: Sides,
    /// Default body padding of `card` chromes. `table` chromes use zero.
    pub card_padding: Sides,
    pub grid_gap_px: u32,
    pub grid_cols: u16,
    pub bar_heights: BarHeights,
    /// Default table row height.
    pub row_height_px: u32,
    /// Default scroll guard tolerance.
    pub overflow_threshold_px: f32,
}

impl Default for Tokens {
    fn default() -> Self {
        Self {
            page_margins: Sides::new(0, 16, 16, 16),
            card_padding: Sides::all(12),
            grid_gap_px: 12,
            grid_cols: 36,
            bar_heights: BarHeights::default(),
            row_height_px: 24,
            overflow_threshold_px: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_grammar() {
        let tokens = Tokens::default();
        assert_eq!(tokens.grid_cols, 36);
        assert!(!tokens.card_padding.is_zero());
        assert_eq!(tokens.page_margins.left, 16);
        assert_eq!(tokens.page_margins.top, 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn tokens_serde_round_trip() {
        let tokens = Tokens::default();
        let json = serde_json::to_string(&tokens).unwrap();
        let back: Tokens = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tokens);
    }
}
