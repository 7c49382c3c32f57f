#![forbid(unsafe_code)]

//! Layout primitives and solvers.
//!
//! - [`Flex`] splits one axis of a rectangle into tracks.
//! - [`GridCanvas`](grid::GridCanvas) places items on a fixed-column grid and
//!   rejects out-of-bounds or overlapping placements.
//! - [`ScrollRegion`](scroll::ScrollRegion) decides whether measured overflow
//!   is real or rounding noise.
//! - [`GridOverlay`](overlay::GridOverlay) computes debug grid lines.

pub mod grid;
pub mod overlay;
pub mod scroll;

pub use grid::{
    DEFAULT_GRID_COLS, DEFAULT_GRID_GAP_PX, GridCanvas, GridConfig, GridPlacement, LayoutError,
    Placed, PlacementHandle,
};
pub use overlay::{GridLines, GridOverlay, GridOverlayConfig};
pub use panelkit_core::geometry::{Rect, Sides, Size};
pub use scroll::{
    DEFAULT_OVERFLOW_THRESHOLD_PX, ScrollDecision, ScrollMode, ScrollOverflowGuard, ScrollRegion,
};

/// A constraint on the size of one track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// An exact size in pixels.
    Fixed(u32),
    /// At least this many pixels, then grows.
    Min(u32),
    /// A weighted share of the remaining space (numerator, denominator).
    Ratio(u32, u32),
}

/// The direction to lay tracks out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

/// Weight of a growable track in fixed-point units.
const WEIGHT_SCALE: u64 = 1_000_000;

/// A single-axis track solver.
#[derive(Debug, Clone, Default)]
pub struct Flex {
    direction: Direction,
    constraints: Vec<Constraint>,
    gap: u32,
}

impl Flex {
    /// Create a new vertical flex layout.
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    /// Create a new horizontal flex layout.
    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    /// Set the constraints.
    #[must_use]
    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Set the gap between tracks.
    #[must_use]
    pub fn gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Split the given area into one rectangle per constraint.
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        let count = self.constraints.len();
        if count == 0 {
            return Vec::new();
        }
        if area.is_empty() {
            return vec![Rect::new(area.x, area.y, 0, 0); count];
        }

        let total = match self.direction {
            Direction::Horizontal => area.width,
            Direction::Vertical => area.height,
        };
        let total_gap = self.gap.saturating_mul((count - 1) as u32);
        let sizes = self.solve(total.saturating_sub(total_gap));

        let mut rects = Vec::with_capacity(count);
        let mut pos = match self.direction {
            Direction::Horizontal => area.x,
            Direction::Vertical => area.y,
        };
        for size in sizes {
            rects.push(match self.direction {
                Direction::Horizontal => Rect::new(pos, area.y, size, area.height),
                Direction::Vertical => Rect::new(area.x, pos, area.width, size),
            });
            pos = pos.saturating_add(size).saturating_add(self.gap);
        }
        rects
    }

    /// Solve track sizes for `available` pixels (gaps already removed).
    ///
    /// Fixed and minimum sizes are allocated first. What remains goes to
    /// `Min` and `Ratio` tracks by weight using largest
    /// remainders, so equal weights produce sizes that differ by at most one
    /// pixel and always sum to the distributed space.
    pub fn solve(&self, available: u32) -> Vec<u32> {
        let mut sizes = vec![0u32; self.constraints.len()];
        let mut remaining = available;
        let mut grow = Vec::new();

        for (i, &constraint) in self.constraints.iter().enumerate() {
            match constraint {
                Constraint::Fixed(size) => {
                    sizes[i] = size.min(remaining);
                    remaining -= sizes[i];
                }
                Constraint::Min(min_size) => {
                    sizes[i] = min_size.min(remaining);
                    remaining -= sizes[i];
                    grow.push(i);
                }
                Constraint::Ratio(_, _) => grow.push(i),
            }
        }

        if remaining > 0 && !grow.is_empty() {
            let weights: Vec<u64> = grow
                .iter()
                .map(|&i| match self.constraints[i] {
                    Constraint::Ratio(n, d) => n as u64 * WEIGHT_SCALE / d.max(1) as u64,
                    _ => WEIGHT_SCALE,
                })
                .collect();
            let total_weight = u128::from(weights.iter().sum::<u64>().max(1));
            let space = u128::from(remaining);

            let mut shares = Vec::with_capacity(grow.len());
            let mut allocated = 0u128;
            for (slot, &w) in weights.iter().enumerate() {
                let exact = space * u128::from(w);
                let share = exact / total_weight;
                allocated += share;
                shares.push((slot, share, exact % total_weight));
            }

            // Hand leftover pixels to the largest fractional remainders, earliest first.
            let mut order: Vec<usize> = (0..shares.len()).collect();
            order.sort_by(|&a, &b| shares[b].2.cmp(&shares[a].2).then(a.cmp(&b)));
            let mut leftover = space - allocated;
            for slot in order {
                if leftover == 0 {
                    break;
                }
                if weights[slot] == 0 {
                    continue;
                }
                shares[slot].1 += 1;
                leftover -= 1;
            }

            for (slot, share, _) in shares {
                let i = grow[slot];
                sizes[i] = sizes[i].saturating_add(share as u32);
            }
        }

        sizes
    }
}
