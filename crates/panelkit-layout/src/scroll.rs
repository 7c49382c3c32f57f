#![forbid(unsafe_code)]

//! Sub-pixel tolerant overflow detection for "locked surface" regions.
//!
//! Layout rounding and border mismatches routinely produce a scroll range of
//! one pixel on content that visually fits. [`ScrollOverflowGuard`] treats any
//! overflow at or below its threshold as "fits" and clamps the range to zero;
//! larger overflow is passed through unclamped so real scrolling is never
//! blocked.
//!
//! # Invariants
//!
//! 1. `overflow = max(0, content - viewport)`.
//! 2. `overflow <= threshold` ⇒ range is `0.0` and the offset is reset to `0.0`.
//! 3. `overflow > threshold` ⇒ range is exactly `overflow`.
//! 4. The decision depends only on the current inputs: re-evaluating with
//!    unchanged inputs is a no-op, and a region moves freely between the two
//!    modes in either direction.
//!
//! # Failure Modes
//!
//! None. Non-finite or negative extents are treated as zero.

use tracing::debug;

/// Default overflow tolerance in pixels.
pub const DEFAULT_OVERFLOW_THRESHOLD_PX: f32 = 1.0;

/// Whether a region may scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// Content fits (possibly within rounding noise); no scroll range.
    #[default]
    Locked,
    /// Content genuinely overflows.
    Scrollable,
}

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDecision {
    /// Raw measured overflow, never negative.
    pub overflow: f32,
    /// Scroll range the region should expose.
    pub range: f32,
    pub mode: ScrollMode,
}

impl ScrollDecision {
    #[inline]
    pub fn is_overflowing(&self) -> bool {
        self.mode == ScrollMode::Scrollable
    }
}

/// Decides whether measured overflow is real or rounding noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOverflowGuard {
    threshold_px: f32,
}

impl Default for ScrollOverflowGuard {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_OVERFLOW_THRESHOLD_PX,
        }
    }
}

impl ScrollOverflowGuard {
    /// Guard with a custom threshold. Negative or non-finite values fall back
    /// to zero tolerance.
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px: sanitize(threshold_px),
        }
    }

    #[inline]
    pub fn threshold_px(&self) -> f32 {
        self.threshold_px
    }

    /// Evaluate a viewport/content pair.
    pub fn evaluate(&self, viewport_extent: f32, content_extent: f32) -> ScrollDecision {
        let overflow = (sanitize(content_extent) - sanitize(viewport_extent)).max(0.0);
        if overflow <= self.threshold_px {
            ScrollDecision {
                overflow,
                range: 0.0,
                mode: ScrollMode::Locked,
            }
        } else {
            ScrollDecision {
                overflow,
                range: overflow,
                mode: ScrollMode::Scrollable,
            }
        }
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Scroll state for one region, re-evaluated on every input change.
///
/// Nothing is cached across resizes: each setter recomputes the decision
/// synchronously before returning.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRegion {
    guard: ScrollOverflowGuard,
    viewport_extent: f32,
    content_extent: f32,
    decision: ScrollDecision,
    offset: f32,
}

impl Default for ScrollRegion {
    fn default() -> Self {
        Self::new(ScrollOverflowGuard::default())
    }
}

impl ScrollRegion {
    pub fn new(guard: ScrollOverflowGuard) -> Self {
        Self {
            guard,
            viewport_extent: 0.0,
            content_extent: 0.0,
            decision: ScrollDecision::default(),
            offset: 0.0,
        }
    }

    #[inline]
    pub fn guard(&self) -> ScrollOverflowGuard {
        self.guard
    }

    #[inline]
    pub fn viewport_extent(&self) -> f32 {
        self.viewport_extent
    }

    #[inline]
    pub fn content_extent(&self) -> f32 {
        self.content_extent
    }

    /// Update the viewport extent (resize).
    pub fn set_viewport_extent(&mut self, extent: f32) -> ScrollDecision {
        self.viewport_extent = sanitize(extent);
        self.refresh()
    }

    /// Update the measured content extent (content mutation).
    pub fn set_content_extent(&mut self, extent: f32) -> ScrollDecision {
        self.content_extent = sanitize(extent);
        self.refresh()
    }

    /// Update both extents in one pass.
    pub fn set_extents(&mut self, viewport_extent: f32, content_extent: f32) -> ScrollDecision {
        self.viewport_extent = sanitize(viewport_extent);
        self.content_extent = sanitize(content_extent);
        self.refresh()
    }

    /// Re-run the guard against the current inputs.
    pub fn refresh(&mut self) -> ScrollDecision {
        let next = self.guard.evaluate(self.viewport_extent, self.content_extent);
        if next.mode != self.decision.mode {
            debug!(
                from = ?self.decision.mode,
                to = ?next.mode,
                overflow = next.overflow,
                threshold = self.guard.threshold_px,
                "scroll guard transition"
            );
        }
        self.decision = next;
        self.offset = self.offset.clamp(0.0, next.range);
        next
    }

    #[inline]
    pub fn decision(&self) -> ScrollDecision {
        self.decision
    }

    #[inline]
    pub fn is_overflowing(&self) -> bool {
        self.decision.is_overflowing()
    }

    #[inline]
    pub fn scroll_range(&self) -> f32 {
        self.decision.range
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Move by `delta` pixels within `[0, range]`. Returns the distance moved.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let before = self.offset;
        self.scroll_to(before + if delta.is_finite() { delta } else { 0.0 });
        self.offset - before
    }

    /// Jump to an absolute offset within `[0, range]`.
    pub fn scroll_to(&mut self, offset: f32) {
        let target = if offset.is_finite() { offset } else { 0.0 };
        self.offset = target.clamp(0.0, self.decision.range);
    }
}
