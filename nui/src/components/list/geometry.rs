//! Viewport geometry: which slice of the view is materialized.
//!
//! Two mappings from scroll position to rows:
//!
//! - [`ScrollMode::Normal`]: the scroll surface is as tall as all rows and
//!   the pixel offset maps directly to a row.
//! - [`ScrollMode::Fixed`]: for very long views the surface height is capped
//!   (hosts refuse elements taller than a few million pixels), so the scroll
//!   position is read as a fraction of the scrollable range and scaled to the
//!   row count.

use std::ops::Range;

/// Item height assumed until the first measurement.
pub const DEFAULT_ITEM_HEIGHT: f64 = 30.0;

/// Rows rendered above the first visible row in normal mode.
pub const NORMAL_PREROLL: usize = 5;

/// Extra rows rendered in normal mode beyond the strict viewport.
pub const NORMAL_OVERSCAN: usize = 10;

/// Extra rows rendered in fixed mode beyond the strict viewport.
pub const FIXED_OVERSCAN: usize = 1;

/// Cap on the scroll surface height in fixed mode.
pub const FIXED_SCROLL_HEIGHT: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    #[default]
    Normal,
    Fixed,
}

impl ScrollMode {
    /// Fixed mode for long views, except on touch hosts.
    pub fn select(len: usize, touch: bool, threshold: usize) -> Self {
        if len >= threshold && !touch {
            ScrollMode::Fixed
        } else {
            ScrollMode::Normal
        }
    }
}

/// Scroll and sizing state of one list.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub item_height: f64,
    pub viewport_height: f64,
    pub mode: ScrollMode,
    /// First rendered position of the last computed window.
    pub offset: usize,
    /// Window size of the last computed window.
    pub max_visible: usize,
    pub scroll_pixels: f64,
    pub scroll_fraction: f64,
    last_rendered_pixels: Option<f64>,
    last_rendered_fraction: Option<f64>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_HEIGHT, 0.0)
    }
}

impl Geometry {
    pub fn new(item_height: f64, viewport_height: f64) -> Self {
        Self {
            item_height,
            viewport_height,
            mode: ScrollMode::Normal,
            offset: 0,
            max_visible: 0,
            scroll_pixels: 0.0,
            scroll_fraction: 0.0,
            last_rendered_pixels: None,
            last_rendered_fraction: None,
        }
    }

    /// Both heights are known and positive.
    pub fn is_ready(&self) -> bool {
        self.viewport_height > 0.0 && self.item_height > 0.0
    }

    /// Switch mode. Returns true if the mode changed.
    ///
    /// Entering a mode forgets that mode's last rendered metric so the next
    /// pass renders even if the metric happens to match a stale value.
    pub fn set_mode(&mut self, mode: ScrollMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        match mode {
            ScrollMode::Normal => self.last_rendered_pixels = None,
            ScrollMode::Fixed => self.last_rendered_fraction = None,
        }
        true
    }

    /// Height of the scroll surface for `len` rows.
    pub fn content_height(&self, len: usize) -> f64 {
        let full = len as f64 * self.item_height;
        match self.mode {
            ScrollMode::Normal => full,
            ScrollMode::Fixed => full.min(FIXED_SCROLL_HEIGHT),
        }
    }

    /// Maximum scroll offset in pixels.
    pub fn scroll_range(&self, len: usize) -> f64 {
        (self.content_height(len) - self.viewport_height).max(0.0)
    }

    /// Move to an absolute pixel offset, clamped to the scroll range.
    pub fn set_scroll_pixels(&mut self, pixels: f64, len: usize) {
        let range = self.scroll_range(len);
        self.scroll_pixels = if pixels.is_finite() {
            pixels.clamp(0.0, range)
        } else {
            0.0
        };
        self.update_fraction(len);
    }

    /// Re-clamp after the row count or heights changed.
    pub fn clamp_scroll(&mut self, len: usize) {
        self.set_scroll_pixels(self.scroll_pixels, len);
    }

    pub fn update_fraction(&mut self, len: usize) {
        let range = self.scroll_range(len);
        self.scroll_fraction = if range > 0.0 {
            (self.scroll_pixels / range).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn scroll_to_top(&mut self, len: usize) {
        self.set_scroll_pixels(0.0, len);
    }

    pub fn scroll_to_bottom(&mut self, len: usize) {
        self.set_scroll_pixels(self.scroll_range(len), len);
    }

    /// Apply wheel input of `delta` pixels.
    ///
    /// In fixed mode the delta is converted to rows and then to the capped
    /// surface, so one wheel notch moves the same number of rows in both
    /// modes.
    pub fn wheel(&mut self, delta: f64, len: usize) {
        let pixels = match self.mode {
            ScrollMode::Normal => self.scroll_pixels + delta,
            ScrollMode::Fixed => {
                if len == 0 || self.item_height <= 0.0 {
                    return;
                }
                let rows = delta / self.item_height;
                self.scroll_pixels + rows / len as f64 * self.scroll_range(len)
            }
        };
        self.set_scroll_pixels(pixels, len);
    }

    /// Scroll offset that brings `position` to the top of the viewport.
    pub fn pixels_for_position(&self, position: usize, len: usize) -> f64 {
        match self.mode {
            ScrollMode::Normal => position as f64 * self.item_height,
            ScrollMode::Fixed => {
                if len == 0 {
                    return 0.0;
                }
                position as f64 / len as f64 * self.scroll_range(len)
            }
        }
    }

    /// The driving metric moved since the last rendered pass.
    pub fn needs_render(&self) -> bool {
        match self.mode {
            ScrollMode::Normal => self.last_rendered_pixels != Some(self.scroll_pixels),
            ScrollMode::Fixed => self.last_rendered_fraction != Some(self.scroll_fraction),
        }
    }

    pub fn mark_rendered(&mut self) {
        match self.mode {
            ScrollMode::Normal => self.last_rendered_pixels = Some(self.scroll_pixels),
            ScrollMode::Fixed => self.last_rendered_fraction = Some(self.scroll_fraction),
        }
    }

    /// Forget both rendered metrics.
    pub fn invalidate(&mut self) {
        self.last_rendered_pixels = None;
        self.last_rendered_fraction = None;
    }

    /// Compute the positions to materialize for a view of `len` rows.
    ///
    /// Returns `None` while the viewport has no size yet.
    pub fn window(&mut self, len: usize) -> Option<Range<usize>> {
        if !self.is_ready() {
            return None;
        }
        let rows_in_view = self.viewport_height / self.item_height;
        let (offset, max_visible) = match self.mode {
            ScrollMode::Normal => {
                let first = (self.scroll_pixels / self.item_height).floor() as usize;
                let mut offset = first.saturating_sub(NORMAL_PREROLL);
                if offset > 0 {
                    offset -= 1;
                }
                (
                    offset,
                    (rows_in_view.ceil() as usize).saturating_add(NORMAL_OVERSCAN),
                )
            }
            ScrollMode::Fixed => {
                let strict = rows_in_view.floor() as usize;
                let offset = (self.scroll_fraction * len as f64).round() as usize;
                (
                    offset.min(len.saturating_sub(strict)),
                    (rows_in_view.ceil() as usize).saturating_add(FIXED_OVERSCAN),
                )
            }
        };
        self.offset = offset.min(len);
        self.max_visible = max_visible.min(len);
        let end = self.offset.saturating_add(self.max_visible).min(len);
        Some(self.offset..end)
    }

    /// Top offset of the row at `position` inside its container.
    pub fn top_for(&self, position: usize, start: usize) -> f64 {
        match self.mode {
            ScrollMode::Normal => position as f64 * self.item_height,
            ScrollMode::Fixed => position.saturating_sub(start) as f64 * self.item_height,
        }
    }
}
