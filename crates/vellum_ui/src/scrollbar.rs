//! Scrollbar math shared by every scrollable widget.
//!
//! Everything here is pure: no node state, no rendering. Widgets feed their
//! scroll offset, content extent and viewport extent in and get thumb
//! geometry back.

use crate::geometry::{clamp, clamp01, Rect};

/// Default minimum thumb length in pixels.
pub const DEFAULT_MIN_THUMB: f32 = 20.0;

/// Geometry of a scrollbar track along its scrolling axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrack {
    /// Track start (top edge for a vertical bar).
    pub start: f32,
    /// Track length.
    pub length: f32,
    /// Minimum thumb length.
    pub min_thumb: f32,
}

impl ScrollTrack {
    /// Creates a track with the default minimum thumb.
    #[must_use]
    pub const fn new(start: f32, length: f32) -> Self {
        Self {
            start,
            length,
            min_thumb: DEFAULT_MIN_THUMB,
        }
    }

    /// Sets the minimum thumb length.
    #[must_use]
    pub const fn with_min_thumb(mut self, min_thumb: f32) -> Self {
        self.min_thumb = min_thumb;
        self
    }
}

/// Computed scrollbar state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Largest valid scroll offset, `max(0, content - view)`.
    pub max_scroll: f32,
    /// True when the content overflows the viewport.
    pub enabled: bool,
    /// Thumb start along the track axis (absolute, includes `track.start`).
    pub thumb_start: f32,
    /// Thumb length.
    pub thumb_size: f32,
    /// Distance the thumb can move, `track.length - thumb_size`.
    pub travel: f32,
}

impl ScrollMetrics {
    /// Returns the thumb center along the track axis.
    #[must_use]
    pub fn thumb_center(&self) -> f32 {
        self.thumb_start + self.thumb_size * 0.5
    }
}

/// Returns `max(0, content - view)`.
#[inline]
#[must_use]
pub fn max_scroll(content: f32, view: f32) -> f32 {
    (content - view).max(0.0)
}

/// Clamps a scroll offset into `[0, max_scroll]`.
#[inline]
#[must_use]
pub fn clamp_scroll(scroll: f32, content: f32, view: f32) -> f32 {
    clamp(scroll, 0.0, max_scroll(content, view))
}

/// Computes thumb geometry from a scroll offset.
#[must_use]
pub fn scroll_metrics(scroll: f32, content: f32, view: f32, track: ScrollTrack) -> ScrollMetrics {
    let max = max_scroll(content, view);
    let enabled = max > 0.0;

    if !enabled {
        return ScrollMetrics {
            max_scroll: 0.0,
            enabled,
            thumb_start: track.start,
            thumb_size: track.length,
            travel: 0.0,
        };
    }

    let proportional = (view / content * track.length).round();
    let thumb_size = proportional.max(track.min_thumb).min(track.length);
    let travel = (track.length - thumb_size).max(0.0);
    let offset = (clamp(scroll, 0.0, max) / max * travel).round();

    ScrollMetrics {
        max_scroll: max,
        enabled,
        thumb_start: track.start + offset,
        thumb_size,
        travel,
    }
}

/// Maps a pointer position on the track back to a scroll offset.
///
/// The thumb is centered on the pointer: the ratio is taken along the
/// thumb's travel, clamped to `[0, 1]`, then scaled by the max offset and
/// rounded. Returns 0 when the content fits the view.
#[must_use]
pub fn scroll_from_pointer_y(pointer_y: f32, content: f32, view: f32, track: ScrollTrack) -> f32 {
    let metrics = scroll_metrics(0.0, content, view, track);
    if !metrics.enabled {
        return 0.0;
    }
    if metrics.travel <= 0.0 {
        // Thumb fills the whole track; only the ends are meaningful.
        let ratio = clamp01((pointer_y - track.start) / track.length.max(1.0));
        return (ratio * metrics.max_scroll).round();
    }

    let ratio = clamp01((pointer_y - track.start - metrics.thumb_size * 0.5) / metrics.travel);
    (ratio * metrics.max_scroll).round()
}

/// Returns true if `(x, y)` lies inside the scrollbar track rectangle.
#[must_use]
pub fn is_point_in_track(x: f32, y: f32, track: Rect) -> bool {
    track.contains(x, y)
}
