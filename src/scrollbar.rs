//! Vertical scrollbar metrics for the sheet overlay.
//!
//! The scrollbar is decoration only: it reports whether the content reaches
//! past its vertical bounds and how tall the thumb should be. Dragging the
//! thumb is not supported.

#[cfg(test)]
#[path = "scrollbar_test.rs"]
mod scrollbar_test;

use serde::Serialize;

use crate::boundary::Bounds;
use crate::consts::SCROLLBAR_MIN_THUMB_PX;
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VerticalScrollbar {
    pub visible: bool,
    /// Thumb height in CSS pixels, never below [`SCROLLBAR_MIN_THUMB_PX`].
    pub thumb_height: f64,
}

/// Scrollbar state for `content` inside a container of `container_height`.
///
/// Unset vertical edges count as `0`. The track is the container height
/// minus both edges; the thumb covers the share of the track the content's
/// rendered extent (height plus top offset) leaves visible.
#[must_use]
pub fn vertical(container_height: f64, content: &Position, bounds: &Bounds) -> VerticalScrollbar {
    let top_edge = bounds.top.unwrap_or(0.0);
    let bottom_edge = bounds.bottom.unwrap_or(0.0);

    let visible = content.height > container_height
        || content.top < top_edge
        || content.top + content.height > container_height - bottom_edge;

    let track = container_height - top_edge - bottom_edge;
    let extent = content.height + content.top;
    let thumb = if extent > 0.0 { track / extent * track } else { track };

    VerticalScrollbar { visible, thumb_height: thumb.max(SCROLLBAR_MIN_THUMB_PX) }
}
