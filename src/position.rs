//! Position model: the typed placement record and the position derived from
//! it plus live layout.
//!
//! The placement (`top`, `left`, `scale`) is the only stored state. Width,
//! height and viewport coordinates are recomputed from the element on every
//! read, so they can never drift from what the browser actually laid out.

#[cfg(test)]
#[path = "position_test.rs"]
mod position_test;

use serde::{Deserialize, Serialize};

use crate::element::{Element, StyleProjection};

/// Offset and scale owned by a session. Offsets are CSS pixels relative to
/// the container; scale is applied with a top-left transform origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
    pub scale: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self { top: 0.0, left: 0.0, scale: 1.0 }
    }
}

/// Snapshot of an element's placement and rendered geometry.
///
/// `width`/`height` are the layout size multiplied by `scale`; `x`/`y` are
/// the rendered origin in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
    pub scale: f64,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Position of an element whose placement is tracked by a session.
    #[must_use]
    pub fn measure<E: Element>(placement: &Placement, element: &E) -> Self {
        let size = element.layout_size();
        let rect = element.bounding_box();
        Self {
            top: placement.top,
            left: placement.left,
            scale: placement.scale,
            width: size.width * placement.scale,
            height: size.height * placement.scale,
            x: rect.x,
            y: rect.y,
        }
    }

    /// Position of an element the viewport never writes to (the container or
    /// a centering target): zero offsets, unit scale, rendered size.
    #[must_use]
    pub fn of_element<E: Element>(element: &E) -> Self {
        let rect = element.bounding_box();
        Self {
            top: 0.0,
            left: 0.0,
            scale: 1.0,
            width: rect.width,
            height: rect.height,
            x: rect.x,
            y: rect.y,
        }
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement { top: self.top, left: self.left, scale: self.scale }
    }
}

/// Partial write to a placement. Absent fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl PositionUpdate {
    #[must_use]
    pub fn top(top: f64) -> Self {
        Self { top: Some(top), ..Self::default() }
    }

    #[must_use]
    pub fn left(left: f64) -> Self {
        Self { left: Some(left), ..Self::default() }
    }

    #[must_use]
    pub fn offset(top: f64, left: f64) -> Self {
        Self { top: Some(top), left: Some(left), scale: None }
    }

    #[must_use]
    pub fn scale(scale: f64) -> Self {
        Self { scale: Some(scale), ..Self::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.scale.is_none()
    }

    pub fn apply_to(&self, placement: &mut Placement) {
        if let Some(top) = self.top {
            placement.top = top;
        }
        if let Some(left) = self.left {
            placement.left = left;
        }
        if let Some(scale) = self.scale {
            placement.scale = scale;
        }
    }

    /// Style writes for exactly the fields present.
    #[must_use]
    pub fn projection(&self) -> StyleProjection {
        StyleProjection { top: self.top, left: self.left, scale: self.scale, transition: None }
    }
}
