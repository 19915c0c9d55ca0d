//! Layout/style seam between the viewport logic and a document.
//!
//! The viewport never creates or destroys elements. It reads two kinds of
//! geometry (the untransformed layout size and the rendered bounding box) and
//! writes inline style through a [`StyleProjection`]. Browser elements
//! implement [`Element`] in the `web` module; tests and the replay tool use
//! [`crate::headless`].

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

/// Untransformed CSS size of an element (`offsetWidth`/`offsetHeight`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Rendered box in viewport coordinates, transforms applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Inline style fields to write. `None` leaves the property untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleProjection {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub scale: Option<f64>,
    pub transition: Option<String>,
}

impl StyleProjection {
    #[must_use]
    pub fn transition(value: &str) -> Self {
        Self { transition: Some(value.to_owned()), ..Self::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.scale.is_none() && self.transition.is_none()
    }

    /// CSS property/value pairs in write order.
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(4);
        if let Some(top) = self.top {
            out.push(("top", format!("{top}px")));
        }
        if let Some(left) = self.left {
            out.push(("left", format!("{left}px")));
        }
        if let Some(scale) = self.scale {
            out.push(("transform", format!("scale({scale})")));
        }
        if let Some(transition) = &self.transition {
            out.push(("transition", transition.clone()));
        }
        out
    }
}

/// A handle to a laid-out element.
///
/// Handles are cheap to clone and compare by identity.
pub trait Element: Clone {
    /// Layout size before any transform.
    fn layout_size(&self) -> Size;

    /// Rendered box in viewport coordinates.
    fn bounding_box(&self) -> Rect;

    /// Whether `other` is this element or one of its descendants.
    fn contains(&self, other: &Self) -> bool;

    /// Whether the element is still part of the document.
    fn is_connected(&self) -> bool;

    /// Write the present fields of `style` as inline style.
    fn project(&self, style: &StyleProjection);
}

/// Looks elements up by their stable identifier.
pub trait ElementRegistry {
    type Element: Element;

    fn element(&self, id: &str) -> Option<Self::Element>;
}
