//! Boundary and centering policy normalization.

#[cfg(test)]
#[path = "boundary_test.rs"]
mod boundary_test;

use serde::{Deserialize, Serialize};

/// Boundary as configured: one number for every edge, or per-edge values
/// where `x` stands in for unset `left`/`right` and `y` for unset
/// `top`/`bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Boundary {
    Uniform(f64),
    Edges(BoundaryEdges),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryEdges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Concrete edge limits. An axis is only enforced when both of its edges
/// are present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
}

impl Bounds {
    /// `(left, right)` when the horizontal pair is fully defined.
    #[must_use]
    pub fn horizontal(&self) -> Option<(f64, f64)> {
        self.left.zip(self.right)
    }

    /// `(top, bottom)` when the vertical pair is fully defined.
    #[must_use]
    pub fn vertical(&self) -> Option<(f64, f64)> {
        self.top.zip(self.bottom)
    }
}

impl Boundary {
    #[must_use]
    pub fn resolve(&self) -> Bounds {
        match *self {
            Self::Uniform(edge) => Bounds { top: Some(edge), left: Some(edge), right: Some(edge), bottom: Some(edge) },
            Self::Edges(edges) => Bounds {
                top: edges.top.or(edges.y),
                left: edges.left.or(edges.x),
                right: edges.right.or(edges.x),
                bottom: edges.bottom.or(edges.y),
            },
        }
    }
}

/// Normalize an optional boundary. Absent means every edge is unset.
#[must_use]
pub fn resolve_boundary(boundary: Option<&Boundary>) -> Bounds {
    boundary.map(Boundary::resolve).unwrap_or_default()
}

/// Centering policy: `true`/`false` for both axes, or per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Center {
    Both(bool),
    Axes {
        #[serde(default)]
        x: bool,
        #[serde(default)]
        y: bool,
    },
}

impl Default for Center {
    fn default() -> Self {
        Self::Both(false)
    }
}

impl Center {
    #[must_use]
    pub fn axes(&self) -> CenterAxes {
        match *self {
            Self::Both(on) => CenterAxes { x: on, y: on },
            Self::Axes { x, y } => CenterAxes { x, y },
        }
    }
}

/// Normalized centering request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CenterAxes {
    pub x: bool,
    pub y: bool,
}

impl CenterAxes {
    pub const BOTH: Self = Self { x: true, y: true };
    pub const NONE: Self = Self { x: false, y: false };

    #[must_use]
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}
