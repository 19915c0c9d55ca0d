//! Viewport configuration.
//!
//! Hosts usually build this in Rust, but it also round-trips through JSON so
//! a JavaScript caller can hand it across the wasm boundary. Every field has
//! a default, so `{}` is a valid config.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::boundary::{Boundary, Bounds, Center, CenterAxes, resolve_boundary};
use crate::consts::{DEFAULT_GAMEPAD_AXIS, DEFAULT_GAMEPAD_CENTER_BUTTON, DEFAULT_TRANSITION};
use crate::error::ViewportError;

/// Which gamepad inputs drive the viewport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadBindings {
    /// Axis index that pans the content.
    pub axis: usize,
    /// Button name (from the hub's button map) that re-centers.
    pub center_button: String,
}

impl Default for GamepadBindings {
    fn default() -> Self {
        Self { axis: DEFAULT_GAMEPAD_AXIS, center_button: DEFAULT_GAMEPAD_CENTER_BUTTON.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Ignore new gestures. A drag already in progress runs to completion.
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
    pub center: Center,
    /// Enable wheel panning.
    pub wheel: bool,
    pub gamepad: GamepadBindings,
    /// CSS transition restored on the content when panning ends.
    pub transition: String,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            boundary: None,
            center: Center::default(),
            wheel: true,
            gamepad: GamepadBindings::default(),
            transition: DEFAULT_TRANSITION.to_owned(),
        }
    }
}

impl ViewportConfig {
    /// Parse a config from JSON; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidConfig`] for malformed JSON or values
    /// of the wrong shape.
    pub fn from_json(raw: &str) -> Result<Self, ViewportError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        resolve_boundary(self.boundary.as_ref())
    }

    #[must_use]
    pub fn center_axes(&self) -> CenterAxes {
        self.center.axes()
    }
}
