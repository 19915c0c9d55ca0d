//! Input model: normalized events and the per-channel adapters.
//!
//! Each adapter owns one input channel and its "channel is panning" flag. It
//! turns raw events into offset deltas applied through the session and tells
//! the orchestrator what should happen next via an [`Outcome`]. Adapters
//! never reposition on their own; they request it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

pub mod gamepad;
pub mod keyboard;
pub mod mouse;
pub mod touch;
pub mod wheel;

use serde::{Deserialize, Serialize};

pub use gamepad::GamepadAdapter;
pub use keyboard::KeyboardAdapter;
pub use mouse::MouseAdapter;
pub use touch::TouchAdapter;
pub use wheel::WheelAdapter;

/// A point in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser's `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self(key.to_owned())
    }

    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    #[serde(default)]
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    #[serde(default)]
    pub dy: f64,
}

/// One normalized input event, as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    MouseDown { button: Button, at: Point },
    MouseMove { at: Point },
    MouseUp,
    MouseLeave,
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd,
    KeyDown { key: Key },
    KeyUp { key: Key },
    Wheel {
        delta: WheelDelta,
        #[serde(default)]
        modifiers: Modifiers,
    },
    GamepadAxis { index: usize, value: f64 },
    GamepadButton { name: String, pressed: bool },
}

impl InputEvent {
    #[must_use]
    pub fn channel(&self) -> Channel {
        match self {
            Self::MouseDown { .. } | Self::MouseMove { .. } | Self::MouseUp | Self::MouseLeave => Channel::Mouse,
            Self::TouchStart { .. } | Self::TouchMove { .. } | Self::TouchEnd => Channel::Touch,
            Self::KeyDown { .. } | Self::KeyUp { .. } => Channel::Keyboard,
            Self::Wheel { .. } => Channel::Wheel,
            Self::GamepadAxis { .. } | Self::GamepadButton { .. } => Channel::Gamepad,
        }
    }
}

/// Input channel served by one adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Mouse,
    Touch,
    Keyboard,
    Gamepad,
    Wheel,
}

/// What the orchestrator should do after an adapter handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Followup {
    #[default]
    None,
    /// Reposition now.
    Reposition,
    /// Reposition on a zero-delay timer, after the current event finishes.
    DeferReposition,
    /// Center both axes, ignoring policy and boundary.
    Center,
}

impl Followup {
    #[must_use]
    pub fn repositions(self) -> bool {
        matches!(self, Self::Reposition | Self::DeferReposition)
    }
}

/// Result of handing one event to an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// The host should call `preventDefault()` on the DOM event.
    pub prevent_default: bool,
    pub followup: Followup,
}

impl Outcome {
    /// The adapter did not act on the event.
    pub const IGNORED: Self = Self { prevent_default: false, followup: Followup::None };

    #[must_use]
    pub fn prevent() -> Self {
        Self { prevent_default: true, followup: Followup::None }
    }

    #[must_use]
    pub fn then(followup: Followup) -> Self {
        Self { prevent_default: false, followup }
    }
}

/// Lifecycle shared by every input adapter.
pub trait Adapter {
    fn channel(&self) -> Channel;

    /// Whether this channel currently drives the content.
    fn is_panning(&self) -> bool;

    fn is_attached(&self) -> bool;

    /// Start accepting events.
    fn attach(&mut self);

    /// Stop accepting events and drop any in-progress gesture.
    fn detach(&mut self);
}
