//! Gamepad polling hub shared by viewport controllers.
//!
//! The browser only exposes gamepads through polling, so this crate owns the
//! poll-and-diff loop and turns each tick into named button and axis events.
//! Consumers register listeners by button name or axis index and receive a
//! [`Subscription`] that removes the listener when dropped.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`map`] | Button/axis name tables and the standard layout |
//! | [`hub`] | Listener registry, change tracking and event dispatch |
//! | `web` | `navigator.getGamepads()` poller (feature `web`) |

pub mod hub;
pub mod map;
#[cfg(feature = "web")]
pub mod web;

pub use hub::{AxisEvent, ButtonEvent, GamepadHub, GamepadState, Propagation, Subscription};
pub use map::ButtonMap;

/// Error returned when configuring the hub.
#[derive(Debug, thiserror::Error)]
pub enum GamepadError {
    /// A button map payload could not be parsed.
    #[error("invalid button map: {0}")]
    InvalidMap(#[from] serde_json::Error),
    /// Two names in the same table point at one index.
    #[error("duplicate {kind} index {index} for `{first}` and `{second}`")]
    DuplicateIndex {
        kind: &'static str,
        index: usize,
        first: String,
        second: String,
    },
    /// The browser refused a gamepad API call.
    #[error("browser gamepad api failed: {0}")]
    Browser(String),
}
