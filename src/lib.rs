//! Pan/center viewport controller for the label sheet editor.
//!
//! A viewport session pairs a container element with the content element it
//! frames. Input from mouse, touch, keyboard, gamepad and wheel is translated
//! into offset deltas against the session, and the reposition engine keeps
//! the content centered on free axes and clamped inside its boundary on
//! constrained ones. The host wires DOM events into a
//! [`draggable::Draggable`] and reacts to the [`draggable::Action`]s it
//! returns; the `web` feature provides that wiring for real browser elements.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`draggable`] | Orchestrator: lifecycle, adapter arbitration, panning status |
//! | [`session`] | Resolved element handles and the single mutation entry point |
//! | [`position`] | Typed placement record and derived position |
//! | [`boundary`] | Boundary and centering policy normalization |
//! | [`reposition`] | Centering and boundary clamping |
//! | [`input`] | Normalized input events and per-channel adapters |
//! | [`element`] | Layout/style seam implemented by DOM and headless elements |
//! | [`headless`] | In-memory element tree with top-left transform origin |
//! | [`scrollbar`] | Vertical scrollbar visibility and thumb size |
//! | [`config`] | Serde-backed viewport configuration |
//! | [`consts`] | Shared numeric constants (speeds, factors, transitions) |
//! | [`error`] | Error type for session resolution and configuration |
//! | `web` | DOM bindings (feature `web`) |

pub mod boundary;
pub mod config;
pub mod consts;
pub mod draggable;
pub mod element;
pub mod error;
pub mod headless;
pub mod input;
pub mod position;
pub mod reposition;
pub mod scrollbar;
pub mod session;
#[cfg(feature = "web")]
pub mod web;

pub use config::ViewportConfig;
pub use draggable::{Action, Draggable, ViewportStatus};
pub use error::ViewportError;
