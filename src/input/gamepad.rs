//! Gamepad stick panning and re-center button.
//!
//! Each tick the bound axis value is scaled by [`GAMEPAD_AXIS_SPEED`],
//! rounded, and applied to both offsets. The channel counts as panning while
//! that delta is non-zero; the tick where it returns to zero requests a
//! single reposition, as does the first tick after the viewport is disabled
//! mid-movement. Pressing the center button re-centers on its rising edge.

#[cfg(test)]
#[path = "gamepad_test.rs"]
mod gamepad_test;

use crate::config::GamepadBindings;
use crate::consts::GAMEPAD_AXIS_SPEED;
use crate::element::Element;
use crate::error::ViewportError;
use crate::input::{Adapter, Channel, Followup, Outcome};
use crate::session::Session;

#[derive(Debug, Default)]
pub struct GamepadAdapter {
    bindings: GamepadBindings,
    attached: bool,
    moving: bool,
    center_held: bool,
}

impl GamepadAdapter {
    #[must_use]
    pub fn new(bindings: GamepadBindings) -> Self {
        Self { bindings, ..Self::default() }
    }

    #[must_use]
    pub fn bindings(&self) -> &GamepadBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: GamepadBindings) {
        self.bindings = bindings;
    }

    /// Per-tick pixel delta for an axis reading.
    #[must_use]
    pub fn delta(value: f64) -> f64 {
        (value * GAMEPAD_AXIS_SPEED).round()
    }

    /// One tick of axis input.
    ///
    /// # Errors
    ///
    /// Propagates session failures (torn down, detached).
    pub fn axis<E: Element>(
        &mut self,
        index: usize,
        value: f64,
        session: &mut Session<E>,
        disabled: bool,
    ) -> Result<Outcome, ViewportError> {
        if !self.attached || index != self.bindings.axis {
            return Ok(Outcome::IGNORED);
        }
        let delta = Self::delta(value);
        // Disabling mid-deflection settles like a return to zero.
        if disabled || delta.abs() < f64::EPSILON {
            if self.moving {
                self.moving = false;
                return Ok(Outcome::then(Followup::Reposition));
            }
            return Ok(Outcome::IGNORED);
        }
        session.apply_delta(delta, delta)?;
        self.moving = true;
        Ok(Outcome::IGNORED)
    }

    /// One tick of button input.
    pub fn button(&mut self, name: &str, pressed: bool, disabled: bool) -> Outcome {
        if name != self.bindings.center_button {
            return Outcome::IGNORED;
        }
        let rising = pressed && !self.center_held;
        self.center_held = pressed;
        if rising && self.attached && !disabled {
            Outcome::then(Followup::Center)
        } else {
            Outcome::IGNORED
        }
    }
}

impl Adapter for GamepadAdapter {
    fn channel(&self) -> Channel {
        Channel::Gamepad
    }

    fn is_panning(&self) -> bool {
        self.moving
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.moving = false;
        self.center_held = false;
    }
}
