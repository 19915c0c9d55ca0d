//! Mouse drag panning.
//!
//! A drag starts on the middle button, or on any button while the pan key is
//! held. Moves apply the pointer delta unclamped; release asks for a deferred
//! reposition so the clamp runs after the browser finishes the mouseup.

#[cfg(test)]
#[path = "mouse_test.rs"]
mod mouse_test;

use crate::element::Element;
use crate::error::ViewportError;
use crate::input::{Adapter, Button, Channel, Followup, Outcome, Point};
use crate::session::Session;

#[derive(Debug, Default)]
pub struct MouseAdapter {
    attached: bool,
    panning: bool,
    last: Point,
}

impl MouseAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `mousedown` on the container.
    pub fn press(&mut self, button: Button, at: Point, pan_key_held: bool, disabled: bool) -> Outcome {
        if !self.attached || disabled {
            return Outcome::IGNORED;
        }
        if button != Button::Middle && !pan_key_held {
            return Outcome::IGNORED;
        }
        self.panning = true;
        self.last = at;
        Outcome::prevent()
    }

    /// `mousemove` on the container.
    ///
    /// # Errors
    ///
    /// Propagates session failures (torn down, detached).
    pub fn drag<E: Element>(&mut self, at: Point, session: &mut Session<E>) -> Result<Outcome, ViewportError> {
        if !self.panning {
            return Ok(Outcome::IGNORED);
        }
        let dx = at.x - self.last.x;
        let dy = at.y - self.last.y;
        self.last = at;
        session.apply_delta(dx, dy)?;
        Ok(Outcome::IGNORED)
    }

    /// `mouseup` or `mouseleave` on the container.
    pub fn release(&mut self) -> Outcome {
        if !self.panning {
            return Outcome::IGNORED;
        }
        self.panning = false;
        Outcome::then(Followup::DeferReposition)
    }
}

impl Adapter for MouseAdapter {
    fn channel(&self) -> Channel {
        Channel::Mouse
    }

    fn is_panning(&self) -> bool {
        self.panning
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.panning = false;
    }
}
