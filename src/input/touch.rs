//! Single-finger touch panning. Only the first touch point is tracked.
//!
//! Unlike the mouse, `touchend` repositions synchronously, and it does so
//! even when no drag was in progress.

#[cfg(test)]
#[path = "touch_test.rs"]
mod touch_test;

use crate::element::Element;
use crate::error::ViewportError;
use crate::input::{Adapter, Channel, Followup, Outcome, Point};
use crate::session::Session;

#[derive(Debug, Default)]
pub struct TouchAdapter {
    attached: bool,
    panning: bool,
    last: Point,
}

impl TouchAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `touchstart` on the container.
    pub fn start(&mut self, touches: &[Point], disabled: bool) -> Outcome {
        if !self.attached || disabled {
            return Outcome::IGNORED;
        }
        let Some(first) = touches.first() else {
            return Outcome::IGNORED;
        };
        self.panning = true;
        self.last = *first;
        Outcome::IGNORED
    }

    /// `touchmove` on the container. Suppresses native scrolling while a
    /// drag is active.
    ///
    /// # Errors
    ///
    /// Propagates session failures (torn down, detached).
    pub fn drag<E: Element>(&mut self, touches: &[Point], session: &mut Session<E>) -> Result<Outcome, ViewportError> {
        if !self.panning {
            return Ok(Outcome::IGNORED);
        }
        let Some(first) = touches.first() else {
            return Ok(Outcome::IGNORED);
        };
        let dx = first.x - self.last.x;
        let dy = first.y - self.last.y;
        self.last = *first;
        session.apply_delta(dx, dy)?;
        Ok(Outcome::prevent())
    }

    /// `touchend` on the container.
    pub fn end(&mut self) -> Outcome {
        if !self.attached {
            return Outcome::IGNORED;
        }
        self.panning = false;
        Outcome::then(Followup::Reposition)
    }
}

impl Adapter for TouchAdapter {
    fn channel(&self) -> Channel {
        Channel::Touch
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
