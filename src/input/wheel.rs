//! Wheel panning: scrolls the content vertically inside its boundary.
//!
//! The wheel never changes scale. Scrolling is suspended while Control is
//! held, tracked both from the event's modifier flags and from the key
//! events themselves. Each boundary edge is honored on its own here, unlike
//! the paired clamp used by the reposition engine.

#[cfg(test)]
#[path = "wheel_test.rs"]
mod wheel_test;

use crate::boundary::Bounds;
use crate::consts::{WHEEL_PAN_FACTOR, WHEEL_SUSPEND_KEY};
use crate::element::Element;
use crate::error::ViewportError;
use crate::input::{Adapter, Channel, Key, Modifiers, Outcome, WheelDelta};
use crate::position::PositionUpdate;
use crate::session::Session;

#[derive(Debug, Default)]
pub struct WheelAdapter {
    attached: bool,
    suspend_held: bool,
}

impl WheelAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &Key) {
        if key.is(WHEEL_SUSPEND_KEY) {
            self.suspend_held = true;
        }
    }

    pub fn key_up(&mut self, key: &Key) {
        if key.is(WHEEL_SUSPEND_KEY) {
            self.suspend_held = false;
        }
    }

    /// `wheel` on the container.
    ///
    /// # Errors
    ///
    /// Propagates session failures (torn down, detached).
    pub fn scroll<E: Element>(
        &mut self,
        delta: WheelDelta,
        modifiers: Modifiers,
        session: &mut Session<E>,
        bounds: &Bounds,
        disabled: bool,
    ) -> Result<Outcome, ViewportError> {
        if !self.attached || disabled || self.suspend_held || modifiers.ctrl {
            return Ok(Outcome::IGNORED);
        }
        let dy = delta.dy * WHEEL_PAN_FACTOR;
        let container = session.container_position();
        session.apply_with(|prev| {
            let top = prev.top - dy;
            let min_top = bounds.bottom.map_or(top, |bottom| container.height - prev.height - bottom);
            let max_top = bounds.top.unwrap_or(top);
            PositionUpdate::top(top.max(min_top).min(max_top))
        })?;
        Ok(Outcome::IGNORED)
    }
}

impl Adapter for WheelAdapter {
    fn channel(&self) -> Channel {
        Channel::Wheel
    }

    fn is_panning(&self) -> bool {
        false
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.suspend_held = false;
    }
}
