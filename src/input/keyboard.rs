//! Pan key tracking. Holding space never moves the content by itself; it
//! arms the mouse adapter and switches the cursor to `grab`.

#[cfg(test)]
#[path = "keyboard_test.rs"]
mod keyboard_test;

use crate::consts::PAN_KEY;
use crate::input::{Adapter, Channel, Key, Outcome};

#[derive(Debug, Default)]
pub struct KeyboardAdapter {
    attached: bool,
    held: bool,
}

impl KeyboardAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &Key, disabled: bool) -> Outcome {
        if self.attached && !disabled && key.is(PAN_KEY) {
            self.held = true;
        }
        Outcome::IGNORED
    }

    pub fn key_up(&mut self, key: &Key) -> Outcome {
        if key.is(PAN_KEY) {
            self.held = false;
        }
        Outcome::IGNORED
    }
}

impl Adapter for KeyboardAdapter {
    fn channel(&self) -> Channel {
        Channel::Keyboard
    }

    fn is_panning(&self) -> bool {
        self.held
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.held = false;
    }
}
