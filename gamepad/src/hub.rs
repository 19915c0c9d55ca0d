//! Listener registry and per-tick event dispatch.
//!
//! [`GamepadHub::poll`] is called once per animation frame with the current
//! controller snapshots. Every button and every axis produces an event on
//! every tick, carrying the value seen on the previous tick so listeners can
//! detect edges themselves. Listeners run in registration order; calling
//! [`Propagation::stop`] skips the remaining listeners for that event.

#[cfg(test)]
#[path = "hub_test.rs"]
mod hub_test;

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use crate::map::ButtonMap;

/// Snapshot of one controller at poll time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GamepadState {
    /// Browser-assigned controller slot.
    pub index: usize,
    /// Pressed flag per button index.
    pub buttons: Vec<bool>,
    /// Raw axis values in `[-1, 1]`.
    pub axes: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonEvent {
    pub gamepad: usize,
    pub index: usize,
    pub name: String,
    pub value: bool,
    /// `None` on the first tick after connect.
    pub previous_value: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisEvent {
    pub gamepad: usize,
    pub index: usize,
    pub name: String,
    pub value: f64,
    /// Previous tick's value rounded to three decimals.
    pub previous_value: Option<f64>,
}

/// Handed to each listener; stopping it halts dispatch of the current event.
#[derive(Debug, Default)]
pub struct Propagation {
    stopped: bool,
}

impl Propagation {
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

type ButtonCallback = Rc<RefCell<dyn FnMut(&ButtonEvent, &mut Propagation)>>;
type AxisCallback = Rc<RefCell<dyn FnMut(&AxisEvent, &mut Propagation)>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ListenerKey {
    Button(String),
    Axis(usize),
}

#[derive(Default)]
struct HubState {
    map: ButtonMap,
    disabled: bool,
    connected: BTreeSet<usize>,
    next_id: u64,
    buttons: BTreeMap<String, Vec<(u64, ButtonCallback)>>,
    axes: BTreeMap<usize, Vec<(u64, AxisCallback)>>,
    previous_buttons: BTreeMap<(usize, usize), bool>,
    previous_axes: BTreeMap<(usize, usize), f64>,
}

impl HubState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove(&mut self, key: &ListenerKey, id: u64) -> bool {
        match key {
            ListenerKey::Button(name) => remove_listener(&mut self.buttons, name, id),
            ListenerKey::Axis(index) => remove_listener(&mut self.axes, index, id),
        }
    }
}

fn remove_listener<K: Ord + Clone, C: ?Sized>(table: &mut BTreeMap<K, Vec<(u64, Rc<C>)>>, key: &K, id: u64) -> bool {
    let Some(list) = table.get_mut(key) else {
        return false;
    };
    let before = list.len();
    list.retain(|(listener_id, _)| *listener_id != id);
    let removed = list.len() != before;
    if list.is_empty() {
        table.remove(key);
    }
    removed
}

/// Round an axis reading to three decimals for change tracking.
#[must_use]
pub fn sanitize_axis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Shared gamepad hub. Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct GamepadHub {
    state: Rc<RefCell<HubState>>,
}

impl GamepadHub {
    #[must_use]
    pub fn new(map: ButtonMap) -> Self {
        let hub = Self::default();
        hub.state.borrow_mut().map = map;
        hub
    }

    #[must_use]
    pub fn button_map(&self) -> ButtonMap {
        self.state.borrow().map.clone()
    }

    /// Listen for events on the named button.
    pub fn add_button_listener<F>(&self, name: &str, callback: F) -> Subscription
    where
        F: FnMut(&ButtonEvent, &mut Propagation) + 'static,
    {
        let mut state = self.state.borrow_mut();
        if !state.map.button.contains_key(name) {
            tracing::warn!(button = name, "listener registered for a button missing from the map");
        }
        let id = state.allocate_id();
        let callback: ButtonCallback = Rc::new(RefCell::new(callback));
        state.buttons.entry(name.to_owned()).or_default().push((id, callback));
        Subscription::new(&self.state, ListenerKey::Button(name.to_owned()), id)
    }

    /// Listen for events on an axis index.
    pub fn add_axis_listener<F>(&self, index: usize, callback: F) -> Subscription
    where
        F: FnMut(&AxisEvent, &mut Propagation) + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        let callback: AxisCallback = Rc::new(RefCell::new(callback));
        state.axes.entry(index).or_default().push((id, callback));
        Subscription::new(&self.state, ListenerKey::Axis(index), id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        let state = self.state.borrow();
        state.buttons.values().map(Vec::len).sum::<usize>() + state.axes.values().map(Vec::len).sum::<usize>()
    }

    pub fn connect(&self, gamepad: usize) {
        let mut state = self.state.borrow_mut();
        if state.connected.insert(gamepad) {
            tracing::debug!(gamepad, "gamepad connected");
        }
    }

    /// Forget a controller and its tracked values.
    pub fn disconnect(&self, gamepad: usize) {
        let mut state = self.state.borrow_mut();
        if state.connected.remove(&gamepad) {
            tracing::debug!(gamepad, "gamepad disconnected");
        }
        state.previous_buttons.retain(|(pad, _), _| *pad != gamepad);
        state.previous_axes.retain(|(pad, _), _| *pad != gamepad);
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.state.borrow_mut().disabled = disabled;
    }

    /// Whether [`Self::poll`] will dispatch anything.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        let state = self.state.borrow();
        !state.disabled && !state.connected.is_empty()
    }

    /// Dispatch one tick of controller state. Returns the number of events
    /// generated, which is zero while disabled or disconnected.
    pub fn poll(&self, pads: &[GamepadState]) -> usize {
        if !self.is_polling() {
            return 0;
        }

        let mut generated = 0;
        for pad in pads {
            for (index, pressed) in pad.buttons.iter().enumerate() {
                let (event, listeners) = {
                    let mut state = self.state.borrow_mut();
                    let name = state.map.button_name(index);
                    let previous_value = state.previous_buttons.insert((pad.index, index), *pressed);
                    let listeners: Vec<ButtonCallback> = state
                        .buttons
                        .get(&name)
                        .map(|list| list.iter().map(|(_, cb)| Rc::clone(cb)).collect())
                        .unwrap_or_default();
                    let event = ButtonEvent { gamepad: pad.index, index, name, value: *pressed, previous_value };
                    (event, listeners)
                };
                generated += 1;
                let mut propagation = Propagation::default();
                for listener in listeners {
                    (*listener.borrow_mut())(&event, &mut propagation);
                    if propagation.is_stopped() {
                        break;
                    }
                }
            }

            for (index, value) in pad.axes.iter().enumerate() {
                let (event, listeners) = {
                    let mut state = self.state.borrow_mut();
                    let name = state.map.axis_name(index);
                    let previous_value = state.previous_axes.insert((pad.index, index), sanitize_axis(*value));
                    let listeners: Vec<AxisCallback> = state
                        .axes
                        .get(&index)
                        .map(|list| list.iter().map(|(_, cb)| Rc::clone(cb)).collect())
                        .unwrap_or_default();
                    let event = AxisEvent { gamepad: pad.index, index, name, value: *value, previous_value };
                    (event, listeners)
                };
                generated += 1;
                let mut propagation = Propagation::default();
                for listener in listeners {
                    (*listener.borrow_mut())(&event, &mut propagation);
                    if propagation.is_stopped() {
                        break;
                    }
                }
            }
        }
        generated
    }
}

/// Handle for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription removes its listener immediately"]
pub struct Subscription {
    state: Weak<RefCell<HubState>>,
    key: ListenerKey,
    id: u64,
    active: bool,
}

impl Subscription {
    fn new(state: &Rc<RefCell<HubState>>, key: ListenerKey, id: u64) -> Self {
        Self { state: Rc::downgrade(state), key, id, active: true }
    }

    /// Remove the listener. Safe to call more than once, and after the hub
    /// itself has been dropped.
    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().remove(&self.key, self.id);
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active && self.state.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for GamepadHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GamepadHub").field("listeners", &self.listener_count()).finish()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}
