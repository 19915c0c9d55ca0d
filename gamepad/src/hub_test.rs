#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn pad(buttons: Vec<bool>, axes: Vec<f64>) -> GamepadState {
    GamepadState { index: 0, buttons, axes }
}

fn connected_hub() -> GamepadHub {
    let hub = GamepadHub::new(ButtonMap::default());
    hub.connect(0);
    hub
}

// =============================================================
// Polling gates
// =============================================================

#[test]
fn poll_without_connection_dispatches_nothing() {
    let hub = GamepadHub::new(ButtonMap::default());
    assert!(!hub.is_polling());
    assert_eq!(hub.poll(&[pad(vec![true], vec![0.5])]), 0);
}

#[test]
fn poll_while_disabled_dispatches_nothing() {
    let hub = connected_hub();
    hub.set_disabled(true);
    assert_eq!(hub.poll(&[pad(vec![true], vec![0.5])]), 0);
    hub.set_disabled(false);
    assert_eq!(hub.poll(&[pad(vec![true], vec![0.5])]), 2);
}

#[test]
fn disconnect_pauses_polling() {
    let hub = connected_hub();
    hub.disconnect(0);
    assert!(!hub.is_polling());
}

#[test]
fn every_button_and_axis_fires_each_tick() {
    let hub = connected_hub();
    let count = hub.poll(&[pad(vec![false; 14], vec![0.0, 0.0, 0.0, 0.0])]);
    assert_eq!(count, 18);
}

// =============================================================
// Button listeners
// =============================================================

#[test]
fn button_listener_receives_named_event() {
    let hub = connected_hub();
    let seen: Rc<RefCell<Vec<ButtonEvent>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let _sub = hub.add_button_listener("B", move |event, _| sink.borrow_mut().push(event.clone()));

    hub.poll(&[pad(vec![false, true], vec![])]);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].name, "B");
    assert_eq!(seen[0].index, 1);
    assert!(seen[0].value);
    assert_eq!(seen[0].previous_value, None);
}

#[test]
fn button_previous_value_tracks_last_tick() {
    let hub = connected_hub();
    let seen: Rc<RefCell<Vec<(bool, Option<bool>)>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let _sub = hub.add_button_listener("A", move |event, _| sink.borrow_mut().push((event.value, event.previous_value)));

    hub.poll(&[pad(vec![true], vec![])]);
    hub.poll(&[pad(vec![false], vec![])]);

    assert_eq!(*seen.borrow(), vec![(true, None), (false, Some(true))]);
}

#[test]
fn stop_propagation_skips_later_listeners() {
    let hub = connected_hub();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let first = Rc::clone(&calls);
    let second = Rc::clone(&calls);
    let _a = hub.add_button_listener("A", move |_, propagation| {
        first.borrow_mut().push("first");
        propagation.stop();
    });
    let _b = hub.add_button_listener("A", move |_, _| second.borrow_mut().push("second"));

    hub.poll(&[pad(vec![true], vec![])]);

    assert_eq!(*calls.borrow(), vec!["first"]);
}

// =============================================================
// Axis listeners
// =============================================================

#[test]
fn axis_listener_keyed_by_index() {
    let hub = connected_hub();
    let seen: Rc<RefCell<Vec<AxisEvent>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let _sub = hub.add_axis_listener(1, move |event, _| sink.borrow_mut().push(event.clone()));

    hub.poll(&[pad(vec![], vec![0.25, -0.75])]);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].name, "RIGHT");
    assert_eq!(seen[0].value, -0.75);
}

#[test]
fn axis_previous_value_is_sanitized() {
    let hub = connected_hub();
    let seen: Rc<RefCell<Vec<Option<f64>>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let _sub = hub.add_axis_listener(0, move |event, _| sink.borrow_mut().push(event.previous_value));

    hub.poll(&[pad(vec![], vec![0.123_456])]);
    hub.poll(&[pad(vec![], vec![0.0])]);

    assert_eq!(*seen.borrow(), vec![None, Some(0.123)]);
}

#[test]
fn sanitize_axis_rounds_to_three_decimals() {
    assert_eq!(sanitize_axis(0.999_6), 1.0);
    assert_eq!(sanitize_axis(-0.123_4), -0.123);
}

// =============================================================
// Subscriptions
// =============================================================

#[test]
fn unsubscribe_removes_listener() {
    let hub = connected_hub();
    let mut sub = hub.add_axis_listener(0, |_, _| {});
    assert_eq!(hub.listener_count(), 1);
    sub.unsubscribe();
    assert_eq!(hub.listener_count(), 0);
    assert!(!sub.is_active());
}

#[test]
fn unsubscribe_is_idempotent() {
    let hub = connected_hub();
    let _keep = hub.add_axis_listener(0, |_, _| {});
    let mut sub = hub.add_axis_listener(0, |_, _| {});
    sub.unsubscribe();
    sub.unsubscribe();
    assert_eq!(hub.listener_count(), 1);
}

#[test]
fn dropping_subscription_unsubscribes() {
    let hub = connected_hub();
    {
        let _sub = hub.add_button_listener("X", |_, _| {});
        assert_eq!(hub.listener_count(), 1);
    }
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn subscription_outlives_hub() {
    let hub = connected_hub();
    let mut sub = hub.add_button_listener("X", |_, _| {});
    drop(hub);
    assert!(!sub.is_active());
    sub.unsubscribe();
}

#[test]
fn listener_may_register_during_dispatch() {
    let hub = connected_hub();
    let inner_hub = hub.clone();
    let registered: Rc<RefCell<Vec<Subscription>>> = Rc::default();
    let holder = Rc::clone(&registered);
    let _sub = hub.add_button_listener("A", move |_, _| {
        holder.borrow_mut().push(inner_hub.add_button_listener("B", |_, _| {}));
    });

    hub.poll(&[pad(vec![true], vec![])]);

    assert_eq!(hub.listener_count(), 2);
}

#[test]
fn disconnect_resets_previous_values() {
    let hub = connected_hub();
    let seen: Rc<RefCell<Vec<Option<bool>>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let _sub = hub.add_button_listener("A", move |event, _| sink.borrow_mut().push(event.previous_value));

    hub.poll(&[pad(vec![true], vec![])]);
    hub.disconnect(0);
    hub.connect(0);
    hub.poll(&[pad(vec![true], vec![])]);

    assert_eq!(*seen.borrow(), vec![None, None]);
}
