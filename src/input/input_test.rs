use super::*;

// --- Button ---

#[test]
fn dom_button_mapping() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(4), Button::Primary);
}

// --- Key ---

#[test]
fn key_matches_exact_name() {
    assert!(Key::new(" ").is(" "));
    assert!(!Key::new("Space").is(" "));
}

// --- Outcome ---

#[test]
fn ignored_outcome_is_default() {
    assert_eq!(Outcome::IGNORED, Outcome::default());
}

#[test]
fn followup_reposition_kinds() {
    assert!(Followup::Reposition.repositions());
    assert!(Followup::DeferReposition.repositions());
    assert!(!Followup::Center.repositions());
    assert!(!Followup::None.repositions());
}

// --- InputEvent ---

#[test]
fn events_report_their_channel() {
    assert_eq!(InputEvent::MouseUp.channel(), Channel::Mouse);
    assert_eq!(InputEvent::TouchEnd.channel(), Channel::Touch);
    assert_eq!(InputEvent::KeyDown { key: Key::new(" ") }.channel(), Channel::Keyboard);
    assert_eq!(
        InputEvent::Wheel { delta: WheelDelta::default(), modifiers: Modifiers::default() }.channel(),
        Channel::Wheel
    );
    assert_eq!(InputEvent::GamepadAxis { index: 0, value: 0.0 }.channel(), Channel::Gamepad);
}

#[test]
fn mouse_down_from_json() {
    let event: InputEvent =
        serde_json::from_str(r#"{"type":"mouse_down","button":"middle","at":{"x":10,"y":20}}"#).expect("valid event");
    assert_eq!(event, InputEvent::MouseDown { button: Button::Middle, at: Point::new(10.0, 20.0) });
}

#[test]
fn wheel_modifiers_default_when_absent() {
    let event: InputEvent = serde_json::from_str(r#"{"type":"wheel","delta":{"dy":40}}"#).expect("valid event");
    assert_eq!(
        event,
        InputEvent::Wheel { delta: WheelDelta { dx: 0.0, dy: 40.0 }, modifiers: Modifiers::default() }
    );
}

#[test]
fn key_event_from_json() {
    let event: InputEvent = serde_json::from_str(r#"{"type":"key_down","key":" "}"#).expect("valid event");
    assert_eq!(event, InputEvent::KeyDown { key: Key::new(" ") });
}

#[test]
fn unit_variant_from_json() {
    let event: InputEvent = serde_json::from_str(r#"{"type":"touch_end"}"#).expect("valid event");
    assert_eq!(event, InputEvent::TouchEnd);
}
