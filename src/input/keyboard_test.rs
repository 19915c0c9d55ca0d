use super::*;

fn attached() -> KeyboardAdapter {
    let mut keyboard = KeyboardAdapter::new();
    keyboard.attach();
    keyboard
}

#[test]
fn space_down_arms_panning() {
    let mut keyboard = attached();
    keyboard.key_down(&Key::new(" "), false);
    assert!(keyboard.is_panning());
    keyboard.key_up(&Key::new(" "));
    assert!(!keyboard.is_panning());
}

#[test]
fn other_keys_are_ignored() {
    let mut keyboard = attached();
    keyboard.key_down(&Key::new("a"), false);
    assert!(!keyboard.is_panning());
}

#[test]
fn disabled_blocks_key_down_but_not_key_up() {
    let mut keyboard = attached();
    keyboard.key_down(&Key::new(" "), true);
    assert!(!keyboard.is_panning());

    keyboard.key_down(&Key::new(" "), false);
    keyboard.key_up(&Key::new(" "));
    assert!(!keyboard.is_panning());
}

#[test]
fn key_events_never_prevent_default() {
    let mut keyboard = attached();
    assert_eq!(keyboard.key_down(&Key::new(" "), false), Outcome::IGNORED);
}

#[test]
fn detach_releases_key() {
    let mut keyboard = attached();
    keyboard.key_down(&Key::new(" "), false);
    keyboard.detach();
    assert!(!keyboard.is_panning());
    keyboard.key_down(&Key::new(" "), false);
    assert!(!keyboard.is_panning());
}
