use super::*;

// =============================================================
// Standard layout
// =============================================================

#[test]
fn default_map_has_fourteen_buttons_and_two_axes() {
    let map = ButtonMap::default();
    assert_eq!(map.button.len(), 14);
    assert_eq!(map.axis.len(), 2);
}

#[test]
fn default_map_names_shoulder_buttons() {
    let map = ButtonMap::default();
    assert_eq!(map.button_index("L"), Some(4));
    assert_eq!(map.button_index("ZR"), Some(7));
    assert_eq!(map.button_index("LeftBumper"), None);
}

#[test]
fn button_name_reverse_lookup() {
    let map = ButtonMap::default();
    assert_eq!(map.button_name(0), "A");
    assert_eq!(map.button_name(13), "CAPTURE");
}

#[test]
fn unknown_index_falls_back_to_number() {
    let map = ButtonMap::default();
    assert_eq!(map.button_name(16), "16");
    assert_eq!(map.axis_name(3), "3");
}

#[test]
fn axis_names() {
    let map = ButtonMap::default();
    assert_eq!(map.axis_name(0), "LEFT");
    assert_eq!(map.axis_index("RIGHT"), Some(1));
}

#[test]
fn button_keys_are_ordered_by_index() {
    let map = ButtonMap::default();
    let keys = map.button_keys();
    assert_eq!(keys.first(), Some(&"A"));
    assert_eq!(keys.get(4), Some(&"L"));
    assert_eq!(keys.last(), Some(&"CAPTURE"));
}

// =============================================================
// JSON
// =============================================================

#[test]
fn from_json_accepts_custom_map() {
    let map = ButtonMap::from_json(r#"{"button":{"Fire":0,"Jump":1},"axis":{"Stick":0}}"#).expect("valid map");
    assert_eq!(map.button_name(1), "Jump");
    assert_eq!(map.axis_name(0), "Stick");
}

#[test]
fn from_json_rejects_duplicate_index() {
    let err = ButtonMap::from_json(r#"{"button":{"Fire":0,"Jump":0},"axis":{}}"#).expect_err("duplicate");
    assert!(matches!(err, GamepadError::DuplicateIndex { kind: "button", index: 0, .. }));
}

#[test]
fn from_json_rejects_garbage() {
    let err = ButtonMap::from_json("[1,2]").expect_err("not a map");
    assert!(matches!(err, GamepadError::InvalidMap(_)));
}
