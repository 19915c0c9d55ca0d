use super::*;

#[test]
fn empty_projection_writes_nothing() {
    let style = StyleProjection::default();
    assert!(style.is_empty());
    assert!(style.declarations().is_empty());
}

#[test]
fn declarations_follow_write_order() {
    let style = StyleProjection {
        top: Some(250.0),
        left: Some(-20.5),
        scale: Some(0.5),
        transition: Some("none".into()),
    };
    assert_eq!(
        style.declarations(),
        vec![
            ("top", "250px".to_owned()),
            ("left", "-20.5px".to_owned()),
            ("transform", "scale(0.5)".to_owned()),
            ("transition", "none".to_owned()),
        ]
    );
}

#[test]
fn partial_projection_only_writes_present_fields() {
    let style = StyleProjection { left: Some(12.0), ..StyleProjection::default() };
    assert_eq!(style.declarations(), vec![("left", "12px".to_owned())]);
}

#[test]
fn transition_only_projection() {
    let style = StyleProjection::transition("none");
    assert!(!style.is_empty());
    assert_eq!(style.declarations(), vec![("transition", "none".to_owned())]);
}
