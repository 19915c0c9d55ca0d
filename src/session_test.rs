#![allow(clippy::float_cmp)]

use super::*;
use crate::element::Rect;
use crate::headless::{HeadlessDocument, HeadlessElement};

fn layout(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect { x, y, width, height }
}

fn doc_with(content_w: f64, content_h: f64) -> (HeadlessDocument, HeadlessElement, HeadlessElement) {
    let doc = HeadlessDocument::new();
    let container = doc.add_root("container", layout(0.0, 0.0, 800.0, 600.0));
    let content = doc.add_child(&container, "content", layout(0.0, 0.0, content_w, content_h));
    (doc, container, content)
}

// =============================================================
// Resolution
// =============================================================

#[test]
fn resolve_finds_both_elements() {
    let (doc, container, content) = doc_with(200.0, 100.0);
    let session = Session::resolve(&doc, &ElementIds::new("container", "content")).expect("resolves");
    assert_eq!(session.container(), &container);
    assert_eq!(session.content(), &content);
    assert!(session.is_live());
}

#[test]
fn resolve_reports_missing_container() {
    let (doc, _, _) = doc_with(200.0, 100.0);
    let err = Session::resolve(&doc, &ElementIds::new("nope", "content")).expect_err("missing");
    assert!(matches!(err, ViewportError::MissingElement { role: Role::Container, .. }));
}

#[test]
fn resolve_reports_missing_content() {
    let (doc, _, _) = doc_with(200.0, 100.0);
    let err = Session::resolve(&doc, &ElementIds::new("container", "nope")).expect_err("missing");
    assert!(matches!(err, ViewportError::MissingElement { role: Role::Content, .. }));
}

#[test]
fn missing_target_is_not_fatal() {
    let (doc, _, _) = doc_with(200.0, 100.0);
    let ids = ElementIds::new("container", "content").with_target("ghost");
    let session = Session::resolve(&doc, &ids).expect("resolves without target");
    assert!(matches!(session.target(), Err(ViewportError::InvalidTarget { .. })));
}

#[test]
fn target_outside_content_is_invalid() {
    let (doc, container, content) = doc_with(200.0, 100.0);
    let outsider = doc.add_child(&container, "outsider", layout(0.0, 0.0, 10.0, 10.0));
    let session = Session::new(container, content).with_target("outsider", outsider);
    assert!(matches!(session.target(), Err(ViewportError::InvalidTarget { .. })));
}

#[test]
fn target_inside_content_resolves() {
    let (doc, _, content) = doc_with(200.0, 100.0);
    let label = doc.add_child(&content, "label", layout(10.0, 10.0, 20.0, 20.0));
    let ids = ElementIds::new("container", "content").with_target("label");
    let session = Session::resolve(&doc, &ids).expect("resolves");
    assert_eq!(session.target().expect("valid target"), Some(&label));
}

// =============================================================
// Mutation entry points
// =============================================================

#[test]
fn apply_delta_adds_to_offsets_and_projects() {
    let (_doc, container, content) = doc_with(200.0, 100.0);
    let mut session = Session::new(container, content.clone());
    session.apply_delta(-50.0, -20.0).expect("live");
    let pos = session.apply_delta(5.0, 2.0).expect("live");
    assert_eq!(pos.left, -45.0);
    assert_eq!(pos.top, -18.0);
    assert_eq!(content.style().left, Some(-45.0));
    assert_eq!(content.style().top, Some(-18.0));
}

#[test]
fn zero_delta_writes_nothing() {
    let (_doc, container, content) = doc_with(200.0, 100.0);
    let mut session = Session::new(container, content.clone());
    session.apply_delta(0.0, 0.0).expect("live");
    assert_eq!(content.write_count(), 0);
}

#[test]
fn apply_absolute_only_writes_present_fields() {
    let (_doc, container, content) = doc_with(200.0, 100.0);
    let mut session = Session::new(container, content.clone());
    session.apply_absolute(PositionUpdate::offset(10.0, 20.0)).expect("live");
    session.apply_absolute(PositionUpdate::scale(0.5)).expect("live");
    let style = content.style();
    assert_eq!(style.top, Some(10.0));
    assert_eq!(style.left, Some(20.0));
    assert_eq!(style.scale, Some(0.5));
    assert_eq!(session.placement(), Placement { top: 10.0, left: 20.0, scale: 0.5 });
}

#[test]
fn position_reflects_scale() {
    let (_doc, container, content) = doc_with(400.0, 200.0);
    let mut session = Session::new(container, content);
    let pos = session.apply_absolute(PositionUpdate::scale(0.5)).expect("live");
    assert_eq!(pos.width, 200.0);
    assert_eq!(pos.height, 100.0);
}

#[test]
fn apply_with_sees_previous_position() {
    let (_doc, container, content) = doc_with(200.0, 100.0);
    let mut session = Session::new(container, content).with_placement(Placement { top: 3.0, left: 4.0, scale: 1.0 });
    let pos = session
        .apply_with(|prev| PositionUpdate::top(prev.top * 2.0))
        .expect("live");
    assert_eq!(pos.top, 6.0);
    assert_eq!(pos.left, 4.0);
}

// =============================================================
// Liveness
// =============================================================

#[test]
fn invalidated_session_rejects_writes() {
    let (_doc, container, content) = doc_with(200.0, 100.0);
    let mut session = Session::new(container, content.clone());
    session.invalidate();
    assert!(matches!(session.apply_delta(1.0, 1.0), Err(ViewportError::TornDown)));
    assert_eq!(content.write_count(), 0);
}

#[test]
fn detached_content_rejects_writes() {
    let (_doc, container, content) = doc_with(200.0, 100.0);
    let mut session = Session::new(container, content.clone());
    content.remove();
    assert!(!session.is_live());
    assert!(matches!(
        session.apply_absolute(PositionUpdate::top(1.0)),
        Err(ViewportError::Detached { role: Role::Content })
    ));
}

#[test]
fn project_transition_writes_transition_only() {
    let (_doc, container, content) = doc_with(200.0, 100.0);
    let session = Session::new(container, content.clone());
    session.project_transition("none").expect("live");
    let style = content.style();
    assert_eq!(style.transition.as_deref(), Some("none"));
    assert_eq!(style.top, None);
}
