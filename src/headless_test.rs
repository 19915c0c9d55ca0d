#![allow(clippy::float_cmp)]

use super::*;

fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect { x, y, width, height }
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn root_box_is_its_layout() {
    let doc = HeadlessDocument::new();
    let root = doc.add_root("container", rect(10.0, 20.0, 800.0, 600.0));
    assert_eq!(root.bounding_box(), rect(10.0, 20.0, 800.0, 600.0));
    assert_eq!(root.layout_size(), Size::new(800.0, 600.0));
}

#[test]
fn child_offsets_follow_projected_top_left() {
    let doc = HeadlessDocument::new();
    let root = doc.add_root("container", rect(10.0, 20.0, 800.0, 600.0));
    let child = doc.add_child(&root, "content", rect(0.0, 0.0, 200.0, 100.0));
    child.project(&StyleProjection { top: Some(5.0), left: Some(7.0), ..StyleProjection::default() });
    assert_eq!(child.bounding_box(), rect(17.0, 25.0, 200.0, 100.0));
}

#[test]
fn scale_shrinks_box_from_top_left() {
    let doc = HeadlessDocument::new();
    let root = doc.add_root("container", rect(0.0, 0.0, 800.0, 600.0));
    let child = doc.add_child(&root, "content", rect(0.0, 0.0, 400.0, 200.0));
    child.project(&StyleProjection { left: Some(100.0), scale: Some(0.5), ..StyleProjection::default() });
    assert_eq!(child.bounding_box(), rect(100.0, 0.0, 200.0, 100.0));
    assert_eq!(child.layout_size(), Size::new(400.0, 200.0));
}

#[test]
fn scale_compounds_into_descendants() {
    let doc = HeadlessDocument::new();
    let root = doc.add_root("container", rect(0.0, 0.0, 800.0, 600.0));
    let content = doc.add_child(&root, "content", rect(0.0, 0.0, 400.0, 400.0));
    let label = doc.add_child(&content, "label", rect(100.0, 40.0, 50.0, 20.0));
    content.project(&StyleProjection { top: Some(10.0), scale: Some(2.0), ..StyleProjection::default() });
    assert_eq!(label.bounding_box(), rect(200.0, 90.0, 100.0, 40.0));
}

// =============================================================
// Tree queries
// =============================================================

#[test]
fn contains_self_and_descendants_only() {
    let doc = HeadlessDocument::new();
    let root = doc.add_root("container", rect(0.0, 0.0, 10.0, 10.0));
    let content = doc.add_child(&root, "content", rect(0.0, 0.0, 10.0, 10.0));
    let other = doc.add_root("other", rect(0.0, 0.0, 10.0, 10.0));
    assert!(root.contains(&content));
    assert!(content.contains(&content));
    assert!(!content.contains(&root));
    assert!(!root.contains(&other));
}

#[test]
fn removing_parent_disconnects_children() {
    let doc = HeadlessDocument::new();
    let root = doc.add_root("container", rect(0.0, 0.0, 10.0, 10.0));
    let content = doc.add_child(&root, "content", rect(0.0, 0.0, 10.0, 10.0));
    root.remove();
    assert!(!content.is_connected());
    assert!(doc.element("content").is_none());
}

#[test]
fn registry_finds_by_id() {
    let doc = HeadlessDocument::new();
    let root = doc.add_root("container", rect(0.0, 0.0, 10.0, 10.0));
    assert_eq!(doc.element("container"), Some(root));
    assert!(doc.element("missing").is_none());
}

// =============================================================
// Style sink
// =============================================================

#[test]
fn projection_keeps_unwritten_fields() {
    let doc = HeadlessDocument::new();
    let el = doc.add_root("content", rect(0.0, 0.0, 10.0, 10.0));
    el.project(&StyleProjection { top: Some(1.0), left: Some(2.0), ..StyleProjection::default() });
    el.project(&StyleProjection { left: Some(3.0), ..StyleProjection::default() });
    let style = el.style();
    assert_eq!(style.top, Some(1.0));
    assert_eq!(style.left, Some(3.0));
    assert_eq!(style.scale, None);
    assert_eq!(el.write_count(), 2);
}

#[test]
fn empty_projection_is_not_counted() {
    let doc = HeadlessDocument::new();
    let el = doc.add_root("content", rect(0.0, 0.0, 10.0, 10.0));
    el.project(&StyleProjection::default());
    assert_eq!(el.write_count(), 0);
}

#[test]
fn transition_log_records_every_write() {
    let doc = HeadlessDocument::new();
    let el = doc.add_root("content", rect(0.0, 0.0, 10.0, 10.0));
    el.project(&StyleProjection::transition("none"));
    el.project(&StyleProjection::transition("all 1s"));
    assert_eq!(el.transition_log(), vec!["none".to_owned(), "all 1s".to_owned()]);
    assert_eq!(el.style().transition.as_deref(), Some("all 1s"));
}
