#![allow(clippy::float_cmp)]

use super::*;
use crate::element::Rect;
use crate::headless::{HeadlessDocument, HeadlessElement};

fn session() -> Session<HeadlessElement> {
    let doc = HeadlessDocument::new();
    let container = doc.add_root("container", Rect { x: 0.0, y: 0.0, width: 800.0, height: 600.0 });
    let content = doc.add_child(&container, "content", Rect { x: 0.0, y: 0.0, width: 1000.0, height: 1000.0 });
    Session::new(container, content)
}

fn attached() -> TouchAdapter {
    let mut touch = TouchAdapter::new();
    touch.attach();
    touch
}

#[test]
fn first_touch_starts_drag() {
    let mut touch = attached();
    touch.start(&[Point::new(5.0, 5.0), Point::new(50.0, 50.0)], false);
    assert!(touch.is_panning());
}

#[test]
fn empty_touch_list_is_ignored() {
    let mut touch = attached();
    touch.start(&[], false);
    assert!(!touch.is_panning());
}

#[test]
fn disabled_ignores_start() {
    let mut touch = attached();
    touch.start(&[Point::new(5.0, 5.0)], true);
    assert!(!touch.is_panning());
}

#[test]
fn move_applies_first_touch_delta_and_prevents_scroll() {
    let mut s = session();
    let mut touch = attached();
    touch.start(&[Point::new(100.0, 100.0)], false);
    let outcome = touch.drag(&[Point::new(70.0, 60.0), Point::new(0.0, 0.0)], &mut s).expect("live");
    assert!(outcome.prevent_default);
    assert_eq!(s.placement().left, -30.0);
    assert_eq!(s.placement().top, -40.0);
}

#[test]
fn move_without_start_lets_browser_scroll() {
    let mut s = session();
    let mut touch = attached();
    let outcome = touch.drag(&[Point::new(70.0, 60.0)], &mut s).expect("live");
    assert_eq!(outcome, Outcome::IGNORED);
}

#[test]
fn end_repositions_immediately() {
    let mut touch = attached();
    touch.start(&[Point::new(5.0, 5.0)], false);
    let outcome = touch.end();
    assert_eq!(outcome.followup, Followup::Reposition);
    assert!(!touch.is_panning());
}

#[test]
fn end_repositions_even_without_drag() {
    let mut touch = attached();
    assert_eq!(touch.end().followup, Followup::Reposition);
}

#[test]
fn detached_end_is_ignored() {
    let mut touch = TouchAdapter::new();
    assert_eq!(touch.end(), Outcome::IGNORED);
}
