#![allow(clippy::float_cmp)]

use super::*;
use crate::boundary::{Boundary, resolve_boundary};

fn content(top: f64, height: f64) -> Position {
    Position { top, height, width: 400.0, scale: 1.0, ..Position::default() }
}

#[test]
fn overflowing_content_shows_scrollbar() {
    let bar = vertical(600.0, &content(0.0, 1000.0), &Bounds::default());
    assert!(bar.visible);
    assert_eq!(bar.thumb_height, 360.0);
}

#[test]
fn fitting_content_hides_scrollbar() {
    let bar = vertical(600.0, &content(150.0, 300.0), &Bounds::default());
    assert!(!bar.visible);
}

#[test]
fn content_above_top_edge_shows_scrollbar() {
    let bounds = resolve_boundary(Some(&Boundary::Uniform(0.0)));
    let bar = vertical(600.0, &content(-10.0, 300.0), &bounds);
    assert!(bar.visible);
}

#[test]
fn content_past_bottom_edge_shows_scrollbar() {
    let bar = vertical(600.0, &content(400.0, 300.0), &Bounds::default());
    assert!(bar.visible);
}

#[test]
fn bottom_edge_shrinks_visible_area() {
    let bounds = resolve_boundary(Some(&Boundary::Uniform(50.0)));
    // 260 + 300 > 600 - 50
    let bar = vertical(600.0, &content(260.0, 300.0), &bounds);
    assert!(bar.visible);
}

#[test]
fn edges_shorten_the_track() {
    let bounds = resolve_boundary(Some(&Boundary::Uniform(50.0)));
    let bar = vertical(600.0, &content(0.0, 1000.0), &bounds);
    assert_eq!(bar.thumb_height, 250.0);
}

#[test]
fn thumb_never_drops_below_minimum() {
    let bar = vertical(600.0, &content(0.0, 100_000.0), &Bounds::default());
    assert_eq!(bar.thumb_height, SCROLLBAR_MIN_THUMB_PX);
}

#[test]
fn content_scrolled_out_of_view_fills_track() {
    let bar = vertical(600.0, &content(-2000.0, 1000.0), &Bounds::default());
    assert_eq!(bar.thumb_height, 600.0);
}
