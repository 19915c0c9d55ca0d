//! Reposition engine: center free axes, clamp constrained ones.
//!
//! Clamping always runs last, so a boundary wins over centering. An axis
//! where the content is larger than the container is never centered by
//! [`reposition`]; [`reposition_initial_position`] snaps such an axis to its
//! near boundary edge instead.

#[cfg(test)]
#[path = "reposition_test.rs"]
mod reposition_test;

use crate::boundary::{Bounds, CenterAxes};
use crate::element::Element;
use crate::error::ViewportError;
use crate::position::{Position, PositionUpdate};
use crate::session::Session;

/// Clamp one offset between `near` (the leading edge limit) and the offset
/// that leaves `far` pixels after the trailing edge. The two limits swap when
/// the content is smaller than the container.
#[must_use]
pub fn clamp_axis(offset: f64, container: f64, content: f64, near: f64, far: f64) -> f64 {
    let limit_far = container - content - far;
    let limit_near = near;
    let min = limit_far.min(limit_near);
    let max = limit_far.max(limit_near);
    offset.max(min).min(max)
}

/// Clamp the content into its boundary on every fully-defined axis. Axes
/// with a missing edge keep their offset.
///
/// # Errors
///
/// Fails when the session is torn down or detached.
pub fn move_in_boundaries<E: Element>(session: &mut Session<E>, bounds: &Bounds) -> Result<Position, ViewportError> {
    session.ensure_live()?;
    let container = session.container_position();
    session.apply_with(|prev| {
        let mut update = PositionUpdate::default();
        if let Some((left, right)) = bounds.horizontal() {
            update.left = Some(clamp_axis(prev.left, container.width, prev.width, left, right));
        }
        if let Some((top, bottom)) = bounds.vertical() {
            update.top = Some(clamp_axis(prev.top, container.height, prev.height, top, bottom));
        }
        update
    })
}

/// Anchor (target or content) and content positions for a centering pass.
fn centering_frame<E: Element>(session: &Session<E>) -> Result<(Position, Position, Position), ViewportError> {
    session.ensure_live()?;
    let container = session.container_position();
    let content = session.position();
    let anchor = match session.target()? {
        Some(target) => Position::of_element(target),
        None => content,
    };
    Ok((container, content, anchor))
}

/// Move the content so the anchor sits in the vertical middle of the
/// container.
///
/// # Errors
///
/// [`ViewportError::InvalidTarget`] when the configured target is not inside
/// the content; the content is left untouched.
pub fn center_vertically<E: Element>(session: &mut Session<E>) -> Result<Position, ViewportError> {
    let (container, content, anchor) = centering_frame(session)?;
    let offset = anchor.y - content.y;
    let top = (container.height - anchor.height) / 2.0 - offset;
    session.apply_absolute(PositionUpdate::top(top))
}

/// Horizontal counterpart of [`center_vertically`].
///
/// # Errors
///
/// Same as [`center_vertically`].
pub fn center_horizontally<E: Element>(session: &mut Session<E>) -> Result<Position, ViewportError> {
    let (container, content, anchor) = centering_frame(session)?;
    let offset = anchor.x - content.x;
    let left = (container.width - anchor.width) / 2.0 - offset;
    session.apply_absolute(PositionUpdate::left(left))
}

/// Center on both axes.
///
/// # Errors
///
/// Same as [`center_vertically`].
pub fn center_element<E: Element>(session: &mut Session<E>) -> Result<Position, ViewportError> {
    center_horizontally(session)?;
    center_vertically(session)
}

/// Center on the requested axes without clamping or overflow checks.
///
/// # Errors
///
/// Same as [`center_vertically`].
pub fn center<E: Element>(session: &mut Session<E>, axes: CenterAxes) -> Result<Position, ViewportError> {
    if axes.x {
        center_horizontally(session)?;
    }
    if axes.y {
        center_vertically(session)?;
    }
    Ok(session.position())
}

/// An invalid target skips centering but must not stop clamping.
fn skip_invalid_target(result: Result<Position, ViewportError>) -> Result<(), ViewportError> {
    match result {
        Ok(_) => Ok(()),
        Err(ViewportError::InvalidTarget { id }) => {
            tracing::warn!(target_id = %id, "centering target is not inside the content; centering skipped");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Center each requested axis the content fits on, then clamp.
///
/// # Errors
///
/// Fails when the session is torn down or detached.
pub fn reposition<E: Element>(session: &mut Session<E>, center: CenterAxes, bounds: &Bounds) -> Result<Position, ViewportError> {
    session.ensure_live()?;
    let container = session.container_position();
    let content = session.position();

    let exceeds_height = content.height > container.height;
    let exceeds_width = content.width > container.width;

    if !exceeds_height && center.y {
        skip_invalid_target(center_vertically(session))?;
    }
    if !exceeds_width && center.x {
        skip_invalid_target(center_horizontally(session))?;
    }

    move_in_boundaries(session, bounds)
}

/// First placement after mount: center both axes regardless of policy, snap
/// overflowing axes to their near edge (or 0), then clamp.
///
/// # Errors
///
/// Fails when the session is torn down or detached.
pub fn reposition_initial_position<E: Element>(session: &mut Session<E>, bounds: &Bounds) -> Result<Position, ViewportError> {
    session.ensure_live()?;
    skip_invalid_target(center_element(session))?;

    let container = session.container_position();
    session.apply_with(|prev| {
        let mut update = PositionUpdate::default();
        if prev.width > container.width {
            update.left = Some(bounds.left.unwrap_or(0.0));
        }
        if prev.height > container.height {
            update.top = Some(bounds.top.unwrap_or(0.0));
        }
        update
    })?;

    move_in_boundaries(session, bounds)
}
