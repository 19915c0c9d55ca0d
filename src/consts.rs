//! Shared numeric constants for the viewport crate.

// ── Input ───────────────────────────────────────────────────────

/// Pixels per tick at full gamepad stick deflection.
pub const GAMEPAD_AXIS_SPEED: f64 = 15.0;

/// Fraction of the wheel's `deltaY` applied as vertical pan.
pub const WHEEL_PAN_FACTOR: f64 = 0.5;

/// Key that arms mouse panning with the primary button.
pub const PAN_KEY: &str = " ";

/// Key that suspends wheel panning while held.
pub const WHEEL_SUSPEND_KEY: &str = "Control";

// ── Gamepad bindings ────────────────────────────────────────────

/// Stick axis that pans the content.
pub const DEFAULT_GAMEPAD_AXIS: usize = 0;

/// Button that re-centers the content.
pub const DEFAULT_GAMEPAD_CENTER_BUTTON: &str = "L";

// ── Styling ─────────────────────────────────────────────────────

/// Content transition restored after panning ends.
pub const DEFAULT_TRANSITION: &str = "all .5s cubic-bezier(0.16, 1, 0.3, 1)";

/// Transition written while the content follows the pointer.
pub const PANNING_TRANSITION: &str = "none";

// ── Scrollbar ───────────────────────────────────────────────────

/// Smallest vertical scrollbar thumb, in CSS pixels.
pub const SCROLLBAR_MIN_THUMB_PX: f64 = 20.0;
