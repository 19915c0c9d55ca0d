//! Draggable orchestrator: one controller per (container, content) pair.
//!
//! Owns the session and every input adapter, routes normalized events to the
//! adapter for their channel, and tracks the combined panning state:
//!
//! ```text
//! Idle -> Initializing -> Interactive <-> Panning -> TornDown
//! ```
//!
//! While panning the content's transition is forced to `none` so it follows
//! the pointer; when every channel lets go the configured transition comes
//! back and the content is repositioned exactly once. The host reacts to the
//! returned [`Action`]s (call `preventDefault`, arm a zero-delay timer,
//! re-render the cursor), the same way a canvas engine hands actions back to
//! its page.

#[cfg(test)]
#[path = "draggable_test.rs"]
mod draggable_test;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use gamepad::{GamepadHub, Subscription};
use serde::Serialize;

use crate::boundary::{Bounds, CenterAxes};
use crate::config::ViewportConfig;
use crate::consts::PANNING_TRANSITION;
use crate::element::{Element, ElementRegistry};
use crate::error::ViewportError;
use crate::input::{
    Adapter, Followup, GamepadAdapter, InputEvent, KeyboardAdapter, MouseAdapter, Outcome, TouchAdapter, WheelAdapter,
};
use crate::position::{Placement, Position, PositionUpdate};
use crate::reposition;
use crate::scrollbar::{self, VerticalScrollbar};
use crate::session::{ElementIds, Session};

// =============================================================
// Status
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not mounted yet, or the elements were missing at mount.
    Idle,
    /// Running the first placement.
    Initializing,
    Interactive,
    Panning,
    TornDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    /// A mouse drag is in progress.
    Grabbing,
    /// The pan key is held but the mouse is not dragging.
    Grab,
}

impl Cursor {
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Grabbing => "grabbing",
            Self::Grab => "grab",
        }
    }
}

/// Per-channel panning flags.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PanningFlags {
    pub mouse: bool,
    pub touch: bool,
    pub keyboard: bool,
    pub gamepad: bool,
}

impl PanningFlags {
    #[must_use]
    pub fn any(&self) -> bool {
        self.mouse || self.touch || self.keyboard || self.gamepad
    }
}

/// Presentation state handed to the host for cursor styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportStatus {
    pub cursor: Option<Cursor>,
    pub is_panning: bool,
    pub panning: PanningFlags,
}

impl ViewportStatus {
    #[must_use]
    pub fn from_flags(panning: PanningFlags) -> Self {
        let cursor = if panning.mouse {
            Some(Cursor::Grabbing)
        } else if panning.keyboard {
            Some(Cursor::Grab)
        } else {
            None
        };
        Self { cursor, is_panning: panning.any(), panning }
    }
}

/// Side effects the host must carry out after a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Call `preventDefault()` on the DOM event being dispatched.
    PreventDefault,
    /// Call [`Draggable::run_deferred`] from a zero-delay timer.
    ScheduleDeferred,
    StatusChanged(ViewportStatus),
}

type InputQueue = Rc<RefCell<VecDeque<InputEvent>>>;

// =============================================================
// Draggable
// =============================================================

#[derive(Debug)]
pub struct Draggable<E: Element> {
    ids: ElementIds,
    config: ViewportConfig,
    bounds: Bounds,
    phase: Phase,
    session: Option<Session<E>>,
    mouse: MouseAdapter,
    touch: TouchAdapter,
    keyboard: KeyboardAdapter,
    gamepad: GamepadAdapter,
    wheel: WheelAdapter,
    /// Gamepad events queued by hub listeners until the next animation frame.
    pad_queue: InputQueue,
    /// Hub handle kept from `mount` so listeners can be re-registered.
    hub: Option<GamepadHub>,
    subscriptions: Vec<Subscription>,
    deferred_pending: bool,
    status: ViewportStatus,
}

impl<E: Element> Draggable<E> {
    #[must_use]
    pub fn new(ids: ElementIds, config: ViewportConfig) -> Self {
        let bounds = config.bounds();
        let gamepad = GamepadAdapter::new(config.gamepad.clone());
        Self {
            ids,
            config,
            bounds,
            phase: Phase::Idle,
            session: None,
            mouse: MouseAdapter::new(),
            touch: TouchAdapter::new(),
            keyboard: KeyboardAdapter::new(),
            gamepad,
            wheel: WheelAdapter::new(),
            pad_queue: Rc::new(RefCell::new(VecDeque::new())),
            hub: None,
            subscriptions: Vec::new(),
            deferred_pending: false,
            status: ViewportStatus::default(),
        }
    }

    #[must_use]
    pub fn ids(&self) -> &ElementIds {
        &self.ids
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn status(&self) -> ViewportStatus {
        self.status
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        matches!(self.phase, Phase::Interactive | Phase::Panning)
    }

    /// Current content position, while mounted.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.session.as_ref().filter(|_| self.is_mounted()).map(Session::position)
    }

    /// Current placement record, while mounted.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.session.as_ref().filter(|_| self.is_mounted()).map(Session::placement)
    }

    /// Vertical scrollbar state for the current position, while mounted.
    #[must_use]
    pub fn scrollbar(&self) -> Option<VerticalScrollbar> {
        let session = self.session.as_ref().filter(|_| self.is_mounted())?;
        let container = session.container_position();
        Some(scrollbar::vertical(container.height, &session.position(), &self.bounds))
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Resolve the elements, run the first placement and start accepting
    /// input. When either element is missing the controller stays idle and
    /// the host may call `mount` again on a later frame.
    pub fn mount<R>(&mut self, registry: &R, hub: Option<&GamepadHub>) -> Vec<Action>
    where
        R: ElementRegistry<Element = E>,
    {
        match self.phase {
            Phase::Idle => {}
            Phase::TornDown => {
                tracing::warn!(content = %self.ids.content, "mount after teardown ignored");
                return Vec::new();
            }
            Phase::Initializing | Phase::Interactive | Phase::Panning => return Vec::new(),
        }

        let session = match Session::resolve(registry, &self.ids) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "viewport elements not ready; staying idle");
                return Vec::new();
            }
        };
        self.session = Some(session);
        self.phase = Phase::Initializing;
        tracing::debug!(container = %self.ids.container, content = %self.ids.content, "viewport initializing");

        let bounds = self.bounds;
        let transition = self.config.transition.clone();
        self.run("initial placement", |session| {
            session.project_transition(PANNING_TRANSITION)?;
            reposition::reposition_initial_position(session, &bounds)?;
            session.project_transition(&transition)
        });

        self.mouse.attach();
        self.touch.attach();
        self.keyboard.attach();
        self.gamepad.attach();
        self.wheel.attach();
        self.hub = hub.cloned();
        self.subscribe();

        self.phase = Phase::Interactive;
        self.status = ViewportStatus::default();
        tracing::debug!(content = %self.ids.content, "viewport interactive");
        vec![Action::StatusChanged(self.status)]
    }

    /// Detach every adapter, drop the gamepad listeners and invalidate the
    /// session. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        self.subscriptions.clear();
        self.hub = None;
        self.pad_queue.borrow_mut().clear();
        self.mouse.detach();
        self.touch.detach();
        self.keyboard.detach();
        self.gamepad.detach();
        self.wheel.detach();
        if let Some(session) = self.session.as_mut() {
            session.invalidate();
        }
        self.deferred_pending = false;
        self.status = ViewportStatus::default();
        self.phase = Phase::TornDown;
        tracing::debug!(content = %self.ids.content, "viewport torn down");
    }

    /// Replace the configuration. Boundary and centering take effect
    /// immediately. Gamepad listeners are re-registered on `hub`, or on the
    /// hub given to `mount` when `hub` is `None`. Panning flags are left
    /// alone.
    pub fn set_config(&mut self, config: ViewportConfig, hub: Option<&GamepadHub>) {
        self.bounds = config.bounds();
        self.gamepad.set_bindings(config.gamepad.clone());
        self.config = config;
        if !self.is_mounted() {
            return;
        }
        if let Some(hub) = hub {
            self.hub = Some(hub.clone());
        }
        self.subscribe();
        self.reposition_now();
    }

    fn subscribe(&mut self) {
        self.subscriptions.clear();
        let Some(hub) = self.hub.as_ref() else {
            return;
        };

        let queue = Rc::clone(&self.pad_queue);
        self.subscriptions.push(hub.add_axis_listener(self.config.gamepad.axis, move |event, _| {
            queue.borrow_mut().push_back(InputEvent::GamepadAxis { index: event.index, value: event.value });
        }));

        let queue = Rc::clone(&self.pad_queue);
        self.subscriptions.push(hub.add_button_listener(&self.config.gamepad.center_button, move |event, _| {
            queue.borrow_mut().push_back(InputEvent::GamepadButton { name: event.name.clone(), pressed: event.value });
        }));
    }

    // ── Input ───────────────────────────────────────────────────

    /// Route one input event to its adapter.
    pub fn dispatch(&mut self, event: &InputEvent) -> Vec<Action> {
        if !self.is_mounted() {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let disabled = self.config.disabled;

        let result = match event {
            InputEvent::MouseDown { button, at } => {
                Ok(self.mouse.press(*button, *at, self.keyboard.is_panning(), disabled))
            }
            InputEvent::MouseMove { at } => self.mouse.drag(*at, session),
            InputEvent::MouseUp | InputEvent::MouseLeave => Ok(self.mouse.release()),
            InputEvent::TouchStart { touches } => Ok(self.touch.start(touches, disabled)),
            InputEvent::TouchMove { touches } => self.touch.drag(touches, session),
            InputEvent::TouchEnd => Ok(self.touch.end()),
            InputEvent::KeyDown { key } => {
                self.wheel.key_down(key);
                Ok(self.keyboard.key_down(key, disabled))
            }
            InputEvent::KeyUp { key } => {
                self.wheel.key_up(key);
                Ok(self.keyboard.key_up(key))
            }
            InputEvent::Wheel { delta, modifiers } => {
                if self.config.wheel {
                    self.wheel.scroll(*delta, *modifiers, session, &self.bounds, disabled)
                } else {
                    Ok(Outcome::IGNORED)
                }
            }
            InputEvent::GamepadAxis { index, value } => self.gamepad.axis(*index, *value, session, disabled),
            InputEvent::GamepadButton { name, pressed } => Ok(self.gamepad.button(name, *pressed, disabled)),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, channel = ?event.channel(), "input ignored");
                Outcome::IGNORED
            }
        };

        let mut actions = Vec::new();
        if outcome.prevent_default {
            actions.push(Action::PreventDefault);
        }
        self.sync_phase(outcome.followup.repositions(), &mut actions);
        self.follow(outcome.followup, &mut actions);
        actions
    }

    /// Dispatch the gamepad input queued since the last frame. Call after
    /// [`GamepadHub::poll`].
    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        let events: Vec<InputEvent> = self.pad_queue.borrow_mut().drain(..).collect();
        let mut actions = Vec::new();
        for event in &events {
            actions.extend(self.dispatch(event));
        }
        actions
    }

    /// Zero-delay timer body armed by [`Action::ScheduleDeferred`].
    pub fn run_deferred(&mut self) {
        if !self.deferred_pending {
            return;
        }
        self.deferred_pending = false;
        self.reposition_now();
    }

    /// Container or content box changed size.
    pub fn on_resize(&mut self) {
        if self.is_mounted() {
            tracing::trace!(content = %self.ids.content, "resize");
            self.reposition_now();
        }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Center on the requested axes, ignoring the boundary and the overflow
    /// rule.
    pub fn center(&mut self, axes: CenterAxes) {
        if self.is_mounted() {
            self.run("center", |session| reposition::center(session, axes));
        }
    }

    /// Set the content scale, then reposition.
    pub fn set_scale(&mut self, scale: f64) {
        if !self.is_mounted() {
            return;
        }
        if !scale.is_finite() || scale <= 0.0 {
            tracing::warn!(scale, "ignoring invalid scale");
            return;
        }
        self.run("set scale", |session| session.apply_absolute(PositionUpdate::scale(scale)));
        self.reposition_now();
    }

    // ── Internals ───────────────────────────────────────────────

    fn flags(&self) -> PanningFlags {
        PanningFlags {
            mouse: self.mouse.is_panning(),
            touch: self.touch.is_panning(),
            keyboard: self.keyboard.is_panning(),
            gamepad: self.gamepad.is_panning(),
        }
    }

    /// Move between Interactive and Panning and report status changes.
    /// Leaving Panning repositions unless a followup already will.
    fn sync_phase(&mut self, reposition_requested: bool, actions: &mut Vec<Action>) {
        let flags = self.flags();
        let panning = flags.any();

        if panning && self.phase == Phase::Interactive {
            self.phase = Phase::Panning;
            tracing::debug!(?flags, "panning started");
            self.run("suppress transition", |session| session.project_transition(PANNING_TRANSITION));
        } else if !panning && self.phase == Phase::Panning {
            self.phase = Phase::Interactive;
            tracing::debug!("panning ended");
            let transition = self.config.transition.clone();
            self.run("restore transition", |session| session.project_transition(&transition));
            if !reposition_requested && !self.deferred_pending {
                self.reposition_now();
            }
        }

        let status = ViewportStatus::from_flags(flags);
        if status != self.status {
            self.status = status;
            actions.push(Action::StatusChanged(status));
        }
    }

    fn follow(&mut self, followup: Followup, actions: &mut Vec<Action>) {
        match followup {
            Followup::None => {}
            Followup::Reposition => self.reposition_now(),
            Followup::DeferReposition => {
                if !self.deferred_pending {
                    self.deferred_pending = true;
                    actions.push(Action::ScheduleDeferred);
                }
            }
            Followup::Center => {
                self.run("center", reposition::center_element);
            }
        }
    }

    fn reposition_now(&mut self) {
        let center = self.config.center_axes();
        let bounds = self.bounds;
        self.run("reposition", |session| reposition::reposition(session, center, &bounds));
    }

    /// Run a session operation, absorbing failures into a warning.
    fn run<T, F>(&mut self, op: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Session<E>) -> Result<T, ViewportError>,
    {
        let session = self.session.as_mut()?;
        match f(session) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, op, "viewport operation skipped");
                None
            }
        }
    }
}
