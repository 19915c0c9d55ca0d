//! Scenario files: a headless page plus a list of steps to replay.
//!
//! ```json
//! {
//!   "container": { "width": 800, "height": 600 },
//!   "content": { "width": 1000, "height": 1000 },
//!   "config": { "boundary": 0 },
//!   "steps": [
//!     { "type": "mouse_down", "button": "middle", "at": { "x": 100, "y": 100 } },
//!     { "type": "mouse_move", "at": { "x": 50, "y": 80 } },
//!     { "type": "mouse_up" }
//!   ]
//! }
//! ```
//!
//! Steps are either input events, dispatched as-is, or control steps that
//! resize elements, advance an animation frame, or issue commands. Zero-delay
//! timers armed by a step run before the next step starts.

#[cfg(test)]
#[path = "scenario_test.rs"]
mod scenario_test;

use gamepad::{ButtonMap, GamepadHub, GamepadState};
use serde::{Deserialize, Serialize};
use sheet_viewport::boundary::CenterAxes;
use sheet_viewport::draggable::Phase;
use sheet_viewport::element::{Rect, Size};
use sheet_viewport::headless::{HeadlessDocument, HeadlessElement};
use sheet_viewport::input::InputEvent;
use sheet_viewport::position::Position;
use sheet_viewport::scrollbar::VerticalScrollbar;
use sheet_viewport::session::ElementIds;
use sheet_viewport::{Action, Draggable, ViewportConfig, ViewportStatus};

const CONTAINER_ID: &str = "container";
const CONTENT_ID: &str = "content";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Centering reference placed inside the content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TargetSpec {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One controller reading fed to the hub on a `tick`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PadSnapshot {
    pub buttons: Vec<bool>,
    pub axes: Vec<f64>,
}

fn both() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    ResizeContainer { width: f64, height: f64 },
    ResizeContent { width: f64, height: f64 },
    /// One animation frame. With `pad`, the hub is polled first.
    Tick {
        #[serde(default)]
        pad: Option<PadSnapshot>,
    },
    Center {
        #[serde(default = "both")]
        x: bool,
        #[serde(default = "both")]
        y: bool,
    },
    Scale { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Input(InputEvent),
    Control(Control),
}

impl Step {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Input(event) => match event {
                InputEvent::MouseDown { .. } => "mouse_down",
                InputEvent::MouseMove { .. } => "mouse_move",
                InputEvent::MouseUp => "mouse_up",
                InputEvent::MouseLeave => "mouse_leave",
                InputEvent::TouchStart { .. } => "touch_start",
                InputEvent::TouchMove { .. } => "touch_move",
                InputEvent::TouchEnd => "touch_end",
                InputEvent::KeyDown { .. } => "key_down",
                InputEvent::KeyUp { .. } => "key_up",
                InputEvent::Wheel { .. } => "wheel",
                InputEvent::GamepadAxis { .. } => "gamepad_axis",
                InputEvent::GamepadButton { .. } => "gamepad_button",
            },
            Self::Control(control) => match control {
                Control::ResizeContainer { .. } => "resize_container",
                Control::ResizeContent { .. } => "resize_content",
                Control::Tick { .. } => "tick",
                Control::Center { .. } => "center",
                Control::Scale { .. } => "scale",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    pub container: Dimensions,
    pub content: Dimensions,
    #[serde(default)]
    pub target: Option<TargetSpec>,
    #[serde(default)]
    pub config: ViewportConfig,
    /// Mount with a gamepad hub using the standard layout.
    #[serde(default)]
    pub gamepad: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// State after one step, printed as a JSON line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// `0` is the mount; replayed steps count from `1`.
    pub step: usize,
    pub kind: &'static str,
    pub phase: Phase,
    pub position: Option<Position>,
    pub status: ViewportStatus,
    pub actions: Vec<&'static str>,
    /// A zero-delay reposition ran after the step.
    pub deferred: bool,
    pub scrollbar: Option<VerticalScrollbar>,
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::PreventDefault => "prevent_default",
        Action::ScheduleDeferred => "schedule_deferred",
        Action::StatusChanged(_) => "status_changed",
    }
}

/// A mounted scenario page.
pub struct Replay {
    container: HeadlessElement,
    content: HeadlessElement,
    hub: Option<GamepadHub>,
    viewport: Draggable<HeadlessElement>,
}

impl Replay {
    /// Build the page and mount the viewport.
    #[must_use]
    pub fn mount(scenario: &Scenario) -> (Self, StepReport) {
        let doc = HeadlessDocument::new();
        let container = doc.add_root(
            CONTAINER_ID,
            Rect { x: 0.0, y: 0.0, width: scenario.container.width, height: scenario.container.height },
        );
        let content = doc.add_child(
            &container,
            CONTENT_ID,
            Rect { x: 0.0, y: 0.0, width: scenario.content.width, height: scenario.content.height },
        );

        let mut ids = ElementIds::new(CONTAINER_ID, CONTENT_ID);
        if let Some(target) = &scenario.target {
            doc.add_child(
                &content,
                &target.id,
                Rect { x: target.x, y: target.y, width: target.width, height: target.height },
            );
            ids = ids.with_target(&target.id);
        }

        let hub = scenario.gamepad.then(|| {
            let hub = GamepadHub::new(ButtonMap::default());
            hub.connect(0);
            hub
        });

        let mut viewport = Draggable::new(ids, scenario.config.clone());
        let actions = viewport.mount(&doc, hub.as_ref());
        let mut replay = Self { container, content, hub, viewport };
        let report = replay.report(0, "mount", &actions);
        (replay, report)
    }

    /// Apply one step, then any timer it armed.
    pub fn step(&mut self, index: usize, step: &Step) -> StepReport {
        let actions = match step {
            Step::Input(event) => self.viewport.dispatch(event),
            Step::Control(control) => self.control(control),
        };
        self.report(index, step.kind(), &actions)
    }

    fn control(&mut self, control: &Control) -> Vec<Action> {
        match control {
            Control::ResizeContainer { width, height } => {
                self.container.set_size(Size::new(*width, *height));
                self.viewport.on_resize();
                Vec::new()
            }
            Control::ResizeContent { width, height } => {
                self.content.set_size(Size::new(*width, *height));
                self.viewport.on_resize();
                Vec::new()
            }
            Control::Tick { pad } => {
                if let (Some(hub), Some(pad)) = (&self.hub, pad) {
                    let state = GamepadState { index: 0, buttons: pad.buttons.clone(), axes: pad.axes.clone() };
                    hub.poll(&[state]);
                } else if pad.is_some() {
                    tracing::warn!("tick carries a pad reading but the scenario has no gamepad");
                }
                self.viewport.on_animation_frame()
            }
            Control::Center { x, y } => {
                self.viewport.center(CenterAxes { x: *x, y: *y });
                Vec::new()
            }
            Control::Scale { value } => {
                self.viewport.set_scale(*value);
                Vec::new()
            }
        }
    }

    fn report(&mut self, step: usize, kind: &'static str, actions: &[Action]) -> StepReport {
        let deferred = actions.contains(&Action::ScheduleDeferred);
        if deferred {
            self.viewport.run_deferred();
        }
        StepReport {
            step,
            kind,
            phase: self.viewport.phase(),
            position: self.viewport.position(),
            status: self.viewport.status(),
            actions: actions.iter().map(action_name).collect(),
            deferred,
            scrollbar: self.viewport.scrollbar(),
        }
    }
}

/// Replay every step of `scenario`; the first report is the mount.
#[must_use]
pub fn replay(scenario: &Scenario) -> Vec<StepReport> {
    let (mut replay, mounted) = Replay::mount(scenario);
    let mut reports = Vec::with_capacity(scenario.steps.len() + 1);
    reports.push(mounted);
    for (index, step) in scenario.steps.iter().enumerate() {
        reports.push(replay.step(index + 1, step));
    }
    reports
}
