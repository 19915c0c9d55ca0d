//! Browser poller: reads `navigator.getGamepads()` once per animation frame
//! and feeds the snapshots to a [`GamepadHub`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Gamepad, GamepadButton, GamepadEvent, Window};

use crate::GamepadError;
use crate::hub::{GamepadHub, GamepadState};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Owns the `gamepadconnected`/`gamepaddisconnected` listeners and the
/// animation frame loop. Dropping it stops polling.
pub struct WebGamepadPoller {
    window: Window,
    frame: FrameCallback,
    frame_id: Rc<Cell<Option<i32>>>,
    on_connect: Closure<dyn FnMut(GamepadEvent)>,
    on_disconnect: Closure<dyn FnMut(GamepadEvent)>,
    stopped: bool,
}

impl WebGamepadPoller {
    /// Start listening for controllers. `after_poll` runs after every tick so
    /// consumers can drain whatever their listeners queued.
    ///
    /// # Errors
    ///
    /// Returns [`GamepadError::Browser`] when there is no window or the
    /// connection listeners cannot be installed.
    pub fn start<F>(hub: GamepadHub, after_poll: F) -> Result<Self, GamepadError>
    where
        F: FnMut() + 'static,
    {
        let window = web_sys::window().ok_or_else(|| GamepadError::Browser("no window".into()))?;
        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let frame_id = Rc::new(Cell::new(None));

        let tick = {
            let hub = hub.clone();
            let window = window.clone();
            let frame = Rc::clone(&frame);
            let frame_id = Rc::clone(&frame_id);
            let mut after_poll = after_poll;
            Closure::wrap(Box::new(move |_ts: f64| {
                frame_id.set(None);
                hub.poll(&read_gamepads(&window));
                after_poll();
                if hub.is_polling() {
                    request_frame(&window, &frame, &frame_id);
                }
            }) as Box<dyn FnMut(f64)>)
        };
        *frame.borrow_mut() = Some(tick);

        let on_connect = {
            let hub = hub.clone();
            let window = window.clone();
            let frame = Rc::clone(&frame);
            let frame_id = Rc::clone(&frame_id);
            Closure::wrap(Box::new(move |event: GamepadEvent| {
                if let Some(pad) = event.gamepad() {
                    hub.connect(pad.index() as usize);
                }
                if hub.is_polling() {
                    request_frame(&window, &frame, &frame_id);
                }
            }) as Box<dyn FnMut(GamepadEvent)>)
        };

        let on_disconnect = {
            let hub = hub.clone();
            Closure::wrap(Box::new(move |event: GamepadEvent| {
                if let Some(pad) = event.gamepad() {
                    hub.disconnect(pad.index() as usize);
                }
            }) as Box<dyn FnMut(GamepadEvent)>)
        };

        window
            .add_event_listener_with_callback("gamepadconnected", on_connect.as_ref().unchecked_ref())
            .map_err(|e| GamepadError::Browser(format!("{e:?}")))?;
        window
            .add_event_listener_with_callback("gamepaddisconnected", on_disconnect.as_ref().unchecked_ref())
            .map_err(|e| GamepadError::Browser(format!("{e:?}")))?;

        if hub.is_polling() {
            request_frame(&window, &frame, &frame_id);
        }

        Ok(Self { window, frame, frame_id, on_connect, on_disconnect, stopped: false })
    }

    /// Remove listeners and cancel the pending frame. Idempotent.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                tracing::warn!(error = ?e, "cancel_animation_frame failed");
            }
        }
        for (name, listener) in [("gamepadconnected", &self.on_connect), ("gamepaddisconnected", &self.on_disconnect)] {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            {
                tracing::warn!(event = name, error = ?e, "failed to remove gamepad listener");
            }
        }
        self.frame.borrow_mut().take();
    }
}

impl Drop for WebGamepadPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(window: &Window, frame: &FrameCallback, frame_id: &Rc<Cell<Option<i32>>>) {
    if frame_id.get().is_some() {
        return;
    }
    let holder = frame.borrow();
    let Some(callback) = holder.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => frame_id.set(Some(id)),
        Err(e) => tracing::warn!(error = ?e, "request_animation_frame failed; gamepad polling paused"),
    }
}

fn read_gamepads(window: &Window) -> Vec<GamepadState> {
    let pads = match window.navigator().get_gamepads() {
        Ok(pads) => pads,
        Err(e) => {
            tracing::warn!(error = ?e, "navigator.getGamepads failed");
            return Vec::new();
        }
    };

    pads.iter()
        .filter_map(|entry| entry.dyn_into::<Gamepad>().ok())
        .map(|pad| GamepadState {
            index: pad.index() as usize,
            buttons: pad
                .buttons()
                .iter()
                .map(|button| button.dyn_into::<GamepadButton>().is_ok_and(|b| b.pressed()))
                .collect(),
            axes: pad.axes().iter().map(|value| value.as_f64().unwrap_or(0.0)).collect(),
        })
        .collect()
}
