//! DOM bindings: real elements, real listeners, real timers.
//!
//! [`WebViewport`] owns a [`Draggable`] over [`WebElement`]s and everything
//! that feeds it: mouse, touch and wheel listeners on the container, key
//! listeners on the document, a `ResizeObserver` on both elements, the
//! zero-delay timer behind deferred repositions and, optionally, a gamepad
//! poller. Dropping it detaches everything.

use std::cell::RefCell;
use std::rc::Rc;

use gamepad::web::WebGamepadPoller;
use gamepad::{ButtonMap, GamepadHub};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, ResizeObserver,
    TouchEvent, WheelEvent,
};

use crate::boundary::CenterAxes;
use crate::config::ViewportConfig;
use crate::draggable::{Action, Cursor, Draggable, ViewportStatus};
use crate::element::{Element, ElementRegistry, Rect, Size, StyleProjection};
use crate::error::{Role, ViewportError};
use crate::input::{Button, InputEvent, Key, Modifiers, Point, WheelDelta};
use crate::session::ElementIds;

// =============================================================
// Elements
// =============================================================

#[derive(Debug, Clone)]
pub struct WebElement(HtmlElement);

impl WebElement {
    #[must_use]
    pub fn html(&self) -> &HtmlElement {
        &self.0
    }
}

impl Element for WebElement {
    fn layout_size(&self) -> Size {
        Size::new(f64::from(self.0.offset_width()), f64::from(self.0.offset_height()))
    }

    fn bounding_box(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();
        Rect { x: rect.x(), y: rect.y(), width: rect.width(), height: rect.height() }
    }

    fn contains(&self, other: &Self) -> bool {
        self.0.contains(Some(other.0.as_ref()))
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }

    fn project(&self, style: &StyleProjection) {
        let css = self.0.style();
        for (property, value) in style.declarations() {
            if let Err(e) = css.set_property(property, &value) {
                tracing::warn!(property, error = ?e, "failed to write content style");
            }
        }
    }
}

/// Looks elements up with `document.getElementById`.
#[derive(Debug, Clone)]
pub struct WebDocument(Document);

impl WebDocument {
    /// # Errors
    ///
    /// Returns [`ViewportError::Browser`] outside a browser window.
    pub fn current() -> Result<Self, ViewportError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self)
            .ok_or_else(|| ViewportError::Browser("no document".into()))
    }
}

impl ElementRegistry for WebDocument {
    type Element = WebElement;

    fn element(&self, id: &str) -> Option<WebElement> {
        let element = self.0.get_element_by_id(id)?;
        match element.dyn_into::<HtmlElement>() {
            Ok(html) => Some(WebElement(html)),
            Err(_) => {
                tracing::warn!(id, "element is not an HTML element");
                None
            }
        }
    }
}

// =============================================================
// Viewport
// =============================================================

type Shared = Rc<RefCell<Draggable<WebElement>>>;

struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// A mounted viewport wired to the page.
#[wasm_bindgen]
pub struct WebViewport {
    viewport: Shared,
    container: HtmlElement,
    listeners: Vec<Listener>,
    observer: Option<ResizeObserver>,
    on_resize: Option<Closure<dyn FnMut(js_sys::Array)>>,
    poller: Option<WebGamepadPoller>,
    detached: bool,
}

impl WebViewport {
    /// Resolve both elements, run the first placement and start listening.
    ///
    /// # Errors
    ///
    /// [`ViewportError::MissingElement`] when either element is not in the
    /// document yet (the caller may retry on a later frame), or
    /// [`ViewportError::Browser`] when a listener or observer cannot be
    /// installed.
    pub fn attach(
        container_id: &str,
        content_id: &str,
        config: ViewportConfig,
        hub: Option<GamepadHub>,
    ) -> Result<Self, ViewportError> {
        let document = WebDocument::current()?;
        let container = document
            .element(container_id)
            .ok_or_else(|| ViewportError::MissingElement { role: Role::Container, id: container_id.to_owned() })?;
        let content = document
            .element(content_id)
            .ok_or_else(|| ViewportError::MissingElement { role: Role::Content, id: content_id.to_owned() })?;

        let mut draggable = Draggable::new(ElementIds::new(container_id, content_id), config);
        let actions = draggable.mount(&document, hub.as_ref());
        let viewport: Shared = Rc::new(RefCell::new(draggable));
        let container = container.0;

        let mut this = Self {
            viewport,
            container,
            listeners: Vec::new(),
            observer: None,
            on_resize: None,
            poller: None,
            detached: false,
        };
        apply(&this.viewport, &this.container, None, actions);

        this.listen_container()?;
        this.listen_document(&document.0)?;
        this.observe(&content)?;
        if let Some(hub) = hub {
            this.poll_gamepad(hub)?;
        }
        tracing::debug!(container = container_id, content = content_id, "web viewport attached");
        Ok(this)
    }

    #[must_use]
    pub fn status(&self) -> ViewportStatus {
        match self.viewport.try_borrow() {
            Ok(viewport) => viewport.status(),
            Err(_) => ViewportStatus::default(),
        }
    }

    /// Re-center on the requested axes.
    pub fn center_axes(&self, axes: CenterAxes) {
        match self.viewport.try_borrow_mut() {
            Ok(mut viewport) => viewport.center(axes),
            Err(_) => tracing::warn!("viewport busy; center skipped"),
        }
    }

    fn listen_container(&mut self) -> Result<(), ViewportError> {
        let target: EventTarget = self.container.clone().into();

        self.add(&target, "mousedown", false, |event| {
            let ev = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::MouseDown { button: Button::from_dom(ev.button()), at: client_point(ev) })
        })?;
        self.add(&target, "mousemove", false, |event| {
            let ev = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::MouseMove { at: client_point(ev) })
        })?;
        self.add(&target, "mouseup", false, |_| Some(InputEvent::MouseUp))?;
        self.add(&target, "mouseleave", false, |_| Some(InputEvent::MouseLeave))?;

        self.add(&target, "touchstart", false, |event| {
            let ev = event.dyn_ref::<TouchEvent>()?;
            Some(InputEvent::TouchStart { touches: touch_points(ev) })
        })?;
        self.add(&target, "touchmove", true, |event| {
            let ev = event.dyn_ref::<TouchEvent>()?;
            Some(InputEvent::TouchMove { touches: touch_points(ev) })
        })?;
        self.add(&target, "touchend", false, |_| Some(InputEvent::TouchEnd))?;

        self.add(&target, "wheel", false, |event| {
            let ev = event.dyn_ref::<WheelEvent>()?;
            Some(InputEvent::Wheel {
                delta: WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() },
                modifiers: Modifiers {
                    shift: ev.shift_key(),
                    ctrl: ev.ctrl_key(),
                    alt: ev.alt_key(),
                    meta: ev.meta_key(),
                },
            })
        })
    }

    fn listen_document(&mut self, document: &Document) -> Result<(), ViewportError> {
        let target: EventTarget = document.clone().into();
        self.add(&target, "keydown", false, |event| {
            let ev = event.dyn_ref::<KeyboardEvent>()?;
            Some(InputEvent::KeyDown { key: Key(ev.key()) })
        })?;
        self.add(&target, "keyup", false, |event| {
            let ev = event.dyn_ref::<KeyboardEvent>()?;
            Some(InputEvent::KeyUp { key: Key(ev.key()) })
        })
    }

    /// Install one listener that translates the DOM event and dispatches it.
    /// `active` listeners may call `preventDefault`, so they opt out of
    /// passive mode.
    fn add<F>(&mut self, target: &EventTarget, name: &'static str, active: bool, translate: F) -> Result<(), ViewportError>
    where
        F: Fn(&Event) -> Option<InputEvent> + 'static,
    {
        let viewport = Rc::clone(&self.viewport);
        let container = self.container.clone();
        let callback = Closure::wrap(Box::new(move |event: Event| {
            let Some(input) = translate(&event) else {
                return;
            };
            let actions = match viewport.try_borrow_mut() {
                Ok(mut viewport) => viewport.dispatch(&input),
                Err(_) => {
                    tracing::warn!(event = name, "viewport busy; event dropped");
                    return;
                }
            };
            apply(&viewport, &container, Some(&event), actions);
        }) as Box<dyn FnMut(Event)>);

        let installed = if active {
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                name,
                callback.as_ref().unchecked_ref(),
                &options,
            )
        } else {
            target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
        };
        installed.map_err(|e| ViewportError::Browser(format!("addEventListener({name}): {e:?}")))?;

        self.listeners.push(Listener { target: target.clone(), name, callback });
        Ok(())
    }

    fn observe(&mut self, content: &WebElement) -> Result<(), ViewportError> {
        let viewport = Rc::clone(&self.viewport);
        let callback = Closure::wrap(Box::new(move |_entries: js_sys::Array| match viewport.try_borrow_mut() {
            Ok(mut viewport) => viewport.on_resize(),
            Err(_) => tracing::warn!("viewport busy; resize skipped"),
        }) as Box<dyn FnMut(js_sys::Array)>);

        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|e| ViewportError::Browser(format!("ResizeObserver: {e:?}")))?;
        observer.observe(self.container.as_ref());
        observer.observe(content.html().as_ref());

        self.observer = Some(observer);
        self.on_resize = Some(callback);
        Ok(())
    }

    fn poll_gamepad(&mut self, hub: GamepadHub) -> Result<(), ViewportError> {
        let viewport = Rc::clone(&self.viewport);
        let container = self.container.clone();
        let poller = WebGamepadPoller::start(hub, move || {
            let actions = match viewport.try_borrow_mut() {
                Ok(mut viewport) => viewport.on_animation_frame(),
                Err(_) => return,
            };
            apply(&viewport, &container, None, actions);
        })
        .map_err(|e| ViewportError::Browser(e.to_string()))?;
        self.poller = Some(poller);
        Ok(())
    }
}

#[wasm_bindgen]
impl WebViewport {
    /// Remove every listener, stop observing and tear the viewport down.
    /// Safe to call more than once.
    pub fn detach(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;

        for listener in self.listeners.drain(..) {
            if let Err(e) = listener
                .target
                .remove_event_listener_with_callback(listener.name, listener.callback.as_ref().unchecked_ref())
            {
                tracing::warn!(event = listener.name, error = ?e, "failed to remove listener");
            }
        }
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.on_resize = None;
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }

        match self.viewport.try_borrow_mut() {
            Ok(mut viewport) => viewport.teardown(),
            Err(_) => tracing::warn!("viewport busy during detach; teardown skipped"),
        }
        set_cursor(&self.container, ViewportStatus::default());
        tracing::debug!("web viewport detached");
    }

    /// Center both axes.
    pub fn center(&self) {
        self.center_axes(CenterAxes::BOTH);
    }

    #[wasm_bindgen(js_name = setScale)]
    pub fn set_scale(&self, scale: f64) {
        match self.viewport.try_borrow_mut() {
            Ok(mut viewport) => viewport.set_scale(scale),
            Err(_) => tracing::warn!(scale, "viewport busy; scale skipped"),
        }
    }

    /// Current status as JSON (`{cursor, isPanning, panning}`).
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    #[wasm_bindgen(js_name = statusJson)]
    pub fn status_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.status()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Drop for WebViewport {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Attach a viewport from JavaScript. `config` is a JSON
/// [`ViewportConfig`]; `gamepad` enables the standard controller layout.
///
/// # Errors
///
/// Rejects malformed config and missing elements.
#[wasm_bindgen(js_name = attachViewport)]
pub fn attach_viewport(container_id: &str, content_id: &str, config: &str, gamepad: bool) -> Result<WebViewport, JsValue> {
    let config = ViewportConfig::from_json(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let hub = gamepad.then(|| GamepadHub::new(ButtonMap::default()));
    WebViewport::attach(container_id, content_id, config, hub).map_err(|e| JsValue::from_str(&e.to_string()))
}

// =============================================================
// Helpers
// =============================================================

fn apply(viewport: &Shared, container: &HtmlElement, event: Option<&Event>, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::PreventDefault => {
                if let Some(event) = event {
                    event.prevent_default();
                }
            }
            Action::ScheduleDeferred => {
                let viewport = Rc::clone(viewport);
                Timeout::new(0, move || match viewport.try_borrow_mut() {
                    Ok(mut viewport) => viewport.run_deferred(),
                    Err(_) => tracing::warn!("viewport busy; deferred reposition skipped"),
                })
                .forget();
            }
            Action::StatusChanged(status) => set_cursor(container, status),
        }
    }
}

fn set_cursor(container: &HtmlElement, status: ViewportStatus) {
    let cursor = status.cursor.map_or("", Cursor::css);
    if let Err(e) = container.style().set_property("cursor", cursor) {
        tracing::warn!(error = ?e, "failed to set container cursor");
    }
}

fn client_point(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn touch_points(ev: &TouchEvent) -> Vec<Point> {
    let list = ev.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|touch| Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
        .collect()
}
