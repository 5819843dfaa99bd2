use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    window, AddEventListenerOptions, Element, Event, EventTarget, HtmlElement, ScrollBehavior,
    ScrollIntoViewOptions,
};
use yew::NodeRef;

use crate::{
    motion::Pose,
    scope::Disposable,
    shell::ScrollSurface,
    trigger::{Bounds, BoundsSource, Viewport},
};

const FALLBACK_VIEWPORT_HEIGHT: f64 = 720.0;

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn viewport() -> Viewport {
    let height = window()
        .and_then(|win| win.inner_height().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_HEIGHT);
    Viewport { height }
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

pub fn apply_pose(element: &HtmlElement, pose: Pose) {
    let style = element.style();
    let _ = style.set_property("transform", &pose.transform());
    let _ = style.set_property("opacity", &pose.css_opacity());
    let _ = style.set_property("filter", &pose.filter());
}

pub fn child_elements(parent: &Element) -> Vec<HtmlElement> {
    let children = parent.children();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .filter_map(|child| child.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Children of a rendered node; an unresolved ref has none.
pub fn children_of(node: &NodeRef) -> Vec<HtmlElement> {
    node.cast::<Element>()
        .map(|parent| child_elements(&parent))
        .unwrap_or_default()
}

pub fn scroll_to_section(id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Viewport-relative bounds of a live element.
pub struct ElementBounds(pub Element);

impl BoundsSource for ElementBounds {
    fn bounds(&self) -> Option<Bounds> {
        if !self.0.is_connected() {
            return None;
        }
        let rect = self.0.get_bounding_client_rect();
        Some(Bounds {
            top: rect.top(),
            bottom: rect.bottom(),
        })
    }
}

/// Locks scrolling by hiding overflow on `<body>`.
pub struct BodyScroll;

impl ScrollSurface for BodyScroll {
    fn set_scroll_enabled(&self, enabled: bool) {
        let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
            return;
        };
        let overflow = if enabled { "auto" } else { "hidden" };
        let _ = body.style().set_property("overflow", overflow);
    }
}

/// An event listener that is removed when disposed or dropped.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Option<Closure<dyn FnMut(Event)>>,
}

impl Listener {
    pub fn new(target: &EventTarget, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            kind,
            callback: Some(callback),
        }
    }

    /// Same as [`Listener::new`] but marked passive, for scroll and touch.
    pub fn passive(target: &EventTarget, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        );
        Self {
            target: target.clone(),
            kind,
            callback: Some(callback),
        }
    }
}

impl Disposable for Listener {
    fn dispose(&mut self) {
        if let Some(callback) = self.callback.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// A fire-once timer; disposing clears it if it has not fired yet.
pub struct TimerHandle {
    timeout: Option<Timeout>,
    fired: Rc<Cell<bool>>,
}

impl TimerHandle {
    pub fn once(millis: u32, callback: impl FnOnce() + 'static) -> Self {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let timeout = Timeout::new(millis, move || {
            flag.set(true);
            callback();
        });
        Self {
            timeout: Some(timeout),
            fired,
        }
    }
}

impl Disposable for TimerHandle {
    fn dispose(&mut self) {
        // Dropping a pending Timeout clears it.
        self.timeout.take();
    }

    fn is_spent(&self) -> bool {
        self.fired.get() || self.timeout.is_none()
    }
}

#[derive(Default)]
struct FrameState {
    request: Option<i32>,
    last_timestamp: Option<f64>,
    generation: u64,
    step: Option<Box<dyn FnMut(f64) -> bool>>,
    callback: Option<Closure<dyn FnMut(f64)>>,
}

/// A `requestAnimationFrame` loop. Each handle clone drives the same loop;
/// starting it again replaces the running step.
#[derive(Clone, Default)]
pub struct FrameLoop {
    state: Rc<RefCell<FrameState>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `step` once per frame with the seconds since the previous frame
    /// (zero on the first) until it returns `false` or the loop is stopped.
    pub fn start(&self, step: impl FnMut(f64) -> bool + 'static) {
        {
            let mut state = self.state.borrow_mut();
            cancel_request(&mut state);
            state.generation += 1;
            state.last_timestamp = None;
            state.step = Some(Box::new(step));
            if state.callback.is_none() {
                let weak = Rc::downgrade(&self.state);
                state.callback = Some(Closure::new(move |timestamp: f64| {
                    if let Some(state) = weak.upgrade() {
                        tick(&state, timestamp);
                    }
                }));
            }
        }
        request_frame(&self.state);
    }

    pub fn stop(&self) {
        let mut state = self.state.borrow_mut();
        cancel_request(&mut state);
        state.generation += 1;
        state.step = None;
    }
}

impl Disposable for FrameLoop {
    fn dispose(&mut self) {
        self.stop();
    }
}

fn cancel_request(state: &mut FrameState) {
    if let (Some(request), Some(win)) = (state.request.take(), window()) {
        let _ = win.cancel_animation_frame(request);
    }
}

fn request_frame(state: &Rc<RefCell<FrameState>>) {
    let mut inner = state.borrow_mut();
    let Some(win) = window() else {
        return;
    };
    let request = match inner.callback.as_ref() {
        Some(callback) => win
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok(),
        None => None,
    };
    inner.request = request;
}

fn tick(state: &Rc<RefCell<FrameState>>, timestamp: f64) {
    let (mut step, dt, generation) = {
        let mut inner = state.borrow_mut();
        inner.request = None;
        let dt = inner
            .last_timestamp
            .map_or(0.0, |last| ((timestamp - last) / 1_000.0).max(0.0));
        inner.last_timestamp = Some(timestamp);
        let Some(step) = inner.step.take() else {
            return;
        };
        (step, dt, inner.generation)
    };

    let keep_going = step(dt);

    // A start or stop issued from inside the step supersedes this one.
    let resume = {
        let mut inner = state.borrow_mut();
        if keep_going && inner.generation == generation {
            inner.step = Some(step);
            true
        } else {
            false
        }
    };
    if resume {
        request_frame(state);
    }
}
