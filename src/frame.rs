use crate::core::TimelineEngine;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// On-demand `requestAnimationFrame` driver.
///
/// Frames are requested only when a timeline starts or a switch invalidates,
/// so an idle page draws nothing. Each frame steps the shared timeline engine
/// by the real elapsed time and, if anything changed, calls the host's render
/// callback once.
pub struct FrameLoop {
    state: Rc<FrameState>,
}

struct FrameState {
    timelines: Rc<RefCell<TimelineEngine>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
    scheduled: Cell<bool>,
    dirty: Cell<bool>,
    last_instant: Cell<Option<Instant>>,
    render: RefCell<Option<js_sys::Function>>,
}

impl FrameLoop {
    pub fn new(timelines: Rc<RefCell<TimelineEngine>>) -> Self {
        let state = Rc::new(FrameState {
            timelines: timelines.clone(),
            tick: RefCell::new(None),
            scheduled: Cell::new(false),
            dirty: Cell::new(false),
            last_instant: Cell::new(None),
            render: RefCell::new(None),
        });

        let weak = Rc::downgrade(&state);
        *state.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(s) = weak.upgrade() {
                s.frame();
            }
        }) as Box<dyn FnMut()>));

        let weak = Rc::downgrade(&state);
        timelines.borrow_mut().set_waker(Rc::new(move || {
            if let Some(s) = weak.upgrade() {
                s.request();
            }
        }));

        Self { state }
    }

    /// Render-invalidation signal handed to switches.
    pub fn invalidator(&self) -> Rc<dyn Fn()> {
        let weak: Weak<FrameState> = Rc::downgrade(&self.state);
        Rc::new(move || {
            if let Some(s) = weak.upgrade() {
                s.dirty.set(true);
                s.request();
            }
        })
    }

    pub fn set_render_callback(&self, render: Option<js_sys::Function>) {
        *self.state.render.borrow_mut() = render;
    }
}

impl FrameState {
    fn request(&self) {
        if self.scheduled.replace(true) {
            return;
        }
        if self.last_instant.get().is_none() {
            self.last_instant.set(Some(Instant::now()));
        }
        let requested = match (web::window(), self.tick.borrow().as_ref()) {
            (Some(w), Some(tick)) => w
                .request_animation_frame(tick.as_ref().unchecked_ref())
                .is_ok(),
            _ => false,
        };
        if !requested {
            self.scheduled.set(false);
        }
    }

    fn frame(&self) {
        self.scheduled.set(false);
        let now = Instant::now();
        let dt = self
            .last_instant
            .replace(Some(now))
            .map(|prev| now - prev)
            .unwrap_or_default();

        // Steps call back into `request`, which queues the next frame while anything moves
        self.timelines.borrow_mut().advance(dt);

        if self.dirty.replace(false) {
            if let Some(render) = self.render.borrow().as_ref() {
                if let Err(e) = render.call0(&JsValue::NULL) {
                    log::error!("[frame] render callback error: {:?}", e);
                }
            }
        }

        if !self.scheduled.get() {
            self.last_instant.set(None);
        }
    }
}
