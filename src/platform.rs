//! Browser implementations of the capabilities a switch is handed.

use crate::core::{CursorSink, CursorStyle, TaskSpawner, TimerHost, TimerId};
use crate::dom;
use futures::future::LocalBoxFuture;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `setTimeout` / `clearTimeout` on the window.
pub struct WindowTimers;

impl TimerHost for WindowTimers {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let Some(window) = web::window() else {
            log::error!("[timer] no window; cutoff not scheduled");
            return TimerId(0);
        };
        // Frees itself after running; a cleared timer leaks one small closure
        let cb = Closure::once_into_js(move || callback());
        let delay_ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms)
        {
            Ok(handle) => TimerId(handle),
            Err(e) => {
                log::error!("[timer] setTimeout error: {:?}", e);
                TimerId(0)
            }
        }
    }

    fn clear_timeout(&self, id: TimerId) {
        if let Some(window) = web::window() {
            window.clear_timeout_with_handle(id.0);
        }
    }
}

pub struct LocalSpawner;

impl TaskSpawner for LocalSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Writes the pointer hint to `document.body.style.cursor`.
pub struct BodyCursor;

impl CursorSink for BodyCursor {
    fn set_cursor(&self, style: CursorStyle) {
        dom::set_body_cursor(style.as_css());
    }
}
