//! Capabilities a switch is handed by its host.
//!
//! The browser build implements these over `setTimeout`, `spawn_local`, the
//! document body style and DOM pointer events. Tests implement them over a
//! manual clock and a local executor.

use futures::future::LocalBoxFuture;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub i32);

/// One-shot delayed callbacks.
pub trait TimerHost {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId;
    /// Clearing a timer that already fired (or never existed) is a no-op.
    fn clear_timeout(&self, id: TimerId);
}

/// Fire-and-forget local tasks. Nothing is `Send`; everything runs on one thread.
pub trait TaskSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStyle {
    Default,
    Pointer,
}

impl CursorStyle {
    pub fn as_css(&self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Pointer => "pointer",
        }
    }
}

/// Receives pointer-style hints when the hit region is hovered.
pub trait CursorSink {
    fn set_cursor(&self, style: CursorStyle);
}

/// The part of a pointer event a switch needs.
pub trait PointerContext {
    /// Keep the event from reaching handlers behind the switch.
    fn stop_propagation(&self);
}
