//! Cancellable property timelines.
//!
//! A timeline drives one [`Property`] from its value at start toward a target
//! value over a fixed duration. The engine is stepped externally with the
//! elapsed time since the previous step; it knows nothing about rendering and
//! only reports progress through each timeline's `on_step` callback.

use super::easing::Easing;
use super::scene::Property;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineHandle(u64);

struct Timeline {
    handle: TimelineHandle,
    target: Property,
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    on_step: Rc<dyn Fn()>,
}

impl Timeline {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }
}

#[derive(Default)]
pub struct TimelineEngine {
    timelines: Vec<Timeline>,
    next_id: u64,
    waker: Option<Rc<dyn Fn()>>,
}

impl TimelineEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook called whenever a timeline is added, so an idle driver can resume stepping.
    pub fn set_waker(&mut self, waker: Rc<dyn Fn()>) {
        self.waker = Some(waker);
    }

    /// Start driving `target` toward `to`. Any timeline already writing to
    /// `target` is replaced.
    pub fn animate(
        &mut self,
        target: &Property,
        to: f32,
        duration: Duration,
        easing: Easing,
        on_step: Rc<dyn Fn()>,
    ) -> TimelineHandle {
        self.cancel_all_on(target);
        let handle = TimelineHandle(self.next_id);
        self.next_id += 1;
        self.timelines.push(Timeline {
            handle,
            target: target.clone(),
            from: target.get(),
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
            on_step,
        });
        if let Some(wake) = &self.waker {
            wake();
        }
        handle
    }

    pub fn cancel(&mut self, handle: TimelineHandle) -> bool {
        let before = self.timelines.len();
        self.timelines.retain(|t| t.handle != handle);
        self.timelines.len() != before
    }

    /// Cancel every timeline writing to `target`. Returns how many were running.
    pub fn cancel_all_on(&mut self, target: &Property) -> usize {
        let before = self.timelines.len();
        self.timelines.retain(|t| !t.target.same_as(target));
        before - self.timelines.len()
    }

    pub fn is_running(&self, handle: TimelineHandle) -> bool {
        self.timelines.iter().any(|t| t.handle == handle)
    }

    pub fn is_animating(&self, target: &Property) -> bool {
        self.timelines.iter().any(|t| t.target.same_as(target))
    }

    pub fn active_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_idle(&self) -> bool {
        self.timelines.is_empty()
    }

    /// Step every timeline by `dt`, writing eased values and dropping finished ones.
    pub fn advance(&mut self, dt: Duration) {
        for t in &mut self.timelines {
            t.elapsed += dt;
            let p = t.progress();
            t.target.set(t.easing.interpolate(t.from, t.to, p));
            (t.on_step)();
        }
        self.timelines.retain(|t| t.progress() < 1.0);
    }
}
