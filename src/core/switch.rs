//! Press/release controller for one key switch.
//!
//! A switch is either released or pressed. A press tilts the housing and
//! sinks the stem with a fast ease-out, strikes a random cue from its color's
//! pool and schedules a cutoff that pauses the cue halfway through. A release
//! (pointer up or pointer leaving the hit region) springs both back with an
//! elastic ease and replays the same cue from the start.
//!
//! Handlers are synchronous. The only asynchronous step, waiting on the
//! platform to accept a play request, is spawned and never awaited, so the
//! visual response is never held up by audio.

use super::constants::{
    NEUTRAL_TILT, PRESSED_TILT, PRESS_STEM_MS, PRESS_TILT_MS, RELEASE_ELASTIC_AMPLITUDE,
    RELEASE_ELASTIC_PERIOD, RELEASE_STEM_MS, RELEASE_TILT_MS, STEM_TRAVEL,
};
use super::cue::{cutoff_delay, Cue, CueLibrary, CuePool, PlayRequest, SwitchColor};
use super::easing::Easing;
use super::host::{CursorSink, CursorStyle, PointerContext, TaskSpawner, TimerHost, TimerId};
use super::scene::SwitchNodes;
use super::timeline::TimelineEngine;
use rand::RngCore;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub to: f32,
    pub duration: Duration,
    pub easing: Easing,
}

/// Housing and stem tweens for one direction of travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub housing: Tween,
    pub stem: Tween,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwitchMotion {
    pub press: Stroke,
    pub release: Stroke,
}

impl Default for SwitchMotion {
    fn default() -> Self {
        let spring = Easing::ElasticOut {
            amplitude: RELEASE_ELASTIC_AMPLITUDE,
            period: RELEASE_ELASTIC_PERIOD,
        };
        Self {
            press: Stroke {
                housing: Tween {
                    to: PRESSED_TILT,
                    duration: Duration::from_millis(PRESS_TILT_MS),
                    easing: Easing::CubicOut,
                },
                stem: Tween {
                    to: STEM_TRAVEL,
                    duration: Duration::from_millis(PRESS_STEM_MS),
                    easing: Easing::CubicOut,
                },
            },
            release: Stroke {
                housing: Tween {
                    to: NEUTRAL_TILT,
                    duration: Duration::from_millis(RELEASE_TILT_MS),
                    easing: spring,
                },
                stem: Tween {
                    to: 0.0,
                    duration: Duration::from_millis(RELEASE_STEM_MS),
                    easing: spring,
                },
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Scene nodes are not attached yet (model still loading, or unmounted).
    NodesUnresolved,
    AlreadyPressed,
    NotPressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    Pressed,
    Released,
    Ignored(IgnoreReason),
}

/// Everything a switch borrows from its surroundings.
pub struct SwitchWiring {
    pub cues: Rc<CueLibrary>,
    pub timelines: Rc<RefCell<TimelineEngine>>,
    pub timers: Rc<dyn TimerHost>,
    pub spawner: Rc<dyn TaskSpawner>,
    pub cursor: Rc<dyn CursorSink>,
    /// Requests one redraw from the host renderer.
    pub invalidate: Rc<dyn Fn()>,
    pub rng: Box<dyn RngCore>,
    pub motion: SwitchMotion,
}

pub struct Switch {
    color: SwitchColor,
    nodes: Option<SwitchNodes>,
    pool: Rc<CuePool>,
    timelines: Rc<RefCell<TimelineEngine>>,
    timers: Rc<dyn TimerHost>,
    spawner: Rc<dyn TaskSpawner>,
    cursor: Rc<dyn CursorSink>,
    invalidate: Rc<dyn Fn()>,
    rng: Box<dyn RngCore>,
    motion: SwitchMotion,
    pressed: bool,
    active_cue: Option<Weak<dyn Cue>>,
    // Shared with the pending timer callback so a fired cutoff can clear itself
    cutoff: Rc<Cell<Option<TimerId>>>,
}

impl Switch {
    pub fn new(color: SwitchColor, wiring: SwitchWiring) -> Self {
        let pool = wiring.cues.select(color).unwrap_or_else(|| {
            log::warn!("[switch] no cue pool for {}; presses will be silent", color);
            Rc::new(CuePool::default())
        });
        Self {
            color,
            nodes: None,
            pool,
            timelines: wiring.timelines,
            timers: wiring.timers,
            spawner: wiring.spawner,
            cursor: wiring.cursor,
            invalidate: wiring.invalidate,
            rng: wiring.rng,
            motion: wiring.motion,
            pressed: false,
            active_cue: None,
            cutoff: Rc::new(Cell::new(None)),
        }
    }

    pub fn color(&self) -> SwitchColor {
        self.color
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn nodes(&self) -> Option<&SwitchNodes> {
        self.nodes.as_ref()
    }

    pub fn pool(&self) -> &CuePool {
        &self.pool
    }

    /// The cue struck by the most recent press, if its pool still holds it.
    pub fn active_cue(&self) -> Option<Rc<dyn Cue>> {
        self.active_cue.as_ref().and_then(Weak::upgrade)
    }

    pub fn has_pending_cutoff(&self) -> bool {
        self.cutoff.get().is_some()
    }

    /// Bind the scene nodes once the model has loaded. Until then every
    /// pointer event is ignored.
    pub fn attach_nodes(&mut self, nodes: SwitchNodes) {
        if let Some(old) = self.nodes.replace(nodes) {
            self.stop_timelines(&old);
        }
    }

    /// Unbind the scene nodes, stopping their timelines and any pending cutoff.
    pub fn detach_nodes(&mut self) -> Option<SwitchNodes> {
        let nodes = self.nodes.take();
        if let Some(nodes) = &nodes {
            self.stop_timelines(nodes);
        }
        self.clear_cutoff();
        self.pressed = false;
        nodes
    }

    /// Tear down on scene unmount.
    pub fn unmount(&mut self) {
        if self.detach_nodes().is_some() {
            log::debug!("[switch] {} unmounted", self.color);
        }
    }

    pub fn pointer_down(&mut self, ev: &dyn PointerContext) -> SwitchOutcome {
        ev.stop_propagation();
        let Some(nodes) = &self.nodes else {
            return ignored(IgnoreReason::NodesUnresolved);
        };
        if self.pressed {
            return ignored(IgnoreReason::AlreadyPressed);
        }
        self.pressed = true;

        let stroke = self.motion.press;
        self.drive(nodes, &stroke);
        self.strike();
        log::debug!("[switch] {} pressed", self.color);
        SwitchOutcome::Pressed
    }

    pub fn pointer_up(&mut self, ev: &dyn PointerContext) -> SwitchOutcome {
        ev.stop_propagation();
        self.release()
    }

    pub fn pointer_leave(&mut self) -> SwitchOutcome {
        self.release()
    }

    pub fn pointer_over(&self) {
        self.cursor.set_cursor(CursorStyle::Pointer);
    }

    pub fn pointer_out(&self) {
        self.cursor.set_cursor(CursorStyle::Default);
    }

    fn release(&mut self) -> SwitchOutcome {
        let Some(nodes) = &self.nodes else {
            return ignored(IgnoreReason::NodesUnresolved);
        };
        if !self.pressed {
            return ignored(IgnoreReason::NotPressed);
        }
        self.pressed = false;

        let stroke = self.motion.release;
        self.drive(nodes, &stroke);
        self.clear_cutoff();
        self.replay();
        log::debug!("[switch] {} released", self.color);
        SwitchOutcome::Released
    }

    fn drive(&self, nodes: &SwitchNodes, stroke: &Stroke) {
        self.stop_timelines(nodes);
        let mut engine = self.timelines.borrow_mut();
        for (target, tween) in [
            (nodes.housing_tilt(), &stroke.housing),
            (nodes.stem_depth(), &stroke.stem),
        ] {
            engine.animate(
                target,
                tween.to,
                tween.duration,
                tween.easing,
                self.invalidate.clone(),
            );
        }
    }

    fn stop_timelines(&self, nodes: &SwitchNodes) {
        let mut engine = self.timelines.borrow_mut();
        engine.cancel_all_on(nodes.housing_tilt());
        engine.cancel_all_on(nodes.stem_depth());
    }

    /// Pick a cue, start it from zero and arm the cutoff. The timer is armed
    /// before the play request settles so a release can always cancel it.
    fn strike(&mut self) {
        let Some(cue) = self.pool.pick(self.rng.as_mut()).cloned() else {
            log::warn!("[audio] {} pool is empty", self.color);
            self.active_cue = None;
            return;
        };
        self.active_cue = Some(Rc::downgrade(&cue));
        cue.rewind();
        let request = cue.play();

        self.clear_cutoff();
        let delay = cutoff_delay(cue.duration_secs());
        let slot = self.cutoff.clone();
        let weak_cue = Rc::downgrade(&cue);
        let id = self.timers.set_timeout(
            delay,
            Box::new(move || {
                slot.set(None);
                if let Some(cue) = weak_cue.upgrade() {
                    cue.pause();
                }
            }),
        );
        self.cutoff.set(Some(id));

        self.spawner.spawn(Box::pin(report_playback(request)));
    }

    fn replay(&self) {
        let Some(cue) = self.active_cue() else {
            return;
        };
        cue.rewind();
        let request = cue.play();
        self.spawner.spawn(Box::pin(async move {
            if let Err(e) = request.await {
                log::debug!("[audio] release replay: {}", e);
            }
        }));
    }

    fn clear_cutoff(&self) {
        if let Some(id) = self.cutoff.take() {
            self.timers.clear_timeout(id);
        }
    }
}

async fn report_playback(request: PlayRequest) {
    if let Err(e) = request.await {
        log::warn!("[audio] play failed: {}", e);
    }
}

fn ignored(reason: IgnoreReason) -> SwitchOutcome {
    log::debug!("[switch] ignored pointer event: {:?}", reason);
    SwitchOutcome::Ignored(reason)
}
