// Test doubles for the capabilities a switch is handed: a manual clock, a
// local executor, scripted cues, a cursor recorder and a pointer stub.

#![allow(dead_code)]

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use vapor_switch::core::*;

// ---------------- Timers ----------------

#[derive(Default)]
pub struct ManualTimers {
    now: Cell<Duration>,
    next_id: Cell<i32>,
    pending: RefCell<Vec<(TimerId, Duration, Box<dyn FnOnce()>)>>,
    fired: Cell<u32>,
}

impl ManualTimers {
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn fired(&self) -> u32 {
        self.fired.get()
    }

    /// Deadline of the earliest pending timer, relative to now.
    pub fn next_due_in(&self) -> Option<Duration> {
        let now = self.now.get();
        self.pending
            .borrow()
            .iter()
            .map(|(_, at, _)| at.saturating_sub(now))
            .min()
    }

    /// Move the clock forward, running every timer that comes due in deadline order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let due = {
                let mut pending = self.pending.borrow_mut();
                let next = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, at, _))| *at <= target)
                    .min_by_key(|(_, (_, at, _))| *at)
                    .map(|(i, _)| i);
                next.map(|i| pending.remove(i))
            };
            let Some((_, at, callback)) = due else {
                break;
            };
            self.now.set(at);
            self.fired.set(self.fired.get() + 1);
            callback();
        }
        self.now.set(target);
    }
}

impl TimerHost for ManualTimers {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.pending
            .borrow_mut()
            .push((id, self.now.get() + delay, callback));
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.pending.borrow_mut().retain(|(t, _, _)| *t != id);
    }
}

// ---------------- Tasks ----------------

pub struct PoolSpawner {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    spawned: Cell<u32>,
}

impl Default for PoolSpawner {
    fn default() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: RefCell::new(pool),
            spawner,
            spawned: Cell::new(0),
        }
    }
}

impl PoolSpawner {
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    pub fn spawned(&self) -> u32 {
        self.spawned.get()
    }
}

impl TaskSpawner for PoolSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawned.set(self.spawned.get() + 1);
        self.spawner.spawn_local(task).expect("local pool is alive");
    }
}

// ---------------- Cues ----------------

/// Scripted clip. Position only moves when a test says so.
pub struct TestCue {
    pub label: String,
    duration: f64,
    reject: Cell<bool>,
    position: Cell<f64>,
    playing: Cell<bool>,
    plays: Cell<u32>,
    pauses: Cell<u32>,
    play_positions: RefCell<Vec<f64>>,
}

impl TestCue {
    pub fn new(label: impl Into<String>, duration: f64) -> Self {
        Self {
            label: label.into(),
            duration,
            reject: Cell::new(false),
            position: Cell::new(0.0),
            playing: Cell::new(false),
            plays: Cell::new(0),
            pauses: Cell::new(0),
            play_positions: RefCell::new(Vec::new()),
        }
    }

    pub fn rejecting(self) -> Self {
        self.reject.set(true);
        self
    }

    pub fn set_position(&self, secs: f64) {
        self.position.set(secs);
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    pub fn plays(&self) -> u32 {
        self.plays.get()
    }

    pub fn pauses(&self) -> u32 {
        self.pauses.get()
    }

    /// Playback position at the moment of each play request.
    pub fn play_positions(&self) -> Vec<f64> {
        self.play_positions.borrow().clone()
    }
}

impl Cue for TestCue {
    fn rewind(&self) {
        self.position.set(0.0);
    }

    fn position_secs(&self) -> f64 {
        self.position.get()
    }

    fn duration_secs(&self) -> f64 {
        self.duration
    }

    fn play(&self) -> PlayRequest {
        self.plays.set(self.plays.get() + 1);
        self.play_positions.borrow_mut().push(self.position.get());
        let result = if self.reject.get() {
            Err(PlaybackError::Rejected("NotAllowedError".into()))
        } else {
            self.playing.set(true);
            Ok(())
        };
        Box::pin(futures::future::ready(result))
    }

    fn pause(&self) {
        self.pauses.set(self.pauses.get() + 1);
        self.playing.set(false);
    }

    fn is_paused(&self) -> bool {
        !self.playing.get()
    }
}

// ---------------- Cursor / pointer ----------------

#[derive(Default)]
pub struct RecordingCursor {
    pub history: RefCell<Vec<CursorStyle>>,
}

impl RecordingCursor {
    pub fn last(&self) -> Option<CursorStyle> {
        self.history.borrow().last().copied()
    }
}

impl CursorSink for RecordingCursor {
    fn set_cursor(&self, style: CursorStyle) {
        self.history.borrow_mut().push(style);
    }
}

#[derive(Default)]
pub struct FakePointer {
    stopped: Cell<bool>,
}

impl FakePointer {
    pub fn was_stopped(&self) -> bool {
        self.stopped.get()
    }
}

impl PointerContext for FakePointer {
    fn stop_propagation(&self) {
        self.stopped.set(true);
    }
}

// ---------------- Rig ----------------

/// A switch wired to test doubles. Every color gets a pool of three cues;
/// `cues` holds the ones belonging to the switch's own color.
pub struct Rig {
    pub switch: Switch,
    pub timers: Rc<ManualTimers>,
    pub tasks: Rc<PoolSpawner>,
    pub timelines: Rc<RefCell<TimelineEngine>>,
    pub cursor: Rc<RecordingCursor>,
    pub redraws: Rc<Cell<u32>>,
    pub cues: Vec<Rc<TestCue>>,
    pub other_cues: Vec<Rc<TestCue>>,
}

pub struct RigBuilder {
    color: SwitchColor,
    durations: [f64; 3],
    seed: u64,
    rejecting: bool,
    attach: bool,
}

pub fn rig(color: SwitchColor) -> RigBuilder {
    RigBuilder {
        color,
        durations: [f64::NAN; 3],
        seed: 7,
        rejecting: false,
        attach: true,
    }
}

impl RigBuilder {
    pub fn durations(mut self, secs: f64) -> Self {
        self.durations = [secs; 3];
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn rejecting(mut self) -> Self {
        self.rejecting = true;
        self
    }

    pub fn detached(mut self) -> Self {
        self.attach = false;
        self
    }

    pub fn build(self) -> Rig {
        let mut library = CueLibrary::new();
        let mut cues = Vec::new();
        let mut other_cues = Vec::new();
        for color in SwitchColor::ALL {
            let made: Vec<Rc<TestCue>> = (0..3)
                .map(|i| {
                    let cue = TestCue::new(format!("{}-{}", color, i + 1), self.durations[i]);
                    let cue = if self.rejecting { cue.rejecting() } else { cue };
                    Rc::new(cue)
                })
                .collect();
            library.insert(
                color,
                CuePool::new(made.iter().map(|c| c.clone() as Rc<dyn Cue>)),
            );
            if color == self.color {
                cues = made;
            } else {
                other_cues.extend(made);
            }
        }

        let timers = Rc::new(ManualTimers::default());
        let tasks = Rc::new(PoolSpawner::default());
        let timelines = Rc::new(RefCell::new(TimelineEngine::new()));
        let cursor = Rc::new(RecordingCursor::default());
        let redraws = Rc::new(Cell::new(0u32));
        let redraw_counter = redraws.clone();

        let mut switch = Switch::new(
            self.color,
            SwitchWiring {
                cues: Rc::new(library),
                timelines: timelines.clone(),
                timers: timers.clone(),
                spawner: tasks.clone(),
                cursor: cursor.clone(),
                invalidate: Rc::new(move || redraw_counter.set(redraw_counter.get() + 1)),
                rng: Box::new(StdRng::seed_from_u64(self.seed)),
                motion: SwitchMotion::default(),
            },
        );
        if self.attach {
            switch.attach_nodes(SwitchNodes::new());
        }

        Rig {
            switch,
            timers,
            tasks,
            timelines,
            cursor,
            redraws,
            cues,
            other_cues,
        }
    }
}

impl Rig {
    pub fn down(&mut self) -> SwitchOutcome {
        self.switch.pointer_down(&FakePointer::default())
    }

    pub fn up(&mut self) -> SwitchOutcome {
        self.switch.pointer_up(&FakePointer::default())
    }

    pub fn leave(&mut self) -> SwitchOutcome {
        self.switch.pointer_leave()
    }

    /// Let `ms` pass: fire due timers, step timelines at ~60 fps and drain tasks.
    pub fn wait_ms(&self, ms: u64) {
        let frame = Duration::from_millis(16);
        let mut left = Duration::from_millis(ms);
        while !left.is_zero() {
            let dt = left.min(frame);
            self.timers.advance(dt);
            self.timelines.borrow_mut().advance(dt);
            left -= dt;
        }
        self.tasks.run_until_stalled();
    }

    pub fn housing_tilt(&self) -> f32 {
        self.switch.nodes().map(|n| n.housing_tilt().get()).unwrap_or(f32::NAN)
    }

    pub fn stem_depth(&self) -> f32 {
        self.switch.nodes().map(|n| n.stem_depth().get()).unwrap_or(f32::NAN)
    }

    pub fn total_plays(&self) -> u32 {
        self.cues.iter().map(|c| c.plays()).sum()
    }

    /// The test cue the switch currently considers active.
    pub fn active(&self) -> Option<Rc<TestCue>> {
        let active = self.switch.active_cue()?;
        self.cues
            .iter()
            .find(|c| std::ptr::addr_eq(Rc::as_ptr(c), Rc::as_ptr(&active)))
            .cloned()
    }
}
