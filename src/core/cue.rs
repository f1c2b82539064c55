//! Pre-loaded click cues, one small pool per switch color.

use super::constants::{CUES_PER_COLOR, CUTOFF_FALLBACK_MS};
use fnv::FnvHashMap;
use futures::future::LocalBoxFuture;
use rand::seq::SliceRandom;
use rand::RngCore;
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwitchColor {
    Red,
    Brown,
    Blue,
    Black,
}

impl SwitchColor {
    pub const ALL: [SwitchColor; 4] = [
        SwitchColor::Red,
        SwitchColor::Brown,
        SwitchColor::Blue,
        SwitchColor::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchColor::Red => "red",
            SwitchColor::Brown => "brown",
            SwitchColor::Blue => "blue",
            SwitchColor::Black => "black",
        }
    }

    /// Clip URLs for this color, in pool order.
    pub fn cue_sources(&self) -> Vec<String> {
        (1..=CUES_PER_COLOR)
            .map(|n| format!("/sounds/{}-{}.mp3", self.as_str(), n))
            .collect()
    }
}

impl fmt::Display for SwitchColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown switch color `{0}` (expected red, brown, blue or black)")]
pub struct ParseColorError(pub String);

impl FromStr for SwitchColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SwitchColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// The platform refused to start playback (autoplay policy, decode failure, ...)
    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// Resolves once the platform has started (or refused) playback.
pub type PlayRequest = LocalBoxFuture<'static, Result<(), PlaybackError>>;

/// A single playable clip. Implementations issue the play request as soon as
/// `play` is called; only its outcome is deferred.
pub trait Cue {
    fn rewind(&self);
    fn position_secs(&self) -> f64;
    /// NaN (or zero) until the clip's metadata has loaded.
    fn duration_secs(&self) -> f64;
    fn play(&self) -> PlayRequest;
    fn pause(&self);
    fn is_paused(&self) -> bool;
}

/// How long a press lets its cue ring before pausing it.
pub fn cutoff_delay(duration_secs: f64) -> Duration {
    if duration_secs.is_finite() && duration_secs > 0.0 {
        Duration::from_secs_f64(duration_secs / 2.0)
    } else {
        Duration::from_millis(CUTOFF_FALLBACK_MS)
    }
}

#[derive(Default)]
pub struct CuePool {
    cues: SmallVec<[Rc<dyn Cue>; CUES_PER_COLOR]>,
}

impl CuePool {
    pub fn new(cues: impl IntoIterator<Item = Rc<dyn Cue>>) -> Self {
        Self {
            cues: cues.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rc<dyn Cue>> {
        self.cues.get(index)
    }

    /// Uniformly random cue, or `None` for an empty pool.
    pub fn pick(&self, rng: &mut dyn RngCore) -> Option<&Rc<dyn Cue>> {
        self.cues.choose(rng)
    }
}

/// All cue pools of a page, built once and shared read-only by every switch.
#[derive(Default)]
pub struct CueLibrary {
    pools: FnvHashMap<SwitchColor, Rc<CuePool>>,
}

impl CueLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every color's pool with `load`, called once per clip URL.
    pub fn load_with(mut load: impl FnMut(SwitchColor, &str) -> Option<Rc<dyn Cue>>) -> Self {
        let mut library = Self::new();
        for color in SwitchColor::ALL {
            let cues: Vec<Rc<dyn Cue>> = color
                .cue_sources()
                .iter()
                .filter_map(|url| load(color, url))
                .collect();
            library.insert(color, CuePool::new(cues));
        }
        library
    }

    pub fn insert(&mut self, color: SwitchColor, pool: CuePool) {
        self.pools.insert(color, Rc::new(pool));
    }

    pub fn select(&self, color: SwitchColor) -> Option<Rc<CuePool>> {
        self.pools.get(&color).cloned()
    }
}
