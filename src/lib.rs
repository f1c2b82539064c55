//! Interactive mechanical key switch for a product page.
//!
//! `core` holds the platform-independent press/release controller and its
//! collaborators and builds everywhere. The remaining modules adapt it to the
//! browser and only exist on `wasm32`.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod checkout;
#[cfg(target_arch = "wasm32")]
mod constants;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod key_switch;
#[cfg(target_arch = "wasm32")]
mod platform;

#[cfg(target_arch = "wasm32")]
pub use key_switch::KeySwitch;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::core::{CueLibrary, SwitchColor, SwitchMotion, SwitchWiring, TimelineEngine};
    use crate::{audio, checkout, constants, dom, frame, platform};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    /// Page-wide state shared by every switch: one cue library, one timeline
    /// engine and the frame loop that steps it.
    pub(crate) struct Stage {
        cues: Rc<CueLibrary>,
        timelines: Rc<RefCell<TimelineEngine>>,
        frames: frame::FrameLoop,
        timers: Rc<platform::WindowTimers>,
        spawner: Rc<platform::LocalSpawner>,
        cursor: Rc<platform::BodyCursor>,
    }

    impl Stage {
        fn new() -> Self {
            let timelines = Rc::new(RefCell::new(TimelineEngine::new()));
            Self {
                cues: Rc::new(audio::build_cue_library()),
                frames: frame::FrameLoop::new(timelines.clone()),
                timelines,
                timers: Rc::new(platform::WindowTimers),
                spawner: Rc::new(platform::LocalSpawner),
                cursor: Rc::new(platform::BodyCursor),
            }
        }

        pub(crate) fn wiring(&self) -> SwitchWiring {
            SwitchWiring {
                cues: self.cues.clone(),
                timelines: self.timelines.clone(),
                timers: self.timers.clone(),
                spawner: self.spawner.clone(),
                cursor: self.cursor.clone(),
                invalidate: self.frames.invalidator(),
                rng: Box::new(StdRng::from_entropy()),
                motion: SwitchMotion::default(),
            }
        }
    }

    thread_local! {
        static STAGE: Stage = Stage::new();
    }

    pub(crate) fn with_stage<R>(f: impl FnOnce(&Stage) -> R) -> R {
        STAGE.with(f)
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("vapor-switch starting");

        if let Err(e) = init() {
            log::error!("init error: {:?}", e);
        }
        Ok(())
    }

    fn init() -> anyhow::Result<()> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

        // Build the cue pools now so clips start loading before the first press
        with_stage(|stage| {
            let loaded = SwitchColor::ALL
                .iter()
                .filter_map(|c| stage.cues.select(*c))
                .map(|pool| pool.len())
                .sum::<usize>();
            log::info!("[audio] {} cues preloaded", loaded);
        });

        if !dom::add_click_listener(&document, constants::BUY_BUTTON_ID, checkout::purchase) {
            log::info!(
                "[checkout] no #{} on page; call checkout() to start a purchase",
                constants::BUY_BUTTON_ID
            );
        }
        Ok(())
    }

    /// Register the host's draw function. It is called at most once per
    /// animation frame, and only while a switch is moving.
    #[wasm_bindgen(js_name = setRenderCallback)]
    pub fn set_render_callback(render: Option<js_sys::Function>) {
        with_stage(|stage| stage.frames.set_render_callback(render));
    }

    /// Start a purchase: POST to the checkout endpoint and follow its redirect.
    #[wasm_bindgen]
    pub fn checkout() {
        checkout::purchase();
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use web_entry::with_stage;
