use crate::core::{Cue, CueLibrary, PlayRequest, PlaybackError, CUE_VOLUME};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// A click sample backed by an `<audio>` element that is created once and
/// rewound for every play.
pub struct MediaCue {
    el: web::HtmlAudioElement,
}

impl MediaCue {
    pub fn load(url: &str) -> Result<Self, JsValue> {
        let el = web::HtmlAudioElement::new_with_src(url)?;
        el.set_volume(CUE_VOLUME);
        el.set_preload("auto");
        Ok(Self { el })
    }
}

impl Cue for MediaCue {
    fn rewind(&self) {
        self.el.set_current_time(0.0);
    }

    fn position_secs(&self) -> f64 {
        self.el.current_time()
    }

    fn duration_secs(&self) -> f64 {
        self.el.duration()
    }

    fn play(&self) -> PlayRequest {
        // play() starts (or refuses) synchronously; the promise only reports the outcome
        let promise = self.el.play();
        Box::pin(async move {
            let promise = promise.map_err(|e| PlaybackError::Rejected(format!("{:?}", e)))?;
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| PlaybackError::Rejected(format!("{:?}", e)))
        })
    }

    fn pause(&self) {
        _ = self.el.pause();
    }

    fn is_paused(&self) -> bool {
        self.el.paused()
    }
}

/// Create every color's `<audio>` elements. Clips that fail to construct are
/// logged and left out of their pool.
pub fn build_cue_library() -> CueLibrary {
    CueLibrary::load_with(|color, url| match MediaCue::load(url) {
        Ok(cue) => Some(Rc::new(cue) as Rc<dyn Cue>),
        Err(e) => {
            log::error!("[audio] {} cue {} error: {:?}", color, url, e);
            None
        }
    })
}
