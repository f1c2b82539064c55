use crate::core::{
    HitBox, HoverEdge, HoverTracker, Switch, SwitchColor, SwitchNodes, SwitchOutcome, NEUTRAL_TILT,
};
use crate::events;
use glam::{Mat4, Vec3};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

/// One interactive switch, created by the host page per physical key.
///
/// The host forwards pointer events (or binds a DOM element), reads the
/// housing/stem matrices when its render callback fires, and calls
/// `dispose()` when the scene unmounts.
#[wasm_bindgen]
pub struct KeySwitch {
    inner: Rc<RefCell<Switch>>,
    hit_box: HitBox,
    hover: HoverTracker,
}

#[wasm_bindgen]
impl KeySwitch {
    #[wasm_bindgen(constructor)]
    pub fn new(color: &str) -> Result<KeySwitch, JsError> {
        let color: SwitchColor = color.parse()?;
        let switch = crate::with_stage(|stage| Switch::new(color, stage.wiring()));
        Ok(Self {
            inner: Rc::new(RefCell::new(switch)),
            hit_box: HitBox::default(),
            hover: HoverTracker::default(),
        })
    }

    /// Call once the switch model has loaded; pointer events are ignored until then.
    pub fn attach(&self) {
        self.inner.borrow_mut().attach_nodes(SwitchNodes::new());
    }

    pub fn dispose(&self) {
        self.inner.borrow_mut().unmount();
    }

    #[wasm_bindgen(js_name = bindElement)]
    pub fn bind_element(&self, el: &web::Element) {
        events::wire_switch_element(el.as_ref(), self.inner.clone());
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, ev: &web::PointerEvent) -> bool {
        self.inner.borrow_mut().pointer_down(ev) == SwitchOutcome::Pressed
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self, ev: &web::PointerEvent) -> bool {
        self.inner.borrow_mut().pointer_up(ev) == SwitchOutcome::Released
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self) -> bool {
        self.inner.borrow_mut().pointer_leave() == SwitchOutcome::Released
    }

    #[wasm_bindgen(js_name = pointerOver)]
    pub fn pointer_over(&self) {
        self.inner.borrow().pointer_over();
    }

    #[wasm_bindgen(js_name = pointerOut)]
    pub fn pointer_out(&self) {
        self.inner.borrow().pointer_out();
    }

    /// Hover tracking for hosts without their own raycaster. `model` is the
    /// switch's 4x4 column-major world matrix; `origin`/`dir` the pointer ray.
    /// Returns whether the ray hits the switch.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, model: &[f32], origin: &[f32], dir: &[f32]) -> bool {
        if model.len() != 16 || origin.len() != 3 || dir.len() != 3 {
            log::warn!("[switch] pointerMove expects a 16-float matrix and two 3-float vectors");
            return false;
        }
        let hit = self
            .hit_box
            .hit(
                Mat4::from_cols_slice(model),
                Vec3::from_slice(origin),
                Vec3::from_slice(dir),
            )
            .is_some();
        match self.hover.update(hit) {
            Some(HoverEdge::Enter) => self.pointer_over(),
            Some(HoverEdge::Leave) => {
                self.pointer_out();
                self.pointer_leave();
            }
            None => {}
        }
        hit
    }

    #[wasm_bindgen(getter)]
    pub fn color(&self) -> String {
        self.inner.borrow().color().as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = isPressed)]
    pub fn is_pressed(&self) -> bool {
        self.inner.borrow().is_pressed()
    }

    #[wasm_bindgen(getter, js_name = housingTilt)]
    pub fn housing_tilt(&self) -> f32 {
        self.inner
            .borrow()
            .nodes()
            .map_or(NEUTRAL_TILT, |n| n.housing_tilt().get())
    }

    #[wasm_bindgen(getter, js_name = stemDepth)]
    pub fn stem_depth(&self) -> f32 {
        self.inner
            .borrow()
            .nodes()
            .map_or(0.0, |n| n.stem_depth().get())
    }

    #[wasm_bindgen(js_name = housingMatrix)]
    pub fn housing_matrix(&self) -> Vec<f32> {
        let switch = self.inner.borrow();
        let m = switch
            .nodes()
            .map_or_else(|| SwitchNodes::new().housing_transform(), |n| n.housing_transform());
        m.to_cols_array().to_vec()
    }

    #[wasm_bindgen(js_name = stemMatrix)]
    pub fn stem_matrix(&self) -> Vec<f32> {
        let switch = self.inner.borrow();
        let m = switch
            .nodes()
            .map_or(Mat4::IDENTITY, |n| n.stem_transform());
        m.to_cols_array().to_vec()
    }
}

impl Drop for KeySwitch {
    fn drop(&mut self) {
        if let Ok(mut switch) = self.inner.try_borrow_mut() {
            switch.unmount();
        }
    }
}
