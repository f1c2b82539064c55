use crate::core::{PointerContext, Switch};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

impl PointerContext for web::PointerEvent {
    fn stop_propagation(&self) {
        let ev: &web::Event = self.as_ref();
        ev.stop_propagation();
    }
}

/// Route an element's pointer events to a switch, for pages whose hit region
/// is a DOM element rather than a raycast target.
pub fn wire_switch_element(target: &web::EventTarget, switch: Rc<RefCell<Switch>>) {
    wire_pointerdown(target, switch.clone());
    wire_pointerup(target, switch.clone());
    wire_pointerleave(target, switch.clone());
    wire_hover(target, switch);
}

fn listen(target: &web::EventTarget, kind: &str, handler: impl FnMut(web::PointerEvent) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(target: &web::EventTarget, switch: Rc<RefCell<Switch>>) {
    listen(target, "pointerdown", move |ev: web::PointerEvent| {
        switch.borrow_mut().pointer_down(&ev);
        ev.prevent_default();
    });
}

fn wire_pointerup(target: &web::EventTarget, switch: Rc<RefCell<Switch>>) {
    listen(target, "pointerup", move |ev: web::PointerEvent| {
        switch.borrow_mut().pointer_up(&ev);
        ev.prevent_default();
    });
}

fn wire_pointerleave(target: &web::EventTarget, switch: Rc<RefCell<Switch>>) {
    listen(target, "pointerleave", move |_ev: web::PointerEvent| {
        switch.borrow_mut().pointer_leave();
    });
}

fn wire_hover(target: &web::EventTarget, switch: Rc<RefCell<Switch>>) {
    let over = switch.clone();
    listen(target, "pointerover", move |_ev: web::PointerEvent| {
        over.borrow().pointer_over();
    });
    listen(target, "pointerout", move |_ev: web::PointerEvent| {
        switch.borrow().pointer_out();
    });
}
