use crate::audio::{Interaction, Synthesizer};
use crate::constants::UNLOCK_EVENTS;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Resume audio on the first click, scroll, touch or key press, then remove
/// every unlock listener.
pub fn wire_audio_unlock(document: &web::Document, synth: Rc<RefCell<Synthesizer>>) {
    let target: web::EventTarget = document.clone().into();
    let callbacks: Rc<RefCell<Vec<(&'static str, js_sys::Function)>>> =
        Rc::new(RefCell::new(Vec::new()));

    for kind in UNLOCK_EVENTS {
        let synth = synth.clone();
        let callbacks_inner = callbacks.clone();
        let target_inner = target.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            let via = Interaction::from_event_type(&ev.type_()).unwrap_or(Interaction::Click);
            // A cue may already have unlocked the device inline.
            synth.borrow_mut().unlock(via);
            for (kind, f) in callbacks_inner.borrow().iter() {
                _ = target_inner.remove_event_listener_with_callback(kind, f);
            }
        }) as Box<dyn FnMut(web::Event)>);
        let f: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
        _ = target.add_event_listener_with_callback(kind, &f);
        callbacks.borrow_mut().push((kind, f));
        closure.forget();
    }
}
