use crate::orchestrator::Orchestrator;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Tick the orchestrator once per animation frame until it is destroyed.
pub fn start_loop(orchestrator: Rc<RefCell<Orchestrator>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        {
            let Ok(mut o) = orchestrator.try_borrow_mut() else {
                // Busy in an event handler; try again next frame.
                request_frame(&tick_clone);
                return;
            };
            if o.is_destroyed() {
                return;
            }
            o.tick();
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
