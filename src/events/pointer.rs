use crate::dom;
use crate::orchestrator::Orchestrator;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

/// Horizontal pointer drags anywhere in the window rotate the central model.
pub fn wire_model_drag(window: &web::Window, orchestrator: Rc<RefCell<Orchestrator>>) {
    let last_x: Rc<Cell<Option<f32>>> = Rc::new(Cell::new(None));

    let down = last_x.clone();
    dom::listen(window, "pointerdown", move |ev: web::PointerEvent| {
        down.set(Some(ev.client_x() as f32));
    });

    let moving = last_x.clone();
    dom::listen(window, "pointermove", move |ev: web::PointerEvent| {
        let Some(prev) = moving.get() else {
            return;
        };
        let x = ev.client_x() as f32;
        moving.set(Some(x));
        if let Ok(o) = orchestrator.try_borrow() {
            o.drag_model(x - prev);
        }
    });

    for kind in ["pointerup", "pointercancel"] {
        let up = last_x.clone();
        dom::listen(window, kind, move |_: web::PointerEvent| up.set(None));
    }
}
