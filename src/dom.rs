use crate::core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Window metrics in CSS pixels, or the default viewport off-window.
pub fn current_viewport() -> Viewport {
    match web::window() {
        Some(w) => {
            let width = w
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let height = w
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            Viewport::new(width as u32, height as u32, w.device_pixel_ratio())
        }
        None => Viewport::default(),
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    let (w_px, h_px) = viewport.physical_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
}
