use crate::boot_log::BootLog;
use crate::constants::{
    LOADER_FADE_DELAY_MS, LOADER_ID, LOADER_TEXT_ID, LOG_LINE_CLASS, PROGRESS_BAR_SELECTOR,
    TERMINAL_LOGS_ID,
};
use crate::resources::ResourceLoader;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Move the progress bar and loader text to `percent`.
pub fn show_progress(document: &web::Document, percent: f64) {
    if let Ok(Some(bar)) = document.query_selector(PROGRESS_BAR_SELECTOR) {
        if let Ok(bar) = bar.dyn_into::<web::HtmlElement>() {
            _ = bar.style().set_property("width", &format!("{}%", percent));
        }
    }
    if let Some(text) = document.get_element_by_id(LOADER_TEXT_ID) {
        text.set_text_content(Some(&format!("Neural Uplink: {}%", percent.round())));
    }
}

pub fn hide_loader(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADER_ID) {
        if let Ok(el) = el.dyn_into::<web::HtmlElement>() {
            let style = el.style();
            _ = style.set_property("opacity", "0");
            _ = style.set_property("visibility", "hidden");
        }
    }
}

fn set_timeout(delay_ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::once(f);
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms,
    );
    closure.forget();
}

/// Drive the splash overlay from loader notifications. The subscriptions
/// stay alive for the page's lifetime.
pub fn wire_loader(document: &web::Document, loader: &ResourceLoader) {
    let doc = document.clone();
    loader
        .progress_signal()
        .subscribe(move |percent| show_progress(&doc, *percent))
        .forget();
    let doc = document.clone();
    loader
        .ready_signal()
        .subscribe(move |_| {
            let doc = doc.clone();
            set_timeout(LOADER_FADE_DELAY_MS, move || hide_loader(&doc));
        })
        .forget();
}

fn append_line(document: &web::Document, container: &web::Element, line: &str) {
    let Ok(el) = document.create_element("div") else {
        return;
    };
    el.set_class_name(LOG_LINE_CLASS);
    el.set_text_content(Some(line));
    _ = container.append_child(&el);
    container.set_scroll_top(container.scroll_height());
    while container.child_element_count() as usize > crate::boot_log::BOOT_LOG_VISIBLE_LINES {
        match container.first_element_child() {
            Some(first) => first.remove(),
            None => break,
        }
    }
}

/// Print the boot log one line at a time with random pauses.
pub fn start_boot_log(document: &web::Document) {
    let Some(container) = document.get_element_by_id(TERMINAL_LOGS_ID) else {
        return;
    };
    let log = Rc::new(RefCell::new(BootLog::default()));
    step_boot_log(document.clone(), container, log);
}

fn step_boot_log(document: web::Document, container: web::Element, log: Rc<RefCell<BootLog>>) {
    let Some(line) = log.borrow_mut().advance() else {
        return;
    };
    append_line(&document, &container, &line);
    let delay = BootLog::next_delay_ms(&mut rand::thread_rng());
    set_timeout(delay as i32, move || step_boot_log(document, container, log));
}
