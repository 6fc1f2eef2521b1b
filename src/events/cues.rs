use crate::audio::{Cue, Synthesizer};
use crate::constants::CUE_SELECTOR;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Hover and click tones on navigation links and close buttons.
pub fn wire_ui_cues(document: &web::Document, synth: Rc<RefCell<Synthesizer>>) {
    let Ok(nodes) = document.query_selector_all(CUE_SELECTOR) else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(node) = nodes.get(i) else {
            continue;
        };
        let synth_hover = synth.clone();
        dom::listen(&node, "mouseenter", move |_: web::MouseEvent| {
            synth_hover.borrow_mut().play(Cue::Hover);
        });
        let synth_click = synth.clone();
        dom::listen(&node, "click", move |_: web::MouseEvent| {
            synth_click.borrow_mut().play(Cue::Click);
        });
    }
    log::debug!("[events] cues wired on {} elements", nodes.length());
}
