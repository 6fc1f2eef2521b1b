//! Interactive hangar scene: a frame-driven orchestrator that gates scene
//! construction on asset loading, animates an orbiting labeled field around a
//! decoded model, cycles the sun color, and plays procedural UI tones.
//!
//! Everything outside the browser-only modules builds and tests on the host.

pub mod audio;
pub mod boot_log;
pub mod config;
pub mod core;
pub mod orchestrator;
pub mod resources;
pub mod scene;
pub mod world;

#[cfg(target_arch = "wasm32")]
mod constants;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod render;

pub use config::ExperienceConfig;
pub use orchestrator::Orchestrator;

#[cfg(target_arch = "wasm32")]
pub use web_entry::start;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use super::*;
    use crate::audio::WebAudioOutput;
    use crate::resources::LocalTask;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys as web;

    fn wire_viewport(canvas: &web::HtmlCanvasElement, orchestrator: &Rc<RefCell<Orchestrator>>) {
        let Some(window) = web::window() else {
            return;
        };
        let canvas = canvas.clone();
        let orchestrator = orchestrator.clone();
        dom::listen(&window, "resize", move |_: web::Event| {
            let viewport = dom::current_viewport();
            dom::sync_canvas_backing_size(&canvas, viewport);
            if let Ok(mut o) = orchestrator.try_borrow_mut() {
                o.observe_viewport(viewport.width, viewport.height, viewport.pixel_ratio);
            }
        });
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("neural-hangar starting");

        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    async fn init() -> anyhow::Result<()> {
        static STARTED: AtomicBool = AtomicBool::new(false);
        if STARTED.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let canvas: web::HtmlCanvasElement = document
            .query_selector(constants::CANVAS_SELECTOR)
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("missing {}", constants::CANVAS_SELECTOR))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

        let viewport = dom::current_viewport();
        dom::sync_canvas_backing_size(&canvas, viewport);

        overlay::start_boot_log(&document);

        let audio = WebAudioOutput::new()?;
        let orchestrator =
            Orchestrator::install(ExperienceConfig::standard(), viewport, Box::new(audio));

        {
            let o = orchestrator.borrow();
            overlay::wire_loader(&document, o.loader());
            events::wire_audio_unlock(&document, o.synth());
            events::wire_ui_cues(&document, o.synth());
        }
        events::wire_model_drag(&window, orchestrator.clone());
        wire_viewport(&canvas, &orchestrator);

        // The renderer is optional; without WebGPU the scene still animates.
        match render::GpuState::new(&canvas).await {
            Ok(gpu) => {
                orchestrator.borrow_mut().attach(Box::new(gpu));
            }
            Err(e) => log::error!("WebGPU init error: {:?}", e),
        }

        let spawn = |task: LocalTask| spawn_local(task);
        Orchestrator::load(&orchestrator, &fetch::HttpFetcher, &spawn);
        frame::start_loop(orchestrator);
        Ok(())
    }
}
