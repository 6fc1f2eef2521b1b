use crate::scene::TextImage;
use anyhow::anyhow;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn js_err(what: &'static str) -> impl Fn(JsValue) -> anyhow::Error {
    move |e| anyhow!("{what}: {:?}", e)
}

/// Draw the word white with a soft glow on a transparent 2D canvas and read
/// the pixels back as straight-alpha RGBA8.
pub fn rasterize(image: &TextImage) -> anyhow::Result<Vec<u8>> {
    let document = crate::dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err("create canvas"))?
        .dyn_into()
        .map_err(|_| anyhow!("canvas element has an unexpected type"))?;
    canvas.set_width(image.width);
    canvas.set_height(image.height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err("get_context"))?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| anyhow!("2d context has an unexpected type"))?;

    let (w, h) = (image.width as f64, image.height as f64);
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_shadow_color("white");
    ctx.set_shadow_blur(8.0);
    ctx.set_fill_style_str("white");
    ctx.set_font(image.font);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(&image.text, w * 0.5, h * 0.5)
        .map_err(js_err("fill_text"))?;

    let pixels = ctx
        .get_image_data(0.0, 0.0, w, h)
        .map_err(js_err("get_image_data"))?;
    Ok(pixels.data().0)
}
