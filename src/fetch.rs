use crate::resources::{AssetFetcher, FetchFuture, ResourceEntry};
use anyhow::anyhow;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Loads manifest entries over HTTP relative to the page.
pub struct HttpFetcher;

impl AssetFetcher for HttpFetcher {
    fn fetch(&self, entry: &ResourceEntry) -> FetchFuture {
        let path = entry.path.clone();
        Box::pin(async move { fetch_bytes(&path).await })
    }
}

async fn fetch_bytes(path: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow!("fetch {}: {:?}", path, e))?;
    let response: web::Response = response
        .dyn_into()
        .map_err(|e| anyhow!("fetch {}: not a Response: {:?}", path, e))?;
    if !response.ok() {
        return Err(anyhow!("fetch {}: HTTP {}", path, response.status()));
    }
    let buffer = JsFuture::from(
        response
            .array_buffer()
            .map_err(|e| anyhow!("fetch {}: {:?}", path, e))?,
    )
    .await
    .map_err(|e| anyhow!("fetch {}: {:?}", path, e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
