//! Asset manifest, the loaded-asset store and the async loader that fills it.

mod loader;
mod manifest;
mod store;

pub use loader::{AssetFetcher, FetchFuture, LocalTask, ResourceLoader};
pub use manifest::{ResourceEntry, ResourceKind, ResourceManifest};
pub use store::{Asset, LoadPhase, ResourceStore};
