use super::manifest::{ResourceEntry, ResourceManifest};
use super::store::{Asset, LoadPhase, ResourceStore};
use crate::core::error::SceneError;
use crate::core::signal::Signal;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

pub type FetchFuture = Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>>>>;
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Transport for manifest entries (HTTP fetch on the web, fixtures in tests).
pub trait AssetFetcher {
    fn fetch(&self, entry: &ResourceEntry) -> FetchFuture;
}

/// Loads every manifest entry concurrently and reports progress.
///
/// Notifications: `progress(percent)` after each completion, then `ready`
/// exactly once when all entries are in. Any failure emits `failed` once and
/// the manifest never becomes ready.
pub struct ResourceLoader {
    manifest: ResourceManifest,
    store: Rc<RefCell<ResourceStore>>,
    completed: RefCell<Vec<bool>>,
    started: Cell<bool>,
    progress: Signal<f64>,
    ready: Signal<()>,
    failed: Signal<SceneError>,
}

impl ResourceLoader {
    pub fn new(manifest: ResourceManifest) -> Rc<Self> {
        let total = manifest.len();
        Rc::new(Self {
            manifest,
            store: Rc::new(RefCell::new(ResourceStore::new(total))),
            completed: RefCell::new(vec![false; total]),
            started: Cell::new(false),
            progress: Signal::new(),
            ready: Signal::new(),
            failed: Signal::new(),
        })
    }

    pub fn manifest(&self) -> &ResourceManifest {
        &self.manifest
    }

    pub fn store(&self) -> Rc<RefCell<ResourceStore>> {
        self.store.clone()
    }

    pub fn phase(&self) -> LoadPhase {
        self.store.borrow().phase()
    }

    pub fn progress_signal(&self) -> &Signal<f64> {
        &self.progress
    }

    pub fn ready_signal(&self) -> &Signal<()> {
        &self.ready
    }

    pub fn failed_signal(&self) -> &Signal<SceneError> {
        &self.failed
    }

    /// Issue one fetch per entry and hand each to `spawn`. Completion order is
    /// whatever order the transport resolves in.
    pub fn load(self: &Rc<Self>, fetcher: &dyn AssetFetcher, spawn: &dyn Fn(LocalTask)) {
        if self.started.replace(true) {
            log::warn!("[resources] load() called twice; ignoring");
            return;
        }
        let total = self.manifest.len();
        log::info!("[resources] loading {} asset(s)", total);
        if total == 0 {
            self.store.borrow_mut().freeze();
            self.ready.emit(&());
            return;
        }
        for (index, entry) in self.manifest.entries().iter().enumerate() {
            let request = fetcher.fetch(entry);
            let this = self.clone();
            spawn(Box::pin(async move {
                let result = request.await;
                this.complete(index, result);
            }));
        }
    }

    /// Record the outcome for manifest entry `index`.
    pub fn complete(&self, index: usize, result: anyhow::Result<Vec<u8>>) {
        let Some(entry) = self.manifest.entries().get(index) else {
            log::warn!("[resources] completion for unknown entry {}", index);
            return;
        };
        if self.phase() != LoadPhase::Loading {
            log::debug!(
                "[resources] ignoring `{}` after loading finished",
                entry.name
            );
            return;
        }
        if std::mem::replace(&mut self.completed.borrow_mut()[index], true) {
            log::warn!("[resources] duplicate completion for `{}`", entry.name);
            return;
        }

        let bytes = match result {
            Ok(bytes) => bytes,
            Err(e) => {
                let err = SceneError::load_failure(&entry.name, &entry.path, format!("{:#}", e));
                log::error!("[resources] {}", err);
                self.store.borrow_mut().fail();
                self.failed.emit(&err);
                return;
            }
        };

        let (percent, done) = {
            let mut store = self.store.borrow_mut();
            if let Err(e) = store.insert(&entry.name, Asset::new(entry.kind, bytes)) {
                log::error!("[resources] {}", e);
                return;
            }
            let done = store.loaded() == store.total();
            if done {
                store.freeze();
            }
            (store.percent(), done)
        };
        log::debug!("[resources] `{}` loaded ({:.0}%)", entry.name, percent);
        self.progress.emit(&percent);
        if done {
            log::info!("[resources] ready");
            self.ready.emit(&());
        }
    }
}
