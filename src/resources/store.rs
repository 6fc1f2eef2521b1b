use super::manifest::ResourceKind;
use crate::core::error::{Result, SceneError};
use fnv::FnvHashMap;
use std::rc::Rc;

/// Loaded asset handle. The bytes are shared, never copied per reader.
#[derive(Clone, Debug)]
pub struct Asset {
    pub kind: ResourceKind,
    pub bytes: Rc<[u8]>,
}

impl Asset {
    pub fn new(kind: ResourceKind, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            bytes: bytes.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    /// Terminal: every entry loaded, store frozen.
    Ready,
    /// Terminal: an entry failed, nothing more is accepted.
    Failed,
}

/// Manifest name → loaded asset, with `loaded <= total` counters.
#[derive(Debug)]
pub struct ResourceStore {
    items: FnvHashMap<String, Asset>,
    loaded: usize,
    total: usize,
    phase: LoadPhase,
}

impl ResourceStore {
    pub fn new(total: usize) -> Self {
        Self {
            items: FnvHashMap::default(),
            loaded: 0,
            total,
            phase: LoadPhase::Loading,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.items.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&Asset> {
        self.get(name)
            .ok_or_else(|| SceneError::MissingAsset(name.to_string()))
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        100.0 * self.loaded as f64 / self.total as f64
    }

    pub(crate) fn insert(&mut self, name: &str, asset: Asset) -> Result<usize> {
        if self.phase != LoadPhase::Loading || self.loaded >= self.total {
            return Err(SceneError::StoreFrozen(name.to_string()));
        }
        self.items.insert(name.to_string(), asset);
        self.loaded += 1;
        Ok(self.loaded)
    }

    pub(crate) fn freeze(&mut self) {
        self.phase = LoadPhase::Ready;
    }

    pub(crate) fn fail(&mut self) {
        self.phase = LoadPhase::Failed;
    }
}
