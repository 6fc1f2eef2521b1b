use crate::core::constants::MODEL_ASSET;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Binary glTF (`.glb`) model.
    Model,
    Texture,
    CubeTexture,
    Audio,
    Binary,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceEntry {
    pub name: String,
    pub kind: ResourceKind,
    pub path: String,
}

impl ResourceEntry {
    pub fn new(name: &str, kind: ResourceKind, path: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            path: path.to_string(),
        }
    }
}

/// Fixed, ordered declaration of the assets to load. Cloning shares the list.
#[derive(Clone, Debug, Default)]
pub struct ResourceManifest {
    entries: Rc<[ResourceEntry]>,
}

impl ResourceManifest {
    pub fn new(entries: Vec<ResourceEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// The assets the landing scene ships with.
    pub fn standard() -> Self {
        Self::new(vec![ResourceEntry::new(
            MODEL_ASSET,
            ResourceKind::Model,
            "models/ai-model.glb",
        )])
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
