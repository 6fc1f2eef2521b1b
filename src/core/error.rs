/// Result alias carrying [`SceneError`].
pub type Result<T> = std::result::Result<T, SceneError>;

/// Failures the scene core can surface.
///
/// Accessing a visual subsystem before resources are ready has no variant: the
/// scene composition only exists once loading completed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// A manifest entry could not be fetched; fatal for the whole loading phase.
    #[error("failed to load `{name}` from {path}: {reason}")]
    LoadFailure {
        name: String,
        path: String,
        reason: String,
    },
    /// The resource store was written after `ready`.
    #[error("resource store is frozen; cannot insert `{0}`")]
    StoreFrozen(String),
    /// An asset the scene composition depends on is not in the store.
    #[error("asset `{0}` is not in the resource store")]
    MissingAsset(String),
    /// An asset was fetched but its contents could not be decoded.
    #[error("asset `{name}` could not be decoded: {reason}")]
    AssetDecode { name: String, reason: String },
    /// The audio device has not been unlocked by a user interaction yet.
    #[error("audio device is locked until the first user interaction")]
    DeviceLocked,
    /// A collaborator needed for one step was not available this tick.
    #[error("collaborator `{0}` is not available")]
    MissingCollaborator(&'static str),
}

impl SceneError {
    pub fn load_failure(name: &str, path: &str, reason: impl Into<String>) -> Self {
        Self::LoadFailure {
            name: name.to_string(),
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
