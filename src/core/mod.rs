pub mod clock;
pub mod constants;
pub mod context;
pub mod error;
pub mod signal;
pub mod viewport;

pub use clock::{Clock, FrameClock};
pub use context::{CameraView, SceneContext};
pub use error::{Result, SceneError};
pub use signal::{Signal, Subscription};
pub use viewport::{Viewport, ViewportMonitor};

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
