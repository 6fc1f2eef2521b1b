pub mod cues;
pub mod pointer;
pub mod unlock;

pub use cues::wire_ui_cues;
pub use pointer::wire_model_drag;
pub use unlock::wire_audio_unlock;
