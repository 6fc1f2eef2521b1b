//! Procedural UI sound: tone descriptions, the unlock-aware synthesizer, and
//! the Web Audio backend.

mod synth;
mod tone;
#[cfg(target_arch = "wasm32")]
mod web;

pub use synth::{AudioOutput, Cue, DeviceState, Interaction, SilentOutput, Synthesizer, ToneOutcome};
pub use tone::{EnvelopePoint, Ramp, ScheduledTone, ToneRequest, Waveform};
#[cfg(target_arch = "wasm32")]
pub use web::WebAudioOutput;
