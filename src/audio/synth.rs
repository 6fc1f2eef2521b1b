use super::tone::{ScheduledTone, ToneRequest};
use crate::core::SceneError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceState {
    Locked,
    Unlocked,
}

/// User gestures that may unlock the audio device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    Click,
    Scroll,
    Touch,
    Key,
}

impl Interaction {
    pub fn from_event_type(kind: &str) -> Option<Self> {
        match kind {
            "click" => Some(Interaction::Click),
            "scroll" | "wheel" => Some(Interaction::Scroll),
            "touchstart" => Some(Interaction::Touch),
            "keydown" => Some(Interaction::Key),
            _ => None,
        }
    }
}

/// UI sound cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Click,
    Hover,
}

impl Cue {
    /// Essential cues unlock a locked device; the rest are dropped.
    pub fn is_essential(self) -> bool {
        matches!(self, Cue::Click)
    }

    pub fn request(self) -> ToneRequest {
        match self {
            Cue::Click => ToneRequest::click(),
            Cue::Hover => ToneRequest::hover(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneOutcome {
    Played,
    Dropped,
}

/// Sink for scheduled tones. The browser implementation drives an
/// `AudioContext`; tests and headless runs substitute their own.
pub trait AudioOutput {
    /// Output clock in seconds.
    fn current_time(&self) -> f64;
    fn resume(&mut self);
    fn set_master_gain(&mut self, gain: f32);
    fn play(&mut self, tone: &ScheduledTone) -> anyhow::Result<()>;
}

/// Output that only keeps time and counts what it was asked to play.
#[derive(Debug, Default)]
pub struct SilentOutput {
    pub now: f64,
    pub master_gain: f32,
    pub resumed: usize,
    pub played: Vec<ScheduledTone>,
}

impl AudioOutput for SilentOutput {
    fn current_time(&self) -> f64 {
        self.now
    }

    fn resume(&mut self) {
        self.resumed += 1;
    }

    fn set_master_gain(&mut self, gain: f32) {
        self.master_gain = gain;
    }

    fn play(&mut self, tone: &ScheduledTone) -> anyhow::Result<()> {
        self.played.push(tone.clone());
        Ok(())
    }
}

pub struct Synthesizer {
    output: Box<dyn AudioOutput>,
    state: DeviceState,
}

impl Synthesizer {
    /// Starts locked; browsers refuse audio before a user gesture.
    pub fn new(mut output: Box<dyn AudioOutput>, master_gain: f32) -> Self {
        output.set_master_gain(master_gain);
        Self {
            output,
            state: DeviceState::Locked,
        }
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn output(&self) -> &dyn AudioOutput {
        self.output.as_ref()
    }

    /// Resume the device on the first interaction. Returns true on the
    /// transition; later calls do nothing.
    pub fn unlock(&mut self, via: Interaction) -> bool {
        if self.state == DeviceState::Unlocked {
            return false;
        }
        self.output.resume();
        self.state = DeviceState::Unlocked;
        log::info!("[audio] unlocked by {:?}", via);
        true
    }

    pub fn play(&mut self, cue: Cue) -> ToneOutcome {
        self.play_request(cue.request(), cue.is_essential())
    }

    /// Schedule `request` at the output's current time. While locked only
    /// essential requests get through, resuming the device first.
    pub fn play_request(&mut self, request: ToneRequest, essential: bool) -> ToneOutcome {
        if self.state == DeviceState::Locked {
            if !essential {
                log::debug!("[audio] tone dropped: {}", SceneError::DeviceLocked);
                return ToneOutcome::Dropped;
            }
            self.output.resume();
            self.state = DeviceState::Unlocked;
        }
        let tone = ScheduledTone {
            start: self.output.current_time(),
            request,
        };
        match self.output.play(&tone) {
            Ok(()) => ToneOutcome::Played,
            Err(e) => {
                log::warn!("[audio] tone failed: {:#}", e);
                ToneOutcome::Dropped
            }
        }
    }
}
