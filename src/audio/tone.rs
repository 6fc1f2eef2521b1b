//! One-shot tone descriptions: oscillator sweep plus gain envelope.
//!
//! `frequency_at`/`gain_at` follow Web Audio automation semantics so the
//! envelopes can be checked without an audio device.

use crate::core::constants::{FREQUENCY_FLOOR, GAIN_FLOOR};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ramp {
    Linear,
    Exponential,
}

impl Ramp {
    fn interpolate(self, from: f32, to: f32, u: f64) -> f32 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Ramp::Linear => from + (to - from) * u as f32,
            Ramp::Exponential => (from as f64 * (to as f64 / from as f64).powf(u)) as f32,
        }
    }
}

/// Gain target reached at `time` seconds after the tone starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopePoint {
    pub time: f64,
    pub gain: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToneRequest {
    pub waveform: Waveform,
    pub start_frequency: f32,
    pub end_frequency: f32,
    pub ramp: Ramp,
    /// First point is set instantly, the rest are ramped to exponentially.
    pub gain_envelope: SmallVec<[EnvelopePoint; 4]>,
    pub duration: f64,
}

impl ToneRequest {
    /// Frequency sweep from `start` to `end` Hz over `duration` seconds at
    /// unit gain.
    pub fn sweep(start: f32, end: f32, ramp: Ramp, duration: f64) -> Self {
        Self {
            waveform: Waveform::Sine,
            start_frequency: start.max(FREQUENCY_FLOOR),
            end_frequency: end.max(FREQUENCY_FLOOR),
            ramp,
            gain_envelope: SmallVec::from_slice(&[EnvelopePoint {
                time: 0.0,
                gain: 1.0,
            }]),
            duration: duration.max(0.0),
        }
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Replace the gain envelope. Gains are floored above zero and points are
    /// kept in time order.
    pub fn with_envelope(mut self, points: &[(f64, f32)]) -> Self {
        let mut envelope: SmallVec<[EnvelopePoint; 4]> = points
            .iter()
            .map(|(time, gain)| EnvelopePoint {
                time: time.max(0.0),
                gain: gain.max(GAIN_FLOOR),
            })
            .collect();
        envelope.sort_by(|a, b| a.time.total_cmp(&b.time));
        if !envelope.is_empty() {
            self.gain_envelope = envelope;
        }
        self
    }

    /// Sine drop from 600 to 100 Hz, for clicks.
    pub fn click() -> Self {
        Self::sweep(600.0, 100.0, Ramp::Exponential, 0.15)
            .with_envelope(&[(0.0, 0.2), (0.1, 0.01)])
    }

    /// Short high sine chirp, for hovers.
    pub fn hover() -> Self {
        Self::sweep(2000.0, 2200.0, Ramp::Linear, 0.05).with_envelope(&[(0.0, 0.05), (0.05, 0.001)])
    }

    pub fn frequency_at(&self, t: f64) -> f32 {
        if self.duration <= 0.0 {
            return self.end_frequency;
        }
        self.ramp
            .interpolate(self.start_frequency, self.end_frequency, t / self.duration)
    }

    pub fn gain_at(&self, t: f64) -> f32 {
        let points = &self.gain_envelope;
        let Some(first) = points.first() else {
            return GAIN_FLOOR;
        };
        if t <= first.time {
            return first.gain;
        }
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= 0.0 {
                    return b.gain;
                }
                return Ramp::Exponential.interpolate(a.gain, b.gain, (t - a.time) / span);
            }
        }
        points[points.len() - 1].gain
    }
}

/// A request bound to a start time on the output's clock, in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledTone {
    pub request: ToneRequest,
    pub start: f64,
}

impl ScheduledTone {
    pub fn stop_time(&self) -> f64 {
        self.start + self.request.duration
    }
}
