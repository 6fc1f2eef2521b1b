// Host-side tests for the UI tone synthesizer and its unlock gate.

mod common;

use common::{approx, RecordingOutput};
use neural_hangar::audio::{
    Cue, DeviceState, Interaction, Ramp, Synthesizer, ToneOutcome, ToneRequest, Waveform,
};

#[test]
fn starts_locked_with_master_gain_applied() {
    let (out, log) = RecordingOutput::new();
    let synth = Synthesizer::new(Box::new(out), 0.3);
    assert_eq!(synth.state(), DeviceState::Locked);
    assert_eq!(log.borrow().master_gain, 0.3);
    assert_eq!(log.borrow().resumed, 0);
}

#[test]
fn hover_is_dropped_while_locked() {
    let (out, log) = RecordingOutput::new();
    let mut synth = Synthesizer::new(Box::new(out), 0.3);
    assert_eq!(synth.play(Cue::Hover), ToneOutcome::Dropped);
    assert!(log.borrow().played.is_empty());
    assert_eq!(synth.state(), DeviceState::Locked);
}

#[test]
fn click_unlocks_and_plays() {
    let (out, log) = RecordingOutput::new();
    let mut synth = Synthesizer::new(Box::new(out), 0.3);
    assert_eq!(synth.play(Cue::Click), ToneOutcome::Played);
    assert_eq!(synth.state(), DeviceState::Unlocked);

    let log = log.borrow();
    assert_eq!(log.resumed, 1);
    assert_eq!(log.played.len(), 1);
    let tone = &log.played[0];
    assert_eq!(tone.start, 1.5);
    assert!((tone.stop_time() - 1.65).abs() < 1e-9);
    assert_eq!(tone.request.waveform, Waveform::Sine);
}

#[test]
fn custom_requests_keep_their_waveform() {
    let (out, log) = RecordingOutput::new();
    let mut synth = Synthesizer::new(Box::new(out), 0.3);
    let chirp = ToneRequest::hover().with_waveform(Waveform::Triangle);
    assert_eq!(synth.play_request(chirp.clone(), false), ToneOutcome::Dropped);
    assert_eq!(synth.play_request(chirp, true), ToneOutcome::Played);
    assert_eq!(log.borrow().played[0].request.waveform, Waveform::Triangle);
}

#[test]
fn hover_plays_after_unlock() {
    let (out, log) = RecordingOutput::new();
    let mut synth = Synthesizer::new(Box::new(out), 0.3);
    assert!(synth.unlock(Interaction::Scroll));
    assert!(!synth.unlock(Interaction::Click));
    assert_eq!(synth.play(Cue::Hover), ToneOutcome::Played);
    assert_eq!(synth.play(Cue::Hover), ToneOutcome::Played);

    let log = log.borrow();
    assert_eq!(log.resumed, 1);
    assert_eq!(log.played.len(), 2);
}

#[test]
fn output_failure_drops_the_tone() {
    let (out, log) = RecordingOutput::failing();
    let mut synth = Synthesizer::new(Box::new(out), 0.3);
    assert_eq!(synth.play(Cue::Click), ToneOutcome::Dropped);
    assert!(log.borrow().played.is_empty());
    // The device was still unlocked by the essential cue.
    assert_eq!(synth.state(), DeviceState::Unlocked);
}

#[test]
fn unlock_events_map_to_interactions() {
    assert_eq!(Interaction::from_event_type("click"), Some(Interaction::Click));
    assert_eq!(Interaction::from_event_type("wheel"), Some(Interaction::Scroll));
    assert_eq!(Interaction::from_event_type("scroll"), Some(Interaction::Scroll));
    assert_eq!(Interaction::from_event_type("touchstart"), Some(Interaction::Touch));
    assert_eq!(Interaction::from_event_type("keydown"), Some(Interaction::Key));
    assert_eq!(Interaction::from_event_type("mousemove"), None);
}

#[test]
fn click_curve() {
    let t = ToneRequest::click();
    assert_eq!(t.waveform, Waveform::Sine);
    assert_eq!(t.ramp, Ramp::Exponential);
    assert!(approx(t.frequency_at(0.0), 600.0, 1e-3));
    assert!(approx(t.frequency_at(0.15), 100.0, 1e-3));
    // Geometric midpoint of an exponential sweep.
    assert!(approx(t.frequency_at(0.075), (600.0f32 * 100.0).sqrt(), 0.05));

    assert!(approx(t.gain_at(0.0), 0.2, 1e-6));
    assert!(approx(t.gain_at(0.05), (0.2f32 * 0.01).sqrt(), 1e-4));
    assert!(approx(t.gain_at(0.1), 0.01, 1e-6));
    assert!(approx(t.gain_at(0.15), 0.01, 1e-6));
}

#[test]
fn hover_curve() {
    let t = ToneRequest::hover();
    assert_eq!(t.waveform, Waveform::Sine);
    assert_eq!(t.ramp, Ramp::Linear);
    assert!(approx(t.frequency_at(0.025), 2100.0, 1e-2));
    assert!(approx(t.frequency_at(1.0), 2200.0, 1e-2));
    assert!(approx(t.gain_at(0.0), 0.05, 1e-6));
    assert!(approx(t.gain_at(0.05), 0.001, 1e-6));
}

#[test]
fn envelope_is_floored_and_sorted() {
    let t = ToneRequest::sweep(0.0, 440.0, Ramp::Linear, 1.0).with_envelope(&[(0.5, 0.0), (0.0, 0.8)]);
    assert_eq!(t.start_frequency, 1.0);
    assert_eq!(t.gain_envelope[0].time, 0.0);
    assert_eq!(t.gain_envelope[0].gain, 0.8);
    assert!(t.gain_envelope[1].gain > 0.0);
    assert!(t.gain_at(0.5) > 0.0);
}

#[test]
fn zero_length_tone_sits_at_its_end_frequency() {
    let t = ToneRequest::sweep(300.0, 900.0, Ramp::Linear, 0.0);
    assert_eq!(t.frequency_at(0.0), 900.0);
}
