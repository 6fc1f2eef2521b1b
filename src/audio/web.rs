use super::synth::AudioOutput;
use super::tone::{Ramp, ScheduledTone, Waveform};
use anyhow::anyhow;
use wasm_bindgen::JsValue;
use web_sys as web;

fn js_err(what: &'static str) -> impl Fn(JsValue) -> anyhow::Error {
    move |e| anyhow!("{what}: {:?}", e)
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx).map_err(js_err("GainNode"))?;
    g.gain().set_value(value);
    Ok(g)
}

/// Web Audio backend: every tone gets a fresh oscillator and gain node routed
/// into a shared master gain.
pub struct WebAudioOutput {
    audio_ctx: web::AudioContext,
    master_gain: web::GainNode,
}

impl WebAudioOutput {
    pub fn new() -> anyhow::Result<Self> {
        let audio_ctx = web::AudioContext::new().map_err(js_err("AudioContext"))?;
        let master_gain = create_gain(&audio_ctx, 1.0)?;
        master_gain
            .connect_with_audio_node(&audio_ctx.destination())
            .map_err(js_err("connect master"))?;
        Ok(Self {
            audio_ctx,
            master_gain,
        })
    }
}

impl AudioOutput for WebAudioOutput {
    fn current_time(&self) -> f64 {
        self.audio_ctx.current_time()
    }

    fn resume(&mut self) {
        if self.audio_ctx.state() == web::AudioContextState::Suspended {
            _ = self.audio_ctx.resume();
        }
    }

    fn set_master_gain(&mut self, gain: f32) {
        self.master_gain.gain().set_value(gain);
    }

    fn play(&mut self, tone: &ScheduledTone) -> anyhow::Result<()> {
        let req = &tone.request;
        let t0 = tone.start;
        let t1 = tone.stop_time();

        let src = web::OscillatorNode::new(&self.audio_ctx).map_err(js_err("OscillatorNode"))?;
        src.set_type(match req.waveform {
            Waveform::Sine => web::OscillatorType::Sine,
            Waveform::Square => web::OscillatorType::Square,
            Waveform::Sawtooth => web::OscillatorType::Sawtooth,
            Waveform::Triangle => web::OscillatorType::Triangle,
        });
        let freq = src.frequency();
        freq.set_value_at_time(req.start_frequency, t0)
            .map_err(js_err("frequency"))?;
        match req.ramp {
            Ramp::Linear => freq.linear_ramp_to_value_at_time(req.end_frequency, t1),
            Ramp::Exponential => freq.exponential_ramp_to_value_at_time(req.end_frequency, t1),
        }
        .map_err(js_err("frequency ramp"))?;

        let g = create_gain(&self.audio_ctx, 0.0)?;
        let mut points = req.gain_envelope.iter();
        if let Some(first) = points.next() {
            g.gain()
                .set_value_at_time(first.gain, t0 + first.time)
                .map_err(js_err("gain"))?;
        }
        for p in points {
            g.gain()
                .exponential_ramp_to_value_at_time(p.gain, t0 + p.time)
                .map_err(js_err("gain ramp"))?;
        }

        src.connect_with_audio_node(&g).map_err(js_err("connect"))?;
        g.connect_with_audio_node(&self.master_gain)
            .map_err(js_err("connect"))?;
        src.start_with_when(t0).map_err(js_err("start"))?;
        src.stop_with_when(t1).map_err(js_err("stop"))?;
        Ok(())
    }
}
