// Shared fixtures for the host-side tests: a tiny binary glTF, an in-memory
// fetcher, a manual task queue and a recording audio output.

#![allow(dead_code)]

use neural_hangar::audio::{AudioOutput, ScheduledTone};
use neural_hangar::resources::{AssetFetcher, FetchFuture, LocalTask, ResourceEntry};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

/// One triangle in the XY plane: (0,0,0), (1,0,0), (0,1,0).
pub fn triangle_glb() -> Vec<u8> {
    let mut bin = Vec::new();
    for v in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
        for c in v {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    let json = format!(
        concat!(
            r#"{{"asset":{{"version":"2.0"}},"scene":0,"scenes":[{{"nodes":[0]}}],"#,
            r#""nodes":[{{"mesh":0}}],"#,
            r#""meshes":[{{"primitives":[{{"attributes":{{"POSITION":0}}}}]}}],"#,
            r#""accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","#,
            r#""min":[0.0,0.0,0.0],"max":[1.0,1.0,0.0]}}],"#,
            r#""bufferViews":[{{"buffer":0,"byteOffset":0,"byteLength":{len}}}],"#,
            r#""buffers":[{{"byteLength":{len}}}]}}"#
        ),
        len = bin.len()
    );

    let mut json = json.into_bytes();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin);
    out
}

/// Serves bytes by entry path; unknown paths fail like a 404.
#[derive(Default)]
pub struct FakeFetcher {
    files: HashMap<String, Vec<u8>>,
}

impl FakeFetcher {
    pub fn with(mut self, path: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(path.to_string(), bytes);
        self
    }
}

impl AssetFetcher for FakeFetcher {
    fn fetch(&self, entry: &ResourceEntry) -> FetchFuture {
        let result = self.files.get(&entry.path).cloned();
        let path = entry.path.clone();
        Box::pin(async move { result.ok_or_else(|| anyhow::anyhow!("HTTP 404 for {}", path)) })
    }
}

/// Collects spawned tasks so a test decides when and in which order they run.
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<Vec<LocalTask>>>,
}

impl TaskQueue {
    pub fn spawner(&self) -> impl Fn(LocalTask) {
        let tasks = self.tasks.clone();
        move |task| tasks.borrow_mut().push(task)
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run every queued task to completion, in spawn order.
    pub fn run_all(&self) {
        let tasks: Vec<LocalTask> = self.tasks.borrow_mut().drain(..).collect();
        for task in tasks {
            pollster::block_on(task);
        }
    }

    /// Run every queued task to completion, last spawned first.
    pub fn run_reversed(&self) {
        let tasks: Vec<LocalTask> = self.tasks.borrow_mut().drain(..).rev().collect();
        for task in tasks {
            pollster::block_on(task);
        }
    }
}

#[derive(Debug, Default)]
pub struct AudioLog {
    pub resumed: usize,
    pub master_gain: f32,
    pub played: Vec<ScheduledTone>,
}

/// Audio output whose log stays readable after the synthesizer takes it.
pub struct RecordingOutput {
    pub log: Rc<RefCell<AudioLog>>,
    pub now: f64,
    pub fail: bool,
}

impl RecordingOutput {
    pub fn new() -> (Self, Rc<RefCell<AudioLog>>) {
        let log = Rc::new(RefCell::new(AudioLog::default()));
        (
            Self {
                log: log.clone(),
                now: 1.5,
                fail: false,
            },
            log,
        )
    }

    pub fn failing() -> (Self, Rc<RefCell<AudioLog>>) {
        let (mut out, log) = Self::new();
        out.fail = true;
        (out, log)
    }
}

impl AudioOutput for RecordingOutput {
    fn current_time(&self) -> f64 {
        self.now
    }

    fn resume(&mut self) {
        self.log.borrow_mut().resumed += 1;
    }

    fn set_master_gain(&mut self, gain: f32) {
        self.log.borrow_mut().master_gain = gain;
    }

    fn play(&mut self, tone: &ScheduledTone) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("oscillator could not be created");
        }
        self.log.borrow_mut().played.push(tone.clone());
        Ok(())
    }
}

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
