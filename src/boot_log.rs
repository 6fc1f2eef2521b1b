//! Splash-screen terminal log shown while assets load.

use rand::Rng;
use std::collections::VecDeque;

pub const BOOT_MESSAGES: [&str; 10] = [
    "Initializing Neural Net...",
    "Allocating Memory Blocks...",
    "Connecting to Blockchain Node...",
    "Verifying Smart Contracts...",
    "Loading 3D Assets...",
    "Compiling Shaders...",
    "Establishing Uplink...",
    "Decrypting Secure Channels...",
    "Syncing with DAO Governance...",
    "System Ready.",
];

pub const BOOT_LOG_VISIBLE_LINES: usize = 5;
pub const BOOT_LOG_DELAY_MIN_MS: f64 = 150.0;
pub const BOOT_LOG_DELAY_SPAN_MS: f64 = 400.0;

/// Emits one message at a time and keeps only the newest few on screen.
#[derive(Clone, Debug)]
pub struct BootLog {
    messages: Vec<String>,
    next: usize,
    visible: VecDeque<String>,
    max_visible: usize,
}

impl Default for BootLog {
    fn default() -> Self {
        Self::new(BOOT_MESSAGES.iter().map(|m| m.to_string()).collect())
    }
}

impl BootLog {
    pub fn new(messages: Vec<String>) -> Self {
        Self {
            messages,
            next: 0,
            visible: VecDeque::with_capacity(BOOT_LOG_VISIBLE_LINES + 1),
            max_visible: BOOT_LOG_VISIBLE_LINES,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.messages.len()
    }

    /// Show the next message as a `> ` prompt line. Returns the line, or
    /// `None` once every message has been shown.
    pub fn advance(&mut self) -> Option<String> {
        let message = self.messages.get(self.next)?;
        self.next += 1;
        let line = format!("> {message}");
        self.visible.push_back(line.clone());
        while self.visible.len() > self.max_visible {
            self.visible.pop_front();
        }
        Some(line)
    }

    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(String::as_str)
    }

    /// Random pause before the next line.
    pub fn next_delay_ms<R: Rng>(rng: &mut R) -> f64 {
        BOOT_LOG_DELAY_MIN_MS + rng.gen::<f64>() * BOOT_LOG_DELAY_SPAN_MS
    }
}
