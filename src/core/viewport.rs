use super::constants::{MAX_PIXEL_RATIO, MOBILE_BREAKPOINT_PX};
use super::signal::Signal;

/// Window size in CSS pixels plus the clamped device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: if pixel_ratio > 0.0 {
                pixel_ratio.min(MAX_PIXEL_RATIO)
            } else {
                1.0
            },
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT_PX
    }

    /// Backing-store size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width as f64 * self.pixel_ratio) as u32;
        let h = (self.height as f64 * self.pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }
}

/// Tracks the window size and emits `resize` when it changes.
#[derive(Default)]
pub struct ViewportMonitor {
    current: Viewport,
    resize: Signal<Viewport>,
}

impl ViewportMonitor {
    pub fn new(initial: Viewport) -> Self {
        Self {
            current: initial,
            resize: Signal::new(),
        }
    }

    pub fn current(&self) -> Viewport {
        self.current
    }

    pub fn resize_signal(&self) -> &Signal<Viewport> {
        &self.resize
    }

    /// Record a new window size; returns whether anything changed.
    pub fn observe(&mut self, width: u32, height: u32, pixel_ratio: f64) -> bool {
        let next = Viewport::new(width, height, pixel_ratio);
        if next == self.current {
            return false;
        }
        self.current = next;
        self.resize.emit(&next);
        true
    }
}
