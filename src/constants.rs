// Page wiring: element ids, selectors and overlay timing for the web frontend.

pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const PROGRESS_BAR_SELECTOR: &str = ".progress-bar";
pub const LOADER_TEXT_ID: &str = "loader-text";
pub const LOADER_ID: &str = "loader";
pub const TERMINAL_LOGS_ID: &str = "terminal-logs";
pub const LOG_LINE_CLASS: &str = "log-line";

// Elements that play UI cues
pub const CUE_SELECTOR: &str = ".navbar a, .close-btn";

pub const LOADER_FADE_DELAY_MS: i32 = 1000; // after ready

// Gestures that unlock audio
pub const UNLOCK_EVENTS: [&str; 4] = ["click", "scroll", "touchstart", "keydown"];
