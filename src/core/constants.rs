use std::f64::consts::TAU;

// Shared scene/audio tuning constants used by the core and the web frontend.

// Clock
pub const INITIAL_DELTA_MS: f64 = 16.0; // nominal frame before the first tick

// Viewport
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

// Orbiting labeled bodies
pub const ORBIT_BODY_COUNT: usize = 40;
pub const ORBIT_RADIUS_MIN: f64 = 4.0;
pub const ORBIT_RADIUS_SPAN: f64 = 8.0; // radius in [4, 12)
pub const ORBIT_PHASE_SPAN: f64 = TAU;
pub const ORBIT_SPEED_MIN: f64 = 0.0001; // rad per ms
pub const ORBIT_SPEED_SPAN: f64 = 0.0005; // |speed| in [0.0001, 0.0006)
pub const ORBIT_VERTICAL_SPAN: f64 = 20.0; // offset in [-10, 10)
pub const ORBIT_SPIN_MAX: f32 = 0.01; // rad per tick, per axis
pub const ORBIT_BODY_RADIUS: f32 = 0.1;
pub const LABEL_SIZE: [f32; 2] = [1.0, 0.25];
pub const LABEL_LIFT: f32 = 0.3;
pub const LABEL_IMAGE_SIZE: [u32; 2] = [256, 64];
pub const LABEL_FONT: &str = "bold 32px Outfit, Arial";
pub const LABEL_WORDS: [&str; 12] = [
    "NEURAL",
    "AUTONOMOUS",
    "SYNAPSE",
    "ADAPTIVE",
    "LOGIC",
    "INTELLIGENCE",
    "EVOLVE",
    "CORE",
    "AGENTS",
    "CODE",
    "LEARNING",
    "SYSTEM",
];

// Sun light color cycle
pub const COLOR_CYCLE_SCALE: f64 = 0.0005; // palette steps per elapsed ms
pub const SUN_PALETTE: [[f32; 3]; 3] = [
    [0.267, 0.667, 1.0], // #44aaff
    [1.0, 0.8, 0.0],     // #ffcc00
    [1.0, 0.2, 0.0],     // #ff3300
];
pub const SUN_INTENSITY: f32 = 6.0;
pub const SUN_POSITION: [f32; 3] = [3.5, 5.0, 5.0];
pub const AMBIENT_INTENSITY: f32 = 0.2;
pub const FOG_COLOR: [f32; 3] = [0.039, 0.039, 0.047]; // #0a0a0c
pub const FOG_NEAR: f32 = 10.0;
pub const FOG_FAR: f32 = 80.0;

// Starfield
pub const STAR_COUNT: usize = 2000;
pub const STAR_SPREAD: f32 = 50.0;
pub const STAR_SPIN_Y_PER_MS: f64 = 0.00005;
pub const STAR_SPIN_X_PER_MS: f64 = 0.00002;

// Central model
pub const MODEL_ASSET: &str = "aiModel";
pub const MODEL_SPIN_PER_MS: f64 = 0.0003;
pub const MODEL_SCALE_DESKTOP: f32 = 22.0;
pub const MODEL_SCALE_MOBILE: f32 = 12.0;
pub const MODEL_Y_DESKTOP: f32 = -20.0;
pub const MODEL_Y_MOBILE: f32 = -12.0;
pub const MODEL_DRAG_RAD_PER_PX: f32 = 0.005;

// Audio
pub const MASTER_GAIN: f32 = 0.3;
pub const GAIN_FLOOR: f32 = 1e-4; // exponential ramps cannot reach zero
pub const FREQUENCY_FLOOR: f32 = 1.0;
