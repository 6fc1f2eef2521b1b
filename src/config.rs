//! Tunable parameters for the whole experience.
//!
//! Defaults come from `core::constants`; a front-end can override any group
//! before installing the orchestrator.

use crate::core::constants::*;
use crate::resources::ResourceManifest;
use crate::scene::Fog;
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct OrbitParams {
    pub count: usize,
    pub radius_min: f64,
    pub radius_span: f64,
    pub speed_min: f64,
    pub speed_span: f64,
    pub vertical_span: f64,
    pub spin_max: f32,
    pub body_radius: f32,
    pub words: Vec<String>,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            count: ORBIT_BODY_COUNT,
            radius_min: ORBIT_RADIUS_MIN,
            radius_span: ORBIT_RADIUS_SPAN,
            speed_min: ORBIT_SPEED_MIN,
            speed_span: ORBIT_SPEED_SPAN,
            vertical_span: ORBIT_VERTICAL_SPAN,
            spin_max: ORBIT_SPIN_MAX,
            body_radius: ORBIT_BODY_RADIUS,
            words: LABEL_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StarfieldParams {
    pub count: usize,
    pub spread: f32,
    pub spin_y_per_ms: f64,
    pub spin_x_per_ms: f64,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            count: STAR_COUNT,
            spread: STAR_SPREAD,
            spin_y_per_ms: STAR_SPIN_Y_PER_MS,
            spin_x_per_ms: STAR_SPIN_X_PER_MS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ModelParams {
    pub asset: String,
    pub spin_per_ms: f64,
    pub drag_rad_per_px: f32,
    pub scale_desktop: f32,
    pub scale_mobile: f32,
    pub y_desktop: f32,
    pub y_mobile: f32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            asset: MODEL_ASSET.to_string(),
            spin_per_ms: MODEL_SPIN_PER_MS,
            drag_rad_per_px: MODEL_DRAG_RAD_PER_PX,
            scale_desktop: MODEL_SCALE_DESKTOP,
            scale_mobile: MODEL_SCALE_MOBILE,
            y_desktop: MODEL_Y_DESKTOP,
            y_mobile: MODEL_Y_MOBILE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LightParams {
    pub palette: Vec<Vec3>,
    pub cycle_scale: f64,
    pub sun_intensity: f32,
    pub sun_position: Vec3,
    pub ambient_intensity: f32,
    pub fog: Option<Fog>,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            palette: SUN_PALETTE.iter().map(|c| Vec3::from_array(*c)).collect(),
            cycle_scale: COLOR_CYCLE_SCALE,
            sun_intensity: SUN_INTENSITY,
            sun_position: Vec3::from_array(SUN_POSITION),
            ambient_intensity: AMBIENT_INTENSITY,
            fog: Some(Fog {
                color: Vec3::from_array(FOG_COLOR),
                near: FOG_NEAR,
                far: FOG_FAR,
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CameraParams {
    pub eye: Vec3,
    pub target: Vec3,
    pub fovy_degrees: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 22.0),
            target: Vec3::ZERO,
            fovy_degrees: 35.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AudioParams {
    pub master_gain: f32,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            master_gain: MASTER_GAIN,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExperienceConfig {
    pub manifest: ResourceManifest,
    pub orbit: OrbitParams,
    pub stars: StarfieldParams,
    pub model: ModelParams,
    pub light: LightParams,
    pub camera: CameraParams,
    pub audio: AudioParams,
    /// Fixed RNG seed for reproducible layouts; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl ExperienceConfig {
    /// Shipping configuration: the standard manifest and entropy-seeded layout.
    pub fn standard() -> Self {
        Self {
            manifest: ResourceManifest::standard(),
            ..Self::default()
        }
    }
}
