//! Sun, ambient fill, fog, and the sun's continuous color cycle.

use super::Subsystem;
use crate::config::LightParams;
use crate::core::SceneContext;
use crate::scene::{Light, NodeId, Transform};
use glam::Vec3;
use smallvec::SmallVec;

/// Piecewise-linear walk around a closed palette. Continuous in time, and
/// periodic with a period of `palette.len() / scale` milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorCycle {
    palette: SmallVec<[Vec3; 4]>,
    scale: f64,
}

impl ColorCycle {
    /// `None` for an empty palette.
    pub fn new(palette: impl IntoIterator<Item = Vec3>, scale: f64) -> Option<Self> {
        let palette: SmallVec<[Vec3; 4]> = palette.into_iter().collect();
        if palette.is_empty() {
            return None;
        }
        Some(Self { palette, scale })
    }

    pub fn palette(&self) -> &[Vec3] {
        &self.palette
    }

    pub fn period_ms(&self) -> f64 {
        self.palette.len() as f64 / self.scale
    }

    pub fn sample(&self, elapsed_ms: f64) -> Vec3 {
        let k = self.palette.len();
        let t = (elapsed_ms * self.scale).max(0.0);
        let index = (t.floor() % k as f64) as usize;
        let next = (index + 1) % k;
        let alpha = t.fract() as f32;
        self.palette[index].lerp(self.palette[next], alpha)
    }
}

pub struct Environment {
    sun: NodeId,
    ambient: NodeId,
    cycle: Option<ColorCycle>,
}

impl Environment {
    pub fn new(ctx: &SceneContext, params: &LightParams) -> Self {
        let cycle = ColorCycle::new(params.palette.iter().copied(), params.cycle_scale);
        let start = cycle
            .as_ref()
            .map(|c| c.sample(ctx.clock().elapsed))
            .unwrap_or(Vec3::ONE);

        let mut scene = ctx.scene_mut();
        let sun = scene.add_light(
            "sun",
            Light::Directional {
                color: start,
                intensity: params.sun_intensity,
            },
            None,
        );
        *scene.transform_mut(sun) = Transform::from_translation(params.sun_position);
        let ambient = scene.add_light(
            "ambient",
            Light::Ambient {
                color: Vec3::ONE,
                intensity: params.ambient_intensity,
            },
            None,
        );
        scene.fog = params.fog;
        Self {
            sun,
            ambient,
            cycle,
        }
    }

    pub fn sun(&self) -> NodeId {
        self.sun
    }

    pub fn ambient(&self) -> NodeId {
        self.ambient
    }
}

impl Subsystem for Environment {
    fn label(&self) -> &'static str {
        "environment"
    }

    fn update(&mut self, ctx: &SceneContext) {
        let Some(cycle) = &self.cycle else {
            return;
        };
        let color = cycle.sample(ctx.clock().elapsed);
        if let Some(light) = ctx.scene_mut().light_mut(self.sun) {
            light.set_color(color);
        }
    }
}
