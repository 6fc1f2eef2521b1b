use super::Subsystem;
use crate::config::StarfieldParams;
use crate::core::SceneContext;
use crate::scene::{GeometryDesc, MaterialDesc, NodeId, PointCloud};
use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use std::rc::Rc;

/// Randomly colored point cloud in a cube around the origin, slowly tumbling.
pub struct Starfield {
    node: NodeId,
    spin_x: f64,
    spin_y: f64,
    rate_x: f64,
    rate_y: f64,
}

impl Starfield {
    pub fn new<R: Rng>(ctx: &SceneContext, params: &StarfieldParams, rng: &mut R) -> Self {
        let mut cloud = PointCloud::default();
        for _ in 0..params.count {
            cloud.positions.push([
                (rng.gen::<f32>() - 0.5) * params.spread,
                (rng.gen::<f32>() - 0.5) * params.spread,
                (rng.gen::<f32>() - 0.5) * params.spread,
            ]);
            cloud.colors.push([rng.gen(), rng.gen(), rng.gen()]);
        }

        let mut scene = ctx.scene_mut();
        let geometry = scene.create_geometry(GeometryDesc::Points(Rc::new(cloud)));
        let material = scene.create_material(MaterialDesc::unlit(Vec3::ONE).with_opacity(0.8));
        let node = scene.add_mesh("starfield", geometry, material, None);
        Self {
            node,
            spin_x: 0.0,
            spin_y: 0.0,
            rate_x: params.spin_x_per_ms,
            rate_y: params.spin_y_per_ms,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Subsystem for Starfield {
    fn label(&self) -> &'static str {
        "stars"
    }

    fn update(&mut self, ctx: &SceneContext) {
        let delta = ctx.clock().delta;
        self.spin_y += delta * self.rate_y;
        self.spin_x += delta * self.rate_x;
        ctx.scene_mut().transform_mut(self.node).rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.spin_x as f32,
            self.spin_y as f32,
            0.0,
        );
    }
}
