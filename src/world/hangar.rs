//! Static hangar shell: floor, back and side walls, structural beams and
//! ceiling light bars with their point lights.

use super::Subsystem;
use crate::core::SceneContext;
use crate::scene::{GeometryDesc, Light, MaterialDesc, NodeId, Transform};
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

const FLOOR_Y: f32 = -15.0;
const CEILING_Y: f32 = 40.0;
const BAY_SPACING: f32 = 15.0;
const ACCENT: Vec3 = Vec3::new(0.267, 0.667, 1.0); // #44aaff

pub struct Hangar {
    root: NodeId,
}

impl Hangar {
    pub fn new(ctx: &SceneContext) -> Self {
        let mut scene = ctx.scene_mut();
        let root = scene.add_group("hangar", None);

        let floor_geo = scene.create_geometry(GeometryDesc::Plane {
            size: Vec2::splat(100.0),
        });
        let floor_mat = scene.create_material(MaterialDesc::lit(Vec3::splat(0.067)));
        let floor = scene.add_mesh("floor", floor_geo, floor_mat, Some(root));
        *scene.transform_mut(floor) = Transform::from_translation(Vec3::Y * FLOOR_Y)
            .with_rotation(Quat::from_rotation_x(-FRAC_PI_2));

        let wall_geo = scene.create_geometry(GeometryDesc::Plane {
            size: Vec2::new(100.0, 100.0),
        });
        let wall_mat = scene.create_material(MaterialDesc::lit(Vec3::splat(0.1)).with_opacity(0.7));
        let walls = [
            (Vec3::new(0.0, 35.0, -20.0), Quat::IDENTITY),
            (Vec3::new(-25.0, 35.0, 0.0), Quat::from_rotation_y(FRAC_PI_2)),
            (Vec3::new(25.0, 35.0, 0.0), Quat::from_rotation_y(-FRAC_PI_2)),
        ];
        for (position, rotation) in walls {
            let wall = scene.add_mesh("wall", wall_geo, wall_mat, Some(root));
            *scene.transform_mut(wall) = Transform::from_translation(position).with_rotation(rotation);
        }

        let beam_geo = scene.create_geometry(GeometryDesc::Box {
            size: Vec3::new(1.0, 100.0, 1.0),
        });
        let beam_mat = scene.create_material(MaterialDesc::lit(Vec3::splat(0.2)));
        let bar_geo = scene.create_geometry(GeometryDesc::Box {
            size: Vec3::new(0.5, 0.1, 20.0),
        });
        let bar_mat = scene.create_material(MaterialDesc::unlit(ACCENT));

        for i in -2..=2 {
            let offset = i as f32 * BAY_SPACING;
            for x in [-24.5, 24.5] {
                let beam = scene.add_mesh("beam", beam_geo, beam_mat, Some(root));
                *scene.transform_mut(beam) = Transform::from_translation(Vec3::new(x, 35.0, offset));
            }

            let bar = scene.add_mesh("light-bar", bar_geo, bar_mat, Some(root));
            *scene.transform_mut(bar) = Transform::from_translation(Vec3::new(offset, CEILING_Y, 0.0));
            let lamp = scene.add_light(
                "light-bar-lamp",
                Light::Point {
                    color: ACCENT,
                    intensity: 50.0,
                    range: 40.0,
                },
                Some(root),
            );
            *scene.transform_mut(lamp) =
                Transform::from_translation(Vec3::new(offset, CEILING_Y - 2.0, 0.0));
        }

        Self { root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }
}

impl Subsystem for Hangar {
    fn label(&self) -> &'static str {
        "hangar"
    }
}
