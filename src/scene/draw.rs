//! Flattens the scene graph into instanced draw batches plus a lighting
//! summary, ready for upload. Pure data; the GPU side lives in `render`.

use super::gpu::{GeometryId, MaterialId, TextureId};
use super::graph::{Content, Fog, Light, SceneGraph};
use glam::{Mat4, Vec3};
use std::collections::BTreeMap;

pub const MAX_POINT_LIGHTS: usize = 8;

/// Draw order: opaque first, then blended triangles, then points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pass {
    Opaque,
    Transparent,
    Points,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    /// rgb tint, alpha = opacity
    pub color: [f32; 4],
    /// rgb emissive, w = 1 for unlit
    pub emissive: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BatchKey {
    pub pass: Pass,
    pub geometry: GeometryId,
    pub material: MaterialId,
}

#[derive(Clone, Debug)]
pub struct Batch {
    pub key: BatchKey,
    /// Color map of the batch material, if any.
    pub map: Option<TextureId>,
    /// Range into [`DrawList::instances`].
    pub first: u32,
    pub count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub radiance: Vec3,
    pub range: f32,
}

#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub instances: Vec<InstanceRaw>,
    pub batches: Vec<Batch>,
    /// Unit vector toward the sun and its radiance.
    pub sun: Option<(Vec3, Vec3)>,
    pub ambient: Vec3,
    pub points: Vec<PointLight>,
    pub fog: Option<Fog>,
}

impl DrawList {
    /// Walk visible nodes. Meshes referencing disposed resources are skipped.
    pub fn collect(scene: &SceneGraph) -> Self {
        let mut grouped: BTreeMap<BatchKey, (Option<TextureId>, Vec<InstanceRaw>)> =
            BTreeMap::new();
        let mut list = DrawList {
            fog: scene.fog,
            ..Default::default()
        };
        let gpu = scene.gpu();

        scene.traverse(|_, node, world| match node.content {
            Content::Group => {}
            Content::Mesh(mesh) => {
                let (Some(geometry), Some(material)) =
                    (gpu.geometry(mesh.geometry), gpu.material(mesh.material))
                else {
                    return;
                };
                if geometry.is_disposed() || material.is_disposed() {
                    return;
                }
                let m = &material.desc;
                let pass = if geometry.desc.is_points() {
                    Pass::Points
                } else if m.is_transparent() {
                    Pass::Transparent
                } else {
                    Pass::Opaque
                };
                grouped
                    .entry(BatchKey {
                        pass,
                        geometry: mesh.geometry,
                        material: mesh.material,
                    })
                    .or_insert_with(|| (m.map, Vec::new()))
                    .1
                    .push(InstanceRaw {
                        model: world.to_cols_array_2d(),
                        color: m.color.extend(m.opacity).to_array(),
                        emissive: m.emissive.extend(if m.unlit { 1.0 } else { 0.0 }).to_array(),
                    });
            }
            Content::Light(light) => list.add_light(light, world),
        });

        for (key, (map, instances)) in grouped {
            list.batches.push(Batch {
                key,
                map,
                first: list.instances.len() as u32,
                count: instances.len() as u32,
            });
            list.instances.extend(instances);
        }
        list
    }

    fn add_light(&mut self, light: Light, world: Mat4) {
        let position = world.w_axis.truncate();
        match light {
            Light::Directional { color, intensity } => {
                let toward = position.normalize_or_zero();
                let toward = if toward == Vec3::ZERO { Vec3::Y } else { toward };
                self.sun = Some((toward, color * intensity));
            }
            Light::Ambient { color, intensity } => self.ambient += color * intensity,
            Light::Point {
                color,
                intensity,
                range,
            } => {
                if self.points.len() < MAX_POINT_LIGHTS {
                    self.points.push(PointLight {
                        position,
                        radiance: color * intensity,
                        range,
                    });
                }
            }
        }
    }
}
