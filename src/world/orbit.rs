//! Field of small labeled polyhedra orbiting the model on horizontal circles.

use super::Subsystem;
use crate::config::OrbitParams;
use crate::core::constants::{
    LABEL_FONT, LABEL_IMAGE_SIZE, LABEL_LIFT, LABEL_SIZE, ORBIT_PHASE_SPAN,
};
use crate::core::{SceneContext, SceneError};
use crate::scene::{
    GeometryDesc, GeometryId, MaterialDesc, MaterialId, NodeId, SceneGraph, TextImage,
    TextureDesc, Transform,
};
use fnv::FnvHashMap;
use glam::{EulerRot, Quat, Vec2, Vec3};
use std::f32::consts::TAU;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyShape {
    Tetrahedron,
    Octahedron,
    Icosahedron,
}

impl BodyShape {
    const ALL: [BodyShape; 3] = [
        BodyShape::Tetrahedron,
        BodyShape::Octahedron,
        BodyShape::Icosahedron,
    ];

    fn geometry(self, radius: f32) -> GeometryDesc {
        match self {
            BodyShape::Tetrahedron => GeometryDesc::Tetrahedron { radius },
            BodyShape::Octahedron => GeometryDesc::Octahedron { radius },
            BodyShape::Icosahedron => GeometryDesc::Icosahedron { radius },
        }
    }
}

/// Orbit state of one body. Position is always derived from the angle.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitBody {
    pub shape: BodyShape,
    pub angular_position: f64,
    pub radius: f64,
    /// Radians per millisecond; the sign picks the direction.
    pub angular_speed: f64,
    pub vertical_offset: f64,
    /// Self-rotation added per tick on each axis.
    pub rotation_rate: Vec3,
    pub label_text: String,
}

impl OrbitBody {
    pub fn sample<R: Rng>(rng: &mut R, params: &OrbitParams, index: usize) -> Self {
        let shape = BodyShape::ALL[rng.gen_range(0..BodyShape::ALL.len())];
        let radius = params.radius_min + rng.gen::<f64>() * params.radius_span;
        let angular_position = rng.gen::<f64>() * ORBIT_PHASE_SPAN;
        let magnitude = params.speed_min + rng.gen::<f64>() * params.speed_span;
        let angular_speed = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
        let vertical_offset = (rng.gen::<f64>() - 0.5) * params.vertical_span;
        let rotation_rate = Vec3::new(
            rng.gen::<f32>() * params.spin_max,
            rng.gen::<f32>() * params.spin_max,
            rng.gen::<f32>() * params.spin_max,
        );
        let label_text = if params.words.is_empty() {
            String::new()
        } else {
            params.words[index % params.words.len()].clone()
        };
        Self {
            shape,
            angular_position,
            radius,
            angular_speed,
            vertical_offset,
            rotation_rate,
            label_text,
        }
    }

    pub fn advance(&mut self, delta_ms: f64) {
        self.angular_position += self.angular_speed * delta_ms;
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(
            (self.radius * self.angular_position.cos()) as f32,
            self.vertical_offset as f32,
            (self.radius * self.angular_position.sin()) as f32,
        )
    }
}

fn label_texture(text: &str) -> TextureDesc {
    TextureDesc::Text(TextImage {
        text: text.to_string(),
        width: LABEL_IMAGE_SIZE[0],
        height: LABEL_IMAGE_SIZE[1],
        font: LABEL_FONT,
    })
}

struct Orbiter {
    body: OrbitBody,
    group: NodeId,
    mesh: NodeId,
    label: NodeId,
    spin: Vec3,
}

pub struct OrbitField {
    container: NodeId,
    orbiters: Vec<Orbiter>,
}

impl OrbitField {
    pub fn new<R: Rng>(ctx: &SceneContext, params: &OrbitParams, rng: &mut R) -> Self {
        let bodies = (0..params.count)
            .map(|i| OrbitBody::sample(rng, params, i))
            .collect();
        Self::from_bodies(ctx, bodies, params.body_radius)
    }

    /// Place pre-computed bodies. Geometry is shared per shape, and label
    /// textures and materials per distinct word.
    pub fn from_bodies(ctx: &SceneContext, bodies: Vec<OrbitBody>, body_radius: f32) -> Self {
        let mut scene = ctx.scene_mut();
        let shapes: [GeometryId; 3] =
            BodyShape::ALL.map(|shape| scene.create_geometry(shape.geometry(body_radius)));
        let body_material = scene.create_material(
            MaterialDesc::lit(Vec3::ONE).with_emissive(Vec3::new(0.0, 0.05, 0.1)),
        );
        let label_geometry = scene.create_geometry(GeometryDesc::Plane {
            size: Vec2::from_array(LABEL_SIZE),
        });
        let mut label_materials: FnvHashMap<String, MaterialId> = FnvHashMap::default();

        let container = scene.add_group("orbit-field", None);
        let mut orbiters = Vec::with_capacity(bodies.len());
        for body in bodies {
            let group = scene.add_group("orbiter", Some(container));
            scene.transform_mut(group).translation = body.position();
            let shape_index = BodyShape::ALL
                .iter()
                .position(|s| *s == body.shape)
                .unwrap_or(0);
            let mesh = scene.add_mesh("body", shapes[shape_index], body_material, Some(group));
            let material = *label_materials
                .entry(body.label_text.clone())
                .or_insert_with(|| {
                    let texture = scene.create_texture(label_texture(&body.label_text));
                    scene.create_material(MaterialDesc::unlit(Vec3::ONE).with_map(texture))
                });
            let label = scene.add_mesh(&body.label_text, label_geometry, material, Some(group));
            *scene.transform_mut(label) = Transform::from_translation(Vec3::Y * LABEL_LIFT);
            orbiters.push(Orbiter {
                body,
                group,
                mesh,
                label,
                spin: Vec3::ZERO,
            });
        }
        log::debug!("[orbit] placed {} bodies", orbiters.len());
        Self {
            container,
            orbiters,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn len(&self) -> usize {
        self.orbiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbiters.is_empty()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &OrbitBody> {
        self.orbiters.iter().map(|o| &o.body)
    }

    pub fn group_node(&self, index: usize) -> Option<NodeId> {
        self.orbiters.get(index).map(|o| o.group)
    }

    pub fn label_node(&self, index: usize) -> Option<NodeId> {
        self.orbiters.get(index).map(|o| o.label)
    }

    pub fn mesh_node(&self, index: usize) -> Option<NodeId> {
        self.orbiters.get(index).map(|o| o.mesh)
    }

    /// Move every body along its orbit, spin its mesh and turn its label to
    /// the camera. Labels are left alone while no camera pose exists.
    pub fn advance(&mut self, scene: &mut SceneGraph, delta_ms: f64, camera: Option<Quat>) {
        for orbiter in self.orbiters.iter_mut() {
            orbiter.body.advance(delta_ms);
            scene.transform_mut(orbiter.group).translation = orbiter.body.position();

            let spin = orbiter.spin + orbiter.body.rotation_rate;
            orbiter.spin = Vec3::new(
                spin.x.rem_euclid(TAU),
                spin.y.rem_euclid(TAU),
                spin.z.rem_euclid(TAU),
            );
            scene.transform_mut(orbiter.mesh).rotation = Quat::from_euler(
                EulerRot::XYZ,
                orbiter.spin.x,
                orbiter.spin.y,
                orbiter.spin.z,
            );

            if let Some(orientation) = camera {
                scene.transform_mut(orbiter.label).rotation = orientation;
            }
        }
    }
}

impl Subsystem for OrbitField {
    fn label(&self) -> &'static str {
        "orbit"
    }

    fn update(&mut self, ctx: &SceneContext) {
        let delta = ctx.clock().delta;
        let camera = ctx.camera().map(|view| view.orientation);
        if camera.is_none() {
            log::debug!("[orbit] labels not turned: {}", SceneError::MissingCollaborator("camera"));
        }
        self.advance(&mut ctx.scene_mut(), delta, camera);
    }
}
