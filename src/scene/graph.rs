use super::gpu::{
    GeometryDesc, GeometryId, GpuResources, MaterialDesc, MaterialId, TextureDesc, TextureId,
};
use glam::{Mat4, Quat, Vec3};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mesh {
    pub geometry: GeometryId,
    pub material: MaterialId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Directional { color: Vec3, intensity: f32 },
    Ambient { color: Vec3, intensity: f32 },
    Point { color: Vec3, intensity: f32, range: f32 },
}

impl Light {
    pub fn set_color(&mut self, rgb: Vec3) {
        match self {
            Light::Directional { color, .. }
            | Light::Ambient { color, .. }
            | Light::Point { color, .. } => *color = rgb,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Vec3,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Content {
    Group,
    Mesh(Mesh),
    Light(Light),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub content: Content,
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena scene graph. Nodes are appended, never removed; teardown happens by
/// disposing the GPU resources they reference.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    gpu: GpuResources,
    pub fog: Option<Fog>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, content: Content, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = parent.filter(|p| p.0 < self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            transform: Transform::IDENTITY,
            content,
            visible: true,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn add_group(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        self.add(name, Content::Group, parent)
    }

    pub fn add_mesh(
        &mut self,
        name: &str,
        geometry: GeometryId,
        material: MaterialId,
        parent: Option<NodeId>,
    ) -> NodeId {
        self.add(name, Content::Mesh(Mesh { geometry, material }), parent)
    }

    pub fn add_light(&mut self, name: &str, light: Light, parent: Option<NodeId>) -> NodeId {
        self.add(name, Content::Light(light), parent)
    }

    pub fn create_geometry(&mut self, desc: GeometryDesc) -> GeometryId {
        self.gpu.create_geometry(desc)
    }

    pub fn create_material(&mut self, desc: MaterialDesc) -> MaterialId {
        self.gpu.create_material(desc)
    }

    pub fn create_texture(&mut self, desc: TextureDesc) -> TextureId {
        self.gpu.create_texture(desc)
    }

    pub fn gpu(&self) -> &GpuResources {
        &self.gpu
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0].transform
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    pub fn light_mut(&mut self, id: NodeId) -> Option<&mut Light> {
        match &mut self.nodes[id.0].content {
            Content::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        let local = node.transform.matrix();
        match node.parent {
            Some(p) => self.world_matrix(p) * local,
            None => local,
        }
    }

    /// Depth-first walk over visible nodes with their world matrices.
    pub fn traverse(&self, mut visit: impl FnMut(NodeId, &Node, Mat4)) {
        let mut stack: Vec<(NodeId, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|id| (*id, Mat4::IDENTITY))
            .collect();
        while let Some((id, parent_world)) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.matrix();
            visit(id, node, world);
            for child in node.children.iter().rev() {
                stack.push((*child, world));
            }
        }
    }

    /// Release every geometry, material and texture reachable from the graph. Shared
    /// resources are released once; returns how many were newly released.
    pub fn dispose_all(&mut self) -> usize {
        let mut geometries = BTreeSet::new();
        let mut materials = BTreeSet::new();
        for node in &self.nodes {
            if let Content::Mesh(mesh) = node.content {
                geometries.insert(mesh.geometry);
                materials.insert(mesh.material);
            }
        }
        let mut released = 0;
        for id in geometries {
            if self.gpu.dispose_geometry(id) {
                released += 1;
            }
        }
        let mut textures = BTreeSet::new();
        for id in materials {
            if let Some(map) = self.gpu.material(id).and_then(|m| m.desc.map) {
                textures.insert(map);
            }
            if self.gpu.dispose_material(id) {
                released += 1;
            }
        }
        for id in textures {
            if self.gpu.dispose_texture(id) {
                released += 1;
            }
        }
        released
    }
}
