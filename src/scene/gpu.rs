//! Geometry and material descriptors plus their GPU-residency bookkeeping.
//!
//! The scene graph references geometry and materials by handle so that many
//! nodes can share one resource. The renderer uploads a resource the first time
//! it sees the handle and drops its buffers once the handle is disposed.

use glam::{Vec2, Vec3};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryId(pub(crate) u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub(crate) u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub(crate) u32);

/// Flat triangle list; `normals[i]` belongs to `positions[i]`.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
}

#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

#[derive(Clone, Debug)]
pub enum GeometryDesc {
    Box { size: Vec3 },
    /// XY plane facing +Z.
    Plane { size: Vec2 },
    Tetrahedron { radius: f32 },
    Octahedron { radius: f32 },
    Icosahedron { radius: f32 },
    Triangles(Rc<MeshData>),
    Points(Rc<PointCloud>),
}

impl GeometryDesc {
    pub fn is_points(&self) -> bool {
        matches!(self, GeometryDesc::Points(_))
    }
}

/// A word rendered centered on a transparent RGBA image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextImage {
    pub text: String,
    pub width: u32,
    pub height: u32,
    /// CSS font shorthand.
    pub font: &'static str,
}

/// Image source for a texture. The renderer rasterizes it on first use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextureDesc {
    Text(TextImage),
}

impl TextureDesc {
    pub fn extent(&self) -> (u32, u32) {
        match self {
            TextureDesc::Text(image) => (image.width, image.height),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialDesc {
    pub color: Vec3,
    pub emissive: Vec3,
    pub opacity: f32,
    /// Skip lighting (labels, light bars, points).
    pub unlit: bool,
    /// Color map multiplied into the base color; its alpha blends.
    pub map: Option<TextureId>,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            emissive: Vec3::ZERO,
            opacity: 1.0,
            unlit: false,
            map: None,
        }
    }
}

impl MaterialDesc {
    pub fn lit(color: Vec3) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn unlit(color: Vec3) -> Self {
        Self {
            color,
            unlit: true,
            ..Self::default()
        }
    }

    pub fn with_emissive(mut self, emissive: Vec3) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_map(mut self, texture: TextureId) -> Self {
        self.map = Some(texture);
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0 || self.map.is_some()
    }
}

#[derive(Debug)]
pub struct Resident<T> {
    pub desc: T,
    disposed: bool,
}

impl<T> Resident<T> {
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Registry of every geometry and material created for the scene.
#[derive(Debug, Default)]
pub struct GpuResources {
    geometries: Vec<Resident<GeometryDesc>>,
    materials: Vec<Resident<MaterialDesc>>,
    textures: Vec<Resident<TextureDesc>>,
}

impl GpuResources {
    pub fn create_geometry(&mut self, desc: GeometryDesc) -> GeometryId {
        self.geometries.push(Resident {
            desc,
            disposed: false,
        });
        GeometryId(self.geometries.len() as u32 - 1)
    }

    pub fn create_material(&mut self, desc: MaterialDesc) -> MaterialId {
        self.materials.push(Resident {
            desc,
            disposed: false,
        });
        MaterialId(self.materials.len() as u32 - 1)
    }

    pub fn create_texture(&mut self, desc: TextureDesc) -> TextureId {
        self.textures.push(Resident {
            desc,
            disposed: false,
        });
        TextureId(self.textures.len() as u32 - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Resident<GeometryDesc>> {
        self.geometries.get(id.0 as usize)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Resident<MaterialDesc>> {
        self.materials.get(id.0 as usize)
    }

    pub fn texture(&self, id: TextureId) -> Option<&Resident<TextureDesc>> {
        self.textures.get(id.0 as usize)
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Mark a geometry released; true only the first time.
    pub fn dispose_geometry(&mut self, id: GeometryId) -> bool {
        match self.geometries.get_mut(id.0 as usize) {
            Some(r) if !r.disposed => {
                r.disposed = true;
                true
            }
            _ => false,
        }
    }

    /// Mark a material released; true only the first time.
    pub fn dispose_material(&mut self, id: MaterialId) -> bool {
        match self.materials.get_mut(id.0 as usize) {
            Some(r) if !r.disposed => {
                r.disposed = true;
                true
            }
            _ => false,
        }
    }

    /// Mark a texture released; true only the first time.
    pub fn dispose_texture(&mut self, id: TextureId) -> bool {
        match self.textures.get_mut(id.0 as usize) {
            Some(r) if !r.disposed => {
                r.disposed = true;
                true
            }
            _ => false,
        }
    }
}
