//! Scene graph, GPU resource bookkeeping and the camera rig.

mod camera;
mod draw;
mod geometry;
mod glb;
mod gpu;
mod graph;

pub use camera::{Camera, CameraRig};
pub use draw::{Batch, BatchKey, DrawList, InstanceRaw, Pass, PointLight, MAX_POINT_LIGHTS};
pub use geometry::{build_vertices, Vertex};
pub use glb::decode_glb;
pub use gpu::{
    GeometryDesc, GeometryId, GpuResources, MaterialDesc, MaterialId, MeshData, PointCloud,
    Resident, TextImage, TextureDesc, TextureId,
};
pub use graph::{Content, Fog, Light, Mesh, Node, NodeId, SceneGraph, Transform};
