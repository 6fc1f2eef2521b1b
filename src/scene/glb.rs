//! Binary glTF decoding into a flat triangle list for the central model.

use super::gpu::MeshData;
use crate::core::error::{Result, SceneError};
use glam::{Mat4, Vec3};

/// Decode every triangle primitive reachable from the default scene, with node
/// transforms baked in. Only embedded (`.glb` BIN chunk) buffers are supported.
pub fn decode_glb(name: &str, bytes: &[u8]) -> Result<MeshData> {
    let decode_err = |reason: String| SceneError::AssetDecode {
        name: name.to_string(),
        reason,
    };
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| decode_err(e.to_string()))?;
    let blob = gltf.blob.as_deref();
    let mut out = MeshData::default();

    let scene = gltf
        .document
        .default_scene()
        .or_else(|| gltf.document.scenes().next());
    match scene {
        Some(scene) => {
            for node in scene.nodes() {
                append_node(&node, Mat4::IDENTITY, blob, &mut out);
            }
        }
        None => {
            for mesh in gltf.document.meshes() {
                append_mesh(&mesh, Mat4::IDENTITY, blob, &mut out);
            }
        }
    }

    if out.positions.is_empty() {
        return Err(decode_err("no triangle primitives".to_string()));
    }
    log::info!(
        "[model] decoded `{}`: {} triangles",
        name,
        out.positions.len() / 3
    );
    Ok(out)
}

fn append_node(node: &gltf::Node<'_>, parent: Mat4, blob: Option<&[u8]>, out: &mut MeshData) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        append_mesh(&mesh, world, blob, out);
    }
    for child in node.children() {
        append_node(&child, world, blob, out);
    }
}

fn append_mesh(mesh: &gltf::Mesh<'_>, world: Mat4, blob: Option<&[u8]>, out: &mut MeshData) {
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = primitive.reader(|buffer| match buffer.source() {
            gltf::buffer::Source::Bin => blob,
            gltf::buffer::Source::Uri(_) => None,
        });
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<Vec3> = positions
            .map(|p| world.transform_point3(Vec3::from_array(p)))
            .collect();
        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        for tri in indices.chunks_exact(3) {
            let corners = [tri[0], tri[1], tri[2]].map(|i| positions.get(i as usize).copied());
            let [Some(a), Some(b), Some(c)] = corners else {
                continue;
            };
            let n = (b - a).cross(c - a).normalize_or_zero();
            for p in [a, b, c] {
                out.positions.push(p.to_array());
                out.normals.push(n.to_array());
            }
        }
    }
}
