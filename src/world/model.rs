use super::Subsystem;
use crate::config::ModelParams;
use crate::core::{Result, SceneContext, Viewport};
use crate::scene::{decode_glb, GeometryDesc, MaterialDesc, MeshData, NodeId};
use glam::{Quat, Vec3};
use std::cell::Cell;
use std::rc::Rc;

/// Pending horizontal drag, in pixels, queued by input and consumed per tick.
#[derive(Clone, Debug, Default)]
pub struct DragHandle(Rc<Cell<f32>>);

impl DragHandle {
    pub fn push(&self, dx_px: f32) {
        self.0.set(self.0.get() + dx_px);
    }

    fn take(&self) -> f32 {
        self.0.replace(0.0)
    }
}

/// The central decoded model: idles with a slow spin, follows drags, and
/// scales down on narrow viewports.
pub struct Model {
    node: NodeId,
    params: ModelParams,
    yaw: f64,
    drag: DragHandle,
}

impl Model {
    /// Fetch the model bytes from the resource store and decode them.
    pub fn decode(ctx: &SceneContext, params: &ModelParams) -> Result<MeshData> {
        let resources = ctx.resources();
        let asset = resources.require(&params.asset)?;
        decode_glb(&params.asset, &asset.bytes)
    }

    pub fn new(ctx: &SceneContext, params: &ModelParams, mesh: MeshData) -> Self {
        let mut scene = ctx.scene_mut();
        let geometry = scene.create_geometry(GeometryDesc::Triangles(Rc::new(mesh)));
        let material = scene.create_material(
            MaterialDesc::lit(Vec3::splat(0.8)).with_emissive(Vec3::new(0.02, 0.04, 0.08)),
        );
        let node = scene.add_mesh("ai-model", geometry, material, None);
        drop(scene);

        let mut model = Self {
            node,
            params: params.clone(),
            yaw: 0.0,
            drag: DragHandle::default(),
        };
        model.fit(ctx);
        model
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn drag_handle(&self) -> DragHandle {
        self.drag.clone()
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Uniform scale and vertical placement for a viewport.
    pub fn placement(&self, viewport: Viewport) -> (f32, f32) {
        if viewport.is_mobile() {
            (self.params.scale_mobile, self.params.y_mobile)
        } else {
            (self.params.scale_desktop, self.params.y_desktop)
        }
    }

    fn fit(&mut self, ctx: &SceneContext) {
        let (scale, y) = self.placement(ctx.viewport());
        let mut scene = ctx.scene_mut();
        let transform = scene.transform_mut(self.node);
        transform.scale = Vec3::splat(scale);
        transform.translation.y = y;
    }
}

impl Subsystem for Model {
    fn label(&self) -> &'static str {
        "model"
    }

    fn resize(&mut self, ctx: &SceneContext) {
        self.fit(ctx);
    }

    fn update(&mut self, ctx: &SceneContext) {
        let dragged = self.drag.take() * self.params.drag_rad_per_px;
        self.yaw += ctx.clock().delta * self.params.spin_per_ms + dragged as f64;
        ctx.scene_mut().transform_mut(self.node).rotation = Quat::from_rotation_y(self.yaw as f32);
    }
}
