use crate::core::{CameraView, SceneContext};
use crate::world::Subsystem;
use glam::{Mat4, Quat, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    /// World-space orientation of the camera (inverse of the view rotation).
    pub fn orientation(&self) -> Quat {
        Quat::from_mat4(&self.view_matrix().inverse()).normalize()
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.eye,
            orientation: self.orientation(),
            view_projection: self.projection_matrix() * self.view_matrix(),
        }
    }
}

/// Owns the scene camera: keeps its aspect in sync with the viewport and
/// publishes its pose to the shared context every tick.
pub struct CameraRig {
    camera: Camera,
}

impl CameraRig {
    pub fn new(ctx: &SceneContext, eye: Vec3, target: Vec3, fovy_degrees: f32) -> Self {
        Self {
            camera: Camera {
                eye,
                target,
                up: Vec3::Y,
                aspect: ctx.viewport().aspect(),
                fovy_radians: fovy_degrees.to_radians(),
                znear: 0.1,
                zfar: 200.0,
            },
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn view_projection(&self) -> Mat4 {
        self.camera.projection_matrix() * self.camera.view_matrix()
    }
}

impl Subsystem for CameraRig {
    fn label(&self) -> &'static str {
        "camera"
    }

    fn resize(&mut self, ctx: &SceneContext) {
        self.camera.aspect = ctx.viewport().aspect();
    }

    fn update(&mut self, ctx: &SceneContext) {
        ctx.publish_camera(self.camera.view());
    }
}
