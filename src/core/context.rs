//! Explicit handle to the state the orchestrator shares with its subsystems.
//!
//! Subsystems receive a [`SceneContext`] at construction instead of reaching
//! for a global. Clock, viewport and camera view are read-only to them; the
//! scene graph is shared for appending and mutating their own nodes.

use super::clock::FrameClock;
use super::viewport::Viewport;
use crate::resources::ResourceStore;
use crate::scene::SceneGraph;
use glam::{Mat4, Quat, Vec3};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

/// Camera pose published once per tick by the camera rig.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub orientation: Quat,
    pub view_projection: Mat4,
}

struct Shared {
    clock: Cell<FrameClock>,
    viewport: Cell<Viewport>,
    camera: Cell<Option<CameraView>>,
    scene: RefCell<SceneGraph>,
    resources: Rc<RefCell<ResourceStore>>,
}

#[derive(Clone)]
pub struct SceneContext {
    shared: Rc<Shared>,
}

impl SceneContext {
    pub fn new(viewport: Viewport, resources: Rc<RefCell<ResourceStore>>) -> Self {
        Self {
            shared: Rc::new(Shared {
                clock: Cell::new(FrameClock::default()),
                viewport: Cell::new(viewport),
                camera: Cell::new(None),
                scene: RefCell::new(SceneGraph::new()),
                resources,
            }),
        }
    }

    /// Context with an empty resource store, for subsystems that need no assets.
    pub fn standalone(viewport: Viewport) -> Self {
        Self::new(viewport, Rc::new(RefCell::new(ResourceStore::new(0))))
    }

    pub fn clock(&self) -> FrameClock {
        self.shared.clock.get()
    }

    pub fn viewport(&self) -> Viewport {
        self.shared.viewport.get()
    }

    /// `None` until the camera rig has published its first pose.
    pub fn camera(&self) -> Option<CameraView> {
        self.shared.camera.get()
    }

    pub fn scene(&self) -> Ref<'_, SceneGraph> {
        self.shared.scene.borrow()
    }

    pub fn scene_mut(&self) -> RefMut<'_, SceneGraph> {
        self.shared.scene.borrow_mut()
    }

    pub fn resources(&self) -> Ref<'_, ResourceStore> {
        self.shared.resources.borrow()
    }

    pub(crate) fn publish_clock(&self, frame: FrameClock) {
        self.shared.clock.set(frame);
    }

    pub(crate) fn publish_viewport(&self, viewport: Viewport) {
        self.shared.viewport.set(viewport);
    }

    pub(crate) fn publish_camera(&self, view: CameraView) {
        self.shared.camera.set(Some(view));
    }
}
