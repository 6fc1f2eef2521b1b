//! The visual world: subsystems that populate the shared scene graph and the
//! two-state lifecycle that only builds them once every asset is resident.

mod environment;
mod hangar;
mod model;
mod orbit;
mod stars;

pub use environment::{ColorCycle, Environment};
pub use hangar::Hangar;
pub use model::{DragHandle, Model};
pub use orbit::{BodyShape, OrbitBody, OrbitField};
pub use stars::Starfield;

use crate::config::ExperienceConfig;
use crate::core::{Result, SceneContext};
use rand::Rng;

/// A unit of scene behaviour driven by the orchestrator. Both hooks default to
/// doing nothing so static subsystems only implement `label`.
pub trait Subsystem {
    fn label(&self) -> &'static str;

    fn resize(&mut self, _ctx: &SceneContext) {}

    fn update(&mut self, _ctx: &SceneContext) {}

    /// Called once when the owning orchestrator is destroyed.
    fn teardown(&mut self, _ctx: &SceneContext) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubsystemId(u32);

/// Ordered collection of subsystems; hooks run in insertion order.
#[derive(Default)]
pub struct SubsystemRegistry {
    next: u32,
    entries: Vec<(SubsystemId, Box<dyn Subsystem>)>,
}

impl SubsystemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, subsystem: Box<dyn Subsystem>) -> SubsystemId {
        let id = SubsystemId(self.next);
        self.next += 1;
        log::debug!("[world] registered `{}`", subsystem.label());
        self.entries.push((id, subsystem));
        id
    }

    pub fn remove(&mut self, id: SubsystemId) -> Option<Box<dyn Subsystem>> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(_, s)| s.label()).collect()
    }

    pub fn resize_all(&mut self, ctx: &SceneContext) {
        for (_, subsystem) in self.entries.iter_mut() {
            subsystem.resize(ctx);
        }
    }

    pub fn update_all(&mut self, ctx: &SceneContext) {
        for (_, subsystem) in self.entries.iter_mut() {
            subsystem.update(ctx);
        }
    }

    pub fn teardown_all(&mut self, ctx: &SceneContext) {
        for (_, subsystem) in self.entries.iter_mut() {
            subsystem.teardown(ctx);
        }
    }
}

/// Every visual subsystem of the finished scene.
pub struct SceneComposition {
    subsystems: SubsystemRegistry,
    drag: DragHandle,
}

impl SceneComposition {
    /// Build hangar, starfield, central model, orbiting field and environment,
    /// in that order. The model is decoded before anything touches the scene,
    /// so a missing or corrupt asset leaves the graph untouched.
    pub fn build<R: Rng>(
        ctx: &SceneContext,
        config: &ExperienceConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let mesh = Model::decode(ctx, &config.model)?;

        let mut subsystems = SubsystemRegistry::new();
        subsystems.add(Box::new(Hangar::new(ctx)));
        subsystems.add(Box::new(Starfield::new(ctx, &config.stars, rng)));
        let model = Model::new(ctx, &config.model, mesh);
        let drag = model.drag_handle();
        subsystems.add(Box::new(model));
        subsystems.add(Box::new(OrbitField::new(ctx, &config.orbit, rng)));
        subsystems.add(Box::new(Environment::new(ctx, &config.light)));

        log::info!(
            "[world] built {} subsystems, {} scene nodes",
            subsystems.len(),
            ctx.scene().len()
        );
        Ok(Self { subsystems, drag })
    }

    /// Append an extra subsystem; it runs after the built-in ones.
    pub fn register(&mut self, subsystem: Box<dyn Subsystem>) -> SubsystemId {
        self.subsystems.add(subsystem)
    }

    pub fn subsystems(&self) -> &SubsystemRegistry {
        &self.subsystems
    }

    /// Queue a horizontal drag of `dx_px` pixels onto the central model.
    pub fn drag_model(&self, dx_px: f32) {
        self.drag.push(dx_px);
    }

    pub fn resize(&mut self, ctx: &SceneContext) {
        self.subsystems.resize_all(ctx);
    }

    pub fn update(&mut self, ctx: &SceneContext) {
        self.subsystems.update_all(ctx);
    }

    pub fn teardown(&mut self, ctx: &SceneContext) {
        self.subsystems.teardown_all(ctx);
    }
}

/// World lifecycle. Resize and update are no-ops until the composition exists.
#[derive(Default)]
pub enum World {
    #[default]
    Unbuilt,
    Built(SceneComposition),
}

impl World {
    pub fn is_built(&self) -> bool {
        matches!(self, World::Built(_))
    }

    pub fn composition(&self) -> Option<&SceneComposition> {
        match self {
            World::Built(c) => Some(c),
            World::Unbuilt => None,
        }
    }

    pub fn composition_mut(&mut self) -> Option<&mut SceneComposition> {
        match self {
            World::Built(c) => Some(c),
            World::Unbuilt => None,
        }
    }

    pub fn resize(&mut self, ctx: &SceneContext) {
        if let World::Built(c) = self {
            c.resize(ctx);
        }
    }

    pub fn update(&mut self, ctx: &SceneContext) {
        if let World::Built(c) = self {
            c.update(ctx);
        }
    }
}
