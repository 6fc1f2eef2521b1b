//! Process-wide coordinator: owns the clock, viewport, resource loader, camera
//! and world, and fans resize/tick notifications out to them in a fixed order.

use crate::audio::{AudioOutput, Synthesizer};
use crate::config::ExperienceConfig;
use crate::core::{Clock, FrameClock, SceneContext, Subscription, Viewport, ViewportMonitor};
use crate::resources::{AssetFetcher, LocalTask, ResourceLoader};
use crate::scene::CameraRig;
use crate::world::{SceneComposition, Subsystem, SubsystemId, SubsystemRegistry, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

thread_local! {
    static INSTANCE: RefCell<Weak<RefCell<Orchestrator>>> = RefCell::new(Weak::new());
}

pub struct Orchestrator {
    config: ExperienceConfig,
    ctx: SceneContext,
    clock: Clock,
    viewport: ViewportMonitor,
    loader: Rc<ResourceLoader>,
    camera: CameraRig,
    world: World,
    outputs: SubsystemRegistry,
    synth: Rc<RefCell<Synthesizer>>,
    rng: StdRng,
    subscriptions: Vec<Subscription>,
    pending_build: Rc<Cell<bool>>,
    destroyed: bool,
}

impl Orchestrator {
    /// Create the single orchestrator for this thread. A second call returns
    /// the live instance unchanged and ignores its arguments.
    pub fn install(
        config: ExperienceConfig,
        viewport: Viewport,
        audio: Box<dyn AudioOutput>,
    ) -> Rc<RefCell<Self>> {
        INSTANCE.with(|slot| {
            if let Some(existing) = slot.borrow().upgrade() {
                log::debug!("[orchestrator] already installed");
                return existing;
            }
            let this = Rc::new(RefCell::new(Self::new(config, viewport, audio)));
            Self::wire(&this);
            *slot.borrow_mut() = Rc::downgrade(&this);
            this
        })
    }

    /// The installed instance, if it is still alive.
    pub fn current() -> Option<Rc<RefCell<Self>>> {
        INSTANCE.with(|slot| slot.borrow().upgrade())
    }

    fn new(config: ExperienceConfig, viewport: Viewport, audio: Box<dyn AudioOutput>) -> Self {
        let loader = ResourceLoader::new(config.manifest.clone());
        let ctx = SceneContext::new(viewport, loader.store());
        let camera = CameraRig::new(
            &ctx,
            config.camera.eye,
            config.camera.target,
            config.camera.fovy_degrees,
        );
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let synth = Rc::new(RefCell::new(Synthesizer::new(
            audio,
            config.audio.master_gain,
        )));
        Self {
            ctx,
            clock: Clock::new(),
            viewport: ViewportMonitor::new(viewport),
            loader,
            camera,
            world: World::Unbuilt,
            outputs: SubsystemRegistry::new(),
            synth,
            rng,
            subscriptions: Vec::new(),
            pending_build: Rc::new(Cell::new(false)),
            destroyed: false,
            config,
        }
    }

    fn wire(this: &Rc<RefCell<Self>>) {
        let weak = Rc::downgrade(this);
        let pending = this.borrow().pending_build.clone();
        let loader = this.borrow().loader.clone();

        let ready = loader.ready_signal().subscribe(move |_| {
            pending.set(true);
            // Busy means we are inside one of our own calls; the next update
            // picks the flag up instead.
            if let Some(this) = weak.upgrade() {
                if let Ok(mut this) = this.try_borrow_mut() {
                    this.build_world();
                }
            }
        });
        let progress = loader
            .progress_signal()
            .subscribe(|percent| log::info!("[orchestrator] loading {:.0}%", percent));
        let failed = loader
            .failed_signal()
            .subscribe(|err| log::error!("[orchestrator] loading failed: {}", err));

        this.borrow_mut()
            .subscriptions
            .extend([ready, progress, failed]);
    }

    /// Start fetching the manifest. Safe to call once; the loader ignores
    /// repeats. An empty manifest builds the world before this returns.
    pub fn load(this: &Rc<RefCell<Self>>, fetcher: &dyn AssetFetcher, spawn: &dyn Fn(LocalTask)) {
        let loader = this.borrow().loader.clone();
        loader.load(fetcher, spawn);
    }

    fn build_world(&mut self) {
        self.pending_build.set(false);
        if self.destroyed || self.world.is_built() {
            return;
        }
        match SceneComposition::build(&self.ctx, &self.config, &mut self.rng) {
            Ok(composition) => {
                self.world = World::Built(composition);
                log::info!("[orchestrator] world ready");
            }
            Err(e) => log::error!("[orchestrator] world build failed: {}", e),
        }
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn config(&self) -> &ExperienceConfig {
        &self.config
    }

    pub fn loader(&self) -> &Rc<ResourceLoader> {
        &self.loader
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn frame(&self) -> FrameClock {
        self.clock.frame()
    }

    pub fn viewport(&self) -> &ViewportMonitor {
        &self.viewport
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn synth(&self) -> Rc<RefCell<Synthesizer>> {
        self.synth.clone()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Attach an output subsystem (the renderer) that runs after the world.
    pub fn attach(&mut self, output: Box<dyn Subsystem>) -> SubsystemId {
        self.outputs.add(output)
    }

    pub fn detach(&mut self, id: SubsystemId) -> Option<Box<dyn Subsystem>> {
        self.outputs.remove(id)
    }

    /// Forward a horizontal drag to the model once the world exists.
    pub fn drag_model(&self, dx_px: f32) {
        if let Some(composition) = self.world.composition() {
            composition.drag_model(dx_px);
        }
    }

    /// Record new window metrics; on change every subsystem is resized.
    pub fn observe_viewport(&mut self, width: u32, height: u32, pixel_ratio: f64) {
        if self.destroyed || !self.viewport.observe(width, height, pixel_ratio) {
            return;
        }
        self.ctx.publish_viewport(self.viewport.current());
        self.resize();
    }

    pub fn resize(&mut self) {
        if self.destroyed {
            return;
        }
        self.camera.resize(&self.ctx);
        self.world.resize(&self.ctx);
        self.outputs.resize_all(&self.ctx);
    }

    /// Advance the clock from its wall-clock source and run one tick.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        self.advance(now);
    }

    /// Advance the clock to `now_ms` and run one tick.
    pub fn advance(&mut self, now_ms: f64) {
        if self.destroyed {
            return;
        }
        let frame = self.clock.tick_at(now_ms);
        self.ctx.publish_clock(frame);
        self.update();
    }

    /// One tick: camera, then world, then outputs.
    pub fn update(&mut self) {
        if self.destroyed {
            return;
        }
        if self.pending_build.get() {
            self.build_world();
        }
        self.camera.update(&self.ctx);
        self.world.update(&self.ctx);
        self.outputs.update_all(&self.ctx);
    }

    /// Detach every subscription and release all scene GPU resources. Returns
    /// how many resources were newly released, so a repeat call returns 0.
    pub fn destroy(&mut self) -> usize {
        if !self.destroyed {
            self.destroyed = true;
            self.subscriptions.clear();
            self.clock.tick_signal().clear();
            self.viewport.resize_signal().clear();
            if let Some(composition) = self.world.composition_mut() {
                composition.teardown(&self.ctx);
            }
            self.outputs.teardown_all(&self.ctx);
        }
        let released = self.ctx.scene_mut().dispose_all();
        log::info!("[orchestrator] destroyed, released {} resources", released);
        released
    }
}
