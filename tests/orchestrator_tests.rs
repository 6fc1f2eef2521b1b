// Host-side tests for the orchestrator lifecycle: install, gated world build,
// tick order, resize and teardown.

mod common;

use common::{triangle_glb, FakeFetcher, RecordingOutput, TaskQueue};
use glam::{Quat, Vec3};
use neural_hangar::audio::SilentOutput;
use neural_hangar::core::{SceneContext, Viewport};
use neural_hangar::resources::{LoadPhase, ResourceEntry, ResourceKind, ResourceManifest};
use neural_hangar::scene::{Content, Light, NodeId, SceneGraph};
use neural_hangar::world::Subsystem;
use neural_hangar::{ExperienceConfig, Orchestrator};
use std::cell::RefCell;
use std::rc::Rc;

const MODEL_PATH: &str = "models/ai-model.glb";

fn config() -> ExperienceConfig {
    ExperienceConfig {
        manifest: ResourceManifest::new(vec![ResourceEntry::new(
            "aiModel",
            ResourceKind::Model,
            MODEL_PATH,
        )]),
        seed: Some(7),
        ..ExperienceConfig::default()
    }
}

fn install(config: ExperienceConfig) -> Rc<RefCell<Orchestrator>> {
    Orchestrator::install(config, Viewport::new(1280, 720, 1.0), Box::new(SilentOutput::default()))
}

fn load_model(orch: &Rc<RefCell<Orchestrator>>) {
    let queue = TaskQueue::default();
    let fetcher = FakeFetcher::default().with(MODEL_PATH, triangle_glb());
    Orchestrator::load(orch, &fetcher, &queue.spawner());
    queue.run_all();
}

fn find(scene: &SceneGraph, name: &str) -> Option<NodeId> {
    let mut found = None;
    scene.traverse(|id, node, _| {
        if found.is_none() && node.name == name {
            found = Some(id);
        }
    });
    found
}

/// Records whether a camera pose was available each time it ran.
struct CameraWatch {
    seen: Rc<RefCell<Vec<bool>>>,
    resized: Rc<RefCell<usize>>,
}

impl Subsystem for CameraWatch {
    fn label(&self) -> &'static str {
        "camera-watch"
    }

    fn resize(&mut self, _ctx: &SceneContext) {
        *self.resized.borrow_mut() += 1;
    }

    fn update(&mut self, ctx: &SceneContext) {
        self.seen.borrow_mut().push(ctx.camera().is_some());
    }
}

#[test]
fn install_returns_the_live_instance() {
    let a = install(config());
    let b = Orchestrator::install(
        ExperienceConfig::default(),
        Viewport::default(),
        Box::new(SilentOutput::default()),
    );
    assert!(Rc::ptr_eq(&a, &b));
    assert!(Orchestrator::current().is_some_and(|c| Rc::ptr_eq(&a, &c)));

    drop((a, b));
    assert!(Orchestrator::current().is_none());
}

#[test]
fn ticks_before_ready_leave_the_world_unbuilt() {
    let orch = install(config());
    let mut o = orch.borrow_mut();
    o.advance(16.0);
    o.advance(32.0);
    assert!(!o.world().is_built());
    assert!(o.context().scene().is_empty());
    assert_eq!(o.loader().phase(), LoadPhase::Loading);
    // The camera runs regardless of the world.
    assert!(o.context().camera().is_some());
}

#[test]
fn ready_builds_the_world_in_order() {
    let orch = install(config());
    load_model(&orch);

    let o = orch.borrow();
    assert_eq!(o.loader().phase(), LoadPhase::Ready);
    let Some(composition) = o.world().composition() else {
        panic!("world not built");
    };
    assert_eq!(
        composition.subsystems().labels(),
        vec!["hangar", "stars", "model", "orbit", "environment"]
    );
    let scene = o.context().scene();
    for name in ["hangar", "starfield", "ai-model", "orbit-field", "sun", "ambient"] {
        assert!(find(&scene, name).is_some(), "missing {name}");
    }
    assert!(scene.fog.is_some());
}

#[test]
fn ready_while_busy_builds_on_the_next_update() {
    let orch = install(config());
    let loader = orch.borrow().loader().clone();
    let mut o = orch.borrow_mut();

    loader.complete(0, Ok(triangle_glb()));
    assert_eq!(loader.phase(), LoadPhase::Ready);
    assert!(!o.world().is_built());

    o.advance(16.0);
    assert!(o.world().is_built());
}

#[test]
fn failed_load_keeps_the_world_unbuilt() {
    let orch = install(config());
    let queue = TaskQueue::default();
    Orchestrator::load(&orch, &FakeFetcher::default(), &queue.spawner());
    queue.run_all();

    let mut o = orch.borrow_mut();
    assert_eq!(o.loader().phase(), LoadPhase::Failed);
    o.advance(16.0);
    assert!(!o.world().is_built());
}

#[test]
fn undecodable_model_keeps_the_scene_untouched() {
    let orch = install(config());
    let queue = TaskQueue::default();
    let fetcher = FakeFetcher::default().with(MODEL_PATH, b"not a glb".to_vec());
    Orchestrator::load(&orch, &fetcher, &queue.spawner());
    queue.run_all();

    let o = orch.borrow();
    assert_eq!(o.loader().phase(), LoadPhase::Ready);
    assert!(!o.world().is_built());
    assert!(o.context().scene().is_empty());
}

#[test]
fn empty_manifest_without_the_model_stays_unbuilt() {
    let orch = install(ExperienceConfig::default());
    let queue = TaskQueue::default();
    Orchestrator::load(&orch, &FakeFetcher::default(), &queue.spawner());
    let o = orch.borrow();
    assert_eq!(o.loader().phase(), LoadPhase::Ready);
    assert!(!o.world().is_built());
}

#[test]
fn outputs_run_after_the_camera_and_see_resizes() {
    let orch = install(config());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let resized = Rc::new(RefCell::new(0));
    let mut o = orch.borrow_mut();
    let id = o.attach(Box::new(CameraWatch {
        seen: seen.clone(),
        resized: resized.clone(),
    }));

    o.advance(16.0);
    assert_eq!(*seen.borrow(), vec![true]);

    o.observe_viewport(1280, 720, 1.0);
    assert_eq!(*resized.borrow(), 0);
    o.observe_viewport(600, 900, 1.0);
    assert_eq!(*resized.borrow(), 1);
    assert_eq!(o.context().viewport().width, 600);

    assert!(o.detach(id).is_some());
    o.advance(32.0);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn narrow_viewport_shrinks_and_lowers_the_model() {
    let orch = install(config());
    load_model(&orch);
    let mut o = orch.borrow_mut();

    let node = find(&o.context().scene(), "ai-model").expect("model node");
    let t = *o.context().scene().transform(node);
    assert_eq!(t.scale, Vec3::splat(22.0));
    assert_eq!(t.translation.y, -20.0);

    o.observe_viewport(500, 900, 2.0);
    let t = *o.context().scene().transform(node);
    assert_eq!(t.scale, Vec3::splat(12.0));
    assert_eq!(t.translation.y, -12.0);
}

#[test]
fn drag_turns_the_model() {
    let orch = install(config());
    load_model(&orch);
    let mut o = orch.borrow_mut();
    let node = find(&o.context().scene(), "ai-model").expect("model node");

    o.advance(16.0);
    let idle = 16.0 * 0.0003;
    let r = o.context().scene().transform(node).rotation;
    assert!(r.abs_diff_eq(Quat::from_rotation_y(idle), 1e-5));

    o.drag_model(100.0);
    o.advance(32.0);
    let r = o.context().scene().transform(node).rotation;
    assert!(r.abs_diff_eq(Quat::from_rotation_y(2.0 * idle + 0.5), 1e-5));
}

#[test]
fn sun_color_follows_elapsed_time() {
    let orch = install(config());
    load_model(&orch);
    let mut o = orch.borrow_mut();
    // Half way from the first palette entry to the second.
    o.advance(1000.0);

    let scene = o.context().scene();
    let sun = find(&scene, "sun").expect("sun node");
    let Content::Light(Light::Directional { color, .. }) = scene.node(sun).content else {
        panic!("sun is not a directional light");
    };
    let palette = &o.config().light.palette;
    let expected = palette[0].lerp(palette[1], 0.5);
    assert!(color.abs_diff_eq(expected, 1e-4), "{color:?} vs {expected:?}");
}

#[test]
fn labels_turn_with_the_camera() {
    let orch = install(config());
    load_model(&orch);
    let mut o = orch.borrow_mut();
    o.advance(16.0);

    let Some(camera) = o.context().camera() else {
        panic!("camera not published");
    };
    let scene = o.context().scene();
    let word = &o.config().orbit.words[0];
    let label = find(&scene, word).expect("label node");
    assert_eq!(scene.transform(label).rotation, camera.orientation);
}

#[test]
fn destroy_releases_once_and_stops_ticking() {
    let orch = install(config());
    load_model(&orch);
    let mut o = orch.borrow_mut();
    o.advance(16.0);

    assert!(o.destroy() > 0);
    assert_eq!(o.destroy(), 0);
    assert!(o.is_destroyed());
    assert_eq!(o.loader().ready_signal().subscriber_count(), 0);

    let before = o.frame();
    o.advance(500.0);
    assert_eq!(o.frame(), before);
}

#[test]
fn synth_is_shared_with_ui_wiring() {
    let (out, log) = RecordingOutput::new();
    let orch = Orchestrator::install(config(), Viewport::default(), Box::new(out));
    let synth = orch.borrow().synth();
    assert_eq!(log.borrow().master_gain, 0.3);
    assert_eq!(
        synth.borrow_mut().play(neural_hangar::audio::Cue::Click),
        neural_hangar::audio::ToneOutcome::Played
    );
    assert_eq!(log.borrow().played.len(), 1);
}
