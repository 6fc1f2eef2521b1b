// Host-side tests for manifest loading, progress and the ready/failed outcome.

mod common;

use common::{FakeFetcher, TaskQueue};
use neural_hangar::core::SceneError;
use neural_hangar::resources::{
    LoadPhase, ResourceEntry, ResourceKind, ResourceLoader, ResourceManifest,
};
use std::cell::RefCell;
use std::rc::Rc;

struct Observed {
    progress: Rc<RefCell<Vec<f64>>>,
    ready: Rc<RefCell<usize>>,
    failed: Rc<RefCell<Vec<SceneError>>>,
}

fn observe(loader: &ResourceLoader) -> Observed {
    let progress = Rc::new(RefCell::new(Vec::new()));
    let ready = Rc::new(RefCell::new(0));
    let failed = Rc::new(RefCell::new(Vec::new()));
    {
        let progress = progress.clone();
        loader
            .progress_signal()
            .subscribe(move |p| progress.borrow_mut().push(*p))
            .forget();
    }
    {
        let ready = ready.clone();
        loader
            .ready_signal()
            .subscribe(move |_| *ready.borrow_mut() += 1)
            .forget();
    }
    {
        let failed = failed.clone();
        loader
            .failed_signal()
            .subscribe(move |e| failed.borrow_mut().push(e.clone()))
            .forget();
    }
    Observed {
        progress,
        ready,
        failed,
    }
}

fn four_entries() -> ResourceManifest {
    ResourceManifest::new(vec![
        ResourceEntry::new("a", ResourceKind::Model, "a.glb"),
        ResourceEntry::new("b", ResourceKind::Texture, "b.png"),
        ResourceEntry::new("c", ResourceKind::Audio, "c.ogg"),
        ResourceEntry::new("d", ResourceKind::Binary, "d.bin"),
    ])
}

fn all_files() -> FakeFetcher {
    FakeFetcher::default()
        .with("a.glb", vec![1])
        .with("b.png", vec![2, 2])
        .with("c.ogg", vec![3])
        .with("d.bin", vec![4])
}

#[test]
fn out_of_order_completion_reports_progress_then_ready_once() {
    let loader = ResourceLoader::new(four_entries());
    let seen = observe(&loader);
    let queue = TaskQueue::default();

    loader.load(&all_files(), &queue.spawner());
    assert_eq!(queue.len(), 4);
    assert_eq!(*seen.ready.borrow(), 0);

    queue.run_reversed();
    assert_eq!(*seen.progress.borrow(), vec![25.0, 50.0, 75.0, 100.0]);
    assert_eq!(*seen.ready.borrow(), 1);
    assert!(seen.failed.borrow().is_empty());

    let store = loader.store();
    let store = store.borrow();
    assert!(store.is_ready());
    assert_eq!(store.loaded(), store.total());
    assert_eq!(store.get("b").map(|a| a.bytes.to_vec()), Some(vec![2, 2]));
    assert_eq!(store.get("b").map(|a| a.kind), Some(ResourceKind::Texture));
}

#[test]
fn failure_is_terminal_and_never_ready() {
    let loader = ResourceLoader::new(four_entries());
    let seen = observe(&loader);
    let queue = TaskQueue::default();
    let fetcher = FakeFetcher::default()
        .with("a.glb", vec![1])
        .with("b.png", vec![2])
        .with("d.bin", vec![4]);

    loader.load(&fetcher, &queue.spawner());
    queue.run_all();

    assert_eq!(*seen.ready.borrow(), 0);
    assert_eq!(seen.failed.borrow().len(), 1);
    assert!(matches!(
        &seen.failed.borrow()[0],
        SceneError::LoadFailure { name, path, .. } if name == "c" && path == "c.ogg"
    ));
    // The entry after the failure is ignored.
    assert_eq!(*seen.progress.borrow(), vec![25.0, 50.0]);
    assert_eq!(loader.phase(), LoadPhase::Failed);
}

#[test]
fn empty_manifest_is_ready_immediately() {
    let loader = ResourceLoader::new(ResourceManifest::default());
    let seen = observe(&loader);
    let queue = TaskQueue::default();

    loader.load(&FakeFetcher::default(), &queue.spawner());
    assert_eq!(queue.len(), 0);
    assert_eq!(*seen.ready.borrow(), 1);
    assert_eq!(loader.phase(), LoadPhase::Ready);
    assert_eq!(loader.store().borrow().percent(), 100.0);
}

#[test]
fn duplicate_and_late_completions_are_ignored() {
    let manifest = ResourceManifest::new(vec![
        ResourceEntry::new("a", ResourceKind::Model, "a.glb"),
        ResourceEntry::new("b", ResourceKind::Model, "b.glb"),
    ]);
    let loader = ResourceLoader::new(manifest);
    let seen = observe(&loader);

    loader.complete(0, Ok(vec![1]));
    loader.complete(0, Ok(vec![9]));
    assert_eq!(*seen.progress.borrow(), vec![50.0]);

    loader.complete(1, Ok(vec![2]));
    assert_eq!(*seen.ready.borrow(), 1);

    loader.complete(1, Ok(vec![3]));
    loader.complete(7, Ok(vec![3]));
    assert_eq!(*seen.ready.borrow(), 1);
    assert_eq!(*seen.progress.borrow(), vec![50.0, 100.0]);
    assert_eq!(
        loader.store().borrow().get("a").map(|a| a.bytes.to_vec()),
        Some(vec![1])
    );
}

#[test]
fn second_load_is_ignored() {
    let loader = ResourceLoader::new(four_entries());
    let queue = TaskQueue::default();
    loader.load(&all_files(), &queue.spawner());
    loader.load(&all_files(), &queue.spawner());
    assert_eq!(queue.len(), 4);
}

#[test]
fn missing_asset_lookup_names_the_asset() {
    let loader = ResourceLoader::new(four_entries());
    let store = loader.store();
    let err = store.borrow().require("nope").map(|_| ()).unwrap_err();
    assert_eq!(err, SceneError::MissingAsset("nope".into()));
}
