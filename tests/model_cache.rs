mod common;

use common::StubProvider;
use opus_translate::pipelines::translation::{ModelCache, ModelHandle, ModelProvider};
use opus_translate::TranslationError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const FRENCH: &str = "Helsinki-NLP/opus-mt-en-fr";
const GERMAN: &str = "Helsinki-NLP/opus-mt-en-de";

#[test]
fn test_acquire_memoizes_handle() -> anyhow::Result<()> {
    let cache = ModelCache::new(StubProvider::new());
    assert!(cache.is_empty());

    let first = cache.acquire(FRENCH)?;
    let second = cache.acquire(FRENCH)?;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.model_identifier(), FRENCH);
    assert_eq!(cache.provider().load_count(FRENCH), 1);
    assert!(cache.is_loaded(FRENCH));
    assert!(!cache.is_loaded(GERMAN));
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn test_acquire_failure() {
    let cache = ModelCache::new(StubProvider::new().failing("X"));

    let error = cache.acquire("X").unwrap_err();

    assert_eq!(
        error,
        TranslationError::ModelLoad {
            model_identifier: "X".to_string(),
            cause: "Endpoint not available error: connection refused".to_string(),
        }
    );
    assert!(cache.is_empty());
    assert_eq!(cache.provider().load_count("X"), 1);

    assert_eq!(cache.acquire("X").unwrap_err(), error);
    assert_eq!(cache.provider().load_count("X"), 1);
    assert_eq!(cache.failed_models(), vec!["X".to_string()]);
}

/// Reports load failures under another model identifier.
struct MislabelingProvider;

impl ModelProvider for MislabelingProvider {
    fn load(&self, _model_identifier: &str) -> Result<ModelHandle, TranslationError> {
        Err(TranslationError::ModelLoad {
            model_identifier: "Helsinki-NLP/opus-mt-en-ROMANCE".to_string(),
            cause: "missing weights".to_string(),
        })
    }
}

#[test]
fn test_acquire_failure_names_requested_model() {
    let cache = ModelCache::new(MislabelingProvider);

    assert_eq!(
        cache.acquire(FRENCH).unwrap_err(),
        TranslationError::ModelLoad {
            model_identifier: FRENCH.to_string(),
            cause: "missing weights".to_string(),
        }
    );
}

#[test]
fn test_concurrent_acquire_loads_once() -> anyhow::Result<()> {
    let threads = 8;
    let cache = Arc::new(ModelCache::new(
        StubProvider::new().with_load_delay(Duration::from_millis(200)),
    ));
    let barrier = Arc::new(Barrier::new(threads));

    let workers: Vec<_> = (0..threads)
        .map(|_| {
            let cache = cache.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                cache.acquire(FRENCH)
            })
        })
        .collect();
    let handles = workers
        .into_iter()
        .map(|worker| worker.join().expect("worker panicked"))
        .collect::<Result<Vec<Arc<ModelHandle>>, TranslationError>>()?;

    assert_eq!(cache.provider().load_count(FRENCH), 1);
    assert!(handles
        .iter()
        .all(|handle| Arc::ptr_eq(handle, &handles[0])));
    Ok(())
}

#[test]
fn test_concurrent_waiters_share_failure() {
    let threads = 4;
    let cache = Arc::new(ModelCache::new(
        StubProvider::new()
            .failing(FRENCH)
            .with_load_delay(Duration::from_millis(300)),
    ));
    let barrier = Arc::new(Barrier::new(threads));

    let results: Vec<_> = (0..threads)
        .map(|_| {
            let cache = cache.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                cache.acquire(FRENCH)
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|worker| worker.join().expect("worker panicked"))
        .collect();

    assert_eq!(cache.provider().load_count(FRENCH), 1);
    for result in results {
        assert!(matches!(
            result,
            Err(TranslationError::ModelLoad { ref model_identifier, .. }) if model_identifier == FRENCH
        ));
    }
}

/// Records how many loads run at the same time.
struct OverlapProvider {
    running: AtomicUsize,
    max_running: AtomicUsize,
    inner: StubProvider,
}

impl ModelProvider for OverlapProvider {
    fn load(&self, model_identifier: &str) -> Result<ModelHandle, TranslationError> {
        let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running.fetch_max(running, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(300));
        let handle = self.inner.load(model_identifier);
        self.running.fetch_sub(1, Ordering::SeqCst);
        handle
    }
}

#[test]
fn test_different_models_load_in_parallel() -> anyhow::Result<()> {
    let cache = Arc::new(ModelCache::new(OverlapProvider {
        running: AtomicUsize::new(0),
        max_running: AtomicUsize::new(0),
        inner: StubProvider::new(),
    }));
    let barrier = Arc::new(Barrier::new(2));

    let workers: Vec<_> = [FRENCH, GERMAN]
        .iter()
        .map(|model_identifier| {
            let cache = cache.clone();
            let barrier = barrier.clone();
            let model_identifier = model_identifier.to_string();
            thread::spawn(move || {
                barrier.wait();
                cache.acquire(&model_identifier).map(|_| ())
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker panicked")?;
    }

    assert_eq!(cache.provider().max_running.load(Ordering::SeqCst), 2);
    assert_eq!(cache.len(), 2);
    Ok(())
}

/// Panics on its first load, then delegates to a stub.
struct PanickingProvider {
    panicked: AtomicBool,
    loads: AtomicUsize,
    inner: StubProvider,
}

impl ModelProvider for PanickingProvider {
    fn load(&self, model_identifier: &str) -> Result<ModelHandle, TranslationError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.panicked.swap(true, Ordering::SeqCst) {
            panic!("corrupted model file");
        }
        self.inner.load(model_identifier)
    }
}

#[test]
fn test_panicking_load_releases_slot() -> anyhow::Result<()> {
    let cache = Arc::new(ModelCache::new(PanickingProvider {
        panicked: AtomicBool::new(false),
        loads: AtomicUsize::new(0),
        inner: StubProvider::new(),
    }));

    let leader = {
        let cache = cache.clone();
        thread::spawn(move || cache.acquire(FRENCH).map(|_| ()))
    };
    assert!(leader.join().is_err());
    assert!(!cache.is_loaded(FRENCH));

    let handle = cache.acquire(FRENCH)?;

    assert_eq!(handle.model_identifier(), FRENCH);
    assert_eq!(cache.provider().loads.load(Ordering::SeqCst), 2);
    Ok(())
}
