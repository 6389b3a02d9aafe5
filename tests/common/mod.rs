//! Shared test doubles for the integration tests.
#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use stylecache::{
    DocumentContext, MaterializeError, MaterializeErrorKind, RegistryConfig, StyleDescriptor,
    StyleFactory, StyleId, StyleRegistry,
};

/// In-memory stand-in for the document engine.
///
/// Rejects colors that do not start with `#` and number formats with an
/// unclosed `[`. Can be told to stall inside `materialize` to widen race
/// windows.
#[derive(Default)]
pub struct MockEngine {
    calls: AtomicU64,
    delay: Option<Duration>,
    registered: Mutex<Vec<StyleDescriptor>>,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    /// Number of `materialize` calls, failed ones included.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Descriptors the engine accepted, in registration order.
    pub fn registered(&self) -> Vec<StyleDescriptor> {
        self.registered.lock().clone()
    }
}

impl StyleFactory for MockEngine {
    fn materialize(&self, descriptor: &StyleDescriptor) -> Result<StyleId, MaterializeError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }

        for color in [&descriptor.font.color, &descriptor.fill.color] {
            if !color.is_empty() && !color.starts_with('#') {
                return Err(MaterializeError::new(
                    MaterializeErrorKind::InvalidColor,
                    color.clone(),
                ));
            }
        }
        let fmt = &descriptor.number_format;
        if fmt.matches('[').count() != fmt.matches(']').count() {
            return Err(MaterializeError::new(
                MaterializeErrorKind::InvalidNumberFormat,
                fmt.clone(),
            ));
        }

        self.registered.lock().push(descriptor.clone());
        Ok(StyleId::new(n + 1))
    }
}

/// A worksheet that records which style each cell was bound to.
pub struct MockSheet {
    pub engine: Arc<MockEngine>,
    pub cells: HashMap<String, StyleId>,
}

impl MockSheet {
    pub fn new(engine: Arc<MockEngine>) -> Self {
        Self {
            engine,
            cells: HashMap::new(),
        }
    }
}

impl StyleFactory for MockSheet {
    fn materialize(&self, descriptor: &StyleDescriptor) -> Result<StyleId, MaterializeError> {
        self.engine.materialize(descriptor)
    }
}

impl DocumentContext for MockSheet {
    fn bind_style(&mut self, target: &str, id: StyleId) -> Result<(), MaterializeError> {
        if target.is_empty() {
            return Err(MaterializeError::other("empty cell reference"));
        }
        self.cells.insert(target.to_string(), id);
        Ok(())
    }
}

pub fn registry_with(capacity: usize) -> (StyleRegistry, Arc<MockEngine>) {
    let engine = MockEngine::new();
    let registry = StyleRegistry::from_shared(
        engine.clone(),
        RegistryConfig::default().with_capacity(capacity),
    );
    (registry, engine)
}

/// Routes `tracing` output to the test harness. Set `RUST_LOG=debug` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A distinct descriptor per `i`.
pub fn numbered(i: usize) -> StyleDescriptor {
    StyleDescriptor::new().number_format(format!("0.{}", "0".repeat(i)))
}
