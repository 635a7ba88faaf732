//! Fixture helpers for store, resolver and selector tests.
//! These helpers are public so downstream crates can share them; they are intended for tests.

use std::sync::Arc;

use parking_lot::Mutex;
use zone_geom::Rect;

use crate::{
    AlgorithmRegistry, AssignmentTarget, ContextKey, Layout, LayoutCategory, LayoutId,
    MemoryLayoutStore,
};

/// Two side-by-side halves.
pub const HALVES: [Rect; 2] = [Rect::new(0.0, 0.0, 0.5, 1.0), Rect::new(0.5, 0.0, 0.5, 1.0)];

/// Three equal columns.
pub const THIRDS: [Rect; 3] = [
    Rect::new(0.0, 0.0, 1.0 / 3.0, 1.0),
    Rect::new(1.0 / 3.0, 0.0, 1.0 / 3.0, 1.0),
    Rect::new(2.0 / 3.0, 0.0, 1.0 / 3.0, 1.0),
];

/// Build a manual layout from relative rects, panicking on invalid geometry.
pub fn layout(id: &str, rects: &[Rect]) -> Layout {
    match Layout::from_relative(LayoutId::new(id), id.to_uppercase(), LayoutCategory::Manual, rects)
    {
        Ok(l) => l,
        Err(e) => panic!("fixture layout {id}: {e}"),
    }
}

/// Store seeded with the given `(id, rects)` layouts, the first being the default.
pub fn store_with(layouts: &[(&str, &[Rect])]) -> Arc<MemoryLayoutStore> {
    let store = MemoryLayoutStore::new();
    for (id, rects) in layouts {
        if let Err(e) = store.add_layout(layout(id, rects)) {
            panic!("fixture store: {e}");
        }
    }
    if let Some((first, _)) = layouts.first()
        && let Err(e) = store.set_default(Some(LayoutId::new(first)))
    {
        panic!("fixture store: {e}");
    }
    Arc::new(store)
}

/// Pin `layout` for an exact context.
pub fn assign(store: &MemoryLayoutStore, screen: &str, desktop: u32, activity: &str, layout: &str) {
    store.assign(
        ContextKey::new(screen, desktop, activity),
        AssignmentTarget::Layout(LayoutId::new(layout)),
    );
}

/// Scriptable algorithm registry that records preview lookups.
#[derive(Default)]
pub struct FakeAlgorithms {
    /// `(id, name, preview)` triples.
    algorithms: Vec<(String, String, Vec<Rect>)>,
    /// Recorded preview lookups.
    lookups: Mutex<Vec<String>>,
}

impl FakeAlgorithms {
    /// Registry with no algorithms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an algorithm with a fixed preview.
    pub fn with(mut self, id: &str, name: &str, preview: &[Rect]) -> Self {
        self.algorithms
            .push((id.to_string(), name.to_string(), preview.to_vec()));
        self
    }

    /// Ids passed to [`AlgorithmRegistry::preview_zones`] so far.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }
}

impl AlgorithmRegistry for FakeAlgorithms {
    fn available_algorithms(&self) -> Vec<String> {
        self.algorithms.iter().map(|(id, _, _)| id.clone()).collect()
    }

    fn preview_zones(&self, id: &str) -> Vec<Rect> {
        self.lookups.lock().push(id.to_string());
        self.algorithms
            .iter()
            .find(|(a, _, _)| a == id)
            .map(|(_, _, p)| p.clone())
            .unwrap_or_default()
    }

    fn display_name(&self, id: &str) -> Option<String> {
        self.algorithms
            .iter()
            .find(|(a, _, _)| a == id)
            .map(|(_, n, _)| n.clone())
    }
}
