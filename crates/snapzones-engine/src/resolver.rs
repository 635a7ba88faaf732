//! Active layout resolution and picker candidate lists.

use std::{num::NonZeroUsize, sync::Arc};

use lru::LruCache;
use parking_lot::Mutex;
use snapzones_store::{
    AlgorithmRegistry, AssignmentTarget, ContextKey, Layout, LayoutCategory, LayoutId,
    LayoutStore,
};
use tracing::{debug, trace};
use zone_geom::Rect;

/// Default number of memoized resolutions.
const DEFAULT_CAPACITY: usize = 64;

/// One item offered by the picker: a manual layout or an algorithm presented as a layout.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateEntry {
    /// Layout id; `autotile:<algorithm>` for algorithms.
    pub id: LayoutId,
    /// Display name.
    pub name: String,
    /// Manual or auto-tiling.
    pub category: LayoutCategory,
    /// Relative zone geometry in zone order.
    pub zones: Vec<Rect>,
    /// Whether this is the active layout for the context the list was built for.
    pub active: bool,
}

impl CandidateEntry {
    /// Number of zones.
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Entry for a stored layout.
    fn from_layout(layout: &Layout, active: bool) -> Self {
        Self {
            id: layout.id().clone(),
            name: layout.name().to_string(),
            category: layout.category(),
            zones: layout.zones().iter().map(|z| z.relative()).collect(),
            active,
        }
    }
}

/// Memo key: the exact context plus the store version it was computed against.
type MemoKey = (ContextKey, u64);

/// Resolves the active layout per context and builds candidate lists.
///
/// Resolution is memoized per `(screen, desktop, activity, store version)`; a store mutation
/// bumps the version so stale entries are never returned.
pub struct LayoutResolver {
    /// Injected layout source.
    store: Arc<dyn LayoutStore>,
    /// Injected algorithm source.
    algorithms: Arc<dyn AlgorithmRegistry>,
    /// Memoized resolutions.
    memo: Mutex<LruCache<MemoKey, Option<Arc<Layout>>>>,
}

impl LayoutResolver {
    /// Create a resolver over the given store and registry.
    pub fn new(store: Arc<dyn LayoutStore>, algorithms: Arc<dyn AlgorithmRegistry>) -> Self {
        Self::with_capacity(store, algorithms, DEFAULT_CAPACITY)
    }

    /// Create a resolver with a specific memo capacity.
    pub fn with_capacity(
        store: Arc<dyn LayoutStore>,
        algorithms: Arc<dyn AlgorithmRegistry>,
        capacity: usize,
    ) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            store,
            algorithms,
            memo: Mutex::new(LruCache::new(cap)),
        }
    }

    /// Drop all memoized resolutions.
    pub fn invalidate(&self) {
        self.memo.lock().clear();
        trace!("resolver_invalidated");
    }

    /// The active layout for a context, following the assignment precedence chain:
    /// exact key, then any activity, then any desktop, then the store default.
    pub fn resolve_active(&self, screen: &str, desktop: u32, activity: &str) -> Option<Arc<Layout>> {
        let key = (ContextKey::new(screen, desktop, activity), self.store.version());
        if let Some(hit) = self.memo.lock().get(&key).cloned() {
            trace!(context = %key.0, "resolver_memo_hit");
            return hit;
        }

        let resolved = self.resolve_uncached(&key.0);
        debug!(
            context = %key.0,
            layout = resolved.as_ref().map(|l| l.id().as_str()).unwrap_or("<none>"),
            "resolved_active_layout"
        );
        self.memo.lock().put(key, resolved.clone());
        resolved
    }

    /// Walk the precedence chain without consulting the memo.
    fn resolve_uncached(&self, ctx: &ContextKey) -> Option<Arc<Layout>> {
        for key in [ctx.clone(), ctx.desktop_only(), ctx.screen_only()] {
            let Some(target) = self
                .store
                .assignment_for(&key.screen, key.desktop, &key.activity)
            else {
                continue;
            };
            match self.target_layout(&target) {
                Some(layout) => return Some(layout),
                None => debug!(key = %key, target = ?target, "stale_assignment_skipped"),
            }
        }
        self.store.default_layout()
    }

    /// Materialize an assignment target, or `None` if it no longer exists.
    fn target_layout(&self, target: &AssignmentTarget) -> Option<Arc<Layout>> {
        match target {
            AssignmentTarget::Layout(id) => self.store.layout_by_id(id),
            AssignmentTarget::Algorithm(alg) => self.algorithm_layout(alg).map(Arc::new),
        }
    }

    /// Build the pseudo-layout for a registered algorithm.
    fn algorithm_layout(&self, algorithm: &str) -> Option<Layout> {
        if !self
            .algorithms
            .available_algorithms()
            .iter()
            .any(|a| a == algorithm)
        {
            return None;
        }
        let name = self
            .algorithms
            .display_name(algorithm)
            .unwrap_or_else(|| algorithm.to_string());
        let zones = self.algorithms.preview_zones(algorithm);
        match Layout::from_relative(
            LayoutId::for_algorithm(algorithm),
            name,
            LayoutCategory::Autotile,
            &zones,
        ) {
            Ok(layout) => Some(layout),
            Err(e) => {
                debug!(algorithm, error = %e, "algorithm_preview_rejected");
                None
            }
        }
    }

    /// Ordered picker entries: manual layouts in store order, then every registered algorithm.
    /// The entry matching the context's active layout is marked.
    pub fn candidate_list(
        &self,
        screen: &str,
        desktop: u32,
        activity: &str,
        include_manual: bool,
        include_autotile: bool,
    ) -> Vec<CandidateEntry> {
        let active = self
            .resolve_active(screen, desktop, activity)
            .map(|l| l.id().clone());
        let is_active = |id: &LayoutId| active.as_ref() == Some(id);

        let mut out = Vec::new();
        if include_manual {
            out.extend(
                self.store
                    .layouts()
                    .iter()
                    .map(|l| CandidateEntry::from_layout(l, is_active(l.id()))),
            );
        }
        if include_autotile {
            out.extend(
                self.algorithms
                    .available_algorithms()
                    .iter()
                    .filter_map(|alg| self.algorithm_layout(alg))
                    .map(|l| {
                        let active = is_active(l.id());
                        CandidateEntry::from_layout(&l, active)
                    }),
            );
        }
        out
    }
}
