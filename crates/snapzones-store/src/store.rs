//! Layout store interface and an in-memory implementation.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;
use zone_geom::Rect;

use crate::{AssignmentTarget, ContextKey, Error, Layout, LayoutId, Result};

/// Capacity of the store change broadcast channel.
const EVENT_CAPACITY: usize = 64;

/// Read-only view of layouts and assignments, injected into the resolver.
pub trait LayoutStore: Send + Sync {
    /// All layouts in store-defined order.
    fn layouts(&self) -> Vec<Arc<Layout>>;

    /// Look up a layout by id.
    fn layout_by_id(&self, id: &LayoutId) -> Option<Arc<Layout>>;

    /// The global default layout, if any layout exists.
    fn default_layout(&self) -> Option<Arc<Layout>>;

    /// The assignment stored for exactly this key (no fallback).
    fn assignment_for(&self, screen: &str, desktop: u32, activity: &str)
    -> Option<AssignmentTarget>;

    /// Monotonic version, bumped on every mutation. Used to key resolver caches.
    fn version(&self) -> u64;
}

/// Change notifications published by [`MemoryLayoutStore`].
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    /// A layout was added.
    LayoutAdded(LayoutId),
    /// A layout's contents were replaced.
    LayoutChanged(LayoutId),
    /// A layout was removed, along with `pruned` assignments that pointed at it.
    LayoutRemoved {
        /// Removed layout.
        id: LayoutId,
        /// Number of stale assignments pruned.
        pruned: usize,
    },
    /// An assignment was created, replaced or removed.
    AssignmentChanged(ContextKey),
    /// The default layout changed.
    DefaultChanged(Option<LayoutId>),
}

/// Mutable state behind the store lock.
#[derive(Default)]
struct StoreState {
    /// Layouts in insertion order.
    layouts: Vec<Arc<Layout>>,
    /// Explicit default layout.
    default: Option<LayoutId>,
    /// Assignments keyed by exact context.
    assignments: HashMap<ContextKey, AssignmentTarget>,
}

impl StoreState {
    /// Position of a layout in the ordered list.
    fn index_of(&self, id: &LayoutId) -> Option<usize> {
        self.layouts.iter().position(|l| l.id() == id)
    }
}

/// Thread-safe in-memory [`LayoutStore`].
pub struct MemoryLayoutStore {
    /// Layouts, default and assignments.
    state: RwLock<StoreState>,
    /// Bumped on every mutation.
    version: AtomicU64,
    /// Change notifications.
    events: broadcast::Sender<StoreEvent>,
}

impl Default for MemoryLayoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLayoutStore {
    /// Empty store at version 0.
    pub fn new() -> Self {
        let (events, _rx) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RwLock::new(StoreState::default()),
            version: AtomicU64::new(0),
            events,
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Bump the version and publish an event.
    fn changed(&self, event: StoreEvent) {
        let v = self.version.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(version = v, event = ?event, "store_changed");
        // No subscribers is fine.
        let _ignored = self.events.send(event);
    }

    /// Append a layout. Fails if the id already exists.
    pub fn add_layout(&self, layout: Layout) -> Result<()> {
        let id = layout.id().clone();
        {
            let mut st = self.state.write();
            if st.index_of(&id).is_some() {
                return Err(Error::DuplicateLayout(id));
            }
            st.layouts.push(Arc::new(layout));
        }
        self.changed(StoreEvent::LayoutAdded(id));
        Ok(())
    }

    /// Replace an existing layout in place, keeping its position.
    pub fn replace_layout(&self, layout: Layout) -> Result<()> {
        let id = layout.id().clone();
        {
            let mut st = self.state.write();
            let idx = st
                .index_of(&id)
                .ok_or_else(|| Error::UnknownLayout(id.clone()))?;
            st.layouts[idx] = Arc::new(layout);
        }
        self.changed(StoreEvent::LayoutChanged(id));
        Ok(())
    }

    /// Remove a layout, pruning assignments that reference it and clearing the default if it
    /// pointed at it. Returns the number of pruned assignments.
    pub fn remove_layout(&self, id: &LayoutId) -> Result<usize> {
        let (pruned, default_cleared) = {
            let mut st = self.state.write();
            let idx = st
                .index_of(id)
                .ok_or_else(|| Error::UnknownLayout(id.clone()))?;
            st.layouts.remove(idx);
            let before = st.assignments.len();
            st.assignments
                .retain(|_, target| !matches!(target, AssignmentTarget::Layout(l) if l == id));
            let pruned = before - st.assignments.len();
            let default_cleared = st.default.as_ref() == Some(id);
            if default_cleared {
                st.default = None;
            }
            (pruned, default_cleared)
        };
        self.changed(StoreEvent::LayoutRemoved {
            id: id.clone(),
            pruned,
        });
        if default_cleared {
            self.changed(StoreEvent::DefaultChanged(None));
        }
        Ok(pruned)
    }

    /// Set (or clear) the explicit default layout.
    pub fn set_default(&self, id: Option<LayoutId>) -> Result<()> {
        {
            let mut st = self.state.write();
            if let Some(id) = &id
                && st.index_of(id).is_none()
            {
                return Err(Error::UnknownLayout(id.clone()));
            }
            st.default = id.clone();
        }
        self.changed(StoreEvent::DefaultChanged(id));
        Ok(())
    }

    /// Create or replace the assignment for `key`.
    pub fn assign(&self, key: ContextKey, target: AssignmentTarget) {
        self.state.write().assignments.insert(key.clone(), target);
        self.changed(StoreEvent::AssignmentChanged(key));
    }

    /// Remove the assignment for `key`, returning it if present.
    pub fn unassign(&self, key: &ContextKey) -> Option<AssignmentTarget> {
        let removed = self.state.write().assignments.remove(key);
        if removed.is_some() {
            self.changed(StoreEvent::AssignmentChanged(key.clone()));
        }
        removed
    }

    /// Snapshot of all assignments, sorted by key.
    pub fn assignments(&self) -> Vec<(ContextKey, AssignmentTarget)> {
        let mut out: Vec<_> = self
            .state
            .read()
            .assignments
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Replace every layout with a copy recalculated for `reference`.
    pub fn recalculate_all(&self, reference: Rect) {
        let ids: Vec<LayoutId> = {
            let mut st = self.state.write();
            st.layouts = st
                .layouts
                .iter()
                .map(|l| Arc::new(l.recalculated(reference)))
                .collect();
            st.layouts.iter().map(|l| l.id().clone()).collect()
        };
        for id in ids {
            self.changed(StoreEvent::LayoutChanged(id));
        }
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn layouts(&self) -> Vec<Arc<Layout>> {
        self.state.read().layouts.clone()
    }

    fn layout_by_id(&self, id: &LayoutId) -> Option<Arc<Layout>> {
        let st = self.state.read();
        st.index_of(id).map(|i| st.layouts[i].clone())
    }

    /// The explicit default when set and present, otherwise the first layout.
    fn default_layout(&self) -> Option<Arc<Layout>> {
        let st = self.state.read();
        st.default
            .as_ref()
            .and_then(|id| st.index_of(id))
            .map(|i| st.layouts[i].clone())
            .or_else(|| st.layouts.first().cloned())
    }

    fn assignment_for(
        &self,
        screen: &str,
        desktop: u32,
        activity: &str,
    ) -> Option<AssignmentTarget> {
        self.state
            .read()
            .assignments
            .get(&ContextKey::new(screen, desktop, activity))
            .cloned()
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}
