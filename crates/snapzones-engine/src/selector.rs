//! Per-screen zone selector: ties resolution, planning, hit testing and proximity together.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use config::{SelectorConfig, Settings};
use parking_lot::Mutex;
use snapzones_store::{AlgorithmRegistry, LayoutId, LayoutStore};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace, warn};
use zone_geom::{Point, effective_rect};

use crate::{
    Result,
    event::{ContextChange, PopupModel, ScreenContext, Selection, SelectorEvent},
    hit_test::{Hit, hit_test},
    nav::Direction,
    notification::EventDispatcher,
    planner::PopupGeometry,
    proximity::{ProximityMachine, ProximityState, Transition},
    resolver::{CandidateEntry, LayoutResolver},
    ticker::Ticker,
};

/// Ticker id of the pointer sampler.
const SAMPLE_TIMER: &str = "sample";
/// Ticker id of the collapse debounce.
const COLLAPSE_TIMER: &str = "collapse";

/// Hovered `(entry, zone)`.
type Hover = Option<(usize, Option<usize>)>;

/// Mutable selector state, guarded by one lock.
struct SelectorState {
    /// Screen, desktop and activity.
    context: ScreenContext,
    /// Current settings.
    settings: Settings,
    /// Presentation resolved for this screen.
    selector: SelectorConfig,
    /// Disclosure state machine.
    machine: ProximityMachine,
    /// Candidates shown in the popup.
    entries: Vec<CandidateEntry>,
    /// Popup layout for `entries`.
    geometry: Option<PopupGeometry>,
    /// Content scroll offset.
    scroll: f64,
    /// Hovered entry and zone.
    hovered: Hover,
    /// Keyboard cursor.
    cursor: Option<usize>,
    /// Layout and zone last reported through `Hovered`.
    announced: Option<(LayoutId, Option<usize>)>,
    /// Bumped whenever the collapse debounce is armed or disarmed. A firing callback only
    /// collapses if its epoch is still current.
    collapse_epoch: u64,
}

/// Shared selector internals. Timer callbacks hold a weak reference.
struct Inner {
    /// Handle given to timer callbacks.
    this: Weak<Inner>,
    /// Active layout and candidate source.
    resolver: LayoutResolver,
    /// Outgoing events.
    notifier: EventDispatcher,
    /// Sampler and collapse timers.
    ticker: Ticker,
    /// Everything else.
    state: Mutex<SelectorState>,
}

/// Zone selector for one screen.
///
/// Feed it drag events, keyboard commands and context changes; it emits [`SelectorEvent`]s on the
/// channel given at construction. Cloning yields another handle to the same selector.
#[derive(Clone)]
pub struct ZoneSelector {
    /// Shared internals.
    inner: Arc<Inner>,
}

impl ZoneSelector {
    /// Create a hidden selector for `context`.
    pub fn new(
        context: ScreenContext,
        settings: Settings,
        store: Arc<dyn LayoutStore>,
        algorithms: Arc<dyn AlgorithmRegistry>,
        tx: UnboundedSender<SelectorEvent>,
    ) -> Self {
        let mut machine = ProximityMachine::new(settings.proximity);
        machine.set_enabled(settings.enabled);
        let selector = settings.selector_for(&context.screen_id);
        let state = SelectorState {
            context,
            settings,
            selector,
            machine,
            entries: Vec::new(),
            geometry: None,
            scroll: 0.0,
            hovered: None,
            cursor: None,
            announced: None,
            collapse_epoch: 0,
        };
        Self {
            inner: Arc::new_cyclic(|this| Inner {
                this: this.clone(),
                resolver: LayoutResolver::new(store, algorithms),
                notifier: EventDispatcher::new(tx),
                ticker: Ticker::new(),
                state: Mutex::new(state),
            }),
        }
    }

    /// Current disclosure state.
    pub fn state(&self) -> ProximityState {
        self.inner.state.lock().machine.state()
    }

    /// Proximity at the last sample.
    pub fn proximity(&self) -> f64 {
        self.inner.state.lock().machine.proximity()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.inner.state.lock().machine.is_dragging()
    }

    /// Current screen context.
    pub fn context(&self) -> ScreenContext {
        self.inner.state.lock().context.clone()
    }

    /// Candidates from the last refresh.
    pub fn entries(&self) -> Vec<CandidateEntry> {
        self.inner.state.lock().entries.clone()
    }

    /// Popup geometry from the last refresh.
    pub fn geometry(&self) -> Option<PopupGeometry> {
        self.inner.state.lock().geometry
    }

    /// Hovered `(entry, zone)`.
    pub fn hovered(&self) -> Option<(usize, Option<usize>)> {
        self.inner.state.lock().hovered
    }

    /// Content scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.inner.state.lock().scroll
    }

    /// The resolver backing this selector.
    pub fn resolver(&self) -> &LayoutResolver {
        &self.inner.resolver
    }

    /// A window drag began: refresh candidates and start periodic sampling.
    pub fn drag_started(&self) -> Result<()> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        if !st.machine.start_drag() {
            trace!("drag_ignored_disabled");
            return Ok(());
        }
        debug!(screen = %st.context.screen_id, "drag_started");
        inner.reload(st)?;

        let interval = Duration::from_millis(st.settings.proximity.sample_interval_ms.max(1));
        let weak = inner.this.clone();
        inner.ticker.start(SAMPLE_TIMER, interval, interval, move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_sample();
            }
        });
        Ok(())
    }

    /// The dragged pointer moved to `(x, y)` in global pixels.
    pub fn drag_pointer_moved(&self, x: f64, y: f64) -> Result<()> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        if !st.machine.is_dragging() {
            return Ok(());
        }
        let p = Point::new(x, y);
        let moved = st.machine.pointer_moved(p);
        if moved && st.machine.state() == ProximityState::Expanded {
            inner.arm_collapse(st);
        }
        inner.update_hover(st, p)
    }

    /// The drag ended. Commits the hovered zone, if any, then hides. Safe when not dragging.
    pub fn drag_ended(&self) -> Result<Option<Selection>> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        inner.ticker.stop(SAMPLE_TIMER);
        let selection = if st.machine.state() == ProximityState::Expanded {
            st.hovered
                .and_then(|(e, z)| z.and_then(|z| inner.selection(st, e, z)))
        } else {
            None
        };
        let t = st.machine.end_drag();
        inner.disarm_collapse(st);
        if let Some(sel) = &selection {
            inner.notifier.selection_made(sel.clone())?;
        }
        inner.apply(st, t)?;
        Ok(selection)
    }

    /// Show the popup fully, outside of a drag.
    pub fn expand(&self) -> Result<()> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        inner.reload(st)?;
        let t = st.machine.expand();
        inner.apply(st, t)
    }

    /// Hide the popup.
    pub fn hide(&self) -> Result<()> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        let t = st.machine.hide();
        inner.apply(st, t)
    }

    /// Cycle `Hidden → Near → Expanded → Hidden`.
    pub fn toggle(&self) -> Result<()> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        if st.machine.state() == ProximityState::Hidden {
            inner.reload(st)?;
        }
        let t = st.machine.toggle();
        inner.apply(st, t)
    }

    /// Enable or disable the selector. Disabling hides immediately and stops all timers.
    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        st.settings.enabled = enabled;
        if !enabled {
            inner.ticker.stop(SAMPLE_TIMER);
            inner.disarm_collapse(st);
        }
        let t = st.machine.set_enabled(enabled);
        inner.apply(st, t)
    }

    /// Scroll the popup content by `dy` pixels, clamped to the scrollable range.
    pub fn scroll_by(&self, dy: f64) -> Result<()> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        let Some(g) = st.geometry else {
            return Ok(());
        };
        let next = g.clamp_scroll(st.scroll + dy);
        if next == st.scroll {
            return Ok(());
        }
        st.scroll = next;
        trace!(offset = next, "popup_scrolled");
        if st.machine.state().is_visible() {
            inner.publish_popup(st)?;
        }
        Ok(())
    }

    /// Move the keyboard cursor and scroll its row into view.
    pub fn navigate(&self, direction: Direction) -> Result<()> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        let Some(g) = st.geometry else {
            return Ok(());
        };
        if !st.machine.state().is_visible() || st.entries.is_empty() {
            return Ok(());
        }
        let from = st.cursor.unwrap_or(0);
        let to = direction.step(from, st.entries.len(), g.columns);
        st.cursor = Some(to);
        st.scroll = g.reveal_row(g.cell(to).0, st.scroll);
        trace!(direction = %direction, from, to, "cursor_moved");
        inner.set_hover(st, Some((to, None)))?;
        inner.publish_popup(st)
    }

    /// Commit zone `number` (1-based) of the layout under the cursor, then hide.
    pub fn select_zone(&self, number: u32) -> Result<Option<Selection>> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        if !st.machine.state().is_visible() {
            return Ok(None);
        }
        let entry = st.hovered.map(|(e, _)| e).or(st.cursor);
        let selection = match (entry, number.checked_sub(1)) {
            (Some(e), Some(z)) => inner.selection(st, e, z as usize),
            _ => None,
        };
        inner.commit(st, selection)
    }

    /// Commit the hovered zone, if any, then hide.
    pub fn select_hovered(&self) -> Result<Option<Selection>> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        let selection = st
            .hovered
            .and_then(|(e, z)| z.and_then(|z| inner.selection(st, e, z)));
        inner.commit(st, selection)
    }

    /// Apply a context change, invalidate cached resolutions, and refresh a live popup.
    pub fn context_changed(&self, change: ContextChange) -> Result<()> {
        let inner = &self.inner;
        let mut guard = inner.state.lock();
        let st = &mut *guard;
        debug!(change = ?change, "context_changed");
        match change {
            ContextChange::Screen { screen_id, geometry } => {
                st.context.screen_id = screen_id;
                st.context.geometry = geometry;
                st.selector = st.settings.selector_for(&st.context.screen_id);
            }
            ContextChange::Desktop(desktop) => st.context.desktop = desktop,
            ContextChange::Activity(activity) => st.context.activity = activity,
            ContextChange::Settings(settings) => {
                let enabled = settings.enabled;
                st.settings = *settings;
                st.selector = st.settings.selector_for(&st.context.screen_id);
                st.machine.set_config(st.settings.proximity);
                if enabled != st.machine.is_enabled() {
                    if !enabled {
                        inner.ticker.stop(SAMPLE_TIMER);
                        inner.disarm_collapse(st);
                    }
                    let t = st.machine.set_enabled(enabled);
                    inner.apply(st, t)?;
                }
            }
            ContextChange::Layouts => {}
        }
        inner.resolver.invalidate();

        if st.machine.state().is_visible() || st.machine.is_dragging() {
            inner.reload(st)?;
            if st.machine.state().is_visible() {
                inner.publish_popup(st)?;
            }
        }
        Ok(())
    }

    /// Stop all timers and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.ticker.clear_async().await;
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.ticker.stop(SAMPLE_TIMER);
        self.ticker.stop(COLLAPSE_TIMER);
    }
}

impl Inner {
    /// Periodic sampler tick.
    fn on_sample(&self) {
        let mut guard = self.state.lock();
        let st = &mut *guard;
        if !st.machine.is_dragging() {
            return;
        }
        let screen = st.context.geometry;
        let t = st.machine.sample(&screen);
        let res = self.apply(st, t).and_then(|()| match st.machine.pointer() {
            Some(p) if t.is_some() => self.update_hover(st, p),
            _ => Ok(()),
        });
        if let Err(e) = res {
            warn!(error = %e, "sample_apply_failed");
        }
    }

    /// Collapse debounce fired for the arming identified by `epoch`.
    fn on_collapse(&self, epoch: u64) {
        let mut guard = self.state.lock();
        let st = &mut *guard;
        if st.collapse_epoch != epoch {
            trace!(epoch, current = st.collapse_epoch, "collapse_superseded");
            return;
        }
        let t = st.machine.collapse_idle();
        if t.is_some() {
            debug!("collapse_idle");
        }
        if let Err(e) = self.apply(st, t) {
            warn!(error = %e, "collapse_apply_failed");
        }
    }

    /// (Re)arm the collapse debounce.
    fn arm_collapse(&self, st: &mut SelectorState) {
        st.collapse_epoch += 1;
        let epoch = st.collapse_epoch;
        let delay = Duration::from_millis(st.settings.proximity.collapse_delay_ms);
        let weak = self.this.clone();
        self.ticker.once(COLLAPSE_TIMER, delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.on_collapse(epoch);
            }
        });
    }

    /// Cancel the collapse debounce, including a fire already in flight.
    fn disarm_collapse(&self, st: &mut SelectorState) {
        st.collapse_epoch += 1;
        self.ticker.stop(COLLAPSE_TIMER);
    }

    /// Refresh, apply the resulting transition, and bring the hover in line with the new entries.
    fn reload(&self, st: &mut SelectorState) -> Result<()> {
        let t = self.refresh(st);
        self.apply(st, t)?;
        self.resync_hover(st)
    }

    /// Recompute candidates and geometry for the current context. Returns the transition caused
    /// by running out of candidates, if any.
    fn refresh(&self, st: &mut SelectorState) -> Option<Transition> {
        let ctx = &st.context;
        let (manual, autotile) = st.settings.candidate_filter();
        let entries = self.resolver.candidate_list(
            &ctx.screen_id,
            ctx.desktop,
            &ctx.activity,
            manual,
            autotile,
        );
        let geometry = PopupGeometry::plan(&st.selector, ctx.geometry, entries.len());
        trace!(
            entries = entries.len(),
            columns = geometry.columns,
            rows = geometry.rows,
            "selector_refreshed"
        );

        st.scroll = geometry.clamp_scroll(st.scroll);
        st.cursor = match st.cursor {
            Some(c) if c < entries.len() => Some(c),
            _ => entries
                .iter()
                .position(|e| e.active)
                .or_else(|| (!entries.is_empty()).then_some(0)),
        };
        if st.hovered.is_some_and(|(e, _)| e >= entries.len()) {
            st.hovered = None;
        }
        let available = !entries.is_empty();
        st.entries = entries;
        st.geometry = Some(geometry);
        let t = st.machine.set_available(available);
        let popup = st
            .geometry
            .filter(|_| st.machine.state().is_visible())
            .map(|g| g.bar_rect());
        st.machine.set_popup_rect(popup);
        t
    }

    /// Emit events and manage timers for a transition.
    fn apply(&self, st: &mut SelectorState, t: Option<Transition>) -> Result<()> {
        let Some(t) = t else {
            return Ok(());
        };
        debug!(from = %t.from, to = %t.to, proximity = st.machine.proximity(), "selector_transition");

        if t.to == ProximityState::Expanded && st.machine.is_dragging() {
            self.arm_collapse(st);
        } else {
            self.disarm_collapse(st);
        }
        if t.to != ProximityState::Expanded {
            self.set_hover(st, None)?;
        }
        if !t.to.is_visible() {
            st.scroll = 0.0;
            st.cursor = None;
        }
        let popup = st.geometry.filter(|_| t.to.is_visible()).map(|g| g.bar_rect());
        st.machine.set_popup_rect(popup);

        self.notifier
            .state_changed(t.to, st.machine.proximity())?;
        if t.to.is_visible() {
            self.publish_popup(st)?;
        }
        Ok(())
    }

    /// Send the current popup model.
    fn publish_popup(&self, st: &SelectorState) -> Result<()> {
        let Some(g) = st.geometry else {
            return Ok(());
        };
        let mut model = PopupModel::build(
            &st.context.screen_id,
            st.machine.state(),
            g,
            &st.entries,
            &st.settings.gaps,
            st.scroll,
        );
        model.cursor = st.cursor;
        model.hovered = st.hovered;
        self.notifier.popup_changed(model)
    }

    /// Hit test an absolute pointer while expanded and publish hover changes.
    fn update_hover(&self, st: &mut SelectorState, p: Point) -> Result<()> {
        if st.machine.state() != ProximityState::Expanded {
            return Ok(());
        }
        let Some(g) = st.geometry else {
            return Ok(());
        };
        let hit = if g.content_rect().contains(p) {
            let origin = g.content_origin();
            let local = Point::new(p.x - origin.x, p.y - origin.y + st.scroll);
            hit_test(local, &g, &st.entries, &st.settings.gaps)
        } else {
            Hit::Miss
        };
        let hover = hit.entry().map(|e| (e, hit.zone()));
        if let Some((e, _)) = hover {
            st.cursor = Some(e);
        }
        self.set_hover(st, hover)
    }

    /// Re-derive the hover after the entries changed. A drag re-runs the hit test at the last
    /// pointer; otherwise the hover follows its layout to its new index, or is dropped.
    fn resync_hover(&self, st: &mut SelectorState) -> Result<()> {
        if !st.machine.state().is_visible() {
            return self.set_hover(st, None);
        }
        if st.machine.is_dragging()
            && st.machine.state() == ProximityState::Expanded
            && let Some(p) = st.machine.pointer()
        {
            return self.update_hover(st, p);
        }
        let hover = st.announced.as_ref().and_then(|(id, zone)| {
            let e = st.entries.iter().position(|entry| &entry.id == id)?;
            let zone = zone.filter(|&z| z < st.entries[e].zones.len());
            Some((e, zone))
        });
        self.set_hover(st, hover)
    }

    /// Record a hover and emit `Hovered` if the hovered layout or zone changed.
    fn set_hover(&self, st: &mut SelectorState, hover: Hover) -> Result<()> {
        st.hovered = hover;
        let target = hover.and_then(|(e, z)| st.entries.get(e).map(|entry| (entry.id.clone(), z)));
        if target == st.announced {
            return Ok(());
        }
        st.announced.clone_from(&target);
        let (layout_id, zone) = match target {
            Some((id, z)) => (Some(id), z),
            None => (None, None),
        };
        trace!(layout = ?layout_id, zone = ?zone, "hover_changed");
        self.notifier.hovered(layout_id, zone)
    }

    /// Selection for zone `zone` of entry `entry`, targeting the screen with gaps applied.
    fn selection(&self, st: &SelectorState, entry: usize, zone: usize) -> Option<Selection> {
        let e = st.entries.get(entry)?;
        let relative = *e.zones.get(zone)?;
        Some(Selection {
            layout_id: e.id.clone(),
            zone_index: zone,
            relative,
            target: effective_rect(&relative, &st.context.geometry, &st.settings.gaps),
        })
    }

    /// Emit a keyboard selection, if any, and hide.
    fn commit(&self, st: &mut SelectorState, selection: Option<Selection>) -> Result<Option<Selection>> {
        let Some(sel) = selection else {
            return Ok(None);
        };
        self.notifier.selection_made(sel.clone())?;
        let t = st.machine.hide();
        self.apply(st, t)?;
        Ok(Some(sel))
    }
}

#[cfg(test)]
mod tests {
    use snapzones_store::test_support::{FakeAlgorithms, HALVES, THIRDS, store_with};
    use tokio::{sync::mpsc, time};
    use zone_geom::Rect;

    use super::*;

    fn expanded_selector() -> ZoneSelector {
        let store = store_with(&[("halves", &HALVES), ("thirds", &THIRDS)]);
        let (tx, rx) = mpsc::unbounded_channel();
        // Keep the receiver alive so notifications don't fail with `ChannelClosed`.
        std::mem::forget(rx);
        ZoneSelector::new(
            ScreenContext::new("DP-1", Rect::new(0.0, 0.0, 1920.0, 1080.0)),
            Settings::default(),
            store,
            Arc::new(FakeAlgorithms::new()),
            tx,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_collapse_fire_is_ignored() {
        let selector = expanded_selector();
        selector.drag_started().unwrap();
        selector.drag_pointer_moved(960.0, 5.0).unwrap();
        time::sleep(Duration::from_millis(40)).await;
        assert_eq!(selector.state(), ProximityState::Expanded);

        // A fire from the previous arming lands after the pointer re-armed the debounce.
        let stale = selector.inner.state.lock().collapse_epoch;
        selector.drag_pointer_moved(960.0, 4.0).unwrap();
        selector.inner.on_collapse(stale);
        assert_eq!(selector.state(), ProximityState::Expanded);

        let current = selector.inner.state.lock().collapse_epoch;
        selector.inner.on_collapse(current);
        assert_eq!(selector.state(), ProximityState::Near);
    }

    #[tokio::test(start_paused = true)]
    async fn ending_the_drag_disarms_a_pending_collapse() {
        let selector = expanded_selector();
        selector.drag_started().unwrap();
        selector.drag_pointer_moved(960.0, 5.0).unwrap();
        time::sleep(Duration::from_millis(40)).await;
        let armed = selector.inner.state.lock().collapse_epoch;
        selector.drag_ended().unwrap();
        selector.expand().unwrap();
        selector.inner.on_collapse(armed);
        assert_eq!(selector.state(), ProximityState::Expanded);
    }
}
