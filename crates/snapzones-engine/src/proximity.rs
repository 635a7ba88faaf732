//! Drag proximity disclosure: `Hidden → Near → Expanded`.
//!
//! [`ProximityMachine`] is pure: it owns no timers and never emits events. The selector feeds it
//! pointer positions and periodic samples, applies the returned [`Transition`]s, and schedules
//! the sampling and collapse timers around it.

use std::fmt;

use config::ProximityConfig;
use zone_geom::{Point, Rect};

/// Disclosure state of the popup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProximityState {
    /// Not shown.
    #[default]
    Hidden,
    /// Peeking.
    Near,
    /// Fully shown and interactive.
    Expanded,
}

impl ProximityState {
    /// Whether the popup is on screen.
    pub fn is_visible(self) -> bool {
        self != Self::Hidden
    }

    /// Next state for a manual toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Near,
            Self::Near => Self::Expanded,
            Self::Expanded => Self::Hidden,
        }
    }
}

impl fmt::Display for ProximityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hidden => "hidden",
            Self::Near => "near",
            Self::Expanded => "expanded",
        })
    }
}

/// A state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Previous state.
    pub from: ProximityState,
    /// New state.
    pub to: ProximityState,
}

impl Transition {
    /// Visibility after the transition.
    pub fn visible(&self) -> bool {
        self.to.is_visible()
    }
}

/// Proximity state machine for one screen.
#[derive(Clone, Debug)]
pub struct ProximityMachine {
    /// Thresholds and distances.
    config: ProximityConfig,
    /// Current state.
    state: ProximityState,
    /// Master switch.
    enabled: bool,
    /// Whether a drag is in progress.
    dragging: bool,
    /// Whether there is anything to show. Visible states are unreachable otherwise.
    available: bool,
    /// Normalized distance from the trigger edge at the last sample.
    proximity: f64,
    /// Last pointer position reported by the drag source.
    pointer: Option<Point>,
    /// Popup bounds while visible; the pointer over it suppresses edge-distance hiding.
    popup: Option<Rect>,
    /// Set by an idle collapse; blocks re-expansion until the pointer moves.
    idle_collapsed: bool,
}

impl ProximityMachine {
    /// New machine in `Hidden`, enabled, with content available.
    pub fn new(config: ProximityConfig) -> Self {
        Self {
            config,
            state: ProximityState::Hidden,
            enabled: true,
            dragging: false,
            available: true,
            proximity: 1.0,
            pointer: None,
            popup: None,
            idle_collapsed: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> ProximityState {
        self.state
    }

    /// Proximity at the last sample, in `[0, 1]`.
    pub fn proximity(&self) -> f64 {
        self.proximity
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the selector may show at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Last reported pointer position.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Tuning values in effect.
    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    /// Replace tuning values; the current state is kept.
    pub fn set_config(&mut self, config: ProximityConfig) {
        self.config = config;
    }

    /// Record the popup bounds used to suppress hiding while the pointer is over it.
    pub fn set_popup_rect(&mut self, rect: Option<Rect>) {
        self.popup = rect;
    }

    /// Mark whether there is anything to show. Losing content hides the popup.
    pub fn set_available(&mut self, available: bool) -> Option<Transition> {
        self.available = available;
        if available {
            None
        } else {
            self.go(ProximityState::Hidden)
        }
    }

    /// Enable or disable; disabling forces `Hidden` and ends any drag.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<Transition> {
        self.enabled = enabled;
        if enabled {
            return None;
        }
        self.dragging = false;
        self.idle_collapsed = false;
        self.go(ProximityState::Hidden)
    }

    /// Begin a drag. Sampling waits for the first pointer report. Returns false when disabled.
    pub fn start_drag(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.dragging = true;
        self.idle_collapsed = false;
        self.pointer = None;
        true
    }

    /// End a drag and force `Hidden`. Safe when not dragging.
    pub fn end_drag(&mut self) -> Option<Transition> {
        self.dragging = false;
        self.idle_collapsed = false;
        self.go(ProximityState::Hidden)
    }

    /// Record a pointer position. Returns true when it differs from the previous one.
    pub fn pointer_moved(&mut self, p: Point) -> bool {
        let moved = self.pointer != Some(p);
        self.pointer = Some(p);
        if moved {
            self.idle_collapsed = false;
        }
        moved
    }

    /// Evaluate the last pointer position against `screen`. At most one transition per sample.
    pub fn sample(&mut self, screen: &Rect) -> Option<Transition> {
        if !(self.enabled && self.dragging) {
            return None;
        }
        let p = self.pointer?;
        let distance = (p.y - screen.top()).max(0.0);
        self.proximity = if self.config.trigger_distance > 0.0 {
            (distance / self.config.trigger_distance).clamp(0.0, 1.0)
        } else if distance > 0.0 {
            1.0
        } else {
            0.0
        };
        if !self.horizontal_gate(p, screen) {
            return None;
        }

        let near = self.proximity < self.config.near_threshold;
        let expand = self.proximity < self.config.expand_threshold && !self.idle_collapsed;
        let far = self.proximity > self.config.hide_threshold;
        let over_popup = self.popup.is_some_and(|r| r.contains(p));
        match self.state {
            ProximityState::Hidden if near => self.go(ProximityState::Near),
            ProximityState::Near if expand => self.go(ProximityState::Expanded),
            s if s.is_visible() && far && !over_popup => {
                self.go(ProximityState::Hidden)
            }
            _ => None,
        }
    }

    /// Horizontal offset from the screen center within `width/2 - edge_trigger_zone`.
    fn horizontal_gate(&self, p: Point, screen: &Rect) -> bool {
        (p.x - screen.cx()).abs() <= screen.w / 2.0 - self.config.edge_trigger_zone
    }

    /// Collapse debounce fired: `Expanded` falls back to `Near`.
    pub fn collapse_idle(&mut self) -> Option<Transition> {
        if self.state != ProximityState::Expanded {
            return None;
        }
        self.idle_collapsed = true;
        self.go(ProximityState::Near)
    }

    /// Show fully, outside of drags.
    pub fn expand(&mut self) -> Option<Transition> {
        if !self.enabled {
            return None;
        }
        self.go(ProximityState::Expanded)
    }

    /// Hide.
    pub fn hide(&mut self) -> Option<Transition> {
        self.go(ProximityState::Hidden)
    }

    /// Cycle `Hidden → Near → Expanded → Hidden`.
    pub fn toggle(&mut self) -> Option<Transition> {
        if !self.enabled {
            return None;
        }
        self.go(self.state.toggled())
    }

    /// Move to `to`, refusing visible states when disabled or empty.
    fn go(&mut self, to: ProximityState) -> Option<Transition> {
        if to == self.state || (to.is_visible() && !(self.enabled && self.available)) {
            return None;
        }
        let from = self.state;
        self.state = to;
        if !to.is_visible() {
            self.popup = None;
        }
        Some(Transition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    fn machine() -> ProximityMachine {
        ProximityMachine::new(ProximityConfig::default())
    }

    fn at(m: &mut ProximityMachine, x: f64, y: f64) -> Option<Transition> {
        m.pointer_moved(Point::new(x, y));
        m.sample(&SCREEN)
    }

    #[test]
    fn drag_near_top_peeks_then_expands() {
        let mut m = machine();
        assert!(m.start_drag());
        m.pointer_moved(Point::new(960.0, 5.0));
        let t = m.sample(&SCREEN).unwrap();
        assert_eq!((t.from, t.to), (ProximityState::Hidden, ProximityState::Near));
        assert!((m.proximity() - 0.05).abs() < 1e-12);
        let t = m.sample(&SCREEN).unwrap();
        assert_eq!((t.from, t.to), (ProximityState::Near, ProximityState::Expanded));
        assert!(t.visible());
        assert!(m.sample(&SCREEN).is_none());
    }

    #[test]
    fn failing_gate_never_transitions() {
        let mut m = machine();
        m.start_drag();
        for x in [0.0, 10.0, 49.0, 1871.0, 1919.0, -200.0, 3000.0] {
            for y in [0.0, 5.0, 50.0, 500.0] {
                assert!(at(&mut m, x, y).is_none(), "({x}, {y})");
                assert_eq!(m.state(), ProximityState::Hidden);
            }
        }
        // Gate boundary is inclusive.
        assert!(at(&mut m, 50.0, 0.0).is_some());
    }

    #[test]
    fn thresholds_are_strict_and_never_skip() {
        let mut m = machine();
        m.start_drag();
        // proximity exactly 0.3 does not peek
        assert!(at(&mut m, 960.0, 30.0).is_none());
        // 0.05 from Hidden only reaches Near
        assert_eq!(at(&mut m, 960.0, 5.0).unwrap().to, ProximityState::Near);
        // 0.2 keeps Near
        assert!(at(&mut m, 960.0, 20.0).is_none());
        assert_eq!(at(&mut m, 960.0, 0.0).unwrap().to, ProximityState::Expanded);
        // 0.7 exactly does not hide
        assert!(at(&mut m, 960.0, 70.0).is_none());
        assert_eq!(at(&mut m, 960.0, 71.0).unwrap().to, ProximityState::Hidden);
    }

    #[test]
    fn pointer_over_popup_suppresses_hiding() {
        let mut m = machine();
        m.start_drag();
        at(&mut m, 960.0, 0.0);
        at(&mut m, 960.0, 0.0);
        assert_eq!(m.state(), ProximityState::Expanded);
        m.set_popup_rect(Some(Rect::new(600.0, 0.0, 720.0, 400.0)));
        assert!(at(&mut m, 960.0, 300.0).is_none());
        assert_eq!(m.state(), ProximityState::Expanded);
        assert_eq!(at(&mut m, 960.0, 500.0).unwrap().to, ProximityState::Hidden);
    }

    #[test]
    fn end_drag_always_hides() {
        for steps in 0..3 {
            let mut m = machine();
            m.start_drag();
            for _ in 0..steps {
                at(&mut m, 960.0, 0.0);
            }
            m.end_drag();
            assert_eq!(m.state(), ProximityState::Hidden);
            assert!(!m.is_dragging());
            // Further samples are ignored once the drag ended.
            assert!(at(&mut m, 960.0, 0.0).is_none());
        }
        // Safe without a drag.
        assert!(machine().end_drag().is_none());
    }

    #[test]
    fn idle_collapse_goes_to_near_and_waits_for_movement() {
        let mut m = machine();
        m.start_drag();
        at(&mut m, 960.0, 0.0);
        at(&mut m, 960.0, 0.0);
        let t = m.collapse_idle().unwrap();
        assert_eq!((t.from, t.to), (ProximityState::Expanded, ProximityState::Near));
        // Stationary pointer does not re-expand.
        assert!(m.sample(&SCREEN).is_none());
        assert!(m.sample(&SCREEN).is_none());
        // Movement does.
        assert_eq!(at(&mut m, 961.0, 0.0).unwrap().to, ProximityState::Expanded);
        // Only Expanded collapses.
        m.hide();
        assert!(m.collapse_idle().is_none());
    }

    #[test]
    fn manual_controls_and_enable_switch() {
        let mut m = machine();
        let seq: Vec<ProximityState> = (0..4).filter_map(|_| m.toggle()).map(|t| t.to).collect();
        assert_eq!(
            seq,
            vec![
                ProximityState::Near,
                ProximityState::Expanded,
                ProximityState::Hidden,
                ProximityState::Near
            ]
        );
        assert_eq!(m.expand().unwrap().to, ProximityState::Expanded);
        assert!(m.expand().is_none());
        assert_eq!(m.set_enabled(false).unwrap().to, ProximityState::Hidden);
        assert!(m.toggle().is_none());
        assert!(m.expand().is_none());
        assert!(!m.start_drag());
        m.set_enabled(true);
        assert!(m.start_drag());
    }

    #[test]
    fn nothing_to_show_stays_hidden() {
        let mut m = machine();
        m.set_available(false);
        m.start_drag();
        assert!(at(&mut m, 960.0, 0.0).is_none());
        assert!(m.expand().is_none());
        m.set_available(true);
        assert!(at(&mut m, 960.0, 0.0).is_some());
        assert_eq!(m.set_available(false).unwrap().to, ProximityState::Hidden);
    }
}
