//! Resolved settings records consumed by the engine.

use std::collections::HashMap;

use zone_geom::Gaps;

use crate::{
    LayoutMode, SelectorPosition, SizeMode, SnapMode, defaults,
    raw::{RawGaps, RawProximity, RawSelector, RawSettings},
};

/// Fully resolved popup presentation for one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Screen anchor.
    pub position: SelectorPosition,
    /// Grid, single column, or single row.
    pub layout_mode: LayoutMode,
    /// Automatic or manual indicator sizing.
    pub size_mode: SizeMode,
    /// Rows shown before the popup scrolls (auto sizing only).
    pub max_visible_rows: u32,
    /// Manual indicator width in pixels.
    pub preview_width: u32,
    /// Manual indicator height in pixels (ignored when the aspect is locked).
    pub preview_height: u32,
    /// Derive manual indicator height from the screen aspect ratio.
    pub preview_lock_aspect: bool,
    /// Manual grid column count.
    pub grid_columns: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            position: defaults::POSITION,
            layout_mode: defaults::LAYOUT_MODE,
            size_mode: defaults::SIZE_MODE,
            max_visible_rows: defaults::MAX_VISIBLE_ROWS,
            preview_width: defaults::PREVIEW_WIDTH,
            preview_height: defaults::PREVIEW_HEIGHT,
            preview_lock_aspect: defaults::PREVIEW_LOCK_ASPECT,
            grid_columns: defaults::GRID_COLUMNS,
        }
    }
}

impl SelectorConfig {
    /// Return a copy with every field present in `raw` replaced.
    pub fn overlay_raw(mut self, raw: &RawSelector) -> Self {
        if let Some(v) = raw.position {
            self.position = v;
        }
        if let Some(v) = raw.layout_mode {
            self.layout_mode = v;
        }
        if let Some(v) = raw.size_mode {
            self.size_mode = v;
        }
        if let Some(v) = raw.max_visible_rows {
            self.max_visible_rows = v.max(1);
        }
        if let Some(v) = raw.preview_width {
            self.preview_width = v;
        }
        if let Some(v) = raw.preview_height {
            self.preview_height = v;
        }
        if let Some(v) = raw.preview_lock_aspect {
            self.preview_lock_aspect = v;
        }
        if let Some(v) = raw.grid_columns {
            self.grid_columns = v;
        }
        self
    }
}

/// Drag proximity tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityConfig {
    /// Distance from the top edge (pixels) mapped to proximity `1.0`.
    pub trigger_distance: f64,
    /// Horizontal dead zone at each side of the screen (pixels).
    pub edge_trigger_zone: f64,
    /// Pointer sampling cadence while dragging.
    pub sample_interval_ms: u64,
    /// Idle time before an expanded popup falls back to the peek state.
    pub collapse_delay_ms: u64,
    /// Proximity below which a hidden popup peeks.
    pub near_threshold: f64,
    /// Proximity below which a peeking popup expands.
    pub expand_threshold: f64,
    /// Proximity above which a visible popup hides.
    pub hide_threshold: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            trigger_distance: defaults::TRIGGER_DISTANCE,
            edge_trigger_zone: defaults::EDGE_TRIGGER_ZONE,
            sample_interval_ms: defaults::SAMPLE_INTERVAL_MS,
            collapse_delay_ms: defaults::COLLAPSE_DELAY_MS,
            near_threshold: defaults::NEAR_THRESHOLD,
            expand_threshold: defaults::EXPAND_THRESHOLD,
            hide_threshold: defaults::HIDE_THRESHOLD,
        }
    }
}

impl ProximityConfig {
    /// Return a copy with every field present in `raw` replaced.
    pub fn overlay_raw(mut self, raw: &RawProximity) -> Self {
        if let Some(v) = raw.trigger_distance {
            self.trigger_distance = v;
        }
        if let Some(v) = raw.edge_trigger_zone {
            self.edge_trigger_zone = v;
        }
        if let Some(v) = raw.sample_interval_ms {
            self.sample_interval_ms = v.max(1);
        }
        if let Some(v) = raw.collapse_delay_ms {
            self.collapse_delay_ms = v;
        }
        self
    }
}

/// Top-level resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Master switch; when false the selector never shows.
    pub enabled: bool,
    /// Which layout kinds the picker offers.
    pub mode: SnapMode,
    /// Global selector presentation.
    pub selector: SelectorConfig,
    /// Raw per-screen overrides keyed by screen identifier.
    pub screens: HashMap<String, RawSelector>,
    /// Drag proximity tuning.
    pub proximity: ProximityConfig,
    /// Zone padding and outer gap.
    pub gaps: Gaps,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: defaults::ENABLED,
            mode: defaults::SNAP_MODE,
            selector: SelectorConfig::default(),
            screens: HashMap::new(),
            proximity: ProximityConfig::default(),
            gaps: Gaps::new(defaults::ZONE_PADDING, defaults::OUTER_GAP),
        }
    }
}

impl Settings {
    /// Build settings by overlaying a parsed raw document on the defaults.
    pub fn from_raw(raw: &RawSettings) -> Self {
        Self::default().overlay_raw(raw)
    }

    /// Overlay a raw document on these settings.
    pub fn overlay_raw(mut self, raw: &RawSettings) -> Self {
        if let Some(v) = raw.enabled {
            self.enabled = v;
        }
        if let Some(v) = raw.mode {
            self.mode = v;
        }
        if let Some(sel) = &raw.selector {
            self.selector = self.selector.overlay_raw(sel);
        }
        for (screen, overrides) in &raw.screens {
            let merged = match self.screens.remove(screen) {
                Some(existing) => existing.merged_with(overrides),
                None => overrides.clone(),
            };
            self.screens.insert(screen.clone(), merged);
        }
        if let Some(p) = &raw.proximity {
            self.proximity = self.proximity.overlay_raw(p);
        }
        if let Some(g) = &raw.gaps {
            self.gaps = overlay_gaps(self.gaps, g);
        }
        self
    }

    /// Resolve the selector record for a specific screen: global values overlaid with that
    /// screen's overrides, if any.
    pub fn selector_for(&self, screen_id: &str) -> SelectorConfig {
        match self.screens.get(screen_id) {
            Some(raw) => self.selector.overlay_raw(raw),
            None => self.selector,
        }
    }

    /// `(include_manual, include_autotile)` for the configured mode.
    pub fn candidate_filter(&self) -> (bool, bool) {
        self.mode.includes()
    }
}

/// Apply raw gap overrides.
fn overlay_gaps(base: Gaps, raw: &RawGaps) -> Gaps {
    Gaps::new(
        raw.zone_padding.unwrap_or(base.zone_padding),
        raw.outer_gap.unwrap_or(base.outer_gap),
    )
}
