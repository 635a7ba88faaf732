//! Raw, all-optional settings records as they appear in RON files.

use std::collections::HashMap;

use serde::Deserialize;

use crate::types::{LayoutMode, SelectorPosition, SizeMode, SnapMode};

// ===== RAW SELECTOR =====

/// Raw selector presentation with all optional fields for merging.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawSelector {
    #[serde(default)]
    pub position: Option<SelectorPosition>,
    #[serde(default)]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default)]
    pub size_mode: Option<SizeMode>,
    #[serde(default)]
    pub max_visible_rows: Option<u32>,
    #[serde(default)]
    pub preview_width: Option<u32>,
    #[serde(default)]
    pub preview_height: Option<u32>,
    #[serde(default)]
    pub preview_lock_aspect: Option<bool>,
    #[serde(default)]
    pub grid_columns: Option<u32>,
}

impl RawSelector {
    /// Field-wise merge where values present in `other` win.
    pub fn merged_with(&self, other: &Self) -> Self {
        Self {
            position: other.position.or(self.position),
            layout_mode: other.layout_mode.or(self.layout_mode),
            size_mode: other.size_mode.or(self.size_mode),
            max_visible_rows: other.max_visible_rows.or(self.max_visible_rows),
            preview_width: other.preview_width.or(self.preview_width),
            preview_height: other.preview_height.or(self.preview_height),
            preview_lock_aspect: other.preview_lock_aspect.or(self.preview_lock_aspect),
            grid_columns: other.grid_columns.or(self.grid_columns),
        }
    }
}

// ===== RAW PROXIMITY / GAPS =====

/// Raw drag proximity tuning.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawProximity {
    #[serde(default)]
    pub trigger_distance: Option<f64>,
    #[serde(default)]
    pub edge_trigger_zone: Option<f64>,
    #[serde(default)]
    pub sample_interval_ms: Option<u64>,
    #[serde(default)]
    pub collapse_delay_ms: Option<u64>,
}

/// Raw zone padding and outer gap.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawGaps {
    #[serde(default)]
    pub zone_padding: Option<f64>,
    #[serde(default)]
    pub outer_gap: Option<f64>,
}

// ===== RAW SETTINGS =====

/// Raw top-level settings document as written by the user.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub mode: Option<SnapMode>,
    #[serde(default)]
    pub selector: Option<RawSelector>,
    /// Per-screen selector overrides keyed by screen identifier.
    #[serde(default)]
    pub screens: HashMap<String, RawSelector>,
    #[serde(default)]
    pub proximity: Option<RawProximity>,
    #[serde(default)]
    pub gaps: Option<RawGaps>,
}
