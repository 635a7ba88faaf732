// Defaults for selector, proximity and gap settings

use crate::{LayoutMode, SelectorPosition, SizeMode, SnapMode};

pub(crate) const ENABLED: bool = true;
pub(crate) const SNAP_MODE: SnapMode = SnapMode::Mixed;

// Selector defaults
pub(crate) const POSITION: SelectorPosition = SelectorPosition::Top;
pub(crate) const LAYOUT_MODE: LayoutMode = LayoutMode::Grid;
pub(crate) const SIZE_MODE: SizeMode = SizeMode::Auto;
pub(crate) const MAX_VISIBLE_ROWS: u32 = 4;
pub(crate) const PREVIEW_WIDTH: u32 = 180;
pub(crate) const PREVIEW_HEIGHT: u32 = 101;
pub(crate) const PREVIEW_LOCK_ASPECT: bool = true;
pub(crate) const GRID_COLUMNS: u32 = 5;

// Proximity defaults
pub(crate) const TRIGGER_DISTANCE: f64 = 100.0;
pub(crate) const EDGE_TRIGGER_ZONE: f64 = 50.0;
pub(crate) const SAMPLE_INTERVAL_MS: u64 = 16;
pub(crate) const COLLAPSE_DELAY_MS: u64 = 300;
pub(crate) const NEAR_THRESHOLD: f64 = 0.3;
pub(crate) const EXPAND_THRESHOLD: f64 = 0.1;
pub(crate) const HIDE_THRESHOLD: f64 = 0.7;

// Gap defaults
pub(crate) const ZONE_PADDING: f64 = 8.0;
pub(crate) const OUTER_GAP: f64 = 8.0;
