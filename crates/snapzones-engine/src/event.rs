//! Values exchanged with the host: context changes in, selector events out.

use config::Settings;
use snapzones_store::{LayoutCategory, LayoutId};
use zone_geom::{Gaps, Rect, to_normalized_overlay, to_overlay_local};

use crate::{
    hit_test::{preview_gaps, zone_preview_rect},
    planner::PopupGeometry,
    proximity::ProximityState,
    resolver::CandidateEntry,
};

/// The screen a selector serves and where it currently is in desktop/activity space.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenContext {
    /// Screen identifier (connector name or similar).
    pub screen_id: String,
    /// Usable screen area in global pixels; also the snap reference area.
    pub geometry: Rect,
    /// 1-based virtual desktop.
    pub desktop: u32,
    /// Current activity id, empty when activities are not in use.
    pub activity: String,
}

impl ScreenContext {
    /// Context on desktop 1 with no activity.
    pub fn new(screen_id: impl Into<String>, geometry: Rect) -> Self {
        Self {
            screen_id: screen_id.into(),
            geometry,
            desktop: 1,
            activity: String::new(),
        }
    }
}

/// Something the selector's output depends on has changed.
#[derive(Clone, Debug)]
pub enum ContextChange {
    /// The screen was replaced or resized.
    Screen {
        /// New screen identifier.
        screen_id: String,
        /// New usable area.
        geometry: Rect,
    },
    /// The current virtual desktop changed.
    Desktop(u32),
    /// The current activity changed.
    Activity(String),
    /// Settings were reloaded.
    Settings(Box<Settings>),
    /// Layouts or assignments in the store changed.
    Layouts,
}

/// A zone drawn inside an indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewZone {
    /// 0-based index within the layout.
    pub index: usize,
    /// 1-based display number.
    pub number: u32,
    /// Geometry relative to the reference area.
    pub relative: Rect,
    /// Rectangle relative to the content origin, ignoring scroll.
    pub content_rect: Rect,
    /// Rectangle normalized to the popup bar, accounting for scroll.
    pub normalized: Rect,
}

/// One indicator in the popup.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupEntry {
    /// Layout id.
    pub id: LayoutId,
    /// Display name, drawn as the indicator label.
    pub name: String,
    /// Manual or auto-tiling.
    pub category: LayoutCategory,
    /// The active layout for the current context.
    pub active: bool,
    /// Indicator rectangle relative to the content origin, ignoring scroll.
    pub indicator: Rect,
    /// Whether any part of the indicator is inside the scrolled viewport.
    pub visible: bool,
    /// Zone previews in zone order.
    pub zones: Vec<PreviewZone>,
}

/// Everything a renderer needs to draw the popup.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupModel {
    /// Screen the popup belongs to.
    pub screen_id: String,
    /// Disclosure state the model was built for.
    pub state: ProximityState,
    /// Popup layout.
    pub geometry: PopupGeometry,
    /// Vertical scroll offset of the content.
    pub scroll_offset: f64,
    /// Indicators in candidate order.
    pub entries: Vec<PopupEntry>,
    /// Keyboard cursor.
    pub cursor: Option<usize>,
    /// Hovered `(entry, zone)`.
    pub hovered: Option<(usize, Option<usize>)>,
}

impl PopupModel {
    /// Build the model for `entries` laid out by `geometry`.
    pub(crate) fn build(
        screen_id: &str,
        state: ProximityState,
        geometry: PopupGeometry,
        entries: &[CandidateEntry],
        gaps: &Gaps,
        scroll_offset: f64,
    ) -> Self {
        let scaled = preview_gaps(gaps, geometry.preview_scale);
        let bar = geometry.bar_rect();
        let origin = geometry.content_origin();
        let viewport = Rect::new(0.0, scroll_offset, geometry.content_width, geometry.content_height);

        let entries = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let indicator = geometry.indicator_rect(i);
                let zones = entry
                    .zones
                    .iter()
                    .zip(1u32..)
                    .enumerate()
                    .map(|(index, (relative, number))| {
                        let content_rect = zone_preview_rect(&indicator, relative, &scaled);
                        let absolute = content_rect.translate(origin.x, origin.y - scroll_offset);
                        let local = to_overlay_local(&absolute, bar.origin());
                        PreviewZone {
                            index,
                            number,
                            relative: *relative,
                            content_rect,
                            normalized: to_normalized_overlay(&local, bar.w, bar.h),
                        }
                    })
                    .collect();
                PopupEntry {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    category: entry.category,
                    active: entry.active,
                    indicator,
                    visible: indicator.top() < viewport.bottom()
                        && indicator.bottom() > viewport.top(),
                    zones,
                }
            })
            .collect();

        Self {
            screen_id: screen_id.to_string(),
            state,
            geometry,
            scroll_offset,
            entries,
            cursor: None,
            hovered: None,
        }
    }
}

/// The final choice handed to the snap executor.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Chosen layout.
    pub layout_id: LayoutId,
    /// 0-based zone index within the layout.
    pub zone_index: usize,
    /// Zone geometry relative to the reference area.
    pub relative: Rect,
    /// Window target in global pixels, with padding and outer gaps applied.
    pub target: Rect,
}

/// Events emitted by a [`crate::ZoneSelector`].
#[derive(Clone, Debug, PartialEq)]
pub enum SelectorEvent {
    /// Disclosure state changed.
    StateChanged {
        /// New state.
        state: ProximityState,
        /// `state != Hidden`.
        visible: bool,
        /// Proximity at the last sample.
        proximity: f64,
    },
    /// The popup content or layout changed.
    PopupChanged(PopupModel),
    /// The hovered layout or zone changed.
    Hovered {
        /// Hovered layout, if any.
        layout_id: Option<LayoutId>,
        /// Hovered zone index, if any.
        zone: Option<usize>,
    },
    /// A zone was chosen.
    SelectionMade(Selection),
}
