//! snapzones engine
//!
//! Decides which layout applies to a screen context, lays out the picker popup, maps the pointer
//! to a `(layout, zone)` pair and drives the drag proximity state machine.
//!
//! - [`LayoutResolver`]: active layout and candidate list for a `(screen, desktop, activity)`
//! - [`PopupGeometry`]: popup grid, sizing, scrolling and placement
//! - [`hit_test`]: pointer to layout and zone
//! - [`ProximityMachine`]: `Hidden → Near → Expanded` disclosure
//! - [`ZoneSelector`]: one screen's selector wiring the above to timers and events
//!
//! Layout data comes from the `snapzones-store` traits; settings come from `config`.

mod error;
mod event;
mod hit_test;
mod nav;
mod notification;
mod planner;
mod proximity;
mod resolver;
mod selector;
mod ticker;


pub use error::{Error, Result};
pub use event::{
    ContextChange, PopupEntry, PopupModel, PreviewZone, ScreenContext, Selection, SelectorEvent,
};
pub use hit_test::{Hit, MIN_SCALED_PADDING, MIN_ZONE_PX, hit_test, preview_gaps, zone_preview_rect};
pub use nav::Direction;
pub use notification::EventDispatcher;
pub use planner::{
    CONTAINER_PADDING, CONTAINER_SIDE_MARGIN, CONTAINER_TOP_MARGIN, INDICATOR_SPACING,
    LABEL_HEIGHT, LABEL_SPACE, LABEL_TOP_MARGIN, PopupGeometry,
};
pub use proximity::{ProximityMachine, ProximityState, Transition};
pub use resolver::{CandidateEntry, LayoutResolver};
pub use selector::ZoneSelector;
pub use ticker::Ticker;
