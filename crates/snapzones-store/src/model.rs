//! Layout, zone and assignment value types.

use std::{fmt, sync::Arc};

use zone_geom::{Rect, to_pixel_rect};

use crate::{Error, Result};

/// Tolerance for relative components slightly outside `[0, 1]` due to float rounding.
const REL_EPS: f64 = 1e-6;

/// Prefix for synthetic ids of auto-tiling pseudo-layouts.
pub const AUTOTILE_PREFIX: &str = "autotile:";

/// Opaque, stable layout identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(Arc<str>);

impl LayoutId {
    /// Wrap an identifier string.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Synthetic id for an auto-tiling algorithm presented as a layout.
    pub fn for_algorithm(algorithm: &str) -> Self {
        Self::new(format!("{AUTOTILE_PREFIX}{algorithm}"))
    }

    /// The algorithm id if this is a synthetic auto-tiling id.
    pub fn algorithm(&self) -> Option<&str> {
        self.0.strip_prefix(AUTOTILE_PREFIX)
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for LayoutId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Where a layout comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutCategory {
    /// Authored by the user.
    Manual,
    /// Procedurally produced by an auto-tiling algorithm.
    Autotile,
}

impl fmt::Display for LayoutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Manual => "manual",
            Self::Autotile => "autotile",
        })
    }
}

/// RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

/// Optional per-zone appearance overrides. `None` means "use the theme".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZoneAppearance {
    /// Fill used while the zone is hovered.
    pub highlight: Option<Rgba>,
    /// Fill used while the zone is not hovered.
    pub inactive: Option<Rgba>,
    /// Border color.
    pub border: Option<Rgba>,
    /// Border width in pixels.
    pub border_width: Option<f64>,
    /// Fill opacity in `[0, 1]`.
    pub opacity: Option<f64>,
}

/// A rectangular region of a layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    number: u32,
    relative: Rect,
    absolute: Option<Rect>,
    name: Option<String>,
    appearance: ZoneAppearance,
}

impl Zone {
    /// Create a zone after validating its relative geometry.
    pub fn new(number: u32, relative: Rect) -> Result<Self> {
        validate_relative(number, &relative)?;
        Ok(Self {
            number,
            relative,
            absolute: None,
            name: None,
            appearance: ZoneAppearance::default(),
        })
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach appearance overrides.
    pub fn with_appearance(mut self, appearance: ZoneAppearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// 1-based display number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Geometry relative to the layout's reference area.
    pub fn relative(&self) -> Rect {
        self.relative
    }

    /// Pixel geometry for the reference area the layout was last recalculated for.
    pub fn absolute(&self) -> Option<Rect> {
        self.absolute
    }

    /// Display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Appearance overrides.
    pub fn appearance(&self) -> &ZoneAppearance {
        &self.appearance
    }
}

/// Reject non-finite, out-of-range or empty relative geometry.
fn validate_relative(number: u32, r: &Rect) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidZone {
        number,
        reason: reason.to_string(),
    };
    if !r.is_valid_size() {
        return Err(invalid("geometry must be finite with positive width and height"));
    }
    let in_unit = |v: f64| (-REL_EPS..=1.0 + REL_EPS).contains(&v);
    if !(in_unit(r.x) && in_unit(r.y) && in_unit(r.w) && in_unit(r.h)) {
        return Err(invalid("relative components must lie in [0, 1]"));
    }
    Ok(())
}

/// A named, ordered set of zones.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    id: LayoutId,
    name: String,
    category: LayoutCategory,
    zones: Vec<Zone>,
    reference: Option<Rect>,
}

impl Layout {
    /// Construct a layout from already validated zones.
    pub fn new(
        id: LayoutId,
        name: impl Into<String>,
        category: LayoutCategory,
        zones: Vec<Zone>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            zones,
            reference: None,
        }
    }

    /// Construct a layout from relative rectangles, numbering zones from 1 in order.
    pub fn from_relative(
        id: LayoutId,
        name: impl Into<String>,
        category: LayoutCategory,
        rects: &[Rect],
    ) -> Result<Self> {
        let zones = rects
            .iter()
            .zip(1u32..)
            .map(|(r, n)| Zone::new(n, *r))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(id, name, category, zones))
    }

    /// Stable identifier.
    pub fn id(&self) -> &LayoutId {
        &self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Manual or auto-tiling.
    pub fn category(&self) -> LayoutCategory {
        self.category
    }

    /// Zones in display order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Look up a zone by its 1-based number.
    pub fn zone(&self, number: u32) -> Option<&Zone> {
        self.zones.iter().find(|z| z.number == number)
    }

    /// The reference area the absolute zone geometry was computed for.
    pub fn reference(&self) -> Option<Rect> {
        self.reference
    }

    /// Produce a new layout whose zones carry pixel geometry for `reference`.
    pub fn recalculated(&self, reference: Rect) -> Self {
        let zones = self
            .zones
            .iter()
            .map(|z| Zone {
                absolute: Some(to_pixel_rect(&z.relative, &reference)),
                ..z.clone()
            })
            .collect();
        Self {
            zones,
            reference: Some(reference),
            ..self.clone()
        }
    }
}

/// Lookup key for an assignment.
///
/// `desktop == 0` means "any desktop" and an empty `activity` means "any activity".
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextKey {
    /// Screen identifier (connector name or similar).
    pub screen: String,
    /// 1-based virtual desktop, or 0 for all desktops.
    pub desktop: u32,
    /// Activity identifier, or empty for all activities.
    pub activity: String,
}

impl ContextKey {
    /// Key for an exact context.
    pub fn new(screen: impl Into<String>, desktop: u32, activity: impl Into<String>) -> Self {
        Self {
            screen: screen.into(),
            desktop,
            activity: activity.into(),
        }
    }

    /// Key matching any activity on this screen and desktop.
    pub fn desktop_only(&self) -> Self {
        Self::new(self.screen.clone(), self.desktop, "")
    }

    /// Key matching any desktop and activity on this screen.
    pub fn screen_only(&self) -> Self {
        Self::new(self.screen.clone(), 0, "")
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.screen, self.desktop, self.activity)
    }
}

/// What an assignment pins for its context.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssignmentTarget {
    /// A layout from the store.
    Layout(LayoutId),
    /// An auto-tiling algorithm by registry id.
    Algorithm(String),
}
