//! Pointer to `(layout, zone)` mapping inside the popup.

use snapzones_store::LayoutId;
use zone_geom::{Gaps, Point, Rect, effective_rect};

use crate::{planner::PopupGeometry, resolver::CandidateEntry};

/// Smallest on-screen zone size, per axis, so tiny zones stay clickable.
pub const MIN_ZONE_PX: f64 = 8.0;
/// Smallest effective zone padding inside a preview.
pub const MIN_SCALED_PADDING: f64 = 1.0;

/// Result of a hit test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hit {
    /// Pointer is over a zone.
    Zone {
        /// Candidate index.
        entry: usize,
        /// Layout id of the candidate.
        layout_id: LayoutId,
        /// 0-based index into the candidate's zones.
        zone: usize,
    },
    /// Pointer is over an indicator but outside every zone.
    Layout {
        /// Candidate index.
        entry: usize,
        /// Layout id of the candidate.
        layout_id: LayoutId,
    },
    /// Pointer is over no indicator.
    Miss,
}

impl Hit {
    /// Candidate index, if any indicator was hit.
    pub fn entry(&self) -> Option<usize> {
        match self {
            Self::Zone { entry, .. } | Self::Layout { entry, .. } => Some(*entry),
            Self::Miss => None,
        }
    }

    /// Zone index, if a zone was hit.
    pub fn zone(&self) -> Option<usize> {
        match self {
            Self::Zone { zone, .. } => Some(*zone),
            _ => None,
        }
    }
}

/// Gaps scaled down to preview size. Padding never drops below one pixel.
pub fn preview_gaps(gaps: &Gaps, preview_scale: f64) -> Gaps {
    let scale = if preview_scale.is_finite() {
        preview_scale.max(0.0)
    } else {
        0.0
    };
    Gaps::new(
        (gaps.zone_padding * scale).max(MIN_SCALED_PADDING),
        gaps.outer_gap * scale,
    )
}

/// On-screen rectangle of a zone inside `indicator`, using the same inset rule as the snap path
/// and floored at [`MIN_ZONE_PX`] per axis.
pub fn zone_preview_rect(indicator: &Rect, relative: &Rect, scaled: &Gaps) -> Rect {
    effective_rect(relative, indicator, scaled).with_min_size(MIN_ZONE_PX, MIN_ZONE_PX)
}

/// Map a pointer, relative to the content origin and already adjusted for scrolling, to the
/// candidate and zone beneath it. Within an indicator the first zone in zone order wins.
pub fn hit_test(
    pointer: Point,
    geometry: &PopupGeometry,
    entries: &[CandidateEntry],
    gaps: &Gaps,
) -> Hit {
    let scaled = preview_gaps(gaps, geometry.preview_scale);
    for (i, entry) in entries.iter().enumerate() {
        let indicator = geometry.indicator_rect(i);
        if !indicator.contains(pointer) {
            continue;
        }
        let zone = entry
            .zones
            .iter()
            .position(|rel| zone_preview_rect(&indicator, rel, &scaled).contains(pointer));
        return match zone {
            Some(zone) => Hit::Zone {
                entry: i,
                layout_id: entry.id.clone(),
                zone,
            },
            None => Hit::Layout {
                entry: i,
                layout_id: entry.id.clone(),
            },
        };
    }
    Hit::Miss
}

#[cfg(test)]
mod tests {
    use config::SelectorConfig;
    use snapzones_store::{LayoutCategory, test_support::HALVES};

    use super::*;

    fn entry(id: &str, zones: &[Rect]) -> CandidateEntry {
        CandidateEntry {
            id: LayoutId::new(id),
            name: id.to_string(),
            category: LayoutCategory::Manual,
            zones: zones.to_vec(),
            active: false,
        }
    }

    fn setup() -> (PopupGeometry, Vec<CandidateEntry>, Gaps) {
        let g = PopupGeometry::plan(
            &SelectorConfig::default(),
            Rect::new(0.0, 0.0, 1920.0, 1080.0),
            3,
        );
        let entries = vec![
            entry("halves", &HALVES),
            entry("tiny", &[Rect::new(0.5, 0.5, 0.01, 0.01)]),
            entry("overlap", &[Rect::unit(), Rect::new(0.0, 0.0, 0.5, 0.5)]),
        ];
        (g, entries, Gaps::new(8.0, 8.0))
    }

    #[test]
    fn zones_indicators_and_misses() {
        let (g, entries, gaps) = setup();
        // Left half of the first indicator (192x108).
        let hit = hit_test(Point::new(40.0, 50.0), &g, &entries, &gaps);
        assert_eq!(
            hit,
            Hit::Zone {
                entry: 0,
                layout_id: LayoutId::new("halves"),
                zone: 0
            }
        );
        let hit = hit_test(Point::new(150.0, 50.0), &g, &entries, &gaps);
        assert_eq!(hit.zone(), Some(1));

        // Seam between the halves is padding: over the layout, no zone.
        let hit = hit_test(Point::new(96.0, 50.0), &g, &entries, &gaps);
        assert_eq!(
            hit,
            Hit::Layout {
                entry: 0,
                layout_id: LayoutId::new("halves")
            }
        );

        // Spacing between indicators and the label band are misses.
        assert_eq!(hit_test(Point::new(200.0, 50.0), &g, &entries, &gaps), Hit::Miss);
        assert_eq!(hit_test(Point::new(50.0, 120.0), &g, &entries, &gaps), Hit::Miss);
        assert_eq!(hit_test(Point::new(-1.0, 10.0), &g, &entries, &gaps), Hit::Miss);
    }

    #[test]
    fn tiny_zones_keep_a_clickable_floor() {
        let (g, entries, gaps) = setup();
        let indicator = g.indicator_rect(1);
        let scaled = preview_gaps(&gaps, g.preview_scale);
        let r = zone_preview_rect(&indicator, &entries[1].zones[0], &scaled);
        assert_eq!((r.w, r.h), (MIN_ZONE_PX, MIN_ZONE_PX));
        let center = Point::new(r.cx(), r.cy());
        assert_eq!(hit_test(center, &g, &entries, &gaps).zone(), Some(0));
    }

    #[test]
    fn first_zone_in_order_wins_on_overlap() {
        let (g, entries, gaps) = setup();
        let origin = g.indicator_rect(2).origin();
        let hit = hit_test(origin.offset(20.0, 20.0), &g, &entries, &gaps);
        assert_eq!(hit.entry(), Some(2));
        assert_eq!(hit.zone(), Some(0));
    }

    #[test]
    fn stable_inside_and_exclusive_one_pixel_outside() {
        let (g, entries, gaps) = setup();
        let scaled = preview_gaps(&gaps, g.preview_scale);
        let indicator = g.indicator_rect(0);
        let r = zone_preview_rect(&indicator, &entries[0].zones[0], &scaled);
        let inside = Point::new(r.left(), r.top());
        let first = hit_test(inside, &g, &entries, &gaps);
        for _ in 0..5 {
            assert_eq!(hit_test(inside, &g, &entries, &gaps), first);
        }
        assert_eq!(first.zone(), Some(0));
        for p in [
            Point::new(r.left() - 1.0, r.cy()),
            Point::new(r.right(), r.cy()),
            Point::new(r.cx(), r.top() - 1.0),
            Point::new(r.cx(), r.bottom()),
        ] {
            let hit = hit_test(p, &g, &entries, &gaps);
            assert!(
                !(hit.entry() == Some(0) && hit.zone() == Some(0)),
                "{p:?} still reports zone 0"
            );
        }
    }

    #[test]
    fn padding_never_drops_below_one_pixel() {
        let scaled = preview_gaps(&Gaps::new(0.0, 0.0), 0.1);
        assert_eq!(scaled.zone_padding, MIN_SCALED_PADDING);
        let scaled = preview_gaps(&Gaps::new(8.0, 8.0), f64::NAN);
        assert_eq!(scaled.zone_padding, MIN_SCALED_PADDING);
        assert_eq!(scaled.outer_gap, 0.0);
    }
}
