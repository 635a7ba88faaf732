//! Zone coordinate transforms.
//!
//! Zones are authored against a reference area in relative units. These helpers map them into
//! reference pixels, overlay-local pixels, and overlay-normalized space. They also apply the
//! padding/gap insets. The snap path and every preview path must go through
//! [`effective_rect`], or a dropped window lands somewhere other than where the picker showed it.

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect};

/// Tolerance (relative units) for deciding a zone edge touches the reference boundary.
pub const EDGE_EPS: f64 = 0.01;

/// Padding and gap values applied when converting a zone into a window target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gaps {
    /// Inset applied to every side of every zone.
    pub zone_padding: f64,
    /// Additional inset applied to sides that touch the reference area's boundary.
    pub outer_gap: f64,
}

impl Gaps {
    /// Construct gap values, clamping negatives to zero.
    pub fn new(zone_padding: f64, outer_gap: f64) -> Self {
        Self {
            zone_padding: sanitize(zone_padding),
            outer_gap: sanitize(outer_gap),
        }
    }
}

/// Which sides of a relative rectangle touch the reference boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeTouch {
    /// Left side touches `x = 0`.
    pub left: bool,
    /// Top side touches `y = 0`.
    pub top: bool,
    /// Right side touches `x = 1`.
    pub right: bool,
    /// Bottom side touches `y = 1`.
    pub bottom: bool,
}

impl EdgeTouch {
    /// True when any side touches.
    #[inline]
    pub fn any(&self) -> bool {
        self.left || self.top || self.right || self.bottom
    }
}

/// Negative, NaN and infinite values clamp to zero.
#[inline]
fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Scale and offset a relative rectangle into the reference area's pixel space.
pub fn to_pixel_rect(relative: &Rect, reference: &Rect) -> Rect {
    let w = sanitize(reference.w);
    let h = sanitize(reference.h);
    Rect::new(
        reference.x + relative.x * w,
        reference.y + relative.y * h,
        sanitize(relative.w * w),
        sanitize(relative.h * h),
    )
}

/// Express a pixel rectangle relative to an overlay whose top-left sits at `overlay_origin`.
pub fn to_overlay_local(pixel: &Rect, overlay_origin: Point) -> Rect {
    pixel.translate(-overlay_origin.x, -overlay_origin.y)
}

/// Normalize an overlay-local pixel rectangle into `[0, 1]` overlay space.
///
/// Non-positive overlay dimensions yield the zero rectangle.
pub fn to_normalized_overlay(pixel: &Rect, overlay_w: f64, overlay_h: f64) -> Rect {
    if !(overlay_w > 0.0 && overlay_h > 0.0) {
        return Rect::default();
    }
    let x0 = (pixel.left() / overlay_w).clamp(0.0, 1.0);
    let y0 = (pixel.top() / overlay_h).clamp(0.0, 1.0);
    let x1 = (pixel.right() / overlay_w).clamp(0.0, 1.0);
    let y1 = (pixel.bottom() / overlay_h).clamp(0.0, 1.0);
    Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
}

/// Determine which sides of `relative` touch the reference boundary.
pub fn touched_edges(relative: &Rect) -> EdgeTouch {
    EdgeTouch {
        left: relative.left() <= EDGE_EPS,
        top: relative.top() <= EDGE_EPS,
        right: relative.right() >= 1.0 - EDGE_EPS,
        bottom: relative.bottom() >= 1.0 - EDGE_EPS,
    }
}

/// Compute the pixel rectangle a window should occupy for `relative` within `reference`.
///
/// Every side is inset by `zone_padding`. Sides touching the reference boundary are further
/// inset by `outer_gap`, so a corner zone receives the outer gap on both of its touching sides.
pub fn effective_rect(relative: &Rect, reference: &Rect, gaps: &Gaps) -> Rect {
    let pixel = to_pixel_rect(relative, reference);
    let touch = touched_edges(relative);
    let pad = sanitize(gaps.zone_padding);
    let outer = sanitize(gaps.outer_gap);
    let side = |touches: bool| if touches { pad + outer } else { pad };
    pixel.inset(
        side(touch.left),
        side(touch.top),
        side(touch.right),
        side(touch.bottom),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    #[test]
    fn pixel_rect_scales_and_offsets() {
        let reference = Rect::new(100.0, 50.0, 1000.0, 500.0);
        let r = to_pixel_rect(&Rect::new(0.5, 0.0, 0.5, 1.0), &reference);
        assert_eq!(r, Rect::new(600.0, 50.0, 500.0, 500.0));
    }

    #[test]
    fn overlay_local_subtracts_origin() {
        let r = to_overlay_local(&Rect::new(2020.0, 40.0, 10.0, 10.0), Point::new(1920.0, 0.0));
        assert_eq!(r, Rect::new(100.0, 40.0, 10.0, 10.0));
    }

    #[test]
    fn normalized_overlay_clamps_and_handles_zero() {
        let n = to_normalized_overlay(&Rect::new(960.0, 0.0, 960.0, 540.0), 1920.0, 1080.0);
        assert_eq!(n, Rect::new(0.5, 0.0, 0.5, 0.5));
        let spill = to_normalized_overlay(&Rect::new(-10.0, 0.0, 20.0, 2000.0), 100.0, 100.0);
        assert_eq!(spill, Rect::new(0.0, 0.0, 0.1, 1.0));
        assert_eq!(to_normalized_overlay(&SCREEN, 0.0, 1080.0), Rect::default());
    }

    #[test]
    fn interior_zone_gets_padding_only() {
        let gaps = Gaps::new(8.0, 20.0);
        let r = effective_rect(&Rect::new(0.25, 0.25, 0.5, 0.5), &SCREEN, &gaps);
        assert_eq!(r, Rect::new(488.0, 278.0, 944.0, 524.0));
    }

    #[test]
    fn corner_zone_gets_outer_gap_on_both_touching_sides() {
        let gaps = Gaps::new(8.0, 20.0);
        let r = effective_rect(&Rect::new(0.0, 0.0, 0.5, 0.5), &SCREEN, &gaps);
        // left/top: 8 + 20, right/bottom: 8
        assert_eq!(r, Rect::new(28.0, 28.0, 960.0 - 36.0, 540.0 - 36.0));
    }

    #[test]
    fn full_zone_touches_every_edge() {
        let touch = touched_edges(&Rect::unit());
        assert!(touch.left && touch.top && touch.right && touch.bottom);
        let r = effective_rect(&Rect::unit(), &SCREEN, &Gaps::new(5.0, 5.0));
        assert_eq!(r, Rect::new(10.0, 10.0, 1900.0, 1060.0));
    }

    #[test]
    fn negative_gaps_are_ignored() {
        let r = effective_rect(&Rect::unit(), &SCREEN, &Gaps::new(-4.0, f64::NAN));
        assert_eq!(r, SCREEN);
    }
}
