// Unified geometry primitives shared by the planner, hit tester and transforms.

use serde::{Deserialize, Serialize};

/// A point in pixel (or normalized) space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (grows downward).
    pub y: f64,
}

impl Point {
    /// Construct a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Compare two floats within `eps`.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Axis-aligned rectangle with a top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    #[serde(alias = "width")]
    pub w: f64,
    /// Height.
    #[serde(alias = "height")]
    pub h: f64,
}

impl Rect {
    /// Construct a rectangle from origin and size.
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// The unit rectangle `(0, 0, 1, 1)`, i.e. a full reference area in relative units.
    #[inline]
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }
    /// Right edge, exclusive.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }
    /// Top edge.
    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }
    /// Bottom edge, exclusive.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
    /// Horizontal center.
    #[inline]
    pub fn cx(&self) -> f64 {
        self.x + self.w / 2.0
    }
    /// Vertical center.
    #[inline]
    pub fn cy(&self) -> f64 {
        self.y + self.h / 2.0
    }

    /// Top-left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Half-open containment: left/top edges are inside, right/bottom edges are not.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Whether `other` lies entirely within this rectangle (edges inclusive, within `eps`).
    pub fn contains_rect(&self, other: &Self, eps: f64) -> bool {
        other.left() >= self.left() - eps
            && other.top() >= self.top() - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }

    /// Shrink each side by the given amounts. Width and height never go negative; a rectangle
    /// that would invert collapses onto its center.
    pub fn inset(&self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let mut out = Self::new(
            self.x + left,
            self.y + top,
            self.w - left - right,
            self.h - top - bottom,
        );
        if out.w < 0.0 {
            out.x = self.cx();
            out.w = 0.0;
        }
        if out.h < 0.0 {
            out.y = self.cy();
            out.h = 0.0;
        }
        out
    }

    /// Uniform inset on all four sides.
    #[inline]
    pub fn inset_uniform(&self, amount: f64) -> Self {
        self.inset(amount, amount, amount, amount)
    }

    /// Grow the rectangle around its center so each axis is at least `min`.
    pub fn with_min_size(&self, min_w: f64, min_h: f64) -> Self {
        let mut out = *self;
        if out.w < min_w {
            out.x = self.cx() - min_w / 2.0;
            out.w = min_w;
        }
        if out.h < min_h {
            out.y = self.cy() - min_h / 2.0;
            out.h = min_h;
        }
        out
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// All components finite and size strictly positive.
    pub fn is_valid_size(&self) -> bool {
        [self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite()) && self.w > 0.0 && self.h > 0.0
    }

    /// Component-wise approximate equality.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        approx_eq(self.x, other.x, eps)
            && approx_eq(self.y, other.y, eps)
            && approx_eq(self.w, other.w, eps)
            && approx_eq(self.h, other.h, eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_works() {
        assert!(approx_eq(1.0, 1.0, 0.0));
        assert!(approx_eq(1.0, 1.000_5, 0.001));
        assert!(!approx_eq(1.0, 1.01, 0.001));
    }

    #[test]
    fn rect_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.cx(), 25.0);
        assert_eq!(r.cy(), 40.0);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.99, 9.99)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, 10.0)));
        assert!(!r.contains(Point::new(-0.1, 0.0)));
    }

    #[test]
    fn inset_never_inverts() {
        let r = Rect::new(0.0, 0.0, 10.0, 4.0);
        let s = r.inset_uniform(3.0);
        assert_eq!(s.w, 4.0);
        assert_eq!(s.h, 0.0);
        assert_eq!(s.y, 2.0);
    }

    #[test]
    fn min_size_grows_around_center() {
        let r = Rect::new(10.0, 10.0, 2.0, 20.0).with_min_size(8.0, 8.0);
        assert_eq!(r, Rect::new(7.0, 10.0, 8.0, 20.0));
    }

    #[test]
    fn valid_size_rejects_degenerate() {
        assert!(Rect::new(0.0, 0.0, 0.5, 0.5).is_valid_size());
        assert!(!Rect::new(0.0, 0.0, 0.0, 0.5).is_valid_size());
        assert!(!Rect::new(f64::NAN, 0.0, 0.5, 0.5).is_valid_size());
    }
}
