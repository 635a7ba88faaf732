//! Geometry primitives and zone coordinate transforms.
//!
//! All rectangles use screen conventions: the origin is the top-left corner and `y` grows
//! downward. Zone geometry is stored relative to a reference area (each component in `[0, 1]`)
//! and converted to pixels with the helpers in [`transform`].

mod geom;
pub mod transform;

#[cfg(test)]
mod property_tests;

pub use geom::{Point, Rect, approx_eq};
pub use transform::{
    EDGE_EPS, EdgeTouch, Gaps, effective_rect, to_normalized_overlay, to_overlay_local,
    to_pixel_rect, touched_edges,
};
