use proptest::prelude::*;

use crate::{Gaps, Rect, effective_rect, to_normalized_overlay, to_pixel_rect};

fn relative_strategy() -> impl Strategy<Value = Rect> {
    (0.0f64..0.9, 0.0f64..0.9, 0.05f64..1.0, 0.05f64..1.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w.min(1.0 - x), h.min(1.0 - y)))
}

fn reference_strategy() -> impl Strategy<Value = Rect> {
    (
        -3000.0f64..3000.0,
        -3000.0f64..3000.0,
        200.0f64..5000.0,
        200.0f64..5000.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn pixel_rect_stays_inside_reference(rel in relative_strategy(), reference in reference_strategy()) {
        let px = to_pixel_rect(&rel, &reference);
        prop_assert!(reference.contains_rect(&px, 1e-6));
    }

    #[test]
    fn effective_rect_is_inside_pixel_rect(
        rel in relative_strategy(),
        reference in reference_strategy(),
        pad in 0.0f64..40.0,
        outer in 0.0f64..40.0,
    ) {
        let px = to_pixel_rect(&rel, &reference);
        let eff = effective_rect(&rel, &reference, &Gaps::new(pad, outer));
        prop_assert!(px.contains_rect(&eff, 1e-6));
        prop_assert!(eff.w >= 0.0 && eff.h >= 0.0);
    }

    #[test]
    fn normalized_overlay_is_unit_bounded(rel in relative_strategy(), reference in reference_strategy()) {
        let px = to_pixel_rect(&rel, &Rect::new(0.0, 0.0, reference.w, reference.h));
        let n = to_normalized_overlay(&px, reference.w, reference.h);
        prop_assert!(Rect::unit().contains_rect(&n, 1e-9));
        prop_assert!(n.approx_eq(&rel, 1e-9));
    }
}
