#[cfg(test)]
mod tests {
    use crate::{
        LayoutMode, SelectorPosition, Settings, SizeMode, parse_raw,
        raw::RawSelector,
    };

    #[test]
    fn screen_override_overlays_global_selector() {
        let base = Settings::default();
        let user_overlay = parse_raw(
            "(selector: (layout_mode: vertical, max_visible_rows: 2), \
             screens: { \"DP-1\": (position: \"bottom_right\", size_mode: manual, preview_width: 200) })",
        )
        .unwrap();

        let settings = base.clone().overlay_raw(&user_overlay);

        let dp1 = settings.selector_for("DP-1");
        assert_eq!(dp1.position, SelectorPosition::BottomRight);
        assert_eq!(dp1.size_mode, SizeMode::Manual);
        assert_eq!(dp1.preview_width, 200);
        // Global overrides still apply underneath the screen override
        assert_eq!(dp1.layout_mode, LayoutMode::Vertical);
        assert_eq!(dp1.max_visible_rows, 2);

        // Screens without overrides get the global record
        let other = settings.selector_for("HDMI-A-1");
        assert_eq!(other, settings.selector);
        assert_eq!(other.position, base.selector.position);
    }

    #[test]
    fn later_overlay_merges_screen_fields() {
        let first = parse_raw("(screens: { \"DP-1\": (position: 0, grid_columns: 3) })").unwrap();
        let second = parse_raw("(screens: { \"DP-1\": (grid_columns: 6) })").unwrap();
        let settings = Settings::default().overlay_raw(&first).overlay_raw(&second);
        let raw = settings.screens.get("DP-1").unwrap();
        assert_eq!(
            *raw,
            RawSelector {
                position: Some(SelectorPosition::TopLeft),
                grid_columns: Some(6),
                ..RawSelector::default()
            }
        );
    }

    #[test]
    fn gaps_and_proximity_overlay() {
        let base = Settings::default();
        let overlay =
            parse_raw("(gaps: (outer_gap: 20.0), proximity: (trigger_distance: 150.0))").unwrap();
        let settings = base.clone().overlay_raw(&overlay);
        assert_eq!(settings.gaps.outer_gap, 20.0);
        assert_eq!(settings.gaps.zone_padding, base.gaps.zone_padding);
        assert_eq!(settings.proximity.trigger_distance, 150.0);
        assert_eq!(
            settings.proximity.collapse_delay_ms,
            base.proximity.collapse_delay_ms
        );
    }
}
