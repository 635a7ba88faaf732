#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use crate::{
        Error, LayoutMode, SelectorPosition, Settings, SizeMode, SnapMode, load_from_path,
        parse_str,
    };

    #[test]
    fn empty_document_yields_defaults() {
        let settings = parse_str("()").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.enabled);
        assert_eq!(settings.proximity.sample_interval_ms, 16);
        assert_eq!(settings.proximity.collapse_delay_ms, 300);
    }

    #[test]
    fn full_document_parses() {
        let src = r#"(
            enabled: false,
            mode: autotile,
            selector: (
                position: "left",
                layout_mode: horizontal,
                size_mode: manual,
                max_visible_rows: 5,
                preview_width: 240,
                preview_height: 120,
                preview_lock_aspect: false,
                grid_columns: 3,
            ),
            proximity: (trigger_distance: 80.0, edge_trigger_zone: 20.0),
            gaps: (zone_padding: 4.0, outer_gap: 12.0),
        )"#;
        let s = parse_str(src).unwrap();
        assert!(!s.enabled);
        assert_eq!(s.mode, SnapMode::Autotile);
        assert_eq!(s.candidate_filter(), (false, true));
        assert_eq!(s.selector.position, SelectorPosition::Left);
        assert_eq!(s.selector.layout_mode, LayoutMode::Horizontal);
        assert_eq!(s.selector.size_mode, SizeMode::Manual);
        assert_eq!(s.selector.max_visible_rows, 5);
        assert_eq!(s.selector.preview_width, 240);
        assert_eq!(s.selector.preview_height, 120);
        assert!(!s.selector.preview_lock_aspect);
        assert_eq!(s.selector.grid_columns, 3);
        assert_eq!(s.proximity.trigger_distance, 80.0);
        assert_eq!(s.proximity.edge_trigger_zone, 20.0);
        assert_eq!(s.gaps.zone_padding, 4.0);
        assert_eq!(s.gaps.outer_gap, 12.0);
    }

    #[test]
    fn position_accepts_indices_and_falls_back_to_top() {
        let s = parse_str("(selector: (position: 8))").unwrap();
        assert_eq!(s.selector.position, SelectorPosition::BottomRight);
        let s = parse_str("(selector: (position: 42))").unwrap();
        assert_eq!(s.selector.position, SelectorPosition::Top);
        let s = parse_str("(selector: (position: \"sideways\"))").unwrap();
        assert_eq!(s.selector.position, SelectorPosition::Top);
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = parse_str("(selector: (colour: 3))").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn invalid_trigger_distance_is_rejected() {
        let err = parse_str("(proximity: (trigger_distance: 0.0))").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.pretty().contains("trigger_distance"));
    }

    #[test]
    fn load_from_path_rejects_other_extensions() {
        let err = load_from_path(&PathBuf::from("/tmp/settings.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn load_from_path_attaches_path_to_parse_errors() {
        let dir = std::env::temp_dir().join(format!("snapzones-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.ron");
        fs::write(&path, "(selector: (").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert_eq!(err.path(), Some(path.as_path()));
        let _ignored = fs::remove_dir_all(&dir);
    }

    #[test]
    fn demo_config_parses() {
        let s = parse_str(include_str!("../../../demos/config.ron")).unwrap();
        assert_eq!(s.mode, SnapMode::Mixed);
        assert_eq!(s.selector.max_visible_rows, 3);
        let hdmi = s.selector_for("HDMI-1");
        assert_eq!(hdmi.position, SelectorPosition::BottomRight);
        assert_eq!(hdmi.size_mode, SizeMode::Manual);
        assert_eq!(s.selector_for("DP-1").position, SelectorPosition::Top);
    }
}
