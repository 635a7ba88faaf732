//! Core configuration enums.

use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{self, Visitor},
};
use tracing::warn;

/// Screen anchor for the picker popup.
///
/// Persisted settings store the anchor as an index `0..=8` (row-major over a 3×3 grid) or as a
/// snake_case name. `Center` (index 4) is not a supported placement; it and any unrecognized
/// value position the popup as [`SelectorPosition::Top`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectorPosition {
    /// Top-left corner.
    TopLeft,
    /// Top edge, centered horizontally.
    #[default]
    Top,
    /// Top-right corner.
    TopRight,
    /// Left edge, centered vertically.
    Left,
    /// Unsupported; placed as `Top`.
    Center,
    /// Right edge, centered vertically.
    Right,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom edge, centered horizontally.
    Bottom,
    /// Bottom-right corner.
    BottomRight,
}

impl SelectorPosition {
    /// All anchors in index order.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Left,
        Self::Center,
        Self::Right,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    /// Map a persisted index to an anchor.
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Map a snake_case (or kebab-case) name to an anchor.
    pub fn from_name(name: &str) -> Option<Self> {
        let norm = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.iter().copied().find(|p| p.name() == norm)
    }

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::Top => "top",
            Self::TopRight => "top_right",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::BottomLeft => "bottom_left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for SelectorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts an index or a name; unknown values fall back to `Top` with a warning.
impl<'de> Deserialize<'de> for SelectorPosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Visitor accepting integers and strings.
        struct PosVisitor;

        impl Visitor<'_> for PosVisitor {
            type Value = SelectorPosition;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a selector position index (0-8) or name")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(SelectorPosition::from_index(v).unwrap_or_else(|| {
                    warn!(index = v, "unknown_selector_position_index");
                    SelectorPosition::Top
                }))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                self.visit_i64(i64::try_from(v).unwrap_or(i64::MAX))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(SelectorPosition::from_name(v).unwrap_or_else(|| {
                    warn!(name = %v, "unknown_selector_position_name");
                    SelectorPosition::Top
                }))
            }
        }

        deserializer.deserialize_any(PosVisitor)
    }
}

/// Arrangement of layout previews inside the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Rows and columns.
    #[default]
    Grid,
    /// A single column.
    Vertical,
    /// A single row.
    Horizontal,
}

/// How preview indicators are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMode {
    /// Derived from the screen width; aspect always locked.
    #[default]
    Auto,
    /// Explicit preview width/height and grid columns.
    Manual,
}

/// Operating mode, which decides what kinds of layouts the picker offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    /// User-authored layouts only.
    Manual,
    /// Auto-tiling algorithms only.
    Autotile,
    /// Both, e.g. while transitioning between modes.
    #[default]
    Mixed,
}

impl SnapMode {
    /// Returns `(include_manual, include_autotile)` for candidate list queries.
    pub fn includes(self) -> (bool, bool) {
        match self {
            Self::Manual => (true, false),
            Self::Autotile => (false, true),
            Self::Mixed => (true, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_name_round_trip() {
        for (i, pos) in SelectorPosition::ALL.iter().enumerate() {
            assert_eq!(SelectorPosition::from_index(i as i64), Some(*pos));
            assert_eq!(SelectorPosition::from_name(pos.name()), Some(*pos));
        }
        assert_eq!(SelectorPosition::from_index(9), None);
        assert_eq!(SelectorPosition::from_index(-1), None);
        assert_eq!(
            SelectorPosition::from_name("Bottom-Right"),
            Some(SelectorPosition::BottomRight)
        );
    }

    #[test]
    fn snap_mode_includes() {
        assert_eq!(SnapMode::Manual.includes(), (true, false));
        assert_eq!(SnapMode::Autotile.includes(), (false, true));
        assert_eq!(SnapMode::Mixed.includes(), (true, true));
    }
}
