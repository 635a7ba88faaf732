//! RON fixtures describing screens, layouts and assignments.
//!
//! ```ron
//! (
//!     screens: [(id: "DP-1", geometry: (x: 0.0, y: 0.0, w: 1920.0, h: 1080.0))],
//!     layouts: [
//!         (id: "halves", name: "Halves", zones: [
//!             (x: 0.0, y: 0.0, w: 0.5, h: 1.0),
//!             (x: 0.5, y: 0.0, w: 0.5, h: 1.0),
//!         ]),
//!     ],
//!     default: "halves",
//!     assignments: [(screen: "DP-1", desktop: 2, target: algorithm("columns"))],
//!     algorithms: ["columns", "grid"],
//! )
//! ```

use std::{fs, path::Path};

use ron::{Options, extensions::Extensions};
use serde::Deserialize;
use snapzones_store::{
    AssignmentTarget, Builtin, BuiltinAlgorithms, ContextKey, Layout, LayoutCategory, LayoutId,
    MemoryLayoutStore,
};
use tracing::{debug, warn};
use zone_geom::Rect;

use crate::error::{Error, Result};

/// A screen the fixture can be evaluated on.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureScreen {
    /// Screen identifier.
    pub id: String,
    /// Usable area in global pixels.
    pub geometry: Rect,
}

/// A manual layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureLayout {
    /// Layout id.
    id: String,
    /// Display name; the id when absent.
    #[serde(default)]
    name: Option<String>,
    /// Zones in order, relative to the reference area.
    zones: Vec<Rect>,
}

/// What an assignment points at.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum FixtureTarget {
    /// A layout id.
    Layout(String),
    /// An auto-tiling algorithm id.
    Algorithm(String),
}

/// A context assignment.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureAssignment {
    /// Screen id.
    screen: String,
    /// Desktop, or `0` for every desktop.
    #[serde(default)]
    desktop: u32,
    /// Activity, empty for every activity.
    #[serde(default)]
    activity: String,
    /// Assigned layout or algorithm.
    target: FixtureTarget,
}

/// A parsed fixture file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    /// Screens in declaration order.
    pub screens: Vec<FixtureScreen>,
    /// Manual layouts in store order.
    #[serde(default)]
    layouts: Vec<FixtureLayout>,
    /// Default layout id.
    #[serde(default)]
    default: Option<String>,
    /// Context assignments.
    #[serde(default)]
    assignments: Vec<FixtureAssignment>,
    /// Built-in algorithms to expose; all of them when absent.
    #[serde(default)]
    algorithms: Option<Vec<String>>,
}

impl Fixture {
    /// Parse a fixture from RON text.
    pub fn parse(source: &str, path: &Path) -> Result<Self> {
        Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str::<Self>(source)
            .map_err(|e| Error::Fixture {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Read and parse a fixture file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| Error::Fixture {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let fixture = Self::parse(&source, path)?;
        debug!(
            path = %path.display(),
            screens = fixture.screens.len(),
            layouts = fixture.layouts.len(),
            assignments = fixture.assignments.len(),
            "fixture_loaded"
        );
        Ok(fixture)
    }

    /// The screen named `id`, or the first screen when `id` is `None`.
    pub fn screen(&self, id: Option<&str>) -> Result<&FixtureScreen> {
        match id {
            Some(id) => self
                .screens
                .iter()
                .find(|s| s.id == id)
                .ok_or_else(|| Error::other(format!("no screen {id:?} in fixture"))),
            None => self
                .screens
                .first()
                .ok_or_else(|| Error::other("fixture declares no screens")),
        }
    }

    /// Populate an in-memory store with the fixture's layouts, default and assignments.
    pub fn build_store(&self) -> Result<MemoryLayoutStore> {
        let store = MemoryLayoutStore::new();
        for l in &self.layouts {
            let name = l.name.clone().unwrap_or_else(|| l.id.clone());
            let layout =
                Layout::from_relative(LayoutId::new(&l.id), name, LayoutCategory::Manual, &l.zones)?;
            store.add_layout(layout)?;
        }
        if let Some(id) = &self.default {
            store.set_default(Some(LayoutId::new(id)))?;
        }
        for a in &self.assignments {
            let target = match &a.target {
                FixtureTarget::Layout(id) => AssignmentTarget::Layout(LayoutId::new(id)),
                FixtureTarget::Algorithm(id) => AssignmentTarget::Algorithm(id.clone()),
            };
            store.assign(ContextKey::new(&a.screen, a.desktop, &a.activity), target);
        }
        Ok(store)
    }

    /// Built-in algorithms selected by the fixture. Unknown ids are skipped with a warning.
    pub fn algorithms(&self) -> BuiltinAlgorithms {
        match &self.algorithms {
            None => BuiltinAlgorithms::default(),
            Some(ids) => BuiltinAlgorithms::with(ids.iter().filter_map(|id| {
                let found = Builtin::from_id(id);
                if found.is_none() {
                    warn!(algorithm = %id, "unknown_algorithm_skipped");
                }
                found
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use snapzones_store::LayoutStore;

    use super::*;

    const SAMPLE: &str = r#"(
        screens: [
            (id: "DP-1", geometry: (x: 0.0, y: 0.0, w: 1920.0, h: 1080.0)),
            (id: "HDMI-1", geometry: (x: 1920.0, y: 0.0, w: 2560.0, h: 1440.0)),
        ],
        layouts: [
            (id: "halves", name: "Halves", zones: [
                (x: 0.0, y: 0.0, w: 0.5, h: 1.0),
                (x: 0.5, y: 0.0, w: 0.5, h: 1.0),
            ]),
            (id: "full", zones: [(x: 0.0, y: 0.0, w: 1.0, h: 1.0)]),
        ],
        default: "full",
        assignments: [
            (screen: "DP-1", desktop: 2, target: layout("halves")),
            (screen: "HDMI-1", target: algorithm("columns")),
        ],
        algorithms: ["columns", "spiral", "grid"],
    )"#;

    fn sample() -> Fixture {
        Fixture::parse(SAMPLE, Path::new("sample.ron")).unwrap()
    }

    #[test]
    fn builds_store_with_default_and_assignments() {
        let store = sample().build_store().unwrap();
        assert_eq!(store.layouts().len(), 2);
        assert_eq!(store.default_layout().unwrap().id().as_str(), "full");
        assert_eq!(
            store.assignment_for("DP-1", 2, ""),
            Some(AssignmentTarget::Layout(LayoutId::new("halves")))
        );
        assert_eq!(
            store.assignment_for("HDMI-1", 0, ""),
            Some(AssignmentTarget::Algorithm("columns".into()))
        );
    }

    #[test]
    fn screens_resolve_by_id_or_first() {
        let f = sample();
        assert_eq!(f.screen(None).unwrap().id, "DP-1");
        assert_eq!(f.screen(Some("HDMI-1")).unwrap().geometry.w, 2560.0);
        assert!(f.screen(Some("nope")).is_err());
    }

    #[test]
    fn unknown_algorithms_are_skipped() {
        use snapzones_store::AlgorithmRegistry;
        assert_eq!(
            sample().algorithms().available_algorithms(),
            vec!["columns".to_string(), "grid".to_string()]
        );
    }

    #[test]
    fn demo_fixture_loads() {
        let f = Fixture::parse(include_str!("../../../demos/fixture.ron"), Path::new("demo"))
            .unwrap();
        let store = f.build_store().unwrap();
        assert_eq!(store.layouts().len(), 3);
        assert_eq!(f.screens.len(), 2);
    }

    #[test]
    fn parse_errors_carry_the_path() {
        let err = Fixture::parse("(screens: [", Path::new("bad.ron")).unwrap_err();
        assert!(matches!(err, Error::Fixture { ref path, .. } if path == Path::new("bad.ron")));
    }

    #[test]
    fn invalid_zones_are_rejected() {
        let f = Fixture::parse(
            r#"(screens: [], layouts: [(id: "x", zones: [(x: 0.0, y: 0.0, w: 1.5, h: 1.0)])])"#,
            Path::new("x.ron"),
        )
        .unwrap();
        assert!(matches!(f.build_store(), Err(Error::Store(_))));
    }
}
