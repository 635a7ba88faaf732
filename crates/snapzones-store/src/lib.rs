//! Layouts, assignments and auto-tiling algorithms for snapzones.
//!
//! The engine consumes this crate through two injected traits:
//! - [`LayoutStore`]: layouts in store order, a default, and per-context assignments
//! - [`AlgorithmRegistry`]: auto-tiling algorithms presented as pseudo-layouts
//!
//! [`MemoryLayoutStore`] and [`BuiltinAlgorithms`] are the bundled implementations.

mod algorithms;
mod error;
mod model;
mod store;
pub mod test_support;

pub use algorithms::{AlgorithmRegistry, Builtin, BuiltinAlgorithms};
pub use error::{Error, Result};
pub use model::{
    AUTOTILE_PREFIX, AssignmentTarget, ContextKey, Layout, LayoutCategory, LayoutId, Rgba, Zone,
    ZoneAppearance,
};
pub use store::{LayoutStore, MemoryLayoutStore, StoreEvent};
