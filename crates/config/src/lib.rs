//! Settings for snapzones: selector presentation, drag proximity, zone gaps and snap mode.
#![allow(missing_docs)]

use std::{
    env,
    path::{Path, PathBuf},
};

mod defaults;
mod error;
mod loader;
pub mod raw;
mod settings;
mod types;

#[cfg(test)]
mod test_merge;
#[cfg(test)]
mod test_parse;

pub use error::Error;
pub use loader::{load_from_path, parse_raw, parse_str};
pub use settings::{ProximityConfig, SelectorConfig, Settings};
pub use types::{LayoutMode, SelectorPosition, SizeMode, SnapMode};
pub use zone_geom::Gaps;

/// Determine the preferred user settings path (`~/.config/snapzones/config.ron`).
pub fn default_config_path() -> PathBuf {
    let mut p = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut home = PathBuf::from(env::var_os("HOME").unwrap_or_default());
            home.push(".config");
            home
        });
    p.push("snapzones");
    p.push("config.ron");
    p
}

/// Resolve the effective settings path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use the default path when it exists.
/// 3) Else return `None`; callers fall back to built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let preferred = default_config_path();
    preferred.exists().then_some(preferred)
}

/// Load settings from the resolved path, or return defaults when no file exists.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Settings, Error> {
    match resolve_config_path(explicit) {
        Some(path) => load_from_path(&path),
        None => Ok(Settings::default()),
    }
}
