//! Parse and load user settings.

use std::{ffi::OsStr, fs, path::Path};

use ron::{Options, extensions::Extensions};
use tracing::debug;

use crate::{Error, Settings, raw::RawSettings};

/// RON options shared by every settings parse: bare values are accepted for optional fields.
fn ron_options() -> Options {
    Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

/// Parse a raw settings document from RON text.
pub fn parse_raw(source: &str) -> Result<RawSettings, Error> {
    ron_options()
        .from_str::<RawSettings>(source)
        .map_err(|e| Error::Parse {
            path: None,
            message: e.to_string(),
        })
}

/// Parse and validate settings from RON text, overlaying them on the defaults.
pub fn parse_str(source: &str) -> Result<Settings, Error> {
    let raw = parse_raw(source)?;
    validate(&raw)?;
    Ok(Settings::from_raw(&raw))
}

/// Load fully resolved [`Settings`] from a `.ron` file at `path`.
pub fn load_from_path(path: &Path) -> Result<Settings, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported settings format (expected a .ron file)".to_string(),
        });
    }
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let settings = parse_str(&source).map_err(|e| e.with_path(path))?;
    debug!(path = %path.display(), mode = ?settings.mode, "settings_loaded");
    Ok(settings)
}

/// Reject values that parse but cannot produce a usable selector.
fn validate(raw: &RawSettings) -> Result<(), Error> {
    let invalid = |message: String| Err(Error::Validation {
        path: None,
        message,
    });
    if let Some(p) = &raw.proximity {
        if let Some(d) = p.trigger_distance
            && !(d.is_finite() && d > 0.0)
        {
            return invalid(format!("proximity.trigger_distance must be > 0 (got {d})"));
        }
        if let Some(z) = p.edge_trigger_zone
            && !(z.is_finite() && z >= 0.0)
        {
            return invalid(format!("proximity.edge_trigger_zone must be >= 0 (got {z})"));
        }
    }
    if let Some(g) = &raw.gaps {
        for (name, v) in [("zone_padding", g.zone_padding), ("outer_gap", g.outer_gap)] {
            if let Some(v) = v
                && !(v.is_finite() && v >= 0.0)
            {
                return invalid(format!("gaps.{name} must be >= 0 (got {v})"));
            }
        }
    }
    Ok(())
}
