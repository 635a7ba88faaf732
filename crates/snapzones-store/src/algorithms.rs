//! Auto-tiling algorithm registry.
//!
//! Algorithms are presented to the picker as pseudo-layouts. The registry only needs to say
//! which algorithms exist, what to call them, and what a representative tiling looks like for a
//! small window count.

use zone_geom::Rect;

/// Injected, read-only source of auto-tiling algorithms.
pub trait AlgorithmRegistry: Send + Sync {
    /// Registered algorithm ids in presentation order.
    fn available_algorithms(&self) -> Vec<String>;

    /// Relative preview zones for `id`. Empty for unknown ids.
    fn preview_zones(&self, id: &str) -> Vec<Rect>;

    /// Human-readable name, or `None` for unknown ids.
    fn display_name(&self, id: &str) -> Option<String>;
}

/// Tiling strategies bundled with the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    /// Equal-width vertical strips.
    Columns,
    /// Equal-height horizontal strips.
    Rows,
    /// Near-square grid.
    Grid,
    /// One large master on the left, the rest stacked on the right.
    MasterStack,
    /// Master in the middle with stacks on both sides.
    ThreeColumn,
    /// Each split halves the remaining space, alternating direction.
    Dwindle,
    /// Every window fills the area.
    Monocle,
}

impl Builtin {
    /// All builtins in presentation order.
    pub const ALL: [Self; 7] = [
        Self::Columns,
        Self::Rows,
        Self::Grid,
        Self::MasterStack,
        Self::ThreeColumn,
        Self::Dwindle,
        Self::Monocle,
    ];

    /// Registry id.
    pub fn id(self) -> &'static str {
        match self {
            Self::Columns => "columns",
            Self::Rows => "rows",
            Self::Grid => "grid",
            Self::MasterStack => "master-stack",
            Self::ThreeColumn => "three-column",
            Self::Dwindle => "dwindle",
            Self::Monocle => "monocle",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Columns => "Columns",
            Self::Rows => "Rows",
            Self::Grid => "Grid",
            Self::MasterStack => "Master + Stack",
            Self::ThreeColumn => "Three Column",
            Self::Dwindle => "Dwindle",
            Self::Monocle => "Monocle",
        }
    }

    /// Look up a builtin by registry id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.id() == id)
    }

    /// Relative tiling for `windows` windows. Always yields at least one zone.
    pub fn tile(self, windows: usize) -> Vec<Rect> {
        let n = windows.max(1);
        match self {
            Self::Columns => strips(Rect::unit(), n, true),
            Self::Rows => strips(Rect::unit(), n, false),
            Self::Grid => grid(n),
            Self::MasterStack => master_stack(n, MASTER_RATIO),
            Self::ThreeColumn => three_column(n),
            Self::Dwindle => dwindle(n),
            Self::Monocle => vec![Rect::unit()],
        }
    }
}

/// Share of the width given to the master area.
const MASTER_RATIO: f64 = 0.6;

/// Split `area` into `n` equal strips, side by side when `vertical`, stacked otherwise.
fn strips(area: Rect, n: usize, vertical: bool) -> Vec<Rect> {
    let n = n.max(1);
    let nf = n as f64;
    (0..n)
        .map(|i| {
            let f = i as f64;
            if vertical {
                let w = area.w / nf;
                Rect::new(area.x + f * w, area.y, w, area.h)
            } else {
                let h = area.h / nf;
                Rect::new(area.x, area.y + f * h, area.w, h)
            }
        })
        .collect()
}

/// Near-square grid: `ceil(sqrt(n))` columns, the last row stretched to fill.
fn grid(n: usize) -> Vec<Rect> {
    let cols = (n as f64).sqrt().ceil().max(1.0) as usize;
    let rows = n.div_ceil(cols);
    let h = 1.0 / rows as f64;
    let mut out = Vec::with_capacity(n);
    for row in 0..rows {
        let in_row = (n - row * cols).min(cols);
        let band = Rect::new(0.0, row as f64 * h, 1.0, h);
        out.extend(strips(band, in_row, true));
    }
    out
}

/// Master on the left at `ratio` width, the rest stacked on the right.
fn master_stack(n: usize, ratio: f64) -> Vec<Rect> {
    if n == 1 {
        return vec![Rect::unit()];
    }
    let mut out = vec![Rect::new(0.0, 0.0, ratio, 1.0)];
    out.extend(strips(
        Rect::new(ratio, 0.0, 1.0 - ratio, 1.0),
        n - 1,
        false,
    ));
    out
}

/// Center master at half width; remaining windows alternate right then left.
fn three_column(n: usize) -> Vec<Rect> {
    match n {
        1 => vec![Rect::unit()],
        2 => master_stack(2, 0.5),
        _ => {
            let side = 0.25;
            let rest = n - 1;
            let right = rest.div_ceil(2);
            let left = rest - right;
            let mut out = vec![Rect::new(side, 0.0, 0.5, 1.0)];
            out.extend(strips(Rect::new(0.75, 0.0, side, 1.0), right, false));
            out.extend(strips(Rect::new(0.0, 0.0, side, 1.0), left, false));
            out
        }
    }
}

/// Repeatedly halve the remaining area, alternating vertical and horizontal splits.
fn dwindle(n: usize) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n);
    let mut rest = Rect::unit();
    for i in 0..n {
        if i + 1 == n {
            out.push(rest);
            break;
        }
        if i % 2 == 0 {
            let w = rest.w / 2.0;
            out.push(Rect::new(rest.x, rest.y, w, rest.h));
            rest = Rect::new(rest.x + w, rest.y, w, rest.h);
        } else {
            let h = rest.h / 2.0;
            out.push(Rect::new(rest.x, rest.y, rest.w, h));
            rest = Rect::new(rest.x, rest.y + h, rest.w, h);
        }
    }
    out
}

/// Registry over [`Builtin`] algorithms.
#[derive(Clone, Debug)]
pub struct BuiltinAlgorithms {
    /// Exposed algorithms, in order.
    enabled: Vec<Builtin>,
    /// Window count used for previews.
    preview_windows: usize,
}

impl Default for BuiltinAlgorithms {
    fn default() -> Self {
        Self {
            enabled: Builtin::ALL.to_vec(),
            preview_windows: Self::DEFAULT_PREVIEW_WINDOWS,
        }
    }
}

impl BuiltinAlgorithms {
    /// Window count used to draw previews.
    pub const DEFAULT_PREVIEW_WINDOWS: usize = 3;

    /// Registry exposing only `enabled`, in the given order.
    pub fn with(enabled: impl IntoIterator<Item = Builtin>) -> Self {
        Self {
            enabled: enabled.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Set the window count used to draw previews (minimum 1).
    pub fn preview_windows(mut self, n: usize) -> Self {
        self.preview_windows = n.max(1);
        self
    }

    /// Enabled builtin for `id`.
    fn lookup(&self, id: &str) -> Option<Builtin> {
        Builtin::from_id(id).filter(|b| self.enabled.contains(b))
    }
}

impl AlgorithmRegistry for BuiltinAlgorithms {
    fn available_algorithms(&self) -> Vec<String> {
        self.enabled.iter().map(|b| b.id().to_string()).collect()
    }

    fn preview_zones(&self, id: &str) -> Vec<Rect> {
        self.lookup(id)
            .map(|b| b.tile(self.preview_windows))
            .unwrap_or_default()
    }

    fn display_name(&self, id: &str) -> Option<String> {
        self.lookup(id).map(|b| b.name().to_string())
    }
}
