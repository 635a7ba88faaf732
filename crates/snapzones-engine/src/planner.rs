//! Popup geometry: indicator sizing, grid shape, overflow and screen anchoring.

use config::{LayoutMode, SelectorConfig, SelectorPosition, SizeMode};
use zone_geom::{Point, Rect};

/// Gap between adjacent indicators.
pub const INDICATOR_SPACING: f64 = 18.0;
/// Total padding between the container edge and its content (both sides combined).
pub const CONTAINER_PADDING: f64 = 36.0;
/// Margin between the anchored screen edge and the container.
pub const CONTAINER_TOP_MARGIN: f64 = 10.0;
/// Margin on each side of the container.
pub const CONTAINER_SIDE_MARGIN: f64 = 10.0;
/// Gap between an indicator and its label.
pub const LABEL_TOP_MARGIN: f64 = 8.0;
/// Label height.
pub const LABEL_HEIGHT: f64 = 20.0;
/// Vertical space reserved below each indicator for its label.
pub const LABEL_SPACE: f64 = LABEL_TOP_MARGIN + LABEL_HEIGHT;

/// Auto-sized indicator width bounds.
const AUTO_MIN_WIDTH: f64 = 120.0;
const AUTO_MAX_WIDTH: f64 = 280.0;
/// Auto-sized indicator width as a fraction of the screen width.
const AUTO_WIDTH_DIVISOR: f64 = 10.0;
/// Aspect assumed when the screen has no usable height.
const FALLBACK_ASPECT: f64 = 16.0 / 9.0;
/// Column cap for large auto grids.
const MAX_AUTO_COLUMNS: usize = 6;

/// Computed popup layout for one screen and candidate count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupGeometry {
    /// Screen the popup is anchored to.
    pub screen: Rect,
    /// Anchor actually used (unsupported anchors are mapped to `Top`).
    pub anchor: SelectorPosition,
    /// Indicator size in pixels.
    pub indicator_width: f64,
    /// Indicator height, excluding the label band.
    pub indicator_height: f64,
    /// Grid columns.
    pub columns: usize,
    /// Visible rows.
    pub rows: usize,
    /// Rows needed to show every item.
    pub total_rows: usize,
    /// True when `total_rows` exceeds the visible rows.
    pub needs_scrolling: bool,
    /// Width of the indicator grid.
    pub content_width: f64,
    /// Height of the visible rows.
    pub content_height: f64,
    /// Height of all rows.
    pub scroll_content_height: f64,
    /// Container size: content plus padding.
    pub container_width: f64,
    /// Container height.
    pub container_height: f64,
    /// Bar size: container plus margins.
    pub bar_width: f64,
    /// Bar height.
    pub bar_height: f64,
    /// Absolute bar origin.
    pub x: f64,
    /// Absolute bar origin, vertical.
    pub y: f64,
    /// Indicator width relative to the screen width.
    pub preview_scale: f64,
}

/// Replace non-finite and negative values with zero.
fn sane(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Grid shape `(columns, rows)` before overflow handling.
fn shape(config: &SelectorConfig, count: usize) -> (usize, usize) {
    if count == 0 {
        return (1, 1);
    }
    let columns = match (config.layout_mode, config.size_mode) {
        (LayoutMode::Vertical, _) => 1,
        (LayoutMode::Horizontal, _) => count,
        (LayoutMode::Grid, SizeMode::Auto) => match count {
            0..=3 => count,
            4..=6 => 3,
            7..=12 => 4,
            _ => ((count as f64).sqrt().ceil() as usize).min(MAX_AUTO_COLUMNS),
        },
        (LayoutMode::Grid, SizeMode::Manual) => (config.grid_columns as usize).max(1),
    };
    (columns, count.div_ceil(columns))
}

/// Indicator `(width, height)` for a screen.
fn indicator_size(config: &SelectorConfig, screen_w: f64, screen_h: f64) -> (f64, f64) {
    let aspect = if screen_h > 0.0 && screen_w > 0.0 {
        screen_w / screen_h
    } else {
        FALLBACK_ASPECT
    };
    match config.size_mode {
        SizeMode::Auto => {
            let w = (screen_w / AUTO_WIDTH_DIVISOR).clamp(AUTO_MIN_WIDTH, AUTO_MAX_WIDTH);
            (w, (w / aspect).round())
        }
        SizeMode::Manual => {
            let w = f64::from(config.preview_width.max(1));
            let h = if config.preview_lock_aspect {
                (w / aspect).round().max(1.0)
            } else {
                f64::from(config.preview_height.max(1))
            };
            (w, h)
        }
    }
}

/// Span of `n` cells of `size` separated by `INDICATOR_SPACING`.
fn span(n: usize, size: f64) -> f64 {
    n as f64 * size + n.saturating_sub(1) as f64 * INDICATOR_SPACING
}

impl PopupGeometry {
    /// Plan the popup for `item_count` candidates on `screen`. Never fails; degenerate input
    /// falls back to a 16:9 aspect and a single cell.
    pub fn plan(config: &SelectorConfig, screen: Rect, item_count: usize) -> Self {
        let screen = Rect::new(
            if screen.x.is_finite() { screen.x } else { 0.0 },
            if screen.y.is_finite() { screen.y } else { 0.0 },
            sane(screen.w),
            sane(screen.h),
        );
        let (iw, ih) = indicator_size(config, screen.w, screen.h);
        let (columns, total_rows) = shape(config, item_count);

        let max_visible = (config.max_visible_rows as usize).max(1);
        let (rows, needs_scrolling) =
            if config.size_mode == SizeMode::Auto && total_rows > max_visible {
                (max_visible, true)
            } else {
                (total_rows, false)
            };

        let row_h = ih + LABEL_SPACE;
        let content_width = span(columns, iw);
        let content_height = span(rows, row_h);
        let scroll_content_height = span(total_rows, row_h);
        let container_width = content_width + CONTAINER_PADDING;
        let container_height = content_height + CONTAINER_PADDING;
        let bar_width = 2.0 * CONTAINER_SIDE_MARGIN + container_width;
        let bar_height = CONTAINER_TOP_MARGIN + container_height;

        let anchor = match config.position {
            SelectorPosition::Center => SelectorPosition::Top,
            p => p,
        };
        let (x, y) = place(anchor, &screen, bar_width, bar_height);

        Self {
            screen,
            anchor,
            indicator_width: iw,
            indicator_height: ih,
            columns,
            rows,
            total_rows,
            needs_scrolling,
            content_width,
            content_height,
            scroll_content_height,
            container_width,
            container_height,
            bar_width,
            bar_height,
            x,
            y,
            preview_scale: if screen.w > 0.0 { iw / screen.w } else { 0.0 },
        }
    }

    /// Absolute bar rectangle.
    pub fn bar_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.bar_width, self.bar_height)
    }

    /// Absolute container rectangle. The top margin sits on the anchored edge, so
    /// bottom-anchored popups carry it below the container.
    pub fn container_rect(&self) -> Rect {
        let margin_below = matches!(
            self.anchor,
            SelectorPosition::BottomLeft | SelectorPosition::Bottom | SelectorPosition::BottomRight
        );
        let y = if margin_below {
            self.y
        } else {
            self.y + CONTAINER_TOP_MARGIN
        };
        Rect::new(
            self.x + CONTAINER_SIDE_MARGIN,
            y,
            self.container_width,
            self.container_height,
        )
    }

    /// Absolute top-left of the first indicator.
    pub fn content_origin(&self) -> Point {
        let c = self.container_rect();
        Point::new(c.x + CONTAINER_PADDING / 2.0, c.y + CONTAINER_PADDING / 2.0)
    }

    /// Absolute rectangle of the visible content area.
    pub fn content_rect(&self) -> Rect {
        let o = self.content_origin();
        Rect::new(o.x, o.y, self.content_width, self.content_height)
    }

    /// Horizontal distance between adjacent indicator origins.
    pub fn column_pitch(&self) -> f64 {
        self.indicator_width + INDICATOR_SPACING
    }

    /// Vertical distance between adjacent indicator origins.
    pub fn row_pitch(&self) -> f64 {
        self.indicator_height + LABEL_SPACE + INDICATOR_SPACING
    }

    /// `(row, column)` of the item at `index` in row-major order.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        let cols = self.columns.max(1);
        (index / cols, index % cols)
    }

    /// Indicator rectangle relative to the content origin, ignoring scroll.
    pub fn indicator_rect(&self, index: usize) -> Rect {
        let (row, col) = self.cell(index);
        Rect::new(
            col as f64 * self.column_pitch(),
            row as f64 * self.row_pitch(),
            self.indicator_width,
            self.indicator_height,
        )
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_content_height - self.content_height).max(0.0)
    }

    /// Clamp a scroll offset into `[0, max_scroll]`.
    pub fn clamp_scroll(&self, offset: f64) -> f64 {
        if offset.is_finite() {
            offset.clamp(0.0, self.max_scroll())
        } else {
            0.0
        }
    }

    /// Scroll offset that brings `row` fully into view, moving as little as possible from
    /// `offset`.
    pub fn reveal_row(&self, row: usize, offset: f64) -> f64 {
        let top = row as f64 * self.row_pitch();
        let bottom = top + self.indicator_height + LABEL_SPACE;
        let offset = self.clamp_scroll(offset);
        let next = if top < offset {
            top
        } else if bottom > offset + self.content_height {
            bottom - self.content_height
        } else {
            offset
        };
        self.clamp_scroll(next)
    }
}

/// Bar origin for `anchor`, flush with the named edge or corner and centered on the free axis.
fn place(anchor: SelectorPosition, screen: &Rect, bar_w: f64, bar_h: f64) -> (f64, f64) {
    let left = screen.left();
    let right = screen.right() - bar_w;
    let hcenter = screen.x + (screen.w - bar_w) / 2.0;
    let top = screen.top();
    let bottom = screen.bottom() - bar_h;
    let vcenter = screen.y + (screen.h - bar_h) / 2.0;
    match anchor {
        SelectorPosition::TopLeft => (left, top),
        SelectorPosition::TopRight => (right, top),
        SelectorPosition::Left => (left, vcenter),
        SelectorPosition::Right => (right, vcenter),
        SelectorPosition::BottomLeft => (left, bottom),
        SelectorPosition::Bottom => (hcenter, bottom),
        SelectorPosition::BottomRight => (right, bottom),
        SelectorPosition::Top | SelectorPosition::Center => (hcenter, top),
    }
}
