//! Keyboard cursor movement across the popup grid.

use std::{fmt, str::FromStr};

/// Cursor movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Previous item.
    Left,
    /// Next item.
    Right,
    /// Same column, previous row.
    Up,
    /// Same column, next row.
    Down,
}

impl Direction {
    /// Move `index` one step within `len` items laid out in rows of `columns`.
    /// Moves that would leave the grid keep the cursor where it is.
    pub fn step(self, index: usize, len: usize, columns: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let cols = columns.max(1);
        let index = index.min(len - 1);
        match self {
            Self::Left => index.saturating_sub(1),
            Self::Right => (index + 1).min(len - 1),
            Self::Up => index.checked_sub(cols).unwrap_or(index),
            Self::Down if index + cols < len => index + cols,
            Self::Down => index,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "h" => Ok(Self::Left),
            "right" | "l" => Ok(Self::Right),
            "up" | "k" => Ok(Self::Up),
            "down" | "j" => Ok(Self::Down),
            other => Err(format!("invalid direction: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_moves_clamp_at_edges() {
        // 7 items in rows of 4:
        // 0 1 2 3
        // 4 5 6
        assert_eq!(Direction::Right.step(0, 7, 4), 1);
        assert_eq!(Direction::Right.step(6, 7, 4), 6);
        assert_eq!(Direction::Left.step(4, 7, 4), 3);
        assert_eq!(Direction::Left.step(0, 7, 4), 0);
        assert_eq!(Direction::Down.step(1, 7, 4), 5);
        assert_eq!(Direction::Down.step(3, 7, 4), 3);
        assert_eq!(Direction::Up.step(5, 7, 4), 1);
        assert_eq!(Direction::Up.step(2, 7, 4), 2);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(Direction::Down.step(0, 0, 4), 0);
        assert_eq!(Direction::Down.step(0, 3, 0), 1);
        assert_eq!(Direction::Right.step(99, 3, 3), 2);
    }

    #[test]
    fn parses_names_and_vi_keys() {
        assert_eq!("Up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("j".parse::<Direction>(), Ok(Direction::Down));
        assert!("sideways".parse::<Direction>().is_err());
    }
}
