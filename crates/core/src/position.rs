//! Placement triple used by the search kernel.

use serde::{Deserialize, Serialize};

/// A piece placement: orientation index, anchor row, anchor column.
/// Ordered lexicographically by (rot, row, col).
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub rot: u8,
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// The spawn square: orientation 0 on the top row, column 5.
    pub const START: Position = Position {
        rot: 0,
        row: 0,
        col: 5,
    };

    pub const fn new(rot: u8, row: u8, col: u8) -> Self {
        Self { rot, row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.rot, self.row, self.col)
    }
}
