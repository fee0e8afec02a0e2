//! NES piece kinds and orientation tables.
//!
//! Pieces are listed in NES order (T J Z O S L I). Rotation index 0 is the
//! orientation the searcher seeds at the spawn square; pressing A advances
//! the index by 1, pressing B by R-1. Offsets are (row, col) with row
//! growing downward.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    T,
    J,
    Z,
    O,
    S,
    L,
    I,
}

/// Number of distinct orientations a piece kind has.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum RotationCount {
    One = 1,
    Two = 2,
    Four = 4,
}

impl RotationCount {
    #[inline(always)]
    pub fn as_usize(self) -> usize {
        self as usize
    }

    /// Map a raw rotation-array length back to the sum type.
    pub fn from_len(len: usize) -> Option<RotationCount> {
        match len {
            1 => Some(RotationCount::One),
            2 => Some(RotationCount::Two),
            4 => Some(RotationCount::Four),
            _ => None,
        }
    }
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::T,
        Piece::J,
        Piece::Z,
        Piece::O,
        Piece::S,
        Piece::L,
        Piece::I,
    ];

    pub fn rotation_count(self) -> RotationCount {
        match self {
            Piece::O => RotationCount::One,
            Piece::Z | Piece::S | Piece::I => RotationCount::Two,
            Piece::T | Piece::J | Piece::L => RotationCount::Four,
        }
    }

    /// Cell offsets for this piece at the given rotation index.
    /// Returns 4 (row, col) offsets relative to the piece anchor.
    pub fn minos(self, rot: usize) -> [(i8, i8); 4] {
        match self {
            Piece::T => [
                [(-1, 0), (0, -1), (0, 0), (0, 1)], // stem up
                [(-1, 0), (0, 0), (0, 1), (1, 0)],  // stem right
                [(0, -1), (0, 0), (0, 1), (1, 0)],  // stem down
                [(-1, 0), (0, -1), (0, 0), (1, 0)], // stem left
            ][rot],
            Piece::J => [
                [(-1, 0), (0, 0), (1, -1), (1, 0)],
                [(-1, -1), (0, -1), (0, 0), (0, 1)],
                [(-1, 0), (-1, 1), (0, 0), (1, 0)],
                [(0, -1), (0, 0), (0, 1), (1, 1)],
            ][rot],
            Piece::Z => [
                [(0, -1), (0, 0), (1, 0), (1, 1)],
                [(-1, 1), (0, 0), (0, 1), (1, 0)],
            ][rot],
            Piece::O => [(0, -1), (0, 0), (1, -1), (1, 0)],
            Piece::S => [
                [(0, 0), (0, 1), (1, -1), (1, 0)],
                [(-1, 0), (0, 0), (0, 1), (1, 1)],
            ][rot],
            Piece::L => [
                [(-1, 0), (0, 0), (1, 0), (1, 1)],
                [(0, -1), (0, 0), (0, 1), (1, -1)],
                [(-1, -1), (-1, 0), (0, 0), (1, 0)],
                [(-1, 1), (0, -1), (0, 0), (0, 1)],
            ][rot],
            Piece::I => [
                [(0, -2), (0, -1), (0, 0), (0, 1)],
                [(-2, 0), (-1, 0), (0, 0), (1, 0)],
            ][rot],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_counts() {
        assert_eq!(Piece::O.rotation_count(), RotationCount::One);
        assert_eq!(Piece::I.rotation_count(), RotationCount::Two);
        assert_eq!(Piece::S.rotation_count(), RotationCount::Two);
        assert_eq!(Piece::Z.rotation_count(), RotationCount::Two);
        assert_eq!(Piece::T.rotation_count(), RotationCount::Four);
        assert_eq!(Piece::J.rotation_count(), RotationCount::Four);
        assert_eq!(Piece::L.rotation_count(), RotationCount::Four);
    }

    #[test]
    fn test_rotation_count_from_len() {
        assert_eq!(RotationCount::from_len(1), Some(RotationCount::One));
        assert_eq!(RotationCount::from_len(2), Some(RotationCount::Two));
        assert_eq!(RotationCount::from_len(4), Some(RotationCount::Four));
        assert_eq!(RotationCount::from_len(3), None);
        assert_eq!(RotationCount::from_len(0), None);
    }

    #[test]
    fn test_minos_are_distinct_cells() {
        for piece in Piece::ALL {
            for rot in 0..piece.rotation_count().as_usize() {
                let m = piece.minos(rot);
                for i in 0..4 {
                    for j in i + 1..4 {
                        assert_ne!(m[i], m[j], "{piece:?} rot {rot}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_t_spawn_orientation() {
        let m = Piece::T.minos(0);
        assert!(m.contains(&(0, -1)));
        assert!(m.contains(&(0, 0)));
        assert!(m.contains(&(0, 1)));
        assert!(m.contains(&(-1, 0))); // stem points up
    }

    #[test]
    fn test_i_spawn_is_horizontal() {
        assert!(Piece::I.minos(0).iter().all(|&(dr, _)| dr == 0));
        assert!(Piece::I.minos(1).iter().all(|&(_, dc)| dc == 0));
    }
}
