//! Gravity timing per NES level band.
//!
//! Levels 18, 19-28, 29-38 and 39+ drop every 3rd, 2nd, every, and every
//! frame (two rows) respectively. All functions are level-indexed constants;
//! a frame mapping to row >= 20 means the piece is off the bottom of the
//! board.

use serde::{Deserialize, Serialize};

/// Gravity level band.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Level {
    L18,
    L19,
    L29,
    L39,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::L18, Level::L19, Level::L29, Level::L39];

    /// Row the piece occupies on the given frame, counting from spawn.
    #[inline(always)]
    pub const fn row_of_frame(self, frame: i32) -> i32 {
        match self {
            Level::L18 => frame / 3,
            Level::L19 => frame / 2,
            Level::L29 => frame,
            Level::L39 => frame * 2,
        }
    }

    /// True iff gravity pulls the piece down during this frame.
    #[inline(always)]
    pub const fn is_drop_frame(self, frame: i32) -> bool {
        match self {
            Level::L18 => frame % 3 == 2,
            Level::L19 => frame % 2 == 1,
            Level::L29 | Level::L39 => true,
        }
    }

    /// Rows moved on a drop frame.
    #[inline(always)]
    pub const fn drops_per_frame(self) -> i32 {
        match self {
            Level::L39 => 2,
            _ => 1,
        }
    }

    #[inline(always)]
    pub const fn first_frame_on_row(self, row: i32) -> i32 {
        match self {
            Level::L18 => row * 3,
            Level::L19 => row * 2,
            Level::L29 => row,
            Level::L39 => (row + 1) / 2,
        }
    }

    #[inline(always)]
    pub const fn last_frame_on_row(self, row: i32) -> i32 {
        match self {
            Level::L18 => row * 3 + 2,
            Level::L19 => row * 2 + 1,
            Level::L29 => row,
            Level::L39 => row / 2,
        }
    }

    /// One past the last frame a piece can exist on a 20-row board.
    #[inline(always)]
    pub const fn total_frames(self) -> i32 {
        self.last_frame_on_row(19) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_of_frame() {
        assert_eq!(Level::L18.row_of_frame(8), 2);
        assert_eq!(Level::L19.row_of_frame(8), 4);
        assert_eq!(Level::L29.row_of_frame(8), 8);
        assert_eq!(Level::L39.row_of_frame(8), 16);
    }

    #[test]
    fn test_frame_row_inverses() {
        for level in Level::ALL {
            for row in 0..20 {
                // L39 skips odd rows entirely; its frames land on even rows
                if level == Level::L39 && row % 2 == 1 {
                    continue;
                }
                let first = level.first_frame_on_row(row);
                let last = level.last_frame_on_row(row);
                assert!(first <= last);
                assert_eq!(level.row_of_frame(first), row);
                assert_eq!(level.row_of_frame(last), row);
            }
        }
    }

    #[test]
    fn test_l39_frames_land_on_even_rows() {
        for frame in 0..Level::L39.total_frames() {
            assert_eq!(Level::L39.row_of_frame(frame) % 2, 0);
        }
        assert_eq!(Level::L39.last_frame_on_row(19), Level::L39.last_frame_on_row(18));
    }

    #[test]
    fn test_total_frames() {
        assert_eq!(Level::L18.total_frames(), 60);
        assert_eq!(Level::L19.total_frames(), 40);
        assert_eq!(Level::L29.total_frames(), 20);
        assert_eq!(Level::L39.total_frames(), 10);
    }

    #[test]
    fn test_drop_frames_advance_rows() {
        for level in Level::ALL {
            let mut row = 0;
            for frame in 0..level.total_frames() - 1 {
                if level.is_drop_frame(frame) {
                    row += level.drops_per_frame();
                }
                assert_eq!(level.row_of_frame(frame + 1), row, "{level:?} frame {frame}");
            }
        }
    }
}
