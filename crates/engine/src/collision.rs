//! Per-rotation collision boards - single bitcheck instead of 4 mino lookups.
//!
//! Built once per (field, piece) via column-shift accumulation. Bit (r, c) of
//! board `rot` is set iff the piece anchored there overlaps a filled cell,
//! crosses a side wall, or extends past the floor. Cells above the top row do
//! not collide; vertical orientations may hang off the top of the board.

use famistack_core::{Board, Piece, RotationCount};

/// Rotation board array consumed by the search kernel.
#[derive(Clone, Copy, Debug)]
pub struct CollisionBoards {
    boards: [Board; 4],
    rotations: RotationCount,
}

impl CollisionBoards {
    pub fn new(field: &Board, piece: Piece) -> Self {
        let rotations = piece.rotation_count();
        let mut boards = [Board::new(); 4];

        for (rot, board) in boards.iter_mut().enumerate().take(rotations.as_usize()) {
            for col in 0..Board::WIDTH {
                let mut blocked = 0u32;
                for &(dr, dc) in &piece.minos(rot) {
                    let (dr, dc) = (dr as i32, dc as i32);
                    let c = col as i32 + dc;
                    if c < 0 || c >= Board::WIDTH as i32 {
                        blocked = Board::COLUMN_MASK;
                        break;
                    }
                    let occupied = field.column(c as usize);
                    if dr >= 0 {
                        // bit r of (occupied >> dr) is cell (r + dr, c)
                        blocked |= occupied >> dr;
                        if dr > 0 {
                            // anchor rows whose cell falls past the floor
                            blocked |= Board::COLUMN_MASK << (Board::HEIGHT as i32 - dr);
                        }
                    } else {
                        // cells shifted above row 0 drop out: open air
                        blocked |= occupied << -dr;
                    }
                }
                board.set_column(col, blocked);
            }
        }

        Self { boards, rotations }
    }

    #[inline(always)]
    pub fn rotations(&self) -> RotationCount {
        self.rotations
    }

    /// The per-rotation boards, one per distinct orientation.
    #[inline(always)]
    pub fn as_slice(&self) -> &[Board] {
        &self.boards[..self.rotations.as_usize()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_t_piece() {
        let field = Board::new();
        let cb = CollisionBoards::new(&field, Piece::T);
        let b = cb.as_slice();

        // stem-up T fits everywhere with side room, including the top row
        assert!(!b[0].get(0, 5));
        assert!(!b[0].get(19, 5));
        // side walls
        assert!(b[0].get(10, 0));
        assert!(b[0].get(10, 9));
        // stem-down T extends one row below its anchor
        assert!(b[2].get(19, 5));
        assert!(!b[2].get(18, 5));
    }

    #[test]
    fn test_filled_cell_blocks() {
        let mut field = Board::new();
        field.set(10, 5, true);
        let cb = CollisionBoards::new(&field, Piece::T);
        let b = cb.as_slice();

        // any anchor whose cells cover (10, 5) collides
        assert!(b[0].get(10, 4));
        assert!(b[0].get(10, 5));
        assert!(b[0].get(10, 6));
        assert!(b[0].get(11, 5)); // stem up from row 11 hits it
        assert!(!b[0].get(12, 5));
    }

    #[test]
    fn test_vertical_i_hangs_off_top() {
        let field = Board::new();
        let cb = CollisionBoards::new(&field, Piece::I);
        let b = cb.as_slice();

        // vertical I at row 0 has two cells above the board: allowed
        assert!(!b[1].get(0, 5));
        assert!(!b[1].get(18, 5));
        assert!(b[1].get(19, 5)); // cell (20, 5) is past the floor
        // horizontal I needs columns c-2..c+1
        assert!(b[0].get(5, 1));
        assert!(!b[0].get(5, 2));
        assert!(!b[0].get(5, 8));
        assert!(b[0].get(5, 9));
    }

    #[test]
    fn test_rotation_count_slices() {
        let field = Board::new();
        assert_eq!(CollisionBoards::new(&field, Piece::O).as_slice().len(), 1);
        assert_eq!(CollisionBoards::new(&field, Piece::S).as_slice().len(), 2);
        assert_eq!(CollisionBoards::new(&field, Piece::L).as_slice().len(), 4);
    }
}
