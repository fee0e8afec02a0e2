//! Column <-> frame-mask codec.
//!
//! A `Column` is a 20-bit free-cell mask (bit r = the piece fits on row r,
//! LSB = top row). A `Frames` value is the same information indexed by frame:
//! bit f = the piece fits on the row it occupies during frame f. The drop
//! variant marks frames whose gravity pull the piece survives; it only
//! differs from `normal & normal >> 1` at level 39, where gravity moves two
//! rows per frame.
//!
//! The expansions are pdep/pext by the per-level stride masks
//! (0x249... for 3 frames per row, 0x555... for 2), lowered portably as
//! magic-mask Morton spread/gather sequences.

use crate::gravity::Level;

pub type Column = u32;
pub type Frames = u64;

/// Per-(rotation, column) frame masks for one search call.
#[derive(Clone, Copy, Default)]
pub struct FrameMasks {
    pub frame: [[Frames; 10]; 4],
    pub drop: [[Frames; 10]; 4],
}

/// Spread bit i to bit 2i (pdep by 0x5555555555555555).
const fn spread2(x: u64) -> u64 {
    let mut x = x & 0xFFFF_FFFF;
    x = (x | x << 16) & 0x0000_FFFF_0000_FFFF;
    x = (x | x << 8) & 0x00FF_00FF_00FF_00FF;
    x = (x | x << 4) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | x << 2) & 0x3333_3333_3333_3333;
    x = (x | x << 1) & 0x5555_5555_5555_5555;
    x
}

/// Gather bit 2i to bit i (pext by 0x5555555555555555).
const fn gather2(x: u64) -> u64 {
    let mut x = x & 0x5555_5555_5555_5555;
    x = (x ^ (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x ^ (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x ^ (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x ^ (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    x = (x ^ (x >> 16)) & 0x0000_0000_FFFF_FFFF;
    x
}

/// Spread bit i to bit 3i (pdep by 0x1249249249249249).
const fn spread3(x: u64) -> u64 {
    let mut x = x & 0x1F_FFFF;
    x = (x | x << 32) & 0x001F_0000_0000_FFFF;
    x = (x | x << 16) & 0x001F_0000_FF00_00FF;
    x = (x | x << 8) & 0x100F_00F0_0F00_F00F;
    x = (x | x << 4) & 0x10C3_0C30_C30C_30C3;
    x = (x | x << 2) & 0x1249_2492_4924_9249;
    x
}

/// Gather bit 3i to bit i (pext by 0x1249249249249249).
const fn gather3(x: u64) -> u64 {
    let mut x = x & 0x1249_2492_4924_9249;
    x = (x ^ (x >> 2)) & 0x10C3_0C30_C30C_30C3;
    x = (x ^ (x >> 4)) & 0x100F_00F0_0F00_F00F;
    x = (x ^ (x >> 8)) & 0x001F_0000_FF00_00FF;
    x = (x ^ (x >> 16)) & 0x001F_0000_0000_FFFF;
    x = (x ^ (x >> 32)) & 0x001F_FFFF;
    x
}

/// Expand a free column into its per-frame mask.
pub const fn column_to_frame_mask(level: Level, col: Column) -> Frames {
    match level {
        Level::L18 => {
            let expanded = spread3(col as u64);
            expanded | expanded << 1 | expanded << 2
        }
        Level::L19 => {
            let expanded = spread2(col as u64);
            expanded | expanded << 1
        }
        Level::L29 => col as u64,
        Level::L39 => gather2(col as u64),
    }
}

/// Frames on which the piece both fits and survives the gravity pull.
pub const fn column_to_drop_mask(level: Level, col: Column) -> Frames {
    match level {
        Level::L18 | Level::L19 | Level::L29 => {
            let mask = column_to_frame_mask(level, col);
            mask & mask >> 1
        }
        // two rows per frame: rows 2f, 2f+1 and 2f+2 must all be free
        Level::L39 => gather2((col & col >> 1 & col >> 2) as u64),
    }
}

/// Inverse of `column_to_frame_mask`: OR-reduce all frames on each row.
pub const fn frames_to_column(level: Level, frames: Frames) -> Column {
    match level {
        Level::L18 => gather3(frames | frames >> 1 | frames >> 2) as u32,
        Level::L19 => gather2(frames | frames >> 1) as u32,
        Level::L29 => (frames & 0xF_FFFF) as u32,
        Level::L39 => spread2(frames) as u32,
    }
}

/// Highest row the piece can drop to from `start_row` in a free column.
///
/// Requires bit `start_row` of `free` set. Adding 1 << start_row carries
/// through the run of free rows below; the XOR isolates the run plus the
/// first blocked bit, whose position minus one is the lock row. Bits at and
/// above 20 are clear, so the floor terminates the run automatically.
#[inline(always)]
pub const fn find_lock_row(free: Column, start_row: i32) -> i32 {
    let x = free ^ free.wrapping_add(1 << start_row);
    31 - x.leading_zeros() as i32 - 1
}
