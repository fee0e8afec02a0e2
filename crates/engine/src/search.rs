//! Phase-1/phase-2 runners and the search driver.
//!
//! Drop sequence of one call:
//!
//! ```text
//! initial phase 1           adjustment phase 1
//! vvvvvvvvvvv                 vvvvvvv
//! L - L - L - - - - - - - - - R - R - - - - - - -<lock>
//!               \             ^ adj_frame   \
//!                \A R - - -<lock>            \B R - - -<lock>
//!                 ^^^^                        ^^^^
//!                initial phase 2 (tuck)      adjustment phase 2
//! ```
//!
//! The initial pass runs up to the adjustment frame; entries still airborne
//! there become anchors, and one adjustment pass per surviving anchor runs to
//! the bottom of the board.

use famistack_core::{Board, Piece, Position, RotationCount};
use serde::{Deserialize, Serialize};

use crate::cache;
use crate::collision::CollisionBoards;
use crate::config::SearchConfig;
use crate::error::Error;
use crate::frames::{
    column_to_drop_mask, column_to_frame_mask, find_lock_row, frames_to_column, Column,
    FrameMasks, Frames,
};
use crate::gravity::Level;
use crate::move_list::PositionList;
use crate::phase1::{SearchTables, TableEntry};
use crate::tuck::{build_tuck_masks, TuckMaskTable, TuckTypes};

/// Moves reachable from one adjustment anchor.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Adjustment {
    /// Where the piece sits on the adjustment frame.
    pub anchor: Position,
    pub moves: Vec<Position>,
}

/// The result of one search call: placements needing no input after the
/// adjustment frame, plus the per-anchor adjustment move sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossibleMoves {
    pub non_adj: Vec<Position>,
    pub adj: Vec<Adjustment>,
}

impl PossibleMoves {
    /// Sort and dedup both lists; adjustment entries order by anchor.
    pub fn normalize(&mut self) {
        self.non_adj.sort_unstable();
        self.non_adj.dedup();
        for adj in &mut self.adj {
            adj.moves.sort_unstable();
            adj.moves.dedup();
        }
        self.adj.sort_unstable_by_key(|adj| adj.anchor);
    }

    /// Every placement in the result, anchors' move sets included.
    pub fn iter_all(&self) -> impl Iterator<Item = Position> + '_ {
        self.non_adj
            .iter()
            .copied()
            .chain(self.adj.iter().flat_map(|adj| adj.moves.iter().copied()))
    }
}

/// Search a playfield for every placement `piece` can reach.
pub fn move_search(field: &Board, piece: Piece, config: &SearchConfig) -> PossibleMoves {
    let boards = CollisionBoards::new(field, piece);
    let tables = cache::tables_for(config, boards.rotations());
    run_search(&tables, boards.as_slice())
}

/// Search from caller-built rotation boards (one collision board per
/// orientation). The slice length selects the rotation count.
pub fn search_rotation_boards(
    boards: &[Board],
    config: &SearchConfig,
) -> Result<PossibleMoves, Error> {
    let rotations = RotationCount::from_len(boards.len())
        .ok_or(Error::InvalidRotationCount(boards.len()))?;
    let tables = cache::tables_for(config, rotations);
    Ok(run_search(&tables, boards))
}

/// True iff every must-be-free cell in `masks` is clear on `boards`.
#[inline(always)]
fn fits(boards: &[Board], masks: &[Board; 4]) -> bool {
    boards.iter().zip(masks).all(|(board, mask)| board.disjoint(mask))
}

pub(crate) fn run_search(tables: &SearchTables, boards: &[Board]) -> PossibleMoves {
    let r = tables.rotations;
    let level = tables.level;
    debug_assert_eq!(boards.len(), r);

    let mut cols: [[Column; 10]; 4] = [[0; 10]; 4];
    let mut frame_masks = FrameMasks::default();
    for rot in 0..r {
        for col in 0..10 {
            let free = !boards[rot].column(col) & Board::COLUMN_MASK;
            cols[rot][col] = free;
            frame_masks.frame[rot][col] = column_to_frame_mask(level, free);
            frame_masks.drop[rot][col] = column_to_drop_mask(level, free);
        }
    }
    let tuck_types = TuckTypes::for_rotations(r);
    let tuck_masks = build_tuck_masks(&frame_masks, r);

    let mut can_adj = vec![false; tables.initial.len()];
    let mut buf = PositionList::new();
    do_one_search(
        tables,
        &tables.initial,
        0,
        false,
        boards,
        &cols,
        &tuck_types,
        &tuck_masks,
        &mut can_adj,
        &mut buf,
    );

    let mut ret = PossibleMoves {
        non_adj: buf.to_vec(),
        adj: Vec::new(),
    };
    for (i, entry) in tables.initial.iter().enumerate() {
        if !can_adj[i] {
            continue;
        }
        let adj_table = &tables.adj[i];
        if adj_table.initial_frame >= level.total_frames() {
            continue;
        }
        buf.clear();
        do_one_search(
            tables,
            &adj_table.entries,
            adj_table.initial_frame,
            true,
            boards,
            &cols,
            &tuck_types,
            &tuck_masks,
            &mut can_adj,
            &mut buf,
        );
        if !buf.is_empty() {
            let row = level.row_of_frame(adj_table.initial_frame) as u8;
            ret.adj.push(Adjustment {
                anchor: Position::new(entry.rot, row, entry.col),
                moves: buf.to_vec(),
            });
        }
    }
    ret.normalize();
    ret
}

/// One phase-1 sweep plus its phase-2 tuck pass.
#[allow(clippy::too_many_arguments)]
fn do_one_search(
    tables: &SearchTables,
    entries: &[TableEntry],
    initial_frame: i32,
    is_adj: bool,
    boards: &[Board],
    cols: &[[Column; 10]; 4],
    tuck_types: &TuckTypes,
    tuck_masks: &TuckMaskTable,
    can_adj: &mut [bool],
    out: &mut PositionList,
) {
    let level = tables.level;
    let taps = &tables.taps;
    let total_frames = level.total_frames();
    if initial_frame >= total_frames || entries.is_empty() {
        return;
    }

    let mut can_continue = [false; 40];
    let mut can_tuck: [[Frames; 10]; 4] = [[0; 10]; 4];
    let mut no_tuck_locks: [[Column; 10]; 4] = [[0; 10]; 4];
    let mut phase2_possible = false;

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 && !can_continue[entry.prev as usize] {
            continue;
        }
        if !entry.cannot_finish && fits(boards, &entry.masks) {
            can_continue[i] = true;
        } else if !fits(boards, &entry.masks_nodrop) {
            continue;
        }
        let (rot, col) = (entry.rot as usize, entry.col as usize);
        let num_taps = entry.num_taps as usize;
        let start_frame = if num_taps == 0 {
            initial_frame
        } else {
            taps.frame(num_taps - 1) + initial_frame
        };
        let start_row = level.row_of_frame(start_frame);
        // masks_nodrop held, so the free column has a bit at start_row
        let lock_row = find_lock_row(cols[rot][col], start_row);
        let lock_frame = level.last_frame_on_row(lock_row) + 1;
        let end_frame = if is_adj {
            total_frames
        } else {
            tables.adj_frame.max(taps.frame(num_taps))
        };
        if !is_adj && lock_frame > end_frame {
            // still airborne at the adjustment frame: defer to an
            // adjustment search instead of emitting here
            can_adj[i] = true;
        } else {
            out.push(Position::new(entry.rot, lock_row as u8, entry.col));
        }
        no_tuck_locks[rot][col] |= 1 << lock_row;
        let first_tuck_frame = initial_frame + taps.frame(num_taps);
        let last_tuck_frame = lock_frame.min(end_frame);
        if last_tuck_frame > first_tuck_frame {
            can_tuck[rot][col] = (1u64 << last_tuck_frame) - (1u64 << first_tuck_frame);
            phase2_possible = true;
        }
    }

    if phase2_possible {
        run_phase2(
            level,
            tables.rotations,
            tuck_types,
            tuck_masks,
            cols,
            &no_tuck_locks,
            &can_tuck,
            out,
        );
    }
}

/// Propagate the tuck windows through the tuck-type table and emit the new
/// resting positions.
#[allow(clippy::too_many_arguments)]
fn run_phase2(
    level: Level,
    r: usize,
    tuck_types: &TuckTypes,
    tuck_masks: &TuckMaskTable,
    cols: &[[Column; 10]; 4],
    no_tuck_locks: &[[Column; 10]; 4],
    can_tuck: &[[Frames; 10]; 4],
    out: &mut PositionList,
) {
    let mut tuck_result: [[Frames; 10]; 4] = [[0; 10]; 4];
    for (i, tuck) in tuck_types.as_slice().iter().enumerate() {
        let start_col = 0.max(-tuck.delta_col) as usize;
        let end_col = 10.min(10 - tuck.delta_col) as usize;
        for rot in 0..r {
            let nrot = (rot + tuck.delta_rot) % r;
            for col in start_col..end_col {
                let fired = tuck_masks[i][rot][col] & can_tuck[rot][col];
                tuck_result[nrot][(col as i32 + tuck.delta_col) as usize] |=
                    fired << tuck.delta_frame;
            }
        }
    }
    for rot in 0..r {
        for col in 0..10 {
            let post = frames_to_column(level, tuck_result[rot][col]);
            let cur = cols[rot][col];
            // carry each airborne bit down to the bottom of its free run,
            // keep only run bottoms, drop rows already locked without a tuck
            let mut locks =
                (post + cur) >> 1 & (cur & !(cur >> 1)) & !no_tuck_locks[rot][col];
            while locks != 0 {
                let row = locks.trailing_zeros() as u8;
                out.push(Position::new(rot as u8, row, col as u8));
                locks &= locks - 1;
            }
        }
    }
}
