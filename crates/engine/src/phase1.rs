//! Reachability tables for the tap phase.
//!
//! Each table entry is a tap-sequence prefix ending at a (rot, col) pair:
//! `num_taps` taps are needed, the last landing on frame
//! `taps[num_taps - 1]`, and the entry extends the earlier entry `prev`.
//! `masks` holds every cell that must be free for the piece to traverse the
//! final segment, drop cells included; `masks_nodrop` is the subset needed
//! merely to arrive (used when the segment cannot be completed because the
//! piece bottoms out first). Entries are emitted in BFS order so `prev`
//! always refers to an earlier index and one forward sweep propagates
//! reachability.

use famistack_core::{Board, Position};

use crate::gravity::Level;
use crate::taps::TapSchedule;

pub(crate) const TAP_A: u8 = 0x1;
pub(crate) const TAP_B: u8 = 0x2;
pub(crate) const TAP_L: u8 = 0x4;
pub(crate) const TAP_R: u8 = 0x8;

/// Rotations needed for a rotation delta of 0..3 (B reaches 3 in one tap).
const NUM_AB: [i32; 4] = [0, 1, 2, 1];

#[derive(Clone, Copy, Debug)]
pub struct TableEntry {
    pub rot: u8,
    pub col: u8,
    pub prev: u8,
    pub num_taps: u8,
    /// The piece bottoms out before the next input frame; `masks` is not
    /// meaningful and the entry cannot be extended.
    pub cannot_finish: bool,
    pub masks: [Board; 4],
    pub masks_nodrop: [Board; 4],
}

/// One adjustment sub-table, seeded at an initial-table entry.
#[derive(Clone, Debug)]
pub struct AdjTable {
    /// Frame the adjustment search starts on.
    pub initial_frame: i32,
    pub entries: Vec<TableEntry>,
}

/// The initial table plus one adjustment table per initial entry, for a
/// fixed (level, rotation count, adjustment frame, tap schedule).
#[derive(Clone, Debug)]
pub struct SearchTables {
    pub level: Level,
    pub rotations: usize,
    pub adj_frame: i32,
    pub taps: TapSchedule,
    pub initial: Vec<TableEntry>,
    pub adj: Vec<AdjTable>,
}

impl SearchTables {
    pub fn build(level: Level, rotations: usize, adj_frame: i32, taps: TapSchedule) -> Self {
        let start_col = Position::START.col as i32;
        let initial = generate(level, taps, rotations, 0, 0, start_col);
        let adj = initial
            .iter()
            .map(|entry| {
                let initial_frame = adj_frame.max(taps.frame(entry.num_taps as usize));
                AdjTable {
                    initial_frame,
                    entries: generate(
                        level,
                        taps,
                        rotations,
                        initial_frame,
                        entry.rot as usize,
                        entry.col as i32,
                    ),
                }
            })
            .collect();
        Self {
            level,
            rotations,
            adj_frame,
            taps,
            initial,
            adj,
        }
    }
}

/// Generate the reachable (rot, col) prefixes from one seed position.
pub(crate) fn generate(
    level: Level,
    taps: TapSchedule,
    r: usize,
    initial_frame: i32,
    initial_rot: usize,
    initial_col: i32,
) -> Vec<TableEntry> {
    debug_assert!(r == 1 || r == 2 || r == 4);

    let mut masks = [[[Board::new(); 4]; 10]; 4];
    let mut masks_nodrop = [[[Board::new(); 4]; 10]; 4];
    let mut last_tap = [[0u8; 10]; 4];
    let mut cannot_reach = [[false; 10]; 4];
    let mut cannot_finish = [[false; 10]; 4];

    for col in 0..10i32 {
        for delta_rot in 0..4usize {
            // the piece ends up at column `col`, rotation initial + delta
            if r == 1 && delta_rot != 0 {
                continue;
            }
            if r == 2 && delta_rot >= 2 {
                continue;
            }
            let rot = (initial_rot + delta_rot) % r;
            let c = col as usize;
            let num_lr = (col - initial_col).abs();
            let num_ab = NUM_AB[delta_rot];
            let num_tap = num_lr.max(num_ab);
            // the frame this tap occurred; initial_frame if no input
            let last_tap_frame = if num_tap == 0 { 0 } else { taps.frame(num_tap as usize - 1) };
            let start_frame = last_tap_frame + initial_frame;
            // the frame the next input is allowed
            let end_frame = taps.frame(num_tap as usize) + initial_frame;
            if num_tap > 0 {
                if num_tap == num_lr {
                    last_tap[rot][c] |= if col > initial_col { TAP_R } else { TAP_L };
                }
                if num_tap == num_ab {
                    last_tap[rot][c] |= if delta_rot == 3 { TAP_B } else { TAP_A };
                }
            }
            let start_row = level.row_of_frame(start_frame);
            if start_row >= 20 {
                cannot_reach[rot][c] = true;
                continue;
            }
            // the position just before this tap: shift first, then rotate
            let start_col = if num_tap == num_lr {
                col - (col - initial_col).signum()
            } else {
                col
            };
            let start_rot = if num_tap == num_ab {
                (if delta_rot == 2 { 1 } else { 0 } + initial_rot) % r
            } else {
                rot
            };
            let mut m = [Board::new(); 4];
            m[start_rot].set(start_row as usize, start_col as usize, true);
            m[start_rot].set(start_row as usize, c, true);
            m[rot].set(start_row as usize, c, true);
            masks_nodrop[rot][c] = m;
            if level.row_of_frame(end_frame) >= 20 {
                cannot_finish[rot][c] = true;
                masks[rot][c] = m;
                continue;
            }
            for frame in start_frame..end_frame {
                let row = level.row_of_frame(frame);
                m[rot].set(row as usize, c, true);
                if level.is_drop_frame(frame) {
                    let drops = level.drops_per_frame();
                    if row + drops > 19 {
                        // gravity would push the piece through the floor
                        // mid-segment; it locks before the next input frame
                        cannot_finish[rot][c] = true;
                        break;
                    }
                    for d in 1..=drops {
                        m[rot].set((row + d) as usize, c, true);
                    }
                }
            }
            masks[rot][c] = m;
        }
    }

    // emit entries in ascending tap count, seeded at the start square
    let make = |rot: usize, col: i32, prev: usize, num_taps: u8| -> Option<TableEntry> {
        let c = col as usize;
        if cannot_reach[rot][c] {
            return None;
        }
        Some(TableEntry {
            rot: rot as u8,
            col: col as u8,
            prev: prev as u8,
            num_taps,
            cannot_finish: cannot_finish[rot][c],
            masks: masks[rot][c],
            masks_nodrop: masks_nodrop[rot][c],
        })
    };

    let mut entries = Vec::with_capacity(10 * r);
    let mut seen = [[false; 10]; 4];
    let mut push = |entries: &mut Vec<TableEntry>, rot: usize, col: i32, prev: usize, taps: u8| {
        if let Some(entry) = make(rot, col, prev, taps) {
            debug_assert!(!seen[rot][col as usize], "duplicate table entry");
            seen[rot][col as usize] = true;
            entries.push(entry);
        }
    };

    push(&mut entries, initial_rot, initial_col, 0, 0);
    let mut cur = 0;
    while cur < entries.len() {
        let (rot, col, ntaps) = {
            let e = &entries[cur];
            (e.rot as usize, e.col as i32, e.num_taps)
        };
        let last = last_tap[rot][col as usize];
        let should_l = col > 0 && (ntaps == 0 || last & TAP_L != 0);
        let should_r = col < 9 && (ntaps == 0 || last & TAP_R != 0);
        let should_a = (r > 1 && ntaps == 0) || (r == 4 && ntaps == 1 && last & TAP_A != 0);
        let should_b = r == 4 && ntaps == 0;
        if should_l {
            push(&mut entries, rot, col - 1, cur, ntaps + 1);
        }
        if should_r {
            push(&mut entries, rot, col + 1, cur, ntaps + 1);
        }
        if should_a {
            let nrot = (rot + 1) % r;
            push(&mut entries, nrot, col, cur, ntaps + 1);
            if should_l {
                push(&mut entries, nrot, col - 1, cur, ntaps + 1);
            }
            if should_r {
                push(&mut entries, nrot, col + 1, cur, ntaps + 1);
            }
        }
        if should_b {
            let nrot = (rot + 3) % r;
            push(&mut entries, nrot, col, cur, ntaps + 1);
            if should_l {
                push(&mut entries, nrot, col - 1, cur, ntaps + 1);
            }
            if should_r {
                push(&mut entries, nrot, col + 1, cur, ntaps + 1);
            }
        }
        cur += 1;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initial_l18() -> Vec<TableEntry> {
        generate(Level::L18, TapSchedule::TAP_30_HZ, 4, 0, 0, 5)
    }

    #[test]
    fn test_root_entry() {
        let entries = initial_l18();
        let root = &entries[0];
        assert_eq!((root.rot, root.col, root.prev, root.num_taps), (0, 5, 0, 0));
        assert!(!root.cannot_finish);
    }

    #[test]
    fn test_covers_every_rot_col_at_slow_gravity() {
        let entries = initial_l18();
        assert_eq!(entries.len(), 40);
        let mut seen = [[false; 10]; 4];
        for e in &entries {
            assert!(!seen[e.rot as usize][e.col as usize]);
            seen[e.rot as usize][e.col as usize] = true;
        }
    }

    #[test]
    fn test_bfs_order() {
        for r in [1usize, 2, 4] {
            let entries = generate(Level::L18, TapSchedule::TAP_30_HZ, r, 0, 0, 5);
            for (i, e) in entries.iter().enumerate() {
                assert!((e.prev as usize) < i.max(1));
                if i > 0 {
                    assert_eq!(e.num_taps, entries[e.prev as usize].num_taps + 1);
                }
            }
        }
    }

    #[test]
    fn test_nodrop_masks_are_subsets() {
        for level in Level::ALL {
            let entries = generate(level, TapSchedule::TAP_30_HZ, 4, 0, 0, 5);
            for e in &entries {
                for rot in 0..4 {
                    for col in 0..10 {
                        let nd = e.masks_nodrop[rot].column(col);
                        let full = e.masks[rot].column(col);
                        if !e.cannot_finish {
                            assert_eq!(nd & full, nd);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_single_rotation_piece_never_rotates() {
        let entries = generate(Level::L29, TapSchedule::TAP_30_HZ, 1, 0, 0, 5);
        assert!(entries.iter().all(|e| e.rot == 0));
        // pure left/right chains from column 5
        assert_eq!(entries.len(), 10);
    }

    #[test]
    fn test_l39_deep_taps_cannot_finish() {
        let entries = generate(Level::L39, TapSchedule::TAP_30_HZ, 4, 0, 0, 5);
        for e in &entries {
            // the 5th tap lands on frame 8 (row 16); its segment would end
            // past the floor
            assert!(e.num_taps <= 5);
            if e.num_taps == 5 {
                assert!(e.cannot_finish);
            }
        }
    }

    #[test]
    fn test_adjustment_tables_built_per_entry() {
        let tables = SearchTables::build(Level::L29, 4, 18, TapSchedule::TAP_30_HZ);
        assert_eq!(tables.adj.len(), tables.initial.len());
        for (entry, adj) in tables.initial.iter().zip(&tables.adj) {
            let expected = 18.max(tables.taps.frame(entry.num_taps as usize));
            assert_eq!(adj.initial_frame, expected);
            if let Some(root) = adj.entries.first() {
                assert_eq!((root.rot, root.col), (entry.rot, entry.col));
            }
        }
    }
}
