//! Parallel batch front-end.
//!
//! The outer solver calls the kernel on millions of independent boards; the
//! kernel itself is pure, so batching is a plain data-parallel map with the
//! tables shared read-only through the cache.

use famistack_core::{Board, Piece};
use rayon::prelude::*;

use crate::config::SearchConfig;
use crate::search::{move_search, PossibleMoves};

/// Search many (field, piece) pairs in parallel under one profile.
pub fn move_search_batch(items: &[(Board, Piece)], config: &SearchConfig) -> Vec<PossibleMoves> {
    items
        .par_iter()
        .map(|(field, piece)| move_search(field, *piece, config))
        .collect()
}
