//! famistack-engine - frame-accurate NES Tetris move-search kernel.
//!
//! Given a playfield, a piece kind, a gravity level and a tap-speed profile,
//! enumerates every placement the piece can reach before it locks, split into
//! placements reachable with no input after the adjustment frame and
//! placements reachable only through a late adjustment.

pub mod batch;
pub mod cache;
pub mod collision;
pub mod config;
pub mod error;
pub mod frames;
pub mod gravity;
pub mod move_list;
pub mod phase1;
pub mod search;
pub mod taps;
pub mod tuck;

pub use batch::move_search_batch;
pub use cache::tables_for;
pub use collision::CollisionBoards;
pub use config::SearchConfig;
pub use error::Error;
pub use gravity::Level;
pub use search::{move_search, search_rotation_boards, Adjustment, PossibleMoves};
pub use taps::TapSchedule;
