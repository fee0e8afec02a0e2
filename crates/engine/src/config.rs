//! Search profiles.

use serde::{Deserialize, Serialize};

use crate::gravity::Level;
use crate::taps::TapSchedule;

/// Kernel parameters for one search: gravity level, the frame after which a
/// single late adjustment is allowed, and the tap-speed profile. Doubles as
/// the key of the shared table cache.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct SearchConfig {
    pub level: Level,
    pub adj_frame: i32,
    pub taps: TapSchedule,
}

impl SearchConfig {
    pub fn new(level: Level, adj_frame: i32, taps: TapSchedule) -> Self {
        Self {
            level,
            adj_frame,
            taps,
        }
    }

    /// The standard play profile: react 18 frames in, tapping at 30 Hz.
    pub fn reaction_30hz(level: Level) -> Self {
        Self::new(level, 18, TapSchedule::TAP_30_HZ)
    }

    /// No late adjustment: the decision window covers the whole drop, so
    /// every placement lands in `non_adj`.
    pub fn no_adjustment(level: Level, taps: TapSchedule) -> Self {
        Self::new(level, level.total_frames(), taps)
    }
}
