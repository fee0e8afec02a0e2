//! Tap-speed profiles.
//!
//! A schedule holds the cumulative frame index of the 1st..10th tap.
//! `frame(k)` is the frame the (k+1)-th tap lands on; `frame(k - 1)` is the
//! last frame before that tap applies. Built from ten deltas where the first
//! may be 0 and every later delta is at least 2 (the controller cannot
//! register two presses on adjacent frames).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct TapSchedule {
    cumulative: [i32; 10],
}

impl TapSchedule {
    /// 30 Hz: a tap every 2 frames.
    pub const TAP_30_HZ: TapSchedule = Self::preset([0, 2, 2, 2, 2, 2, 2, 2, 2, 2]);
    /// 20 Hz: a tap every 3 frames.
    pub const TAP_20_HZ: TapSchedule = Self::preset([0, 3, 3, 3, 3, 3, 3, 3, 3, 3]);
    /// 15 Hz: a tap every 4 frames.
    pub const TAP_15_HZ: TapSchedule = Self::preset([0, 4, 4, 4, 4, 4, 4, 4, 4, 4]);
    /// 12 Hz: a tap every 5 frames.
    pub const TAP_12_HZ: TapSchedule = Self::preset([0, 5, 5, 5, 5, 5, 5, 5, 5, 5]);

    const fn preset(deltas: [i32; 10]) -> TapSchedule {
        match Self::from_deltas(deltas) {
            Ok(taps) => taps,
            Err(_) => unreachable!(),
        }
    }

    /// Validate deltas and accumulate them into tap frames.
    pub const fn from_deltas(deltas: [i32; 10]) -> Result<TapSchedule, Error> {
        if deltas[0] < 0 {
            return Err(Error::InvalidTapSchedule {
                index: 0,
                delta: deltas[0],
            });
        }
        let mut i = 1;
        while i < 10 {
            if deltas[i] < 2 {
                return Err(Error::InvalidTapSchedule {
                    index: i,
                    delta: deltas[i],
                });
            }
            i += 1;
        }
        let mut cumulative = deltas;
        let mut i = 1;
        while i < 10 {
            cumulative[i] += cumulative[i - 1];
            i += 1;
        }
        Ok(TapSchedule { cumulative })
    }

    /// Frame index of the (tap+1)-th tap.
    #[inline(always)]
    pub const fn frame(&self, tap: usize) -> i32 {
        self.cumulative[tap]
    }
}

impl<'de> Deserialize<'de> for TapSchedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cumulative = <[i32; 10]>::deserialize(deserializer)?;
        let mut deltas = cumulative;
        for i in (1..10).rev() {
            deltas[i] -= deltas[i - 1];
        }
        TapSchedule::from_deltas(deltas).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_accumulate() {
        let t = TapSchedule::TAP_30_HZ;
        assert_eq!(t.frame(0), 0);
        assert_eq!(t.frame(1), 2);
        assert_eq!(t.frame(9), 18);
        let t = TapSchedule::TAP_12_HZ;
        assert_eq!(t.frame(9), 45);
    }

    #[test]
    fn test_rejects_fast_deltas() {
        let err = TapSchedule::from_deltas([0, 2, 2, 1, 2, 2, 2, 2, 2, 2]).unwrap_err();
        assert_eq!(err, Error::InvalidTapSchedule { index: 3, delta: 1 });
    }

    #[test]
    fn test_rejects_negative_first_delta() {
        let err = TapSchedule::from_deltas([-1, 2, 2, 2, 2, 2, 2, 2, 2, 2]).unwrap_err();
        assert_eq!(err, Error::InvalidTapSchedule { index: 0, delta: -1 });
    }

    #[test]
    fn test_first_delta_may_be_slow() {
        let t = TapSchedule::from_deltas([5, 2, 2, 2, 2, 2, 2, 2, 2, 2]).unwrap();
        assert_eq!(t.frame(0), 5);
        assert_eq!(t.frame(1), 7);
    }

    #[test]
    fn test_serde_round_trip_revalidates() {
        let t = TapSchedule::TAP_20_HZ;
        let json = serde_json::to_string(&t).unwrap();
        let back: TapSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
        // a hand-built cumulative array with a 1-frame gap must be rejected
        let bad = "[0,2,3,5,7,9,11,13,15,17]";
        assert!(serde_json::from_str::<TapSchedule>(bad).is_err());
    }
}
