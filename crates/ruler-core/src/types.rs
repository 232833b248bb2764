//! Shared value types for the ruler model

use serde::{Deserialize, Serialize};

/// Project time in seconds
pub type Time = f64;

/// Sentinel for a time that has not been set (cleared play region, no anchor)
pub const UNSET_TIME: Time = -1.0;

/// Pixel distance within which the pointer "hits" a marker or snaps to a point
pub const SELECT_TOLERANCE_PIXEL: i32 = 4;

/// Loops shorter than this are played once instead (a tiny loop stalls playback)
pub const MIN_LOOP_DURATION: Time = 0.001;

/// The user's time selection `[t0, t1]`
///
/// Kept ordered (`t0 <= t1`) unless a setter is told not to swap.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectedRegion {
    t0: Time,
    t1: Time,
}

impl SelectedRegion {
    /// Create an ordered selection from two bounds in any order
    pub fn new(a: Time, b: Time) -> Self {
        if a <= b {
            Self { t0: a, t1: b }
        } else {
            Self { t0: b, t1: a }
        }
    }

    pub fn t0(&self) -> Time {
        self.t0
    }

    pub fn t1(&self) -> Time {
        self.t1
    }

    pub fn duration(&self) -> Time {
        self.t1 - self.t0
    }

    /// A point selection (cursor) has no extent
    pub fn is_point(&self) -> bool {
        self.t1 <= self.t0
    }

    /// Whether `t` lies strictly between the bounds
    pub fn strictly_contains(&self, t: Time) -> bool {
        t > self.t0 && t < self.t1
    }

    /// Move the left bound
    ///
    /// With `may_swap` the bounds are re-ordered if they crossed; without it
    /// the right bound is pushed along instead. Returns true if a swap happened.
    pub fn set_t0(&mut self, t: Time, may_swap: bool) -> bool {
        self.t0 = t;
        if may_swap {
            self.ensure_ordering()
        } else {
            if self.t1 < t {
                self.t1 = t;
            }
            false
        }
    }

    /// Move the right bound, see [`Self::set_t0`]
    pub fn set_t1(&mut self, t: Time, may_swap: bool) -> bool {
        self.t1 = t;
        if may_swap {
            self.ensure_ordering()
        } else {
            if self.t0 > t {
                self.t0 = t;
            }
            false
        }
    }

    pub fn set_times(&mut self, t0: Time, t1: Time) {
        *self = Self::new(t0, t1);
    }

    fn ensure_ordering(&mut self) -> bool {
        if self.t1 < self.t0 {
            std::mem::swap(&mut self.t0, &mut self.t1);
            true
        } else {
            false
        }
    }
}

/// Time extent of the audio content (first clip start to last clip end)
pub trait TrackExtent {
    fn start_time(&self) -> Time;
    fn end_time(&self) -> Time;
}

/// Plain track extent, used when the host has no richer document model
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackSpan {
    pub start: Time,
    pub end: Time,
}

impl TrackSpan {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }
}

impl TrackExtent for TrackSpan {
    fn start_time(&self) -> Time {
        self.start
    }

    fn end_time(&self) -> Time {
        self.end
    }
}
