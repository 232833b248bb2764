//! The play (loop) region
//!
//! An active region is independent of the selection and is what loop
//! playback uses. An inactive region follows the selection; its last
//! active bounds are remembered so that re-activating restores them and
//! the ruler can keep drawing them dimmed.
//!
//! Bounds are not kept ordered: a drag may leave `start > end` until
//! [`PlayRegion::order`] is called on release.

use crate::types::{Time, UNSET_TIME};

#[derive(Debug, Clone)]
pub struct PlayRegion {
    start: Time,
    end: Time,
    last_active_start: Time,
    last_active_end: Time,
    active: bool,
    /// Bumped on every mutation so observers can detect changes cheaply
    generation: u64,
}

impl Default for PlayRegion {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality is on bounds and activity; the generation counter is ignored
impl PartialEq for PlayRegion {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.last_active_start == other.last_active_start
            && self.last_active_end == other.last_active_end
            && self.active == other.active
    }
}

impl PlayRegion {
    /// A cleared, inactive region
    pub fn new() -> Self {
        Self {
            start: UNSET_TIME,
            end: UNSET_TIME,
            last_active_start: UNSET_TIME,
            last_active_end: UNSET_TIME,
            active: false,
            generation: 0,
        }
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    pub fn last_active_start(&self) -> Time {
        self.last_active_start
    }

    pub fn last_active_end(&self) -> Time {
        self.last_active_end
    }

    pub fn last_active_bounds(&self) -> (Time, Time) {
        (self.last_active_start, self.last_active_end)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when the region has no positive extent (also true when cleared)
    pub fn is_empty(&self) -> bool {
        self.end - self.start <= 0.0
    }

    /// True when the start is the unset sentinel (or any negative time)
    pub fn is_cleared(&self) -> bool {
        self.start < 0.0
    }

    /// Activate or deactivate
    ///
    /// Activating restores the last active bounds.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        if active {
            self.start = self.last_active_start;
            self.end = self.last_active_end;
        }
        self.touch();
    }

    pub fn set_start(&mut self, start: Time) {
        if self.start == start {
            return;
        }
        self.start = start;
        if self.active {
            self.last_active_start = start;
        }
        self.touch();
    }

    pub fn set_end(&mut self, end: Time) {
        if self.end == end {
            return;
        }
        self.end = end;
        if self.active {
            self.last_active_end = end;
        }
        self.touch();
    }

    pub fn set_times(&mut self, start: Time, end: Time) {
        if self.start == start && self.end == end {
            return;
        }
        self.start = start;
        self.end = end;
        if self.active {
            self.last_active_start = start;
            self.last_active_end = end;
        }
        self.touch();
    }

    /// Swap the bounds if they are inverted
    ///
    /// Both original values are kept; only their order changes.
    pub fn order(&mut self) {
        if self.start > self.end {
            std::mem::swap(&mut self.start, &mut self.end);
            if self.active {
                self.last_active_start = self.start;
                self.last_active_end = self.end;
            }
            self.touch();
        }
    }

    /// Set both bounds (and the remembered ones) to the unset sentinel
    pub fn clear(&mut self) {
        self.start = UNSET_TIME;
        self.end = UNSET_TIME;
        self.last_active_start = UNSET_TIME;
        self.last_active_end = UNSET_TIME;
        self.touch();
    }

    /// Overwrite bounds and activity with a snapshot taken earlier
    pub fn restore(&mut self, snapshot: &PlayRegion) {
        if self == snapshot {
            return;
        }
        self.start = snapshot.start;
        self.end = snapshot.end;
        self.last_active_start = snapshot.last_active_start;
        self.last_active_end = snapshot.last_active_end;
        self.active = snapshot.active;
        self.touch();
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
