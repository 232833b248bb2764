//! Per-project view state shared by the ruler, the track panel and playback
//!
//! Holds the time axis, the selection and the play region, plus the
//! play-region operations the menus and the ruler gestures use.

use crate::axis::TimeAxis;
use crate::play_region::PlayRegion;
use crate::types::{SelectedRegion, Time};

/// Bounds used when activating an empty region with only a point selected
const DEFAULT_LOOP_BOUNDS: (Time, Time) = (0.0, 4.0);

#[derive(Debug, Clone)]
pub struct ViewInfo {
    pub axis: TimeAxis,
    pub selection: SelectedRegion,
    pub play_region: PlayRegion,
    /// Scroll the view to follow the play head while playing
    pub update_track_indicator: bool,
}

impl Default for ViewInfo {
    fn default() -> Self {
        Self::new(TimeAxis::default())
    }
}

impl ViewInfo {
    pub fn new(axis: TimeAxis) -> Self {
        Self {
            axis,
            selection: SelectedRegion::default(),
            play_region: PlayRegion::new(),
            update_track_indicator: true,
        }
    }

    /// Make the region independent of the selection
    ///
    /// An empty region picks up the selection, or the first four seconds
    /// when the selection is a point.
    pub fn activate_play_region(&mut self) {
        self.play_region.set_active(true);
        if self.play_region.is_empty() {
            let (start, end) = if self.selection.is_point() {
                DEFAULT_LOOP_BOUNDS
            } else {
                (self.selection.t0(), self.selection.t1())
            };
            self.play_region.set_times(start, end);
        }
        log::debug!(
            "activate_play_region: [{:.3}, {:.3}]",
            self.play_region.start(),
            self.play_region.end()
        );
    }

    /// Let the region follow the selection again
    ///
    /// Only the playback bounds change; the last active bounds stay for display.
    pub fn inactivate_play_region(&mut self) {
        self.play_region.set_active(false);
        self.play_region
            .set_times(self.selection.t0(), self.selection.t1());
    }

    pub fn toggle_play_region(&mut self) {
        if self.play_region.is_active() {
            self.inactivate_play_region();
        } else {
            self.activate_play_region();
        }
    }

    /// Forget the loop bounds and let the region follow the selection again
    pub fn clear_play_region(&mut self) {
        self.play_region.clear();
        self.inactivate_play_region();
    }

    pub fn set_play_region_to_selection(&mut self) {
        self.play_region.set_active(true);
        self.play_region
            .set_times(self.selection.t0(), self.selection.t1());
    }
}
