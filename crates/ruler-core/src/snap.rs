//! Snapping a candidate time to nearby reference points
//!
//! The tolerance is given in pixels and converted to time through the
//! [`TimeAxis`] at call time, so the effective window narrows as the view
//! zooms in. Within the window the nearest point wins; on a tie the point
//! listed first wins.

use crate::axis::TimeAxis;
use crate::types::{Time, SELECT_TOLERANCE_PIXEL};

/// Outcome of a snap request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResults {
    /// The adjusted time (the candidate itself if nothing was in range)
    pub time: Time,
    /// Whether `time` was moved onto a reference point
    pub snapped: bool,
}

impl SnapResults {
    fn unsnapped(time: Time) -> Self {
        Self {
            time,
            snapped: false,
        }
    }
}

/// Snaps times to a fixed set of reference points for one view state
pub struct SnapEngine<'a> {
    axis: &'a TimeAxis,
    points: Vec<Time>,
    tolerance_px: i32,
}

impl<'a> SnapEngine<'a> {
    /// Build an engine over `points`
    ///
    /// Non-finite points are dropped; order is preserved for tie-breaking.
    pub fn new(axis: &'a TimeAxis, points: impl IntoIterator<Item = Time>) -> Self {
        Self {
            axis,
            points: points.into_iter().filter(|t| t.is_finite()).collect(),
            tolerance_px: SELECT_TOLERANCE_PIXEL,
        }
    }

    pub fn with_tolerance(mut self, tolerance_px: i32) -> Self {
        self.tolerance_px = tolerance_px.max(0);
        self
    }

    /// Time window corresponding to the pixel tolerance at the current zoom
    pub fn time_tolerance(&self) -> Time {
        self.axis.pixels_to_duration(self.tolerance_px as f64)
    }

    pub fn snap(&self, candidate: Time) -> SnapResults {
        if !candidate.is_finite() {
            return SnapResults::unsnapped(candidate);
        }
        let tolerance = self.time_tolerance();
        let mut best: Option<(Time, Time)> = None;
        for &point in &self.points {
            let distance = (candidate - point).abs();
            if distance > tolerance {
                continue;
            }
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((point, distance)),
            }
        }
        match best {
            Some((point, _)) => SnapResults {
                time: point,
                snapped: true,
            },
            None => SnapResults::unsnapped(candidate),
        }
    }
}

/// One-shot snap of `candidate` against `points` with the default tolerance
pub fn snap_to_points(axis: &TimeAxis, candidate: Time, points: &[Time]) -> SnapResults {
    SnapEngine::new(axis, points.iter().copied()).snap(candidate)
}
