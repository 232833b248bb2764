//! Pixel <-> time mapping for the ruler and track area
//!
//! The axis is a linear map defined by the time at the pixel origin (`h`),
//! the zoom (pixels per second) and the pixel origin itself. An optional
//! fisheye magnifies a window around a focus time; every conversion can
//! bypass it with `ignore_fisheye`.
//!
//! Positions are integer pixel columns. `time_to_position` rounds to the
//! nearest column, so a round trip through both functions is exact to
//! within one pixel's worth of time.

use crate::types::{Time, SELECT_TOLERANCE_PIXEL};

/// Minimum zoom in pixels per second
pub const MIN_ZOOM: f64 = 0.001;

/// Maximum zoom in pixels per second
pub const MAX_ZOOM: f64 = 6_000_000.0;

/// Default zoom: one pixel per 512 samples at 44.1 kHz
pub const DEFAULT_ZOOM: f64 = 44_100.0 / 512.0;

/// Local magnification of the time axis around a focus time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fisheye {
    /// Time at the centre of the magnified window
    pub center: Time,
    /// Half-width of the magnified window in pixels
    pub radius_px: f64,
    /// How many times denser time is drawn inside the window (> 1.0)
    pub magnification: f64,
}

impl Fisheye {
    fn is_effective(&self) -> bool {
        self.radius_px > 0.0 && self.magnification > 1.0
    }
}

/// View transform between project time and pixel columns
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    /// Time at the pixel origin (horizontal scroll)
    h: Time,
    /// Pixels per second
    zoom: f64,
    /// Pixel column of the track area's left edge
    left_offset: i32,
    /// Width in pixels of the area tracks can be drawn in
    usable_width: i32,
    fisheye: Option<Fisheye>,
}

impl Default for TimeAxis {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_ZOOM, 0, 0)
    }
}

impl TimeAxis {
    pub fn new(h: Time, zoom: f64, left_offset: i32, usable_width: i32) -> Self {
        let mut axis = Self {
            h,
            zoom: DEFAULT_ZOOM,
            left_offset,
            usable_width: usable_width.max(0),
            fisheye: None,
        };
        axis.set_zoom(zoom);
        axis
    }

    pub fn h(&self) -> Time {
        self.h
    }

    pub fn set_h(&mut self, h: Time) {
        if h.is_finite() {
            self.h = h;
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set pixels per second, clamped to [`MIN_ZOOM`, `MAX_ZOOM`]
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn left_offset(&self) -> i32 {
        self.left_offset
    }

    pub fn set_left_offset(&mut self, offset: i32) {
        self.left_offset = offset;
    }

    pub fn usable_width(&self) -> i32 {
        self.usable_width
    }

    pub fn set_usable_width(&mut self, width: i32) {
        self.usable_width = width.max(0);
    }

    pub fn fisheye(&self) -> Option<Fisheye> {
        self.fisheye
    }

    pub fn set_fisheye(&mut self, fisheye: Option<Fisheye>) {
        self.fisheye = fisheye;
    }

    /// Map a pixel column to project time
    ///
    /// `origin` is the pixel column at which time `h` is drawn.
    pub fn position_to_time(&self, position: i32, origin: i32, ignore_fisheye: bool) -> Time {
        let offset_px = (position - origin) as f64;
        match self.active_fisheye(ignore_fisheye) {
            None => self.h + offset_px / self.zoom,
            Some(fisheye) => {
                let focus_px = (fisheye.center - self.h) * self.zoom;
                fisheye.center + self.warp_pixels_to_time(offset_px - focus_px, &fisheye)
            }
        }
    }

    /// Map project time to a (rounded) pixel column
    pub fn time_to_position(&self, time: Time, origin: i32, ignore_fisheye: bool) -> i32 {
        // `as` saturates out-of-range values and maps NaN to 0
        (self.time_to_position_exact(time, origin, ignore_fisheye) + 0.5).floor() as i32
    }

    /// Unrounded pixel position of `time`
    pub fn time_to_position_exact(&self, time: Time, origin: i32, ignore_fisheye: bool) -> f64 {
        let origin = origin as f64;
        match self.active_fisheye(ignore_fisheye) {
            None => origin + (time - self.h) * self.zoom,
            Some(fisheye) => {
                let focus_px = (fisheye.center - self.h) * self.zoom;
                origin + focus_px + self.warp_time_to_pixels(time - fisheye.center, &fisheye)
            }
        }
    }

    /// Convenience: `position_to_time` relative to the track area origin
    pub fn pos_to_time(&self, position: i32) -> Time {
        self.position_to_time(position, self.left_offset, false)
    }

    /// Convenience: `time_to_position` relative to the track area origin
    pub fn time_to_pos(&self, time: Time) -> i32 {
        self.time_to_position(time, self.left_offset, false)
    }

    /// Duration covered by `pixels` columns at the current zoom (fisheye ignored)
    pub fn pixels_to_duration(&self, pixels: f64) -> Time {
        pixels / self.zoom
    }

    /// Half-width in time of the window `is_within_marker` accepts
    pub fn marker_time_tolerance(&self) -> Time {
        self.pixels_to_duration(SELECT_TOLERANCE_PIXEL as f64)
    }

    /// Whether pixel column `mouse_x` is within the selection tolerance of `marker`
    ///
    /// Unset (negative) markers never match.
    pub fn is_within_marker(&self, mouse_x: i32, marker: Time) -> bool {
        if marker < 0.0 {
            return false;
        }
        let pixel_pos = self.time_to_pos(marker);
        let bound_left = pixel_pos.saturating_sub(SELECT_TOLERANCE_PIXEL);
        let bound_right = pixel_pos.saturating_add(SELECT_TOLERANCE_PIXEL);
        mouse_x >= bound_left && mouse_x < bound_right
    }

    fn active_fisheye(&self, ignore_fisheye: bool) -> Option<Fisheye> {
        if ignore_fisheye {
            return None;
        }
        self.fisheye.filter(Fisheye::is_effective)
    }

    fn warp_pixels_to_time(&self, rel_px: f64, fisheye: &Fisheye) -> Time {
        let dense = self.zoom * fisheye.magnification;
        let magnitude = rel_px.abs();
        let offset = if magnitude <= fisheye.radius_px {
            magnitude / dense
        } else {
            fisheye.radius_px / dense + (magnitude - fisheye.radius_px) / self.zoom
        };
        offset.copysign(rel_px)
    }

    fn warp_time_to_pixels(&self, rel_time: Time, fisheye: &Fisheye) -> f64 {
        let dense = self.zoom * fisheye.magnification;
        let threshold = fisheye.radius_px / dense;
        let magnitude = rel_time.abs();
        let offset = if magnitude <= threshold {
            magnitude * dense
        } else {
            fisheye.radius_px + (magnitude - threshold) * self.zoom
        };
        offset.copysign(rel_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_mapping() {
        let axis = TimeAxis::new(1.0, 100.0, 10, 1000);
        assert_eq!(axis.pos_to_time(10), 1.0);
        assert_eq!(axis.pos_to_time(110), 2.0);
        assert_eq!(axis.time_to_pos(2.0), 110);
    }

    #[test]
    fn test_round_trip_within_one_pixel() {
        let axis = TimeAxis::new(0.37, 33.3, 12, 800);
        for x in 12..812 {
            let t = axis.pos_to_time(x);
            assert!((axis.time_to_pos(t) - x).abs() <= 1, "x={x}");
        }
    }

    #[test]
    fn test_round_trip_with_fisheye() {
        let mut axis = TimeAxis::new(0.0, 50.0, 0, 600);
        axis.set_fisheye(Some(Fisheye {
            center: 5.0,
            radius_px: 40.0,
            magnification: 4.0,
        }));
        for x in 0..600 {
            let t = axis.position_to_time(x, 0, false);
            assert!((axis.time_to_position(t, 0, false) - x).abs() <= 1, "x={x}");
        }
        // Focus pixel is unchanged by the warp
        assert_eq!(axis.time_to_position(5.0, 0, false), 250);
        assert_eq!(axis.time_to_position(5.0, 0, true), 250);
        // Inside the window time is denser
        let warped = axis.position_to_time(260, 0, false) - 5.0;
        let plain = axis.position_to_time(260, 0, true) - 5.0;
        assert!(warped < plain);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut axis = TimeAxis::default();
        axis.set_zoom(0.0);
        assert_eq!(axis.zoom(), MIN_ZOOM);
        axis.set_zoom(f64::NAN);
        assert_eq!(axis.zoom(), MIN_ZOOM);
        axis.set_zoom(1e12);
        assert_eq!(axis.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_is_within_marker() {
        let axis = TimeAxis::new(0.0, 100.0, 0, 1000);
        // Marker at 1.0s is pixel 100; window is [96, 104)
        assert!(axis.is_within_marker(96, 1.0));
        assert!(axis.is_within_marker(103, 1.0));
        assert!(!axis.is_within_marker(104, 1.0));
        assert!(!axis.is_within_marker(95, 1.0));
        assert!(!axis.is_within_marker(0, -1.0));
    }

    #[test]
    fn test_tolerance_shrinks_with_zoom() {
        let mut axis = TimeAxis::new(0.0, 10.0, 0, 1000);
        let mut last = axis.marker_time_tolerance();
        for zoom in [20.0, 40.0, 400.0, 4000.0] {
            axis.set_zoom(zoom);
            let tolerance = axis.marker_time_tolerance();
            assert!(tolerance < last);
            last = tolerance;
        }
    }

    #[test]
    fn test_negative_width_is_clamped() {
        let axis = TimeAxis::new(0.0, 10.0, 0, -5);
        assert_eq!(axis.usable_width(), 0);
    }
}
