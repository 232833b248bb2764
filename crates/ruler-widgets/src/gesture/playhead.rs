//! Dragging the pinned play head
//!
//! In pinned mode the play head stays at a fixed fraction of the track
//! area while the view scrolls. Dragging it changes that fraction.

use ruler_core::config::PlayheadConfig;
use ruler_core::TimeAxis;

use super::{HandleResult, MouseButton, PointerEvent};

/// Fraction used when the pinned head is reset
pub const DEFAULT_PINNED_FRACTION: f64 = 0.5;

/// Pixel column of the pinned play head
pub fn pinned_head_x(axis: &TimeAxis, fraction: f64) -> i32 {
    axis.left_offset() + (axis.usable_width() as f64 * fraction) as i32
}

/// Pinned fraction for a pointer at column `x`, clamped to the track area
pub fn pinned_head_fraction(axis: &TimeAxis, x: i32) -> f64 {
    let width = axis.usable_width();
    if width <= 0 {
        return 0.0;
    }
    (f64::from(x - axis.left_offset()) / f64::from(width)).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct PlayheadGesture {
    button: MouseButton,
    original_fraction: f64,
}

impl PlayheadGesture {
    /// Press on the pinned head
    ///
    /// Returns `None` when no drag starts: a double-click resets the
    /// position, and any other button is ignored.
    pub fn click(config: &mut PlayheadConfig, event: &PointerEvent) -> (Option<Self>, HandleResult) {
        let button = event.button.unwrap_or(MouseButton::Left);
        if event.double_click {
            config.pinned_fraction = DEFAULT_PINNED_FRACTION;
            log::debug!("[RULER] Pinned play head reset");
            return (None, HandleResult::cancelled());
        }
        if button != MouseButton::Left {
            return (None, HandleResult::cancelled());
        }
        let gesture = Self {
            button,
            original_fraction: config.pinned_fraction,
        };
        (Some(gesture), HandleResult::default())
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }

    pub fn drag(&self, config: &mut PlayheadConfig, axis: &TimeAxis, x: i32) -> HandleResult {
        config.pinned_fraction = pinned_head_fraction(axis, x);
        HandleResult::redraw()
    }

    pub fn release(&self, config: &mut PlayheadConfig, axis: &TimeAxis, x: i32) -> HandleResult {
        config.pinned_fraction = pinned_head_fraction(axis, x);
        log::debug!(
            "[RULER] Pinned play head moved to {:.3}",
            config.pinned_fraction
        );
        HandleResult::redraw()
    }

    pub fn cancel(&self, config: &mut PlayheadConfig) -> HandleResult {
        config.pinned_fraction = self.original_fraction;
        HandleResult::redraw()
    }
}
