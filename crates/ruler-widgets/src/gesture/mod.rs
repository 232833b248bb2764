//! Mouse gestures on the ruler
//!
//! A gesture is chosen once, at mouse-down, by [`hit_target`] and then owns
//! every move and release until the button goes up or the gesture is
//! cancelled. Each variant carries only the state it needs.

mod play_region;
mod playhead;
mod scrub;

pub(crate) use play_region::{clear_play_region, start_qp_play};
pub use play_region::{
    effective_play_span, release_clears_region, MouseEventState, PlayRegionGesture,
    PlaybackRequest,
};
pub use playhead::{pinned_head_fraction, pinned_head_x, PlayheadGesture};
pub use scrub::{scrubbing_message, ScrubGesture};

use ruler_core::{Time, SELECT_TOLERANCE_PIXEL};

use crate::layout::{RulerCell, RulerLayout};
use crate::menu::MenuChoice;
use crate::ruler::RulerContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A pointer event in ruler pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    /// The button that changed state; `None` for plain moves
    pub button: Option<MouseButton>,
    pub shift: bool,
    pub control: bool,
    pub double_click: bool,
}

impl PointerEvent {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            button: None,
            shift: false,
            control: false,
            double_click: false,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_control(mut self, control: bool) -> Self {
        self.control = control;
        self
    }

    pub fn with_double_click(mut self, double_click: bool) -> Self {
        self.double_click = double_click;
        self
    }
}

/// Quick-play time under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickPlayPos {
    /// Possibly snapped and capped
    pub time: Time,
    pub unsnapped: Time,
    /// Whether `time` was snapped onto a selection edge
    pub snapped: bool,
}

impl Default for QuickPlayPos {
    fn default() -> Self {
        Self {
            time: ruler_core::UNSET_TIME,
            unsnapped: ruler_core::UNSET_TIME,
            snapped: false,
        }
    }
}

/// What feeding an event to a gesture asks of the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandleResult {
    /// Overlays need recomputing and repainting
    pub redraw: bool,
    /// The gesture ended early and will see no further events
    pub cancelled: bool,
    /// Show the context menu for this cell
    pub menu: Option<MenuChoice>,
}

impl HandleResult {
    pub fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    pub fn cancelled() -> Self {
        Self {
            redraw: true,
            cancelled: true,
            menu: None,
        }
    }

    pub fn menu(choice: MenuChoice) -> Self {
        Self {
            redraw: true,
            cancelled: false,
            menu: Some(choice),
        }
    }
}

/// The gesture in progress
#[derive(Debug, Clone)]
pub enum Gesture {
    PlayRegion(PlayRegionGesture),
    Scrub(ScrubGesture),
    Playhead(PlayheadGesture),
}

impl Gesture {
    pub fn button(&self) -> MouseButton {
        match self {
            Self::PlayRegion(g) => g.button(),
            Self::Scrub(g) => g.button(),
            Self::Playhead(g) => g.button(),
        }
    }

    /// Mouse state of a play-region gesture; `None` for every other kind
    pub fn mouse_event_state(&self) -> MouseEventState {
        match self {
            Self::PlayRegion(g) => g.state(),
            _ => MouseEventState::None,
        }
    }
}

/// What a mouse-down at a point would start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The pinned play head
    Playhead,
    /// Over a cell while recording; nothing may start
    Blocked,
    Cell(RulerCell),
    /// Outside the ruler
    Nothing,
}

/// Pick the gesture target at `(x, y)`, highest priority first
///
/// The pinned play head, grabbed in the quick-play cell, wins even while
/// recording. Otherwise recording blocks everything, and the cell under
/// the pointer decides.
pub fn hit_target(
    layout: &RulerLayout,
    ctx: &RulerContext<'_>,
    pinned_fraction: f64,
    is_recording: bool,
    x: i32,
    y: i32,
) -> HitTarget {
    let Some(cell) = layout.hit_test(x, y) else {
        return HitTarget::Nothing;
    };

    if cell == RulerCell::QuickPlay
        && ctx.scrubber.is_transporting_pinned()
        && ctx.transport.is_audio_active()
    {
        let target_x = pinned_head_x(&ctx.view.axis, pinned_fraction);
        if (x - target_x).abs() <= SELECT_TOLERANCE_PIXEL {
            return HitTarget::Playhead;
        }
    }

    // Capture may have started before the ruler heard about it
    if is_recording || ctx.transport.is_capturing() {
        return HitTarget::Blocked;
    }

    HitTarget::Cell(cell)
}
