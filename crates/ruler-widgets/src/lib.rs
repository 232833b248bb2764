//! Timeline ruler widgets
//!
//! The ruler is the strip above the tracks where the user sets the play
//! (loop) region by clicking and dragging, scrubs or seeks, and moves the
//! pinned play head.
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **State**: [`RulerPanel`] owns the gesture in progress, hover state,
//!   overlay snapshots and injected preferences. It is driven with a
//!   [`RulerContext`] borrowed from the host for each call.
//! - **View function**: [`ruler_canvas`] takes a [`RulerScene`] snapshot and
//!   a callback, returning an `Element`.
//! - **Canvas program**: turns iced events into [`RulerInput`] messages and
//!   paints the scene.
//!
//! Playback and scrubbing run elsewhere; the ruler sends them requests
//! through the `ruler_core` transport and scrubber seams and polls their
//! state on each idle tick.

pub mod canvas;
pub mod gesture;
pub mod layout;
pub mod menu;
pub mod overlay;
pub mod ruler;
pub mod theme;
pub mod view;

pub use canvas::{RulerCanvas, RulerInput, RulerInteraction, RulerScene, SceneRegion};
pub use gesture::{
    Gesture, HandleResult, HitTarget, MouseButton, MouseEventState, PlaybackRequest,
    PointerEvent, QuickPlayPos,
};
pub use layout::{RulerCell, RulerLayout};
pub use menu::{quick_play_menu, MenuChoice, RulerMenuAction, RulerMenuItem};
pub use overlay::{
    GuidelineOverlay, GuidelineSnapshot, IndicatorOverlayModel, IndicatorShape,
    IndicatorSnapshot, Overlay, ScrubIndicatorOverlay,
};
pub use ruler::{
    IdleReport, RulerContext, RulerCursor, RulerNotification, RulerPanel, RulerPreview,
};
pub use view::ruler_canvas;
