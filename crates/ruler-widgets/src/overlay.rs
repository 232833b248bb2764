//! Transient indicators drawn over the ruler and the track area
//!
//! Each overlay keeps two immutable snapshots: the one last drawn and the
//! one computed on the latest idle tick. The host repaints an overlay only
//! when the two differ, then commits, which replaces the drawn snapshot
//! with the new one.

use iced::{Color, Point, Rectangle, Size};
use ruler_core::{Scrubber, Time, TimeAxis};

use crate::gesture::QuickPlayPos;
use crate::layout::RulerCell;
use crate::theme;

/// The dirty-rectangle protocol shared by all overlays
pub trait Overlay {
    /// Whether the new state differs from the drawn one
    fn dirty(&self) -> bool;

    /// Record the new state as drawn
    fn commit(&mut self);

    /// Area covered by the drawn state, and whether it needs repainting
    ///
    /// When nothing is drawn the area is `None`; it is dirty only if
    /// something is about to appear.
    fn rectangle(&self) -> (Option<Rectangle>, bool);
}

// =============================================================================
// Snapshots
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorShape {
    /// Plain quick-play marker
    QuickPlay,
    /// Double arrow
    Scrub,
    /// Double double arrow
    Seek,
}

/// Ruler-side indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorSnapshot {
    /// Pixel column, or -1 when hidden
    pub x: i32,
    pub scrub: bool,
    pub seek: bool,
}

impl IndicatorSnapshot {
    pub const HIDDEN: Self = Self {
        x: -1,
        scrub: false,
        seek: false,
    };

    pub fn is_visible(&self) -> bool {
        self.x >= 0
    }

    pub fn shape(&self) -> IndicatorShape {
        if self.seek {
            IndicatorShape::Seek
        } else if self.scrub {
            IndicatorShape::Scrub
        } else {
            IndicatorShape::QuickPlay
        }
    }
}

/// Track-side guideline state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidelineSnapshot {
    pub x: i32,
    pub snapped: bool,
    /// Hovering the scrub zone without scrubbing
    pub previewing: bool,
}

impl GuidelineSnapshot {
    pub const HIDDEN: Self = Self {
        x: -1,
        snapped: false,
        previewing: false,
    };

    pub fn is_visible(&self) -> bool {
        self.x >= 0
    }

    pub fn color(&self) -> Color {
        if self.previewing {
            theme::GUIDELINE_PREVIEW
        } else if self.snapped {
            theme::GUIDELINE_SNAP
        } else {
            theme::GUIDELINE_NEUTRAL
        }
    }
}

/// Drawn and pending snapshot of one overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState<S> {
    old: S,
    new: S,
}

impl<S: Copy + PartialEq> OverlayState<S> {
    fn new(initial: S) -> Self {
        Self {
            old: initial,
            new: initial,
        }
    }

    pub fn drawn(&self) -> S {
        self.old
    }

    pub fn pending(&self) -> S {
        self.new
    }

    fn set(&mut self, snapshot: S) {
        self.new = snapshot;
    }

    fn dirty(&self) -> bool {
        self.old != self.new
    }

    fn commit(&mut self) {
        self.old = self.new;
    }
}

// =============================================================================
// Overlays
// =============================================================================

#[derive(Debug, Clone)]
pub struct ScrubIndicatorOverlay {
    state: OverlayState<IndicatorSnapshot>,
    ruler_height: i32,
}

impl ScrubIndicatorOverlay {
    pub fn state(&self) -> &OverlayState<IndicatorSnapshot> {
        &self.state
    }

    /// Half-width of the area repainted around the indicator
    pub fn half_width() -> i32 {
        (theme::indicator_big_width() * 3 / 2) / 2
    }
}

impl Overlay for ScrubIndicatorOverlay {
    fn dirty(&self) -> bool {
        self.state.dirty()
    }

    fn commit(&mut self) {
        self.state.commit();
    }

    fn rectangle(&self) -> (Option<Rectangle>, bool) {
        let old = self.state.drawn();
        if !old.is_visible() {
            return (None, self.state.pending().is_visible());
        }
        let half = Self::half_width();
        let rect = Rectangle::new(
            Point::new((old.x - half) as f32, 0.0),
            Size::new((half * 2 + 1) as f32, self.ruler_height as f32),
        );
        (Some(rect), self.state.dirty())
    }
}

#[derive(Debug, Clone)]
pub struct GuidelineOverlay {
    state: OverlayState<GuidelineSnapshot>,
    track_panel_height: i32,
}

impl GuidelineOverlay {
    pub fn state(&self) -> &OverlayState<GuidelineSnapshot> {
        &self.state
    }
}

impl Overlay for GuidelineOverlay {
    fn dirty(&self) -> bool {
        self.state.dirty()
    }

    fn commit(&mut self) {
        self.state.commit();
    }

    fn rectangle(&self) -> (Option<Rectangle>, bool) {
        let old = self.state.drawn();
        if !old.is_visible() {
            return (None, self.state.pending().is_visible());
        }
        let rect = Rectangle::new(
            Point::new(old.x as f32, 0.0),
            Size::new(1.0, self.track_panel_height as f32),
        );
        (Some(rect), self.state.dirty())
    }
}

// =============================================================================
// Model
// =============================================================================

/// Everything the overlays depend on, gathered once per idle tick
pub struct OverlayInputs<'a> {
    pub axis: &'a TimeAxis,
    pub quick_play: QuickPlayPos,
    /// Cell under the pointer; `None` once the pointer left the ruler
    pub hover_cell: Option<RulerCell>,
    /// Any ruler gesture is in progress
    pub gesture_live: bool,
    pub audio_active: bool,
    /// Later of the track end and the selection end
    pub latest_end: Time,
    pub scrubber: &'a dyn Scrubber,
}

/// Ruler indicator and track guideline, sharing one computed position
#[derive(Debug, Clone)]
pub struct IndicatorOverlayModel {
    pub indicator: ScrubIndicatorOverlay,
    pub guideline: GuidelineOverlay,
}

impl Default for IndicatorOverlayModel {
    fn default() -> Self {
        Self::new(crate::layout::PROPER_RULER_HEIGHT, 0)
    }
}

impl IndicatorOverlayModel {
    pub fn new(ruler_height: i32, track_panel_height: i32) -> Self {
        Self {
            indicator: ScrubIndicatorOverlay {
                state: OverlayState::new(IndicatorSnapshot::HIDDEN),
                ruler_height,
            },
            guideline: GuidelineOverlay {
                state: OverlayState::new(GuidelineSnapshot::HIDDEN),
                track_panel_height,
            },
        }
    }

    pub fn set_heights(&mut self, ruler_height: i32, track_panel_height: i32) {
        self.indicator.ruler_height = ruler_height;
        self.guideline.track_panel_height = track_panel_height;
    }

    /// Compute the pending snapshots
    pub fn update(&mut self, inputs: &OverlayInputs<'_>) {
        let indicator = compute_indicator(inputs);
        let guideline = compute_guideline(inputs, &indicator);
        self.indicator.state.set(indicator);
        self.guideline.state.set(guideline);
    }

    pub fn dirty(&self) -> bool {
        self.indicator.dirty() || self.guideline.dirty()
    }

    pub fn commit(&mut self) {
        self.indicator.commit();
        self.guideline.commit();
    }
}

/// Ruler indicator for the current inputs
///
/// Hidden while audio plays or once the pointer leaves the ruler, unless
/// a pointer scrub is running; also hidden past the end of all content.
pub fn compute_indicator(inputs: &OverlayInputs<'_>) -> IndicatorSnapshot {
    let scrubber = inputs.scrubber;
    let scrubbing = scrubber.is_scrubbing()
        && !scrubber.is_speed_playing()
        && !scrubber.is_keyboard_scrubbing();

    if (inputs.hover_cell.is_none() || inputs.audio_active) && !scrubbing {
        return IndicatorSnapshot::HIDDEN;
    }
    if inputs.quick_play.time >= inputs.latest_end {
        return IndicatorSnapshot::HIDDEN;
    }

    let x = inputs.axis.time_to_pos(inputs.quick_play.time);
    if x < 0 {
        return IndicatorSnapshot::HIDDEN;
    }
    let scrub = !inputs.gesture_live
        && (inputs.hover_cell == Some(RulerCell::Scrub) || scrubber.has_mark());
    let seek = scrub && (scrubber.seeks() || scrubber.temporarily_seeks());
    IndicatorSnapshot { x, scrub, seek }
}

fn compute_guideline(inputs: &OverlayInputs<'_>, indicator: &IndicatorSnapshot) -> GuidelineSnapshot {
    if !indicator.is_visible() {
        return GuidelineSnapshot::HIDDEN;
    }
    GuidelineSnapshot {
        x: indicator.x,
        snapped: inputs.quick_play.snapped,
        previewing: inputs.hover_cell == Some(RulerCell::Scrub) && !inputs.scrubber.is_scrubbing(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ScrubState {
        has_mark: bool,
        scrubbing: bool,
        seeks: bool,
        speed_playing: bool,
    }

    impl Scrubber for ScrubState {
        fn can_scrub(&self) -> bool {
            true
        }
        fn has_mark(&self) -> bool {
            self.has_mark
        }
        fn is_scrubbing(&self) -> bool {
            self.scrubbing
        }
        fn seeks(&self) -> bool {
            self.seeks
        }
        fn temporarily_seeks(&self) -> bool {
            false
        }
        fn is_speed_playing(&self) -> bool {
            self.speed_playing
        }
        fn is_keyboard_scrubbing(&self) -> bool {
            false
        }
        fn shows_bar(&self) -> bool {
            true
        }
        fn is_transporting_pinned(&self) -> bool {
            false
        }
        fn mark_scrub_start(&mut self, _x: i32, _pinned: bool, _seek: bool) {}
        fn cancel(&mut self) {}
        fn set_scroll_scrubbing(&mut self, _scroll: bool) {}
    }

    fn inputs<'a>(
        axis: &'a TimeAxis,
        scrubber: &'a ScrubState,
        time: Time,
        hover_cell: Option<RulerCell>,
    ) -> OverlayInputs<'a> {
        OverlayInputs {
            axis,
            quick_play: QuickPlayPos {
                time,
                unsnapped: time,
                snapped: false,
            },
            hover_cell,
            gesture_live: false,
            audio_active: false,
            latest_end: 10.0,
            scrubber,
        }
    }

    #[test]
    fn test_indicator_follows_quick_play_position() {
        let axis = TimeAxis::new(0.0, 100.0, 0, 1000);
        let scrubber = ScrubState::default();
        let snapshot = compute_indicator(&inputs(&axis, &scrubber, 3.0, Some(RulerCell::QuickPlay)));
        assert_eq!(
            snapshot,
            IndicatorSnapshot {
                x: 300,
                scrub: false,
                seek: false
            }
        );
        assert_eq!(snapshot.shape(), IndicatorShape::QuickPlay);
    }

    #[test]
    fn test_indicator_hidden_when_pointer_left_or_playing() {
        let axis = TimeAxis::new(0.0, 100.0, 0, 1000);
        let scrubber = ScrubState::default();
        assert!(!compute_indicator(&inputs(&axis, &scrubber, 3.0, None)).is_visible());

        let mut playing = inputs(&axis, &scrubber, 3.0, Some(RulerCell::QuickPlay));
        playing.audio_active = true;
        assert!(!compute_indicator(&playing).is_visible());

        // Past all content
        assert!(!compute_indicator(&inputs(&axis, &scrubber, 10.0, Some(RulerCell::QuickPlay))).is_visible());
    }

    #[test]
    fn test_indicator_stays_while_scrubbing() {
        let axis = TimeAxis::new(0.0, 100.0, 0, 1000);
        let scrubber = ScrubState {
            has_mark: true,
            scrubbing: true,
            seeks: true,
            ..Default::default()
        };
        let mut playing = inputs(&axis, &scrubber, 3.0, None);
        playing.audio_active = true;
        let snapshot = compute_indicator(&playing);
        assert!(snapshot.is_visible());
        assert_eq!(snapshot.shape(), IndicatorShape::Seek);

        // Speed play is not a pointer scrub
        let speed = ScrubState {
            has_mark: true,
            scrubbing: true,
            speed_playing: true,
            ..Default::default()
        };
        let mut playing = inputs(&axis, &speed, 3.0, None);
        playing.audio_active = true;
        assert!(!compute_indicator(&playing).is_visible());
    }

    #[test]
    fn test_scrub_shape_needs_no_gesture() {
        let axis = TimeAxis::new(0.0, 100.0, 0, 1000);
        let scrubber = ScrubState::default();
        let mut hover = inputs(&axis, &scrubber, 3.0, Some(RulerCell::Scrub));
        assert_eq!(compute_indicator(&hover).shape(), IndicatorShape::Scrub);
        hover.gesture_live = true;
        assert_eq!(compute_indicator(&hover).shape(), IndicatorShape::QuickPlay);
    }

    #[test]
    fn test_guideline_color() {
        let axis = TimeAxis::new(0.0, 100.0, 0, 1000);
        let scrubber = ScrubState::default();
        let mut model = IndicatorOverlayModel::new(29, 400);

        model.update(&inputs(&axis, &scrubber, 3.0, Some(RulerCell::Scrub)));
        assert_eq!(model.guideline.state().pending().color(), theme::GUIDELINE_PREVIEW);

        let mut snapped = inputs(&axis, &scrubber, 3.0, Some(RulerCell::QuickPlay));
        snapped.quick_play.snapped = true;
        model.update(&snapped);
        assert_eq!(model.guideline.state().pending().color(), theme::GUIDELINE_SNAP);

        model.update(&inputs(&axis, &scrubber, 3.0, Some(RulerCell::QuickPlay)));
        assert_eq!(model.guideline.state().pending().color(), theme::GUIDELINE_NEUTRAL);
    }

    #[test]
    fn test_dirty_and_commit() {
        let axis = TimeAxis::new(0.0, 100.0, 0, 1000);
        let scrubber = ScrubState::default();
        let mut model = IndicatorOverlayModel::new(29, 400);
        assert!(!model.dirty());

        model.update(&inputs(&axis, &scrubber, 3.0, Some(RulerCell::QuickPlay)));
        assert!(model.dirty());
        // Nothing drawn yet: no area, but something is appearing
        assert_eq!(model.indicator.rectangle(), (None, true));

        model.commit();
        assert!(!model.dirty());
        let (rect, dirty) = model.indicator.rectangle();
        assert!(!dirty);
        let half = ScrubIndicatorOverlay::half_width();
        assert_eq!(
            rect,
            Some(Rectangle::new(
                Point::new((300 - half) as f32, 0.0),
                Size::new((half * 2 + 1) as f32, 29.0)
            ))
        );
        assert_eq!(
            model.guideline.rectangle(),
            (
                Some(Rectangle::new(Point::new(300.0, 0.0), Size::new(1.0, 400.0))),
                false
            )
        );

        // Same inputs again: still clean
        model.update(&inputs(&axis, &scrubber, 3.0, Some(RulerCell::QuickPlay)));
        assert!(!model.dirty());

        model.update(&inputs(&axis, &scrubber, 3.0, None));
        assert!(model.dirty());
        assert!(model.indicator.rectangle().1);
    }
}
