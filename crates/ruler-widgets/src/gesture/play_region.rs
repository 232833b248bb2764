//! Quick-play gesture: creating, resizing and sweeping the play region
//!
//! Mouse-down near an edge of the region (as it was at mouse-down) drags
//! that edge; anywhere else anchors a new region at the click. While the
//! pointer stays within the click tolerance the region stays collapsed at
//! the anchor. Release orders the bounds, clears regions with nothing to
//! play, and starts playback.

use ruler_core::{
    PlayMode, PlayOptions, PlayRegion, SelectedRegion, Time, TrackExtent, ViewInfo,
    MIN_LOOP_DURATION, UNSET_TIME,
};

use super::{MouseButton, QuickPlayPos};
use crate::ruler::RulerContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseEventState {
    #[default]
    None,
    /// Pressed, not yet moved beyond the click tolerance
    ClickPending,
    DraggingStart,
    DraggingEnd,
    /// Sweeping out a new region from the anchor
    SelectingRange,
}

/// Playback started by a quick-play release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRequest {
    pub start: Time,
    pub end: Time,
    pub mode: PlayMode,
    pub options: PlayOptions,
}

#[derive(Debug, Clone)]
pub struct PlayRegionGesture {
    button: MouseButton,
    state: MouseEventState,
    /// Quick-play time at mouse-down, snapped and unsnapped
    anchor: Time,
    anchor_unsnapped: Time,
    /// Set once an edge drag leaves the edge's own tolerance window
    is_dragging: bool,
    prior_region: PlayRegion,
    prior_selection: SelectedRegion,
}

impl PlayRegionGesture {
    /// Start a gesture at pixel column `x`
    ///
    /// A left press temporarily deactivates an active region and is
    /// immediately followed by a drag at the same point, so a plain click
    /// collapses the region onto the anchor. Other buttons only record
    /// themselves for the context menu on release.
    pub fn click(
        ctx: &mut RulerContext<'_>,
        button: MouseButton,
        pos: &mut QuickPlayPos,
        x: i32,
        drag_selection: bool,
    ) -> Self {
        let mut gesture = Self {
            button,
            state: MouseEventState::None,
            anchor: UNSET_TIME,
            anchor_unsnapped: UNSET_TIME,
            is_dragging: false,
            prior_region: ctx.view.play_region.clone(),
            prior_selection: ctx.view.selection,
        };
        if button != MouseButton::Left {
            return gesture;
        }

        if ctx.scrubber.has_mark() {
            // A marked scrub can't be stopped from here, only paused
            ctx.transport.pause();
        }
        if gesture.prior_region.is_active() {
            ctx.view.inactivate_play_region();
        }

        gesture.anchor = pos.time;
        gesture.anchor_unsnapped = pos.unsnapped;

        let axis = &ctx.view.axis;
        let old = &gesture.prior_region;
        let within_start = axis.is_within_marker(x, old.start());
        let within_end = axis.is_within_marker(x, old.end());

        gesture.state = if within_start || within_end {
            if old.is_empty() {
                // Playing from a point: treat as a click, not an edge drag
                MouseEventState::ClickPending
            } else {
                let qp_x = axis.time_to_pos(pos.time);
                let to_start = (qp_x - axis.time_to_pos(old.start())).abs();
                let to_end = (qp_x - axis.time_to_pos(old.end())).abs();
                if to_start < to_end {
                    MouseEventState::DraggingStart
                } else {
                    MouseEventState::DraggingEnd
                }
            }
        } else {
            MouseEventState::ClickPending
        };

        log::debug!(
            "[RULER] Quick-play click at {:.3}s -> {:?}",
            gesture.anchor,
            gesture.state
        );

        gesture.drag(ctx.view, pos, x, drag_selection);
        gesture
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }

    pub fn state(&self) -> MouseEventState {
        self.state
    }

    /// Region as it was at mouse-down
    pub fn prior_region(&self) -> &PlayRegion {
        &self.prior_region
    }

    /// Follow the pointer to column `x`
    ///
    /// `pos` is the quick-play position already computed for `x`; it is
    /// adjusted in place when the dragged edge sticks to a tolerance window.
    pub fn drag(
        &mut self,
        view: &mut ViewInfo,
        pos: &mut QuickPlayPos,
        x: i32,
        drag_selection: bool,
    ) {
        if self.button != MouseButton::Left {
            return;
        }

        let axis = &view.axis;
        let within_click =
            self.anchor_unsnapped >= 0.0 && axis.is_within_marker(x, self.anchor_unsnapped);
        let within_start = axis.is_within_marker(x, self.prior_region.start());
        let within_end = axis.is_within_marker(x, self.prior_region.end());
        let (old_start, old_end) = (self.prior_region.start(), self.prior_region.end());
        let mirror = !self.prior_region.is_active() && drag_selection;

        match self.state {
            MouseEventState::None => {}
            MouseEventState::DraggingStart => {
                if !self.is_dragging && within_start {
                    pos.time = old_start;
                } else {
                    self.is_dragging = true;
                }
                // Collapse onto the other edge rather than leave a sliver
                if within_end {
                    pos.time = old_end;
                }
                view.play_region.set_start(pos.time);
                if mirror {
                    mirror_selection(view);
                }
            }
            MouseEventState::DraggingEnd => {
                if !self.is_dragging && within_end {
                    pos.time = old_end;
                } else {
                    self.is_dragging = true;
                }
                if within_start {
                    pos.time = old_start;
                }
                view.play_region.set_end(pos.time);
                if mirror {
                    mirror_selection(view);
                }
            }
            MouseEventState::ClickPending => {
                if within_click || self.anchor == UNSET_TIME {
                    pos.time = self.anchor;
                    view.play_region.set_times(self.anchor, self.anchor);
                } else {
                    self.state = MouseEventState::SelectingRange;
                    log::debug!("[RULER] Quick-play sweep from {:.3}s", self.anchor);
                    self.select_range(view, pos, within_click, mirror);
                }
            }
            MouseEventState::SelectingRange => {
                self.select_range(view, pos, within_click, mirror);
            }
        }
    }

    fn select_range(
        &self,
        view: &mut ViewInfo,
        pos: &mut QuickPlayPos,
        within_click: bool,
        mirror: bool,
    ) {
        if within_click {
            pos.time = self.anchor;
        }
        if pos.time < self.anchor {
            view.play_region.set_times(pos.time, self.anchor);
        } else {
            view.play_region.set_times(self.anchor, pos.time);
        }
        if mirror {
            mirror_selection(view);
        }
    }

    /// Finish the gesture and start playback
    ///
    /// Shift loops, control previews the region as cut. A region that was
    /// active at mouse-down is put back and re-activated afterwards.
    pub fn release(
        &mut self,
        ctx: &mut RulerContext<'_>,
        shift: bool,
        control: bool,
    ) -> Option<PlaybackRequest> {
        if self.button != MouseButton::Left {
            return None;
        }

        ctx.view.play_region.order();

        let track_start = ctx.tracks.start_time();
        let track_end = ctx.tracks.end_time();
        if release_clears_region(
            &ctx.view.play_region,
            &ctx.view.selection,
            track_start,
            track_end,
            shift,
        ) {
            log::debug!(
                "[RULER] Quick-play region [{:.3}, {:.3}] has nothing to play, clearing",
                ctx.view.play_region.start(),
                ctx.view.play_region.end()
            );
            clear_play_region(ctx);
        }

        self.state = MouseEventState::None;
        self.is_dragging = false;
        self.anchor = UNSET_TIME;

        let request = start_qp_play(ctx, shift, control);

        if self.prior_region.is_active() {
            ctx.view
                .play_region
                .set_times(self.prior_region.start(), self.prior_region.end());
            ctx.view.activate_play_region();
        }

        request
    }

    /// Put the region and selection back as they were at mouse-down
    pub fn cancel(&mut self, view: &mut ViewInfo) {
        if self.button != MouseButton::Left {
            return;
        }
        view.selection = self.prior_selection;
        self.state = MouseEventState::None;
        view.play_region.restore(&self.prior_region);
        log::debug!("[RULER] Quick-play gesture cancelled");
    }
}

/// Copy the region bounds onto the selection
fn mirror_selection(view: &mut ViewInfo) {
    let (start, end) = (view.play_region.start(), view.play_region.end());
    view.selection.set_t0(start, false);
    view.selection.set_t1(end, true);
}

/// Stop playback and unset the region bounds
pub(crate) fn clear_play_region(ctx: &mut RulerContext<'_>) {
    ctx.transport.stop();
    ctx.view.play_region.set_times(UNSET_TIME, UNSET_TIME);
}

/// Whether an ordered region left by a release has nothing worth playing
///
/// Regions may extend into white space before or after the tracks; they
/// are cleared only when they start after the end of all content, or end
/// before its start. A shift-click point is cleared when both it and the
/// selection are outside the content.
pub fn release_clears_region(
    region: &PlayRegion,
    selection: &SelectedRegion,
    track_start: Time,
    track_end: Time,
    shift: bool,
) -> bool {
    let start = region.start();
    if shift && region.is_empty() {
        let selection_outside = selection.t1() < track_start || selection.t0() > track_end;
        let point_outside = start < track_start || start > track_end;
        selection_outside && point_outside
    } else if start >= track_end {
        true
    } else {
        region.end() - start > 0.0 && region.end() < track_start
    }
}

/// Bounds playback should cover for `region`
///
/// Looping a point loops the selection if the point is strictly inside
/// it, otherwise the whole track span.
pub fn effective_play_span(
    region: &PlayRegion,
    selection: &SelectedRegion,
    tracks: &dyn TrackExtent,
    looped: bool,
) -> (Time, Time) {
    if region.is_empty() && looped {
        if selection.strictly_contains(region.start()) {
            (selection.t0(), selection.t1())
        } else {
            (tracks.start_time(), tracks.end_time())
        }
    } else {
        (region.start(), region.end())
    }
}

/// Restart playback over the play region
///
/// Nothing happens if the region is unset.
pub(crate) fn start_qp_play(
    ctx: &mut RulerContext<'_>,
    looped: bool,
    cut_preview: bool,
) -> Option<PlaybackRequest> {
    let region = &ctx.view.play_region;
    if region.start() < 0.0 {
        return None;
    }

    let (start, end) = effective_play_span(region, &ctx.view.selection, ctx.tracks, looped);

    // Looping a tiny span may stall playback; play it once instead
    let looped = looped && (end - start) > MIN_LOOP_DURATION;
    let cut_preview = cut_preview && !looped;

    let old_start = region.start();
    let options = PlayOptions {
        looped,
        start_time: if cut_preview { None } else { Some(old_start) },
        use_envelope: !cut_preview,
    };
    let mode = if cut_preview {
        PlayMode::CutPreview
    } else if looped {
        PlayMode::Looped
    } else {
        PlayMode::Normal
    };

    // Stop first: stopping may reset the region to the selection
    ctx.transport.stop();
    ctx.view.play_region.set_times(start, end);
    ctx.transport.play_region(start, end, mode, options);

    log::debug!(
        "[RULER] Quick-play {:?} [{:.3}, {:.3}]",
        mode,
        start,
        end
    );

    Some(PlaybackRequest {
        start,
        end,
        mode,
        options,
    })
}
