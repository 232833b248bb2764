//! The ruler panel: routes pointer input to gestures and tracks what to redraw
//!
//! Everything runs on the UI thread. The panel holds no references into the
//! project; each call receives a [`RulerContext`] with the view, the track
//! extent and the playback collaborators for the duration of that call.

use ruler_core::{
    PlayRegion, RulerConfig, Scrubber, SelectedRegion, SnapEngine, Time, TrackExtent, Transport,
    ViewInfo,
};

use crate::canvas::{RulerInput, RulerScene, SceneRegion};
use crate::gesture::{
    self, hit_target, pinned_head_x, scrubbing_message, Gesture, HandleResult, HitTarget,
    MouseButton, MouseEventState, PlayRegionGesture, PlaybackRequest, PlayheadGesture,
    PointerEvent, QuickPlayPos, ScrubGesture,
};
use crate::layout::{RulerCell, RulerLayout};
use crate::menu::{quick_play_menu, MenuChoice, RulerMenuAction, RulerMenuItem};
use crate::overlay::{IndicatorOverlayModel, OverlayInputs};

/// Collaborators the ruler reads and drives during one call
pub struct RulerContext<'a> {
    pub view: &'a mut ViewInfo,
    pub tracks: &'a dyn TrackExtent,
    pub transport: &'a mut dyn Transport,
    pub scrubber: &'a mut dyn Scrubber,
}

/// Events for the host, collected until [`RulerPanel::take_notifications`]
#[derive(Debug, Clone, PartialEq)]
pub enum RulerNotification {
    /// The ruler changed a preference; persist it
    ConfigChanged(RulerConfig),
    /// A right-click was released over a cell
    ShowMenu(MenuChoice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RulerCursor {
    #[default]
    Default,
    Hand,
    ResizeHorizontal,
}

/// Status text, tooltip and cursor for the pointer's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RulerPreview {
    pub message: &'static str,
    pub tooltip: &'static str,
    pub cursor: RulerCursor,
}

/// What an idle tick found out of date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdleReport {
    pub refresh_ruler: bool,
    pub redraw_overlays: bool,
}

const PLAYHEAD_MESSAGE: &str = "Click and drag to adjust, double-click to reset";
const PLAYHEAD_TOOLTIP: &str = "Record/Play head";
const RECORDING_TOOLTIP: &str = "Timeline actions disabled during recording";

/// View state the ruler was last painted with
#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawnState {
    selection: SelectedRegion,
    last_active: (Time, Time),
    generation: u64,
    h: Time,
    zoom: f64,
    active: bool,
}

impl DrawnState {
    fn capture(view: &ViewInfo) -> Self {
        Self {
            selection: view.selection,
            last_active: view.play_region.last_active_bounds(),
            generation: view.play_region.generation(),
            h: view.axis.h(),
            zoom: view.axis.zoom(),
            active: view.play_region.is_active(),
        }
    }
}

pub struct RulerPanel {
    config: RulerConfig,
    layout: RulerLayout,
    layout_changed: bool,
    gesture: Option<Gesture>,
    /// Cell under the pointer; `None` once it left the ruler
    hover_cell: Option<RulerCell>,
    hover_pos: Option<(i32, i32)>,
    quick_play: QuickPlayPos,
    is_recording: bool,
    overlays: IndicatorOverlayModel,
    drawn: Option<DrawnState>,
    notifications: Vec<RulerNotification>,
}

impl RulerPanel {
    pub fn new(config: RulerConfig) -> Self {
        Self {
            config: config.validate(),
            layout: RulerLayout::default(),
            layout_changed: true,
            gesture: None,
            hover_cell: None,
            hover_pos: None,
            quick_play: QuickPlayPos::default(),
            is_recording: false,
            overlays: IndicatorOverlayModel::default(),
            drawn: None,
            notifications: Vec::new(),
        }
    }

    // =========================================================================
    // Configuration and geometry
    // =========================================================================

    pub fn config(&self) -> &RulerConfig {
        &self.config
    }

    /// Replace the preferences, e.g. after the host reloaded them
    pub fn set_config(&mut self, config: RulerConfig, view: &mut ViewInfo) {
        self.config = config.validate();
        view.update_track_indicator = self.config.display.auto_scroll;
    }

    /// Lay the ruler out for a new width or scrub bar visibility
    pub fn resize(&mut self, width: i32, show_scrub_bar: bool, track_panel_height: i32) {
        if self.layout.update(width, show_scrub_bar) {
            self.layout_changed = true;
        }
        self.overlays
            .set_heights(self.layout.height(), track_panel_height);
    }

    pub fn layout(&self) -> &RulerLayout {
        &self.layout
    }

    pub fn overlays(&self) -> &IndicatorOverlayModel {
        &self.overlays
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn quick_play_pos(&self) -> QuickPlayPos {
        self.quick_play
    }

    pub fn hover_cell(&self) -> Option<RulerCell> {
        self.hover_cell
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn mouse_event_state(&self) -> MouseEventState {
        self.gesture
            .as_ref()
            .map_or(MouseEventState::None, Gesture::mouse_event_state)
    }

    pub fn take_notifications(&mut self) -> Vec<RulerNotification> {
        std::mem::take(&mut self.notifications)
    }

    fn config_changed(&mut self) {
        self.notifications
            .push(RulerNotification::ConfigChanged(self.config.clone()));
    }

    // =========================================================================
    // Quick-play position
    // =========================================================================

    /// Recompute the quick-play time for pointer column `x`
    ///
    /// Returns `x` clamped to the track area.
    pub fn update_quick_play_pos(&mut self, ctx: &RulerContext<'_>, x: i32, shift: bool) -> i32 {
        let axis = &ctx.view.axis;
        let left = axis.left_offset();
        let x = x.max(left).min(left + axis.usable_width() - 1);

        let time = axis.pos_to_time(x);
        let selection = ctx.view.selection;
        let snap = SnapEngine::new(axis, [selection.t0(), selection.t1()])
            .with_tolerance(self.config.snap.tolerance_px)
            .snap(time);

        let mut pos = QuickPlayPos {
            time: snap.time,
            unsnapped: time,
            snapped: snap.snapped,
        };

        // Without shift (looping), quick-play stops at the end of the tracks
        let over_quick_play = self.hover_cell == Some(RulerCell::QuickPlay)
            || matches!(self.gesture, Some(Gesture::PlayRegion(_)));
        if over_quick_play && !shift {
            pos.time = pos.time.min(ctx.tracks.end_time());
        }

        self.quick_play = pos;
        x
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    pub fn handle_input(&mut self, ctx: &mut RulerContext<'_>, input: RulerInput) -> HandleResult {
        match input {
            RulerInput::Pressed(event) => self.mouse_down(ctx, &event),
            RulerInput::Moved(event) => self.mouse_move(ctx, &event),
            RulerInput::Released(event) => self.mouse_up(ctx, &event),
            RulerInput::Left => self.pointer_left(),
            RulerInput::Cancel => self.cancel(ctx),
        }
    }

    pub fn mouse_down(&mut self, ctx: &mut RulerContext<'_>, event: &PointerEvent) -> HandleResult {
        let Some(button) = event.button else {
            return HandleResult::default();
        };
        if self.gesture.is_some() {
            return HandleResult::default();
        }

        self.hover_pos = Some((event.x, event.y));
        self.hover_cell = self.layout.hit_test(event.x, event.y);

        let target = hit_target(
            &self.layout,
            ctx,
            self.config.playhead.pinned_fraction,
            self.is_recording,
            event.x,
            event.y,
        );

        match target {
            HitTarget::Nothing | HitTarget::Blocked => HandleResult::default(),
            HitTarget::Playhead => {
                let (gesture, result) = PlayheadGesture::click(&mut self.config.playhead, event);
                if event.double_click {
                    self.config_changed();
                }
                self.gesture = gesture.map(Gesture::Playhead);
                result
            }
            HitTarget::Cell(RulerCell::QuickPlay) => {
                // Counts as the quick-play cell from here on for capping
                let x = self.update_quick_play_pos(ctx, event.x, event.shift);
                let gesture = PlayRegionGesture::click(
                    ctx,
                    button,
                    &mut self.quick_play,
                    x,
                    self.config.quick_play.drag_selection,
                );
                self.gesture = Some(Gesture::PlayRegion(gesture));
                HandleResult::redraw()
            }
            HitTarget::Cell(RulerCell::Scrub) => {
                self.update_quick_play_pos(ctx, event.x, event.shift);
                let (gesture, result) = ScrubGesture::click(
                    ctx.scrubber,
                    button,
                    event.x,
                    self.config.playhead.pinned,
                );
                self.gesture = gesture.map(Gesture::Scrub);
                result
            }
        }
    }

    pub fn mouse_move(&mut self, ctx: &mut RulerContext<'_>, event: &PointerEvent) -> HandleResult {
        self.hover_pos = Some((event.x, event.y));

        let Some(gesture) = self.gesture.as_ref() else {
            // Hovering
            self.hover_cell = self.layout.hit_test(event.x, event.y);
            if self.hover_cell.is_some() && !self.is_recording {
                self.update_quick_play_pos(ctx, event.x, event.shift);
            }
            return HandleResult::redraw();
        };
        let button = gesture.button();
        let is_playhead = matches!(gesture, Gesture::Playhead(_));
        if button != MouseButton::Left {
            return HandleResult::default();
        }

        let x = if is_playhead {
            event.x
        } else {
            self.update_quick_play_pos(ctx, event.x, event.shift)
        };

        match self.gesture.as_mut() {
            Some(Gesture::PlayRegion(g)) => {
                g.drag(
                    ctx.view,
                    &mut self.quick_play,
                    x,
                    self.config.quick_play.drag_selection,
                );
                HandleResult::redraw()
            }
            Some(Gesture::Playhead(g)) => g.drag(&mut self.config.playhead, &ctx.view.axis, x),
            // The scrub poller follows the pointer on its own
            Some(Gesture::Scrub(_)) | None => HandleResult::redraw(),
        }
    }

    pub fn mouse_up(&mut self, ctx: &mut RulerContext<'_>, event: &PointerEvent) -> HandleResult {
        let Some(mut gesture) = self.gesture.take() else {
            return HandleResult::default();
        };
        self.hover_pos = Some((event.x, event.y));
        self.hover_cell = self.layout.hit_test(event.x, event.y);

        if gesture.button() == MouseButton::Right {
            let choice = match gesture {
                Gesture::Scrub(_) => MenuChoice::Scrub,
                _ => MenuChoice::QuickPlay,
            };
            self.notifications.push(RulerNotification::ShowMenu(choice));
            return HandleResult::menu(choice);
        }

        match &mut gesture {
            Gesture::PlayRegion(g) => {
                g.release(ctx, event.shift, event.control);
                HandleResult::redraw()
            }
            Gesture::Playhead(g) => {
                let result = g.release(&mut self.config.playhead, &ctx.view.axis, event.x);
                self.config_changed();
                result
            }
            Gesture::Scrub(_) => HandleResult::redraw(),
        }
    }

    /// The pointer left the ruler
    pub fn pointer_left(&mut self) -> HandleResult {
        self.hover_cell = None;
        self.hover_pos = None;
        HandleResult::redraw()
    }

    /// Abandon the gesture in progress, restoring what it changed
    pub fn cancel(&mut self, ctx: &mut RulerContext<'_>) -> HandleResult {
        let Some(mut gesture) = self.gesture.take() else {
            return HandleResult::default();
        };
        match &mut gesture {
            Gesture::PlayRegion(g) => g.cancel(ctx.view),
            Gesture::Scrub(g) => {
                g.cancel(ctx.scrubber, ctx.transport);
            }
            Gesture::Playhead(g) => {
                g.cancel(&mut self.config.playhead);
            }
        }
        HandleResult::cancelled()
    }

    // =========================================================================
    // Play region operations
    // =========================================================================

    /// Set the region bounds from outside the ruler
    ///
    /// Ignored while a play-region gesture is live. Returns whether it applied.
    pub fn set_play_region(&mut self, view: &mut ViewInfo, start: Time, end: Time) -> bool {
        if self.mouse_event_state() != MouseEventState::None {
            log::debug!("[RULER] Ignoring play region update during a gesture");
            return false;
        }
        view.play_region.set_times(start, end);
        true
    }

    /// Stop playback and unset the region bounds
    pub fn clear_play_region(&mut self, ctx: &mut RulerContext<'_>) {
        gesture::clear_play_region(ctx);
    }

    /// Start playback over the play region, see [`PlayRegionGesture::release`]
    pub fn start_quick_play(
        &mut self,
        ctx: &mut RulerContext<'_>,
        looped: bool,
        cut_preview: bool,
    ) -> Option<PlaybackRequest> {
        gesture::start_qp_play(ctx, looped, cut_preview)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// The selection changed; an inactive region follows it
    pub fn on_selection_change(&mut self, view: &mut ViewInfo) {
        if !view.play_region.is_active() {
            let selection = view.selection;
            self.set_play_region(view, selection.t0(), selection.t1());
        }
    }

    /// Playback or capture started or stopped
    pub fn on_audio_start_stop(&mut self, ctx: &mut RulerContext<'_>, capture: bool, started: bool) {
        if capture {
            if started {
                log::info!("[RULER] Recording started, timeline gestures disabled");
                self.is_recording = true;
                self.cancel(ctx);
                self.hover_cell = None;
            } else {
                log::info!("[RULER] Recording stopped");
                self.is_recording = false;
            }
        }
        if !started {
            self.on_selection_change(ctx.view);
        }
    }

    /// Recompute overlays and check whether the ruler itself needs repainting
    pub fn on_idle(&mut self, ctx: &RulerContext<'_>) -> IdleReport {
        let view = &*ctx.view;
        let refresh_ruler = self.layout_changed
            || self
                .drawn
                .map_or(true, |drawn| drawn != DrawnState::capture(view));

        let inputs = OverlayInputs {
            axis: &view.axis,
            quick_play: self.quick_play,
            hover_cell: self.hover_cell,
            gesture_live: self.gesture.is_some(),
            audio_active: ctx.transport.is_audio_active(),
            latest_end: ctx.tracks.end_time().max(view.selection.t1()),
            scrubber: &*ctx.scrubber,
        };
        self.overlays.update(&inputs);

        IdleReport {
            refresh_ruler,
            redraw_overlays: self.overlays.dirty(),
        }
    }

    /// The host painted the ruler and overlays with the current state
    pub fn mark_drawn(&mut self, view: &ViewInfo) {
        self.drawn = Some(DrawnState::capture(view));
        self.layout_changed = false;
        self.overlays.commit();
    }

    // =========================================================================
    // Preview, menus and drawing
    // =========================================================================

    /// Status text, tooltip and cursor for the pointer at `(x, y)`
    pub fn preview(&self, ctx: &RulerContext<'_>, x: i32, y: i32) -> RulerPreview {
        let tooltips = self.config.quick_play.timeline_tooltips;

        let target = match &self.gesture {
            Some(Gesture::PlayRegion(g)) => {
                return self.quick_play_preview(ctx, g.prior_region(), x, true)
            }
            Some(Gesture::Scrub(g)) => {
                return scrub_preview(&*ctx.scrubber, g.button() == MouseButton::Left, tooltips)
            }
            Some(Gesture::Playhead(_)) => HitTarget::Playhead,
            None => hit_target(
                &self.layout,
                ctx,
                self.config.playhead.pinned_fraction,
                self.is_recording,
                x,
                y,
            ),
        };

        match target {
            HitTarget::Playhead => RulerPreview {
                message: PLAYHEAD_MESSAGE,
                tooltip: PLAYHEAD_TOOLTIP,
                cursor: RulerCursor::ResizeHorizontal,
            },
            HitTarget::Blocked => RulerPreview {
                tooltip: if tooltips { RECORDING_TOOLTIP } else { "" },
                ..RulerPreview::default()
            },
            HitTarget::Cell(RulerCell::Scrub) => scrub_preview(&*ctx.scrubber, false, tooltips),
            HitTarget::Cell(RulerCell::QuickPlay) => {
                self.quick_play_preview(ctx, &ctx.view.play_region, x, false)
            }
            HitTarget::Nothing => RulerPreview::default(),
        }
    }

    fn quick_play_preview(
        &self,
        ctx: &RulerContext<'_>,
        region: &PlayRegion,
        x: i32,
        clicked: bool,
    ) -> RulerPreview {
        let message = if ctx.scrubber.has_mark() {
            scrubbing_message(&*ctx.scrubber, false)
        } else {
            ""
        };
        let axis = &ctx.view.axis;
        let show_arrows = clicked
            || axis.is_within_marker(x, region.start())
            || axis.is_within_marker(x, region.end());
        RulerPreview {
            message,
            tooltip: "",
            cursor: if show_arrows {
                RulerCursor::ResizeHorizontal
            } else {
                RulerCursor::Hand
            },
        }
    }

    /// Items for a cell's context menu
    ///
    /// The scrub zone's menu is the scrubber's own and is empty here.
    pub fn menu(&self, choice: MenuChoice, view: &ViewInfo) -> Vec<RulerMenuItem> {
        match choice {
            MenuChoice::QuickPlay => quick_play_menu(&self.config, view),
            MenuChoice::Scrub => Vec::new(),
        }
    }

    pub fn apply_menu_action(&mut self, ctx: &mut RulerContext<'_>, action: RulerMenuAction) {
        log::debug!("[RULER] Menu action {:?}", action);
        match action {
            RulerMenuAction::ToggleDragSelection => {
                self.config.quick_play.drag_selection = !self.config.quick_play.drag_selection;
                self.config_changed();
            }
            RulerMenuAction::ToggleAutoScroll => {
                let value = !ctx.view.update_track_indicator;
                ctx.view.update_track_indicator = value;
                self.config.display.auto_scroll = value;
                self.config_changed();
            }
            RulerMenuAction::TogglePlayRegion => ctx.view.toggle_play_region(),
            RulerMenuAction::ClearPlayRegion => ctx.view.clear_play_region(),
            RulerMenuAction::SetPlayRegionToSelection => ctx.view.set_play_region_to_selection(),
            RulerMenuAction::TogglePinnedHead => {
                let value = !self.config.playhead.pinned;
                self.config.playhead.pinned = value;
                if ctx.scrubber.has_mark() {
                    ctx.scrubber.set_scroll_scrubbing(value);
                }
                self.config_changed();
            }
        }
    }

    /// Snapshot of everything the canvas paints
    pub fn scene(&self, ctx: &RulerContext<'_>) -> RulerScene {
        let view = &*ctx.view;
        let axis = &view.axis;

        let (start, end) = view.play_region.last_active_bounds();
        let region = (start >= 0.0 && end >= 0.0).then(|| SceneRegion {
            left: axis.time_to_pos(start.min(end)) as f32,
            right: axis.time_to_pos(start.max(end)) as f32,
            active: view.play_region.is_active(),
        });

        let pinned_head = (self.config.playhead.pinned && ctx.transport.is_audio_active())
            .then(|| pinned_head_x(axis, self.config.playhead.pinned_fraction) as f32);

        let cursor = self
            .hover_pos
            .map_or(RulerCursor::Default, |(x, y)| self.preview(ctx, x, y).cursor);

        RulerScene {
            width: self.layout.outer().width,
            height: self.layout.outer().height,
            inner: self.layout.inner(),
            scrub_zone: self
                .layout
                .shows_scrub_bar()
                .then(|| self.layout.scrub_zone()),
            region,
            indicator: self.overlays.indicator.state().pending(),
            pinned_head,
            cursor,
        }
    }
}

fn scrub_preview(scrubber: &dyn Scrubber, clicked: bool, tooltips: bool) -> RulerPreview {
    let message = scrubbing_message(scrubber, clicked);
    RulerPreview {
        message,
        tooltip: if tooltips { message } else { "" },
        cursor: RulerCursor::Default,
    }
}
