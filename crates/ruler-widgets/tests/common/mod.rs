//! Recording doubles and a harness driving a RulerPanel through gestures

#![allow(dead_code)]

use ruler_core::{
    PlayMode, PlayOptions, RulerConfig, Scrubber, SelectedRegion, Time, TimeAxis, TrackSpan,
    Transport, TransportCommand, ViewInfo,
};
use ruler_widgets::{HandleResult, MouseButton, PointerEvent, RulerContext, RulerPanel};

/// y inside the quick-play zone
pub const QP_Y: i32 = 10;
/// y inside the scrub zone
pub const SCRUB_Y: i32 = 35;

#[derive(Default)]
pub struct RecordingTransport {
    pub commands: Vec<TransportCommand>,
    pub audio_active: bool,
    pub capturing: bool,
}

impl Transport for RecordingTransport {
    fn stop(&mut self) {
        self.commands.push(TransportCommand::Stop);
    }

    fn pause(&mut self) {
        self.commands.push(TransportCommand::Pause);
    }

    fn play_region(&mut self, start: Time, end: Time, mode: PlayMode, options: PlayOptions) {
        self.commands.push(TransportCommand::PlayRegion {
            start,
            end,
            mode,
            options,
        });
    }

    fn is_audio_active(&self) -> bool {
        self.audio_active
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }
}

#[derive(Default)]
pub struct RecordingScrubber {
    pub can_scrub: bool,
    pub shows_bar: bool,
    pub has_mark: bool,
    pub scrubbing: bool,
    pub transporting_pinned: bool,
    pub marks: Vec<(i32, bool, bool)>,
    pub cancels: usize,
    pub scroll_scrubbing: Vec<bool>,
}

impl Scrubber for RecordingScrubber {
    fn can_scrub(&self) -> bool {
        self.can_scrub
    }
    fn has_mark(&self) -> bool {
        self.has_mark
    }
    fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }
    fn seeks(&self) -> bool {
        false
    }
    fn temporarily_seeks(&self) -> bool {
        false
    }
    fn is_speed_playing(&self) -> bool {
        false
    }
    fn is_keyboard_scrubbing(&self) -> bool {
        false
    }
    fn shows_bar(&self) -> bool {
        self.shows_bar
    }
    fn is_transporting_pinned(&self) -> bool {
        self.transporting_pinned
    }
    fn mark_scrub_start(&mut self, x: i32, pinned: bool, seek: bool) {
        self.marks.push((x, pinned, seek));
        self.has_mark = true;
    }
    fn cancel(&mut self) {
        self.cancels += 1;
        self.has_mark = false;
    }
    fn set_scroll_scrubbing(&mut self, scroll: bool) {
        self.scroll_scrubbing.push(scroll);
    }
}

/// A 1000px ruler at 100 px/s, so x = 100 * t
pub struct Harness {
    pub panel: RulerPanel,
    pub view: ViewInfo,
    pub tracks: TrackSpan,
    pub transport: RecordingTransport,
    pub scrubber: RecordingScrubber,
}

impl Harness {
    pub fn new(track_end: Time, selection: (Time, Time)) -> Self {
        Self::with_config(track_end, selection, RulerConfig::default())
    }

    pub fn with_config(track_end: Time, selection: (Time, Time), config: RulerConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut view = ViewInfo::new(TimeAxis::new(0.0, 100.0, 0, 1000));
        view.selection = SelectedRegion::new(selection.0, selection.1);

        let mut panel = RulerPanel::new(config);
        panel.resize(1000, true, 400);
        // The inactive region follows the selection
        panel.on_selection_change(&mut view);

        Self {
            panel,
            view,
            tracks: TrackSpan::new(0.0, track_end),
            transport: RecordingTransport::default(),
            scrubber: RecordingScrubber {
                can_scrub: true,
                shows_bar: true,
                ..Default::default()
            },
        }
    }

    pub fn split(&mut self) -> (&mut RulerPanel, RulerContext<'_>) {
        (
            &mut self.panel,
            RulerContext {
                view: &mut self.view,
                tracks: &self.tracks,
                transport: &mut self.transport,
                scrubber: &mut self.scrubber,
            },
        )
    }

    pub fn press(&mut self, event: PointerEvent) -> HandleResult {
        let (panel, mut ctx) = self.split();
        panel.mouse_down(&mut ctx, &event)
    }

    pub fn move_to(&mut self, event: PointerEvent) -> HandleResult {
        let (panel, mut ctx) = self.split();
        panel.mouse_move(&mut ctx, &event)
    }

    pub fn release(&mut self, event: PointerEvent) -> HandleResult {
        let (panel, mut ctx) = self.split();
        panel.mouse_up(&mut ctx, &event)
    }

    pub fn cancel(&mut self) -> HandleResult {
        let (panel, mut ctx) = self.split();
        panel.cancel(&mut ctx)
    }

    /// Left press at `x` in the quick-play zone
    pub fn left_down(&mut self, x: i32) -> HandleResult {
        self.press(PointerEvent::new(x, QP_Y).with_button(MouseButton::Left))
    }

    /// Drag with the left button held
    pub fn drag(&mut self, x: i32, shift: bool) -> HandleResult {
        self.move_to(PointerEvent::new(x, QP_Y).with_shift(shift))
    }

    pub fn left_up(&mut self, x: i32, shift: bool) -> HandleResult {
        self.release(
            PointerEvent::new(x, QP_Y)
                .with_button(MouseButton::Left)
                .with_shift(shift),
        )
    }

    pub fn region(&self) -> (Time, Time) {
        (self.view.play_region.start(), self.view.play_region.end())
    }
}
