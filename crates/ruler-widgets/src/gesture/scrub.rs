//! Scrub zone gesture
//!
//! A left press marks a scrub start with the scrubber. After that the
//! scrubber's own poller follows the pointer; this side only keeps the
//! button and answers status text.

use ruler_core::{Scrubber, Transport};

use super::{HandleResult, MouseButton};

#[derive(Debug, Clone)]
pub struct ScrubGesture {
    button: MouseButton,
}

impl ScrubGesture {
    /// Press in the scrub zone at column `x`
    ///
    /// Yields no gesture when scrubbing is not possible right now.
    pub fn click(
        scrubber: &mut dyn Scrubber,
        button: MouseButton,
        x: i32,
        pinned: bool,
    ) -> (Option<Self>, HandleResult) {
        if button == MouseButton::Left {
            if !(scrubber.can_scrub() && scrubber.shows_bar()) {
                return (None, HandleResult::cancelled());
            }
            if !scrubber.has_mark() {
                log::debug!("[RULER] Marking scrub start at x={} (pinned: {})", x, pinned);
                scrubber.mark_scrub_start(x, pinned, false);
            }
        }
        (Some(Self { button }), HandleResult::redraw())
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }

    pub fn cancel(&self, scrubber: &mut dyn Scrubber, transport: &mut dyn Transport) -> HandleResult {
        if self.button == MouseButton::Left {
            scrubber.cancel();
            transport.stop();
        }
        HandleResult::redraw()
    }
}

/// Status text for the scrub zone
pub fn scrubbing_message(scrubber: &dyn Scrubber, clicked: bool) -> &'static str {
    if !scrubber.has_mark() {
        return "Click & move to Scrub. Click & drag to Seek.";
    }
    match (clicked, scrubber.is_scrubbing()) {
        // Button is down, so mention dragging first
        (true, true) => "Drag to Seek. Release to stop seeking.",
        (true, false) => "Drag to Seek. Release and move to Scrub.",
        (false, _) => "Move to Scrub. Drag to Seek.",
    }
}
