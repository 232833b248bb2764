//! Link to the asynchronous scrub poller
//!
//! Scrubbing (variable-speed preview following the mouse) and seeking
//! (normal-speed playback with skips) are run by an external poller that
//! reads live mouse state on its own schedule. The ruler only marks the
//! start of a scrub, cancels it, and reads the poller's state back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Capacity of the scrub command queue
pub const SCRUB_QUEUE_CAPACITY: usize = 32;

/// Requests sent from the ruler to the scrub poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubCommand {
    /// Start watching the mouse from pixel column `x`
    MarkStart { x: i32, pinned: bool, seek: bool },
    Cancel,
    /// Switch between scrolling-view and fixed-view scrubbing
    SetScrollScrubbing(bool),
}

impl ScrubCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarkStart { .. } => "mark_start",
            Self::Cancel => "cancel",
            Self::SetScrollScrubbing(_) => "set_scroll_scrubbing",
        }
    }
}

#[derive(Debug, Error)]
pub enum ScrubError {
    #[error("Scrub command queue is full - dropped '{command}'")]
    QueueFull { command: &'static str },
}

/// The scrub poller as seen by the ruler
pub trait Scrubber {
    /// Whether a scrub may be started right now
    fn can_scrub(&self) -> bool;
    /// A scrub or seek start has been marked and the poller is watching
    fn has_mark(&self) -> bool;
    /// Scrubbing or seeking is producing audio
    fn is_scrubbing(&self) -> bool;
    /// The marked session seeks rather than scrubs
    fn seeks(&self) -> bool;
    /// Seeking because the button is held during a scrub
    fn temporarily_seeks(&self) -> bool;
    fn is_speed_playing(&self) -> bool;
    fn is_keyboard_scrubbing(&self) -> bool;
    /// The scrub bar is shown below the quick-play zone
    fn shows_bar(&self) -> bool;
    /// Playback is running with a pinned play head
    fn is_transporting_pinned(&self) -> bool;

    fn mark_scrub_start(&mut self, x: i32, pinned: bool, seek: bool);
    fn cancel(&mut self);
    fn set_scroll_scrubbing(&mut self, scroll: bool);
}

/// Poller state readable from the UI thread
///
/// Written by the poller; relaxed ordering as with transport state.
#[derive(Debug, Default)]
pub struct ScrubAtomics {
    pub can_scrub: AtomicBool,
    pub has_mark: AtomicBool,
    pub scrubbing: AtomicBool,
    pub seeking: AtomicBool,
    pub temporarily_seeking: AtomicBool,
    pub speed_playing: AtomicBool,
    pub keyboard_scrubbing: AtomicBool,
    pub shows_bar: AtomicBool,
    pub transporting_pinned: AtomicBool,
}

impl ScrubAtomics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn get(flag: &AtomicBool) -> bool {
        flag.load(Ordering::Relaxed)
    }

    pub fn set(flag: &AtomicBool, value: bool) {
        flag.store(value, Ordering::Relaxed);
    }
}

/// UI-side end of the scrub queue
pub struct ScrubberLink {
    producer: rtrb::Producer<ScrubCommand>,
    atomics: Arc<ScrubAtomics>,
}

impl ScrubberLink {
    pub fn send(&mut self, command: ScrubCommand) -> Result<(), ScrubError> {
        let name = command.name();
        self.producer
            .push(command)
            .map_err(|_| ScrubError::QueueFull { command: name })
    }

    pub fn atomics(&self) -> &Arc<ScrubAtomics> {
        &self.atomics
    }
}

impl Scrubber for ScrubberLink {
    fn can_scrub(&self) -> bool {
        ScrubAtomics::get(&self.atomics.can_scrub)
    }

    fn has_mark(&self) -> bool {
        ScrubAtomics::get(&self.atomics.has_mark)
    }

    fn is_scrubbing(&self) -> bool {
        ScrubAtomics::get(&self.atomics.scrubbing)
    }

    fn seeks(&self) -> bool {
        ScrubAtomics::get(&self.atomics.seeking)
    }

    fn temporarily_seeks(&self) -> bool {
        ScrubAtomics::get(&self.atomics.temporarily_seeking)
    }

    fn is_speed_playing(&self) -> bool {
        ScrubAtomics::get(&self.atomics.speed_playing)
    }

    fn is_keyboard_scrubbing(&self) -> bool {
        ScrubAtomics::get(&self.atomics.keyboard_scrubbing)
    }

    fn shows_bar(&self) -> bool {
        ScrubAtomics::get(&self.atomics.shows_bar)
    }

    fn is_transporting_pinned(&self) -> bool {
        ScrubAtomics::get(&self.atomics.transporting_pinned)
    }

    fn mark_scrub_start(&mut self, x: i32, pinned: bool, seek: bool) {
        match self.send(ScrubCommand::MarkStart { x, pinned, seek }) {
            // Set locally so a second click before the poller's next tick
            // does not mark again
            Ok(()) => ScrubAtomics::set(&self.atomics.has_mark, true),
            Err(e) => log::warn!("scrubber: {}", e),
        }
    }

    fn cancel(&mut self) {
        if let Err(e) = self.send(ScrubCommand::Cancel) {
            log::warn!("scrubber: {}", e);
        }
        ScrubAtomics::set(&self.atomics.has_mark, false);
        ScrubAtomics::set(&self.atomics.scrubbing, false);
    }

    fn set_scroll_scrubbing(&mut self, scroll: bool) {
        if let Err(e) = self.send(ScrubCommand::SetScrollScrubbing(scroll)) {
            log::warn!("scrubber: {}", e);
        }
    }
}

/// Create a scrub queue: the ruler's link, the poller's consumer and the shared state
pub fn scrub_channel() -> (
    ScrubberLink,
    rtrb::Consumer<ScrubCommand>,
    Arc<ScrubAtomics>,
) {
    let (producer, consumer) = rtrb::RingBuffer::new(SCRUB_QUEUE_CAPACITY);
    let atomics = Arc::new(ScrubAtomics::new());
    let link = ScrubberLink {
        producer,
        atomics: Arc::clone(&atomics),
    };
    (link, consumer, atomics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_sets_local_mark() {
        let (mut link, mut rx, atomics) = scrub_channel();
        ScrubAtomics::set(&atomics.can_scrub, true);
        assert!(link.can_scrub());
        assert!(!link.has_mark());

        link.mark_scrub_start(120, true, false);
        assert!(link.has_mark());
        assert_eq!(
            rx.pop().unwrap(),
            ScrubCommand::MarkStart {
                x: 120,
                pinned: true,
                seek: false
            }
        );
    }

    #[test]
    fn test_cancel_clears_mark() {
        let (mut link, mut rx, atomics) = scrub_channel();
        link.mark_scrub_start(10, false, false);
        ScrubAtomics::set(&atomics.scrubbing, true);
        link.cancel();
        assert!(!link.has_mark());
        assert!(!link.is_scrubbing());
        let _ = rx.pop();
        assert_eq!(rx.pop().unwrap(), ScrubCommand::Cancel);
    }

    #[test]
    fn test_full_queue_does_not_mark() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (mut link, _rx, _atomics) = scrub_channel();
        for _ in 0..SCRUB_QUEUE_CAPACITY {
            link.send(ScrubCommand::SetScrollScrubbing(true)).unwrap();
        }
        link.mark_scrub_start(5, false, false);
        assert!(!link.has_mark());
        link.set_scroll_scrubbing(false);
        link.cancel();
        assert!(!link.has_mark());
    }
}
