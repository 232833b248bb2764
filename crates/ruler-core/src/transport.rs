//! Fire-and-forget requests from the ruler to the playback engine
//!
//! The ruler never waits on the engine. Requests are pushed onto a
//! lock-free SPSC queue that the engine drains on its own thread, and the
//! engine publishes its state through relaxed atomics that the ruler polls
//! on the next idle tick.
//!
//! ```ignore
//! let (mut transport, mut rx, atomics) = transport_channel();
//!
//! // UI thread
//! transport.play_region(2.0, 4.0, PlayMode::Looped, options);
//!
//! // Engine thread
//! while let Ok(cmd) = rx.pop() { engine.apply(cmd); }
//! atomics.set_audio_active(true);
//! ```

use crate::types::Time;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Capacity of the transport command queue
///
/// A quick-play release sends at most two commands (stop + play); the
/// headroom covers bursts of clicks while the engine thread is busy.
pub const TRANSPORT_QUEUE_CAPACITY: usize = 64;

/// How a region is played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Single pass from the start
    Normal,
    /// Repeat the region until stopped
    Looped,
    /// Single pass previewing the audio as if the region were cut
    CutPreview,
}

/// Extra playback parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayOptions {
    pub looped: bool,
    /// Time playback should actually begin at, if different from the region start
    pub start_time: Option<Time>,
    /// Apply the track gain envelope (off for cut preview)
    pub use_envelope: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            looped: false,
            start_time: None,
            use_envelope: true,
        }
    }
}

/// Requests sent from the UI thread to the playback engine
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCommand {
    Stop,
    Pause,
    PlayRegion {
        start: Time,
        end: Time,
        mode: PlayMode,
        options: PlayOptions,
    },
}

impl TransportCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Pause => "pause",
            Self::PlayRegion { .. } => "play_region",
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Transport command queue is full - dropped '{command}'")]
    QueueFull { command: &'static str },
}

/// Playback engine as seen by the ruler
pub trait Transport {
    fn stop(&mut self);
    fn pause(&mut self);
    fn play_region(&mut self, start: Time, end: Time, mode: PlayMode, options: PlayOptions);
    /// Whether playback or recording is running (polled, may lag one tick)
    fn is_audio_active(&self) -> bool;
    fn is_capturing(&self) -> bool;
}

/// Engine state readable from the UI thread without locking
///
/// Written by the engine thread; `Ordering::Relaxed` is enough since
/// only visibility is needed.
#[derive(Debug, Default)]
pub struct TransportAtomics {
    audio_active: AtomicBool,
    capturing: AtomicBool,
}

impl TransportAtomics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn audio_active(&self) -> bool {
        self.audio_active.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn capturing(&self) -> bool {
        self.capturing.load(Ordering::Relaxed)
    }

    pub fn set_audio_active(&self, active: bool) {
        self.audio_active.store(active, Ordering::Relaxed);
    }

    pub fn set_capturing(&self, capturing: bool) {
        self.capturing.store(capturing, Ordering::Relaxed);
    }
}

/// UI-side end of the transport queue
pub struct TransportHandle {
    producer: rtrb::Producer<TransportCommand>,
    atomics: Arc<TransportAtomics>,
}

impl TransportHandle {
    /// Push a command without blocking
    pub fn send(&mut self, command: TransportCommand) -> Result<(), TransportError> {
        let name = command.name();
        self.producer
            .push(command)
            .map_err(|_| TransportError::QueueFull { command: name })
    }

    pub fn atomics(&self) -> &Arc<TransportAtomics> {
        &self.atomics
    }

    fn send_logged(&mut self, command: TransportCommand) {
        if let Err(e) = self.send(command) {
            log::warn!("transport: {}", e);
        }
    }
}

impl Transport for TransportHandle {
    fn stop(&mut self) {
        self.send_logged(TransportCommand::Stop);
    }

    fn pause(&mut self) {
        self.send_logged(TransportCommand::Pause);
    }

    fn play_region(&mut self, start: Time, end: Time, mode: PlayMode, options: PlayOptions) {
        log::debug!(
            "transport: play [{:.3}, {:.3}] {:?} start_time={:?}",
            start,
            end,
            mode,
            options.start_time
        );
        self.send_logged(TransportCommand::PlayRegion {
            start,
            end,
            mode,
            options,
        });
    }

    fn is_audio_active(&self) -> bool {
        self.atomics.audio_active()
    }

    fn is_capturing(&self) -> bool {
        self.atomics.capturing()
    }
}

/// Create a transport queue
///
/// Returns the UI handle, the engine's consumer and the shared atomics
/// the engine writes its state to.
pub fn transport_channel() -> (
    TransportHandle,
    rtrb::Consumer<TransportCommand>,
    Arc<TransportAtomics>,
) {
    let (producer, consumer) = rtrb::RingBuffer::new(TRANSPORT_QUEUE_CAPACITY);
    let atomics = Arc::new(TransportAtomics::new());
    let handle = TransportHandle {
        producer,
        atomics: Arc::clone(&atomics),
    };
    (handle, consumer, atomics)
}
