//! Ruler Core - time axis, play region and transport model for the timeline ruler
//!
//! Everything here is UI-toolkit free. The interaction layer lives in
//! `ruler-widgets` and drives these types from mouse events and idle ticks.

pub mod axis;
pub mod config;
pub mod play_region;
pub mod scrub;
pub mod snap;
pub mod transport;
pub mod types;
pub mod view;

pub use axis::{Fisheye, TimeAxis};
pub use config::{default_config_path, load_config, save_config, RulerConfig};
pub use play_region::PlayRegion;
pub use scrub::{scrub_channel, ScrubAtomics, ScrubCommand, ScrubError, Scrubber, ScrubberLink};
pub use snap::{SnapEngine, SnapResults};
pub use transport::{
    transport_channel, PlayMode, PlayOptions, Transport, TransportAtomics, TransportCommand,
    TransportError, TransportHandle,
};
pub use types::*;
pub use view::ViewInfo;
