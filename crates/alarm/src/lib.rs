//! Audible Alarm System
//!
//! Fire-and-forget alarm playback that never stalls the frame loop:
//! exactly one playback slot, atomic claim, silent drop while sounding.

mod dispatcher;
mod playback;

pub use dispatcher::AlarmDispatcher;
pub use playback::{AudioBackend, PlaybackError, RodioPlayer};
