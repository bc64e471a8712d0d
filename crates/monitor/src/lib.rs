//! Drowsiness Monitor Application
//!
//! Wires the capture, detection, and alarm subsystems into the
//! capture-detect-decide-render loop, with quit/interrupt handling and a
//! single guaranteed cleanup path.

pub mod overlay;
pub mod pipeline;
pub mod scripted;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
