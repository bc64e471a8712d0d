//! Frame Capture Library
//!
//! Provides the frame types and acquisition interfaces the monitoring loop
//! consumes:
//! - RGB video frames with grayscale conversion and resize
//! - `FrameSource` trait for pluggable acquisition backends
//! - Directory-of-images source for offline reprocessing
//! - Synthetic source for demo runs and tests

pub mod frame;
pub mod source;

pub use frame::{GrayFrame, VideoFrame};
pub use source::{FileSource, FrameSource, SyntheticSource};

use thiserror::Error;

/// Capture error types
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to open frame source: {0}")]
    Open(String),

    #[error("Failed to decode frame: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
