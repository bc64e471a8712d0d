//! Overlay planning and frame presentation

use anyhow::Result;
use capture::frame::VideoFrame;
use drowsiness::analysis::FrameAnalysis;
use tracing::info;

/// Warning banner text shown while the alert is active
pub const ALERT_BANNER: &str = "DROWSINESS ALERT!";

/// Text overlays to draw on a presented frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayPlan {
    /// Full-width warning banner, present while the alert is active
    pub banner: Option<&'static str>,
    /// EAR readout for the face that decided the frame's state
    pub ear_label: Option<String>,
}

impl OverlayPlan {
    pub fn from_analysis(analysis: &FrameAnalysis) -> Self {
        Self {
            banner: analysis.alert_active.then_some(ALERT_BANNER),
            ear_label: analysis.display_ear().map(|ear| format!("EAR: {ear:.2}")),
        }
    }
}

/// Presentation backend for processed frames
///
/// On-screen rendering is an external concern; the loop only hands each
/// frame and its overlay plan to whatever sink is wired in.
pub trait FrameSink {
    fn present(&mut self, frame: &VideoFrame, overlay: &OverlayPlan) -> Result<()>;
}

/// Sink that reports overlay transitions to the log instead of a window
#[derive(Debug, Default)]
pub struct LogSink {
    last_banner: Option<&'static str>,
    frames: u64,
}

impl FrameSink for LogSink {
    fn present(&mut self, _frame: &VideoFrame, overlay: &OverlayPlan) -> Result<()> {
        self.frames += 1;
        if overlay.banner != self.last_banner {
            match overlay.banner {
                Some(text) => info!(frame = self.frames, "{text}"),
                None => info!(frame = self.frames, "alert cleared"),
            }
            self.last_banner = overlay.banner;
        }
        Ok(())
    }
}
