//! The capture-detect-decide-render loop

use std::time::Duration;

use alarm::AlarmDispatcher;
use anyhow::{Context, Result};
use capture::source::FrameSource;
use drowsiness::landmarks::FaceLandmarker;
use drowsiness::DrowsinessDetector;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::overlay::{FrameSink, OverlayPlan};

/// Control commands for the running loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
}

/// Pipeline tuning knobs
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Width frames are resized to before detection
    pub display_width: u32,
    /// Delay between frames; `None` runs as fast as the source allows
    pub frame_interval: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            display_width: 600,
            frame_interval: Some(Duration::from_millis(1000 / 15)),
        }
    }
}

/// Drowsiness monitoring pipeline
///
/// Owns every stage from frame acquisition to alarm dispatch; one
/// instance runs one monitoring session.
pub struct Pipeline {
    config: PipelineConfig,
    source: Box<dyn FrameSource + Send>,
    landmarker: Box<dyn FaceLandmarker + Send>,
    detector: DrowsinessDetector,
    dispatcher: AlarmDispatcher,
    sink: Box<dyn FrameSink + Send>,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        source: Box<dyn FrameSource + Send>,
        landmarker: Box<dyn FaceLandmarker + Send>,
        detector: DrowsinessDetector,
        dispatcher: AlarmDispatcher,
        sink: Box<dyn FrameSink + Send>,
    ) -> Self {
        Self {
            config,
            source,
            landmarker,
            detector,
            dispatcher,
            sink,
        }
    }

    /// Run until the source is exhausted, a quit command arrives, or a
    /// frame fails; the caller owns the cleanup that follows
    async fn run(&mut self, commands: &mut mpsc::Receiver<Command>) -> Result<()> {
        info!("starting monitoring loop");
        let mut ticker = self.config.frame_interval.map(tokio::time::interval);
        let mut frames: u64 = 0;

        loop {
            // Non-blocking poll, the per-iteration analogue of a key check.
            match commands.try_recv() {
                Ok(Command::Quit) => {
                    info!("quit requested");
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    debug!("control channel closed");
                    break;
                }
            }

            match ticker.as_mut() {
                Some(ticker) => {
                    ticker.tick().await;
                }
                None => tokio::task::yield_now().await,
            }

            let Some(frame) = self.source.next_frame().context("frame acquisition failed")?
            else {
                info!(frames, "frame source exhausted");
                break;
            };

            let frame = frame.resize_to_width(self.config.display_width);
            let gray = frame.to_grayscale();
            let faces = self
                .landmarker
                .landmarks(&gray)
                .context("landmark detection failed")?;
            let analysis = self
                .detector
                .analyze(&faces)
                .context("drowsiness analysis failed")?;

            if analysis.alarm_fired {
                self.dispatcher.trigger();
            }

            let overlay = OverlayPlan::from_analysis(&analysis);
            self.sink
                .present(&frame, &overlay)
                .context("frame presentation failed")?;
            frames += 1;
        }

        Ok(())
    }

    /// Run to completion, then clean up
    ///
    /// Every exit (source exhausted, quit command, frame fault) funnels
    /// through the same cleanup; the dispatcher is shut down without
    /// waiting on an in-flight alarm.
    pub async fn run_to_completion(&mut self, mut commands: mpsc::Receiver<Command>) -> Result<()> {
        let result = self.run(&mut commands).await;
        if let Err(e) = &result {
            error!("monitoring loop failed: {e:#}");
        }
        self.shutdown().await;
        result
    }

    async fn shutdown(&mut self) {
        info!("cleaning up");
        self.dispatcher.shutdown(false).await;
    }
}
