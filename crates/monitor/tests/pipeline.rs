//! End-to-end pipeline behavior

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alarm::{AlarmDispatcher, AudioBackend, PlaybackError};
use capture::frame::VideoFrame;
use capture::source::SyntheticSource;
use drowsiness::{DrowsinessConfig, DrowsinessDetector};
use monitor::overlay::{FrameSink, OverlayPlan};
use monitor::pipeline::{Command, Pipeline, PipelineConfig};
use monitor::scripted::ScriptedLandmarker;
use tokio::sync::mpsc;

struct CountingBackend(Arc<AtomicUsize>);

impl AudioBackend for CountingBackend {
    fn play(&self, _path: &Path) -> Result<(), PlaybackError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct RecordingSink(Arc<Mutex<Vec<bool>>>);

impl FrameSink for RecordingSink {
    fn present(&mut self, _frame: &VideoFrame, overlay: &OverlayPlan) -> anyhow::Result<()> {
        self.0.lock().unwrap().push(overlay.banner.is_some());
        Ok(())
    }
}

fn pipeline(
    script: Vec<Option<f32>>,
    frames: u64,
    plays: &Arc<AtomicUsize>,
    banners: &Arc<Mutex<Vec<bool>>>,
) -> Pipeline {
    let dispatcher = AlarmDispatcher::with_backend(
        Some("alarm.wav".into()),
        Arc::new(CountingBackend(Arc::clone(plays))),
    );
    Pipeline::new(
        PipelineConfig {
            display_width: 600,
            frame_interval: None,
        },
        Box::new(SyntheticSource::bounded(800, 600, frames)),
        Box::new(ScriptedLandmarker::new(script)),
        DrowsinessDetector::new(DrowsinessConfig::default()),
        dispatcher,
        Box::new(RecordingSink(Arc::clone(banners))),
    )
}

async fn wait_for_plays(plays: &Arc<AtomicUsize>, expected: usize) {
    for _ in 0..100 {
        if plays.load(Ordering::SeqCst) >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_scripted_closure_alarms_once_with_banner_trajectory() {
    // 10 open, 48 closed, 1 open: the alarm fires on overall frame 58.
    let mut script: Vec<Option<f32>> = vec![Some(0.3); 10];
    script.extend(std::iter::repeat(Some(0.1)).take(48));
    script.push(Some(0.3));

    let plays = Arc::new(AtomicUsize::new(0));
    let banners = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = pipeline(script, 59, &plays, &banners);

    let (tx, rx) = mpsc::channel(1);
    pipeline.run_to_completion(rx).await.unwrap();
    drop(tx);

    // The detached playback task may still be starting; give it a moment.
    wait_for_plays(&plays, 1).await;
    assert_eq!(plays.load(Ordering::SeqCst), 1);

    let banners = banners.lock().unwrap();
    assert_eq!(banners.len(), 59);
    for (i, &banner) in banners.iter().enumerate() {
        assert_eq!(banner, i == 57, "frame {}", i + 1);
    }
}

#[tokio::test]
async fn test_brief_closures_never_alarm() {
    // Repeated 47-frame closures, each broken by one open frame.
    let mut script = Vec::new();
    for _ in 0..3 {
        script.extend(std::iter::repeat(Some(0.1)).take(47));
        script.push(Some(0.3));
    }

    let plays = Arc::new(AtomicUsize::new(0));
    let banners = Arc::new(Mutex::new(Vec::new()));
    let frames = script.len() as u64;
    let mut pipeline = pipeline(script, frames, &plays, &banners);

    let (tx, rx) = mpsc::channel(1);
    pipeline.run_to_completion(rx).await.unwrap();
    drop(tx);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(plays.load(Ordering::SeqCst), 0);
    assert!(banners.lock().unwrap().iter().all(|&b| !b));
}

#[tokio::test]
async fn test_quit_command_stops_endless_feed() {
    let plays = Arc::new(AtomicUsize::new(0));
    let banners = Arc::new(Mutex::new(Vec::new()));

    let dispatcher = AlarmDispatcher::with_backend(
        Some("alarm.wav".into()),
        Arc::new(CountingBackend(Arc::clone(&plays))),
    );
    let mut pipeline = Pipeline::new(
        PipelineConfig {
            display_width: 600,
            frame_interval: None,
        },
        Box::new(SyntheticSource::new(800, 600)),
        Box::new(ScriptedLandmarker::blink_cycle(5, 5)),
        DrowsinessDetector::new(DrowsinessConfig::default()),
        dispatcher,
        Box::new(RecordingSink(Arc::clone(&banners))),
    );

    let (tx, rx) = mpsc::channel(1);
    tx.send(Command::Quit).await.unwrap();
    pipeline.run_to_completion(rx).await.unwrap();

    // The quit lands before any frame is processed.
    assert!(banners.lock().unwrap().is_empty());
}
