//! DrowseWatch - drowsiness monitoring entry point

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing::{info, warn};

use alarm::AlarmDispatcher;
use capture::source::{FileSource, FrameSource, SyntheticSource};
use drowsiness::{DrowsinessConfig, DrowsinessDetector, NoFacePolicy};
use monitor::overlay::LogSink;
use monitor::pipeline::{Command, Pipeline, PipelineConfig};
use monitor::scripted::ScriptedLandmarker;

/// Real-time eye-closure monitoring with an audible alarm.
#[derive(Parser)]
#[command(name = "drowsewatch", version)]
struct Cli {
    /// Directory of frame images to process instead of a live feed.
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Alarm sound file; an empty value disables the alarm.
    #[arg(long, default_value = "alarm.wav")]
    alarm: String,

    /// EAR below this counts as a closed-eye frame.
    #[arg(long, default_value = "0.25")]
    ear_threshold: f32,

    /// Closed-eye frames required before the alarm fires.
    #[arg(long, default_value = "48")]
    consecutive_frames: u32,

    /// Freeze the closure counter when no face is visible instead of
    /// resetting it.
    #[arg(long)]
    hold_on_no_face: bool,

    /// Width frames are resized to before detection.
    #[arg(long, default_value = "600")]
    width: u32,

    /// Frame-rate cap (0 = as fast as the source allows).
    #[arg(long, default_value = "15")]
    fps: u32,
}

/// Quit key and interrupt signal both feed the same command channel.
fn spawn_control_listeners(tx: mpsc::Sender<Command>) {
    let interrupt_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received");
            let _ = interrupt_tx.send(Command::Quit).await;
        }
    });

    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().eq_ignore_ascii_case("q") {
                info!("quit key pressed");
                let _ = tx.send(Command::Quit).await;
                break;
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    monitor::init_logging();
    let cli = Cli::parse();

    info!("=== DrowseWatch v{} ===", env!("CARGO_PKG_VERSION"));

    let source: Box<dyn FrameSource + Send> = match &cli.frames {
        Some(dir) => {
            info!(dir = %dir.display(), "reading frames from disk");
            Box::new(FileSource::open(dir)?)
        }
        None => {
            warn!("no frame directory given, running on the synthetic feed");
            Box::new(SyntheticSource::new(cli.width, cli.width * 3 / 4))
        }
    };

    // No landmark model is wired in; the scripted blink sequence stands in
    // for one, opening long enough to settle and closing past the
    // consecutive-frame count so the alarm path is exercised.
    warn!("no landmark model configured, using scripted landmarker");
    let landmarker = Box::new(ScriptedLandmarker::blink_cycle(
        90,
        cli.consecutive_frames as usize + 12,
    ));

    let detector = DrowsinessDetector::new(DrowsinessConfig {
        ear_threshold: cli.ear_threshold,
        consecutive_frames: cli.consecutive_frames,
        no_face_policy: if cli.hold_on_no_face {
            NoFacePolicy::Hold
        } else {
            NoFacePolicy::Reset
        },
    });

    let alarm_sound = (!cli.alarm.is_empty()).then(|| PathBuf::from(&cli.alarm));
    let dispatcher = AlarmDispatcher::new(alarm_sound);

    let config = PipelineConfig {
        display_width: cli.width,
        frame_interval: (cli.fps > 0).then(|| Duration::from_secs_f64(1.0 / cli.fps as f64)),
    };

    let (tx, rx) = mpsc::channel(4);
    spawn_control_listeners(tx);

    let mut pipeline = Pipeline::new(
        config,
        source,
        landmarker,
        detector,
        dispatcher,
        Box::new(LogSink::default()),
    );
    pipeline.run_to_completion(rx).await?;

    info!("exiting");
    Ok(())
}
