//! Audio playback backends

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;

/// Playback error types
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Failed to open audio file: {0}")]
    Open(#[from] std::io::Error),

    #[error("No audio output device: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("Audio output failed: {0}")]
    Output(#[from] rodio::PlayError),

    #[error("Unsupported audio format: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// Blocking playback of one audio file to completion
///
/// Called only from the dispatcher's worker thread; the frame loop never
/// sees this interface directly.
pub trait AudioBackend: Send + Sync {
    fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}

/// Default backend: decode and play through the system output device
#[derive(Debug, Default)]
pub struct RodioPlayer;

impl AudioBackend for RodioPlayer {
    fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        let file = File::open(path)?;
        let (_stream, handle) = rodio::OutputStream::try_default()?;
        let sink = rodio::Sink::try_new(&handle)?;
        sink.append(rodio::Decoder::new(BufReader::new(file))?);
        sink.sleep_until_end();
        Ok(())
    }
}
