//! Frame acquisition backends

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::frame::VideoFrame;
use crate::CaptureError;

/// A stream of video frames. `Ok(None)` means the stream ended.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, CaptureError>;
}

/// Extensions `FileSource` will decode
const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            FRAME_EXTENSIONS.iter().any(|&e| e == ext)
        })
        .unwrap_or(false)
}

/// Replays a directory of image files, sorted by name, as a frame stream
pub struct FileSource {
    files: Vec<PathBuf>,
    cursor: usize,
}

impl FileSource {
    /// Scan `dir` for image files
    pub fn open(dir: &Path) -> Result<Self, CaptureError> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_frame_file(path))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(CaptureError::Open(format!(
                "no frame images in {}",
                dir.display()
            )));
        }

        info!(count = files.len(), dir = %dir.display(), "opened frame directory");
        Ok(Self { files, cursor: 0 })
    }

    /// Number of frames remaining
    pub fn remaining(&self) -> usize {
        self.files.len() - self.cursor
    }
}

impl FrameSource for FileSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, CaptureError> {
        let Some(path) = self.files.get(self.cursor) else {
            return Ok(None);
        };
        let img = image::open(path)
            .map_err(|e| CaptureError::Decode(format!("{}: {e}", path.display())))?
            .to_rgb8();

        debug!(frame = self.cursor, path = %path.display(), "decoded frame");
        let frame = VideoFrame::new(
            img.as_raw().clone(),
            img.width(),
            img.height(),
            self.cursor as u32,
        );
        self.cursor += 1;
        Ok(Some(frame))
    }
}

/// Generates flat mid-gray frames; stands in when no real feed is wired up
pub struct SyntheticSource {
    width: u32,
    height: u32,
    remaining: Option<u64>,
    sequence: u32,
}

impl SyntheticSource {
    /// Endless synthetic feed
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            remaining: None,
            sequence: 0,
        }
    }

    /// Synthetic feed that ends after `frames` frames
    pub fn bounded(width: u32, height: u32, frames: u64) -> Self {
        Self {
            width,
            height,
            remaining: Some(frames),
            sequence: 0,
        }
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, CaptureError> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Ok(None);
            }
            *remaining -= 1;
        }
        let frame = VideoFrame::new(
            vec![128; (self.width * self.height * 3) as usize],
            self.width,
            self.height,
            self.sequence,
        );
        self.sequence = self.sequence.wrapping_add(1);
        Ok(Some(frame))
    }
}
