//! Single-slot alarm dispatch

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::playback::{AudioBackend, RodioPlayer};

/// Fire-and-forget alarm dispatcher
///
/// At most one playback runs at a time. A trigger while the slot is busy
/// is silently dropped, not queued: the alarm is already sounding.
pub struct AlarmDispatcher {
    sound: Option<PathBuf>,
    backend: Arc<dyn AudioBackend>,
    busy: Arc<AtomicBool>,
    accepting: bool,
    playback: Option<JoinHandle<()>>,
}

impl AlarmDispatcher {
    /// Dispatcher playing `sound` through the system audio output
    ///
    /// `None` disables the alarm entirely; `trigger` becomes a no-op.
    pub fn new(sound: Option<PathBuf>) -> Self {
        Self::with_backend(sound, Arc::new(RodioPlayer))
    }

    /// Dispatcher with a custom playback backend
    pub fn with_backend(sound: Option<PathBuf>, backend: Arc<dyn AudioBackend>) -> Self {
        if sound.is_none() {
            info!("alarm sound disabled");
        }
        Self {
            sound,
            backend,
            busy: Arc::new(AtomicBool::new(false)),
            accepting: true,
            playback: None,
        }
    }

    /// Start the alarm unless one is already sounding
    ///
    /// Never blocks: playback runs on a blocking worker thread. A playback
    /// failure is logged there, and the slot is released either way so a
    /// later episode can trigger again.
    pub fn trigger(&mut self) {
        if !self.accepting {
            return;
        }
        let Some(path) = self.sound.clone() else {
            return;
        };
        // Atomic claim: two racing triggers must not both observe "free".
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("alarm already sounding, trigger dropped");
            return;
        }

        info!(path = %path.display(), "starting alarm playback");
        let busy = Arc::clone(&self.busy);
        let backend = Arc::clone(&self.backend);
        self.playback = Some(tokio::task::spawn_blocking(move || {
            if let Err(e) = backend.play(&path) {
                warn!("alarm playback failed: {e}");
            }
            busy.store(false, Ordering::Release);
        }));
    }

    /// Whether a playback currently occupies the slot
    pub fn is_sounding(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Stop accepting triggers
    ///
    /// With `wait`, block on the in-flight playback; without, leave it
    /// detached to finish on its own (never forcibly killed).
    pub async fn shutdown(&mut self, wait: bool) {
        self.accepting = false;
        if let Some(playback) = self.playback.take() {
            if wait && playback.await.is_err() {
                warn!("alarm playback task panicked");
            }
        }
    }
}
