//! Temporal eye-closure state machine

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DrowsinessConfig;

/// Alarm state of the monitoring session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlertState {
    /// Eyes open, or closure not yet sustained
    #[default]
    Alert,
    /// Closure held past the consecutive-frame count
    AlarmTriggered,
}

/// Counter behavior when a frame contains no detectable face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoFacePolicy {
    /// Treat a missing face like an open-eye frame: clear the counter
    #[default]
    Reset,
    /// Freeze the counter and state until a face reappears
    Hold,
}

/// Debounced closure tracking (counter + alarm state)
///
/// One tracker is shared across all faces in a frame; the last face
/// observed decides the frame's final state.
///
/// Invariant: `AlarmTriggered` implies the counter reached the configured
/// consecutive-frame count and no high-EAR frame has reset it since.
#[derive(Debug, Clone, Default)]
pub struct ClosureTracker {
    consecutive_low_frames: u32,
    state: AlertState,
}

impl ClosureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one combined EAR observation
    ///
    /// Returns true exactly on the Alert -> AlarmTriggered transition; the
    /// caller dispatches the audible alarm on that edge and never again
    /// while the state holds. The comparison is strict: an EAR exactly at
    /// the threshold counts as open.
    pub fn observe(&mut self, ear: f32, config: &DrowsinessConfig) -> bool {
        if ear < config.ear_threshold {
            self.consecutive_low_frames += 1;
            if self.consecutive_low_frames >= config.consecutive_frames
                && self.state == AlertState::Alert
            {
                self.state = AlertState::AlarmTriggered;
                info!(
                    frames = self.consecutive_low_frames,
                    "sustained eye closure, raising alarm"
                );
                return true;
            }
        } else {
            self.consecutive_low_frames = 0;
            self.state = AlertState::Alert;
        }
        false
    }

    /// Feed a frame with no detectable face
    pub fn observe_absent(&mut self, config: &DrowsinessConfig) {
        match config.no_face_policy {
            NoFacePolicy::Reset => {
                self.consecutive_low_frames = 0;
                self.state = AlertState::Alert;
            }
            NoFacePolicy::Hold => {}
        }
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Whether the alert banner should be shown
    ///
    /// Tracks "should display alert", not "audio still playing": a single
    /// high-EAR frame clears it even mid-playback.
    pub fn alert_active(&self) -> bool {
        self.state == AlertState::AlarmTriggered
    }

    pub fn consecutive_low_frames(&self) -> u32 {
        self.consecutive_low_frames
    }

    /// Reset to the initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
