//! Drowsiness detection configuration

use serde::{Deserialize, Serialize};

use crate::state::NoFacePolicy;

/// Drowsiness detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrowsinessConfig {
    /// EAR below this counts as a closed-eye frame
    pub ear_threshold: f32,

    /// Closed-eye frames required before the alarm fires
    pub consecutive_frames: u32,

    /// Counter behavior when no face is detected
    pub no_face_policy: NoFacePolicy,
}

impl Default for DrowsinessConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.25,
            consecutive_frames: 48,
            no_face_policy: NoFacePolicy::Reset,
        }
    }
}

impl DrowsinessConfig {
    /// Create strict config (alarms sooner)
    pub fn strict() -> Self {
        Self {
            ear_threshold: 0.27,
            consecutive_frames: 30,
            ..Default::default()
        }
    }

    /// Create lenient config (tolerates longer closures)
    pub fn lenient() -> Self {
        Self {
            ear_threshold: 0.21,
            consecutive_frames: 72,
            ..Default::default()
        }
    }
}
