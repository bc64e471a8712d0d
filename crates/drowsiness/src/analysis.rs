//! Per-frame analysis results

use serde::{Deserialize, Serialize};

/// EAR readings for one detected face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarReading {
    /// Left eye EAR
    pub left: f32,
    /// Right eye EAR
    pub right: f32,
    /// Average of the two eyes, the value the state machine consumes
    pub combined: f32,
}

/// Complete per-frame drowsiness analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Whether any face was detected this frame
    pub face_detected: bool,

    /// Per-face EAR readings, in detection order
    pub faces: Vec<EarReading>,

    /// Show the alert banner (state is AlarmTriggered after this frame)
    pub alert_active: bool,

    /// True exactly when this frame transitioned into AlarmTriggered
    pub alarm_fired: bool,
}

impl FrameAnalysis {
    /// EAR of the last face processed (the one that decided the state)
    pub fn display_ear(&self) -> Option<f32> {
        self.faces.last().map(|face| face.combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_ear_uses_last_face() {
        let analysis = FrameAnalysis {
            face_detected: true,
            faces: vec![
                EarReading {
                    left: 0.30,
                    right: 0.30,
                    combined: 0.30,
                },
                EarReading {
                    left: 0.10,
                    right: 0.12,
                    combined: 0.11,
                },
            ],
            alert_active: false,
            alarm_fired: false,
        };
        assert_eq!(analysis.display_ear(), Some(0.11));
    }

    #[test]
    fn test_display_ear_absent_without_faces() {
        assert!(FrameAnalysis::default().display_ear().is_none());
    }
}
