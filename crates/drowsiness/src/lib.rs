//! Drowsiness Detection Core
//!
//! Converts per-frame facial landmarks into a debounced alarm decision:
//! - Eye aspect ratio (EAR) geometry from 6-point eye contours
//! - Consecutive-low-frame closure tracking with alarm re-arming
//! - Per-frame analysis output for overlay rendering and alarm dispatch

pub mod analysis;
pub mod config;
pub mod landmarks;
pub mod metrics;
pub mod state;

pub use analysis::{EarReading, FrameAnalysis};
pub use config::DrowsinessConfig;
pub use landmarks::{EyeLandmarks, FaceLandmarker, FaceLandmarks, Point2};
pub use state::{AlertState, ClosureTracker, NoFacePolicy};

use thiserror::Error;

/// Drowsiness detection error types
#[derive(Error, Debug)]
pub enum DrowsinessError {
    #[error("Eye contour requires exactly {expected} points, got {found}")]
    EyeContour { expected: usize, found: usize },

    #[error("Landmark set has {found} points, at least {required} required")]
    LandmarkCount { required: usize, found: usize },

    #[error("Landmark detection failed: {0}")]
    Detection(String),
}

/// Drowsiness detection module
///
/// Ties eye extraction, EAR geometry and the closure state machine together.
/// One instance tracks one monitoring session; all faces in a frame share
/// the same closure counter (last face processed decides the frame's state).
pub struct DrowsinessDetector {
    config: DrowsinessConfig,
    tracker: ClosureTracker,
}

impl DrowsinessDetector {
    /// Create a new detector with configuration
    pub fn new(config: DrowsinessConfig) -> Self {
        Self {
            config,
            tracker: ClosureTracker::new(),
        }
    }

    /// Analyze a single frame given the detected faces' landmarks
    pub fn analyze(&mut self, faces: &[FaceLandmarks]) -> Result<FrameAnalysis, DrowsinessError> {
        if faces.is_empty() {
            self.tracker.observe_absent(&self.config);
            return Ok(FrameAnalysis {
                face_detected: false,
                alert_active: self.tracker.alert_active(),
                ..Default::default()
            });
        }

        let mut readings = Vec::with_capacity(faces.len());
        let mut alarm_fired = false;
        for face in faces {
            let left = metrics::eye_aspect_ratio(&face.left_eye()?);
            let right = metrics::eye_aspect_ratio(&face.right_eye()?);
            let combined = metrics::combined_ear(left, right);
            alarm_fired |= self.tracker.observe(combined, &self.config);
            readings.push(EarReading {
                left,
                right,
                combined,
            });
        }

        Ok(FrameAnalysis {
            face_detected: true,
            faces: readings,
            alert_active: self.tracker.alert_active(),
            alarm_fired,
        })
    }

    /// Current closure tracker state
    pub fn tracker(&self) -> &ClosureTracker {
        &self.tracker
    }

    /// Reset tracking state (on operator change)
    pub fn reset(&mut self) {
        self.tracker.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::LANDMARK_COUNT;

    /// 68-point face whose eyes both have the given aspect ratio.
    fn face_with_ear(ear: f32) -> FaceLandmarks {
        let mut points = vec![Point2::default(); LANDMARK_COUNT];
        for (range, cx) in [(landmarks::LEFT_EYE, 200.0f32), (landmarks::RIGHT_EYE, 320.0)] {
            let slot = &mut points[range];
            let h = ear * 15.0;
            slot[0] = Point2::new(cx - 15.0, 150.0);
            slot[3] = Point2::new(cx + 15.0, 150.0);
            slot[1] = Point2::new(cx - 5.0, 150.0 - h);
            slot[5] = Point2::new(cx - 5.0, 150.0 + h);
            slot[2] = Point2::new(cx + 5.0, 150.0 - h);
            slot[4] = Point2::new(cx + 5.0, 150.0 + h);
        }
        FaceLandmarks::new(points)
    }

    fn detector() -> DrowsinessDetector {
        DrowsinessDetector::new(DrowsinessConfig::default())
    }

    #[test]
    fn test_end_to_end_banner_trajectory() {
        // [0.3]*10 + [0.1]*48 + [0.3]: banner rises exactly on frame 58.
        let mut det = detector();
        let mut fired = 0;
        for frame in 1..=59u32 {
            let ear = if (11..=58).contains(&frame) { 0.1 } else { 0.3 };
            let analysis = det.analyze(&[face_with_ear(ear)]).unwrap();
            if analysis.alarm_fired {
                fired += 1;
                assert_eq!(frame, 58);
            }
            assert_eq!(analysis.alert_active, frame == 58, "frame {frame}");
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_no_face_resets_by_default() {
        let mut det = detector();
        for _ in 0..47 {
            det.analyze(&[face_with_ear(0.1)]).unwrap();
        }
        let analysis = det.analyze(&[]).unwrap();
        assert!(!analysis.face_detected);
        assert_eq!(det.tracker().consecutive_low_frames(), 0);

        // The run was interrupted, so 48 more low frames are needed.
        for i in 0..47 {
            assert!(!det.analyze(&[face_with_ear(0.1)]).unwrap().alarm_fired, "frame {i}");
        }
        assert!(det.analyze(&[face_with_ear(0.1)]).unwrap().alarm_fired);
    }

    #[test]
    fn test_multi_face_last_face_wins() {
        let mut det = detector();
        // Drive to the brink with single closed-eye faces.
        for _ in 0..47 {
            det.analyze(&[face_with_ear(0.1)]).unwrap();
        }
        // Closed face transitions, open face then resets the shared state;
        // the dispatch decision from the earlier face still stands.
        let analysis = det
            .analyze(&[face_with_ear(0.1), face_with_ear(0.3)])
            .unwrap();
        assert!(analysis.alarm_fired);
        assert!(!analysis.alert_active);
        assert_eq!(analysis.faces.len(), 2);
        assert_eq!(det.tracker().consecutive_low_frames(), 0);
    }

    #[test]
    fn test_short_landmark_set_is_error() {
        let mut det = detector();
        let stub = FaceLandmarks::new(vec![Point2::default(); 30]);
        assert!(det.analyze(&[stub]).is_err());
    }
}
