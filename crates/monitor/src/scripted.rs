//! Scripted landmark sequences
//!
//! Stands in for a real face model the way the reference detectors fall
//! back to synthetic output when none is configured; also drives the
//! end-to-end tests with exact eye-openness trajectories.

use capture::frame::GrayFrame;
use drowsiness::landmarks::{
    FaceLandmarker, FaceLandmarks, Point2, LANDMARK_COUNT, LEFT_EYE, RIGHT_EYE,
};
use drowsiness::DrowsinessError;

/// Build a synthetic 68-point face whose eyes both have the given EAR
pub fn face_with_ear(ear: f32) -> FaceLandmarks {
    let mut points = vec![Point2::default(); LANDMARK_COUNT];
    place_eye(&mut points[LEFT_EYE], 200.0, ear);
    place_eye(&mut points[RIGHT_EYE], 320.0, ear);
    FaceLandmarks::new(points)
}

/// Corners 30px apart; vertical pairs offset so the contour's aspect
/// ratio lands exactly on `ear`.
fn place_eye(slot: &mut [Point2], cx: f32, ear: f32) {
    let cy = 150.0;
    let h = ear * 15.0;
    slot[0] = Point2::new(cx - 15.0, cy);
    slot[3] = Point2::new(cx + 15.0, cy);
    slot[1] = Point2::new(cx - 5.0, cy - h);
    slot[5] = Point2::new(cx - 5.0, cy + h);
    slot[2] = Point2::new(cx + 5.0, cy - h);
    slot[4] = Point2::new(cx + 5.0, cy + h);
}

/// Landmarker that replays a fixed schedule of eye openness values
///
/// `None` entries produce a frame with no detected face.
pub struct ScriptedLandmarker {
    script: Vec<Option<f32>>,
    cursor: usize,
    repeat: bool,
}

impl ScriptedLandmarker {
    /// Play the script once, then report no faces
    pub fn new(script: Vec<Option<f32>>) -> Self {
        Self {
            script,
            cursor: 0,
            repeat: false,
        }
    }

    /// Endless open/closed cycle, the demo-mode feed
    pub fn blink_cycle(open_frames: usize, closed_frames: usize) -> Self {
        let mut script = vec![Some(0.32); open_frames];
        script.extend(std::iter::repeat(Some(0.08)).take(closed_frames));
        Self {
            script,
            cursor: 0,
            repeat: true,
        }
    }
}

impl FaceLandmarker for ScriptedLandmarker {
    fn landmarks(&mut self, _frame: &GrayFrame) -> Result<Vec<FaceLandmarks>, DrowsinessError> {
        if self.cursor >= self.script.len() {
            if !self.repeat || self.script.is_empty() {
                return Ok(Vec::new());
            }
            self.cursor = 0;
        }
        let entry = self.script[self.cursor];
        self.cursor += 1;
        Ok(entry.map(|ear| vec![face_with_ear(ear)]).unwrap_or_default())
    }
}
