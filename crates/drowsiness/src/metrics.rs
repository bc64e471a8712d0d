//! Eye aspect ratio geometry

use crate::landmarks::EyeLandmarks;

/// Compute the eye aspect ratio (EAR) from a 6-point eye contour
///
/// A and B are the two vertical landmark distances, C the horizontal
/// corner distance; the ratio is (A + B) / (2C). Open eyes sit around
/// 0.3, dropping toward 0 as the eye closes.
///
/// A degenerate contour with C == 0 yields `f32::INFINITY`: it reads as
/// fully open downstream and clears the closure counter instead of
/// crashing the frame loop.
pub fn eye_aspect_ratio(eye: &EyeLandmarks) -> f32 {
    let a = eye[1].distance(&eye[5]);
    let b = eye[2].distance(&eye[4]);
    let c = eye[0].distance(&eye[3]);

    if c == 0.0 {
        return f32::INFINITY;
    }
    (a + b) / (2.0 * c)
}

/// Single per-face openness value: the average of both eyes
pub fn combined_ear(left: f32, right: f32) -> f32 {
    (left + right) / 2.0
}
