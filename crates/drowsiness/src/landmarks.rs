//! Facial landmark types and the detection seam
//!
//! Landmark localization itself is an external collaborator; this module
//! fixes the data contract: 68-point face sets in image pixel coordinates,
//! with the standard 6-point eye contours at indices 36..42 (left) and
//! 42..48 (right).

use std::ops::{Index, Range};

use capture::frame::GrayFrame;
use serde::{Deserialize, Serialize};

use crate::DrowsinessError;

/// Points in the standard facial landmark annotation
pub const LANDMARK_COUNT: usize = 68;

/// Left eye contour indices
pub const LEFT_EYE: Range<usize> = 36..42;

/// Right eye contour indices
pub const RIGHT_EYE: Range<usize> = 42..48;

/// Points in one eye contour
pub const EYE_POINT_COUNT: usize = 6;

/// 2-D point in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One eye contour: exactly 6 points in fixed order
///
/// Points 0 and 3 are the horizontal corners; (1,5) and (2,4) are the
/// vertical pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeLandmarks {
    points: [Point2; EYE_POINT_COUNT],
}

impl EyeLandmarks {
    pub fn new(points: [Point2; EYE_POINT_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a slice, rejecting anything but exactly 6 points
    pub fn from_slice(points: &[Point2]) -> Result<Self, DrowsinessError> {
        let points: [Point2; EYE_POINT_COUNT] =
            points
                .try_into()
                .map_err(|_| DrowsinessError::EyeContour {
                    expected: EYE_POINT_COUNT,
                    found: points.len(),
                })?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point2; EYE_POINT_COUNT] {
        &self.points
    }
}

impl Index<usize> for EyeLandmarks {
    type Output = Point2;

    fn index(&self, index: usize) -> &Point2 {
        &self.points[index]
    }
}

/// Full landmark set for one detected face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    points: Vec<Point2>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Left eye contour (indices 36..42)
    pub fn left_eye(&self) -> Result<EyeLandmarks, DrowsinessError> {
        self.eye(LEFT_EYE)
    }

    /// Right eye contour (indices 42..48)
    pub fn right_eye(&self) -> Result<EyeLandmarks, DrowsinessError> {
        self.eye(RIGHT_EYE)
    }

    fn eye(&self, range: Range<usize>) -> Result<EyeLandmarks, DrowsinessError> {
        let slice = self
            .points
            .get(range)
            .ok_or(DrowsinessError::LandmarkCount {
                required: RIGHT_EYE.end,
                found: self.points.len(),
            })?;
        EyeLandmarks::from_slice(slice)
    }
}

/// Facial landmark localization backend
///
/// Consumes a grayscale frame and produces one landmark set per detected
/// face, in detection order.
pub trait FaceLandmarker {
    fn landmarks(&mut self, frame: &GrayFrame) -> Result<Vec<FaceLandmarks>, DrowsinessError>;
}
