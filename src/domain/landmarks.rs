//! Hand landmark types following the MediaPipe 21-point convention
//!
//! A detected hand is a fixed sequence of 21 anatomical points:
//! wrist (0), thumb (1-4), index (5-8), middle (9-12), ring (13-16),
//! pinky (17-20). Consumers treat any other length as invalid and
//! never partially process a skeleton.

use serde::{Deserialize, Serialize};

/// Number of landmarks in a complete hand skeleton
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Landmark indices (MediaPipe hand landmark model convention)
pub mod landmark {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A single hand landmark in 3D
///
/// x and y are normalized to [0,1] relative to image width/height;
/// z is depth relative to the wrist.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Serializable `{x, y, z}` record — the wire form used for stored
/// reference skeletons and collected samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<LandmarkPoint> for LandmarkRecord {
    fn from(p: LandmarkPoint) -> Self {
        Self { x: p.x, y: p.y, z: p.z }
    }
}

impl From<LandmarkRecord> for LandmarkPoint {
    fn from(r: LandmarkRecord) -> Self {
        Self { x: r.x, y: r.y, z: r.z }
    }
}

/// Which hand the detector classified the skeleton as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    pub fn as_str(&self) -> &str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
            Handedness::Unknown => "unknown",
        }
    }
}

/// One detected hand: 21 landmarks, handedness, detection confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandSkeleton {
    pub points: Vec<LandmarkPoint>,
    #[serde(default)]
    pub handedness: Handedness,
    #[serde(default)]
    pub confidence: f32,
}

impl HandSkeleton {
    pub fn new(points: Vec<LandmarkPoint>, handedness: Handedness, confidence: f32) -> Self {
        Self { points, handedness, confidence }
    }

    /// A skeleton is valid iff it carries exactly 21 points
    pub fn is_valid(&self) -> bool {
        self.points.len() == HAND_LANDMARK_COUNT
    }

    pub fn point(&self, index: usize) -> LandmarkPoint {
        self.points[index]
    }

    /// Export as ordered `{x, y, z}` records for persistence
    pub fn to_records(&self) -> Vec<LandmarkRecord> {
        self.points.iter().copied().map(LandmarkRecord::from).collect()
    }

    /// Build a skeleton from stored records
    ///
    /// Returns None unless exactly 21 records are supplied; a partial
    /// payload is never loaded.
    pub fn from_records(records: &[LandmarkRecord]) -> Option<Self> {
        if records.len() != HAND_LANDMARK_COUNT {
            return None;
        }
        Some(Self {
            points: records.iter().copied().map(LandmarkPoint::from).collect(),
            handedness: Handedness::Unknown,
            confidence: 1.0,
        })
    }
}
