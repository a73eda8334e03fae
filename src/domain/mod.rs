//! Domain models - core value types for hand landmarks and recognition
//!
//! This module contains the canonical data types used throughout the engine:
//! - `LandmarkPoint` / `HandSkeleton` - one detected hand as 21 anatomical points
//! - `LandmarkRecord` - the serializable `{x, y, z}` wire form
//! - `Handedness` - left/right/unknown detector classification
//! - `FingerState` - per-finger extension and touch summary
//! - `SignId` - sign identifier newtype
//! - `RecognitionResult` - outcome of one recognition call

pub mod landmarks;
pub mod sign;

// Re-export commonly used types
pub use landmarks::{
    landmark, HandSkeleton, Handedness, LandmarkPoint, LandmarkRecord, HAND_LANDMARK_COUNT,
};
pub use sign::{FingerState, RecognitionResult, SignId};
