//! Sign identifiers, finger state, and recognition results

use crate::domain::landmarks::HandSkeleton;
use serde::{Deserialize, Serialize};

/// Newtype wrapper for sign identifiers to provide type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SignId(pub String);

impl SignId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SignId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Per-finger extension and touch summary derived from one skeleton
///
/// A pure function of the skeleton: identical input yields an identical
/// FingerState. All-false for an invalid skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
    /// Thumb tip within touch radius of index tip
    pub thumb_index_touch: bool,
    /// Thumb tip within touch radius of middle tip
    pub thumb_middle_touch: bool,
}

impl FingerState {
    /// Number of extended fingers, thumb included
    pub fn extended_count(&self) -> usize {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&extended| extended)
            .count()
    }

    /// Number of extended non-thumb fingers
    pub fn extended_non_thumb_count(&self) -> usize {
        [self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&extended| extended)
            .count()
    }
}

/// Outcome of one recognition call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Sign the engine settled on, if any
    pub recognized: Option<SignId>,
    /// Combined confidence in [0,1]
    pub confidence: f32,
    /// Whether the attempt cleared the precision threshold
    pub is_correct: bool,
    /// Sign the caller asked to validate
    pub expected: SignId,
    /// The skeleton the verdict was computed from, when a hand was seen
    pub skeleton: Option<HandSkeleton>,
}

impl RecognitionResult {
    /// Neutral result for "no hand detected" and "detector unavailable"
    pub fn no_hand(expected: SignId) -> Self {
        Self {
            recognized: None,
            confidence: 0.0,
            is_correct: false,
            expected,
            skeleton: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_counts() {
        let state = FingerState {
            thumb: true,
            index: true,
            middle: false,
            ring: false,
            pinky: true,
            ..Default::default()
        };
        assert_eq!(state.extended_count(), 3);
        assert_eq!(state.extended_non_thumb_count(), 2);
    }

    #[test]
    fn test_no_hand_result_shape() {
        let result = RecognitionResult::no_hand(SignId::from("open-hand"));
        assert!(result.recognized.is_none());
        assert_eq!(result.confidence, 0.0);
        assert!(!result.is_correct);
        assert!(result.skeleton.is_none());
        assert_eq!(result.expected.as_str(), "open-hand");
    }
}
