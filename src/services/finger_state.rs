//! Finger state derivation from a hand skeleton
//!
//! Applies the extension test to each finger's canonical joint chain and
//! the touch test to the thumb-index and thumb-middle tip pairs, all in
//! the normalized frame. Deterministic and side-effect free.

use crate::domain::{landmark, FingerState, HandSkeleton, LandmarkPoint};
use crate::services::geometry::{self, GeometryThresholds};

/// Derives a `FingerState` from one skeleton
#[derive(Debug, Clone, Copy, Default)]
pub struct FingerStateAnalyzer {
    thresholds: GeometryThresholds,
}

impl FingerStateAnalyzer {
    pub fn new(thresholds: GeometryThresholds) -> Self {
        Self { thresholds }
    }

    /// Compute the per-finger summary; all-false for an invalid skeleton
    pub fn analyze(&self, skeleton: &HandSkeleton) -> FingerState {
        if !skeleton.is_valid() {
            return FingerState::default();
        }
        let points = geometry::normalize(&skeleton.points, self.thresholds.normalize_epsilon);
        self.analyze_normalized(&points)
    }

    /// Same derivation over points already in the normalized frame
    pub fn analyze_normalized(&self, points: &[LandmarkPoint]) -> FingerState {
        let margin = self.thresholds.extension_margin;
        let finger = |mcp: usize, pip: usize, dip: usize, tip: usize, is_thumb: bool| {
            geometry::is_extended(points[mcp], points[pip], points[dip], points[tip], is_thumb, margin)
        };

        FingerState {
            // The thumb has no DIP joint; its IP fills both slots and
            // the extension test only reads the MCP and tip anyway
            thumb: finger(
                landmark::THUMB_MCP,
                landmark::THUMB_IP,
                landmark::THUMB_IP,
                landmark::THUMB_TIP,
                true,
            ),
            index: finger(
                landmark::INDEX_MCP,
                landmark::INDEX_PIP,
                landmark::INDEX_DIP,
                landmark::INDEX_TIP,
                false,
            ),
            middle: finger(
                landmark::MIDDLE_MCP,
                landmark::MIDDLE_PIP,
                landmark::MIDDLE_DIP,
                landmark::MIDDLE_TIP,
                false,
            ),
            ring: finger(
                landmark::RING_MCP,
                landmark::RING_PIP,
                landmark::RING_DIP,
                landmark::RING_TIP,
                false,
            ),
            pinky: finger(
                landmark::PINKY_MCP,
                landmark::PINKY_PIP,
                landmark::PINKY_DIP,
                landmark::PINKY_TIP,
                false,
            ),
            thumb_index_touch: geometry::is_touching(
                points[landmark::THUMB_TIP],
                points[landmark::INDEX_TIP],
                self.thresholds.touch_radius,
            ),
            thumb_middle_touch: geometry::is_touching(
                points[landmark::THUMB_TIP],
                points[landmark::MIDDLE_TIP],
                self.thresholds.touch_radius,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HandSkeleton, Handedness, HAND_LANDMARK_COUNT};

    /// Fist at rest: wrist at (0.5, 0.9), palm pointing up, every tip
    /// curled back level with its PIP
    fn fist() -> HandSkeleton {
        let mut points = vec![LandmarkPoint::new(0.5, 0.7, 0.0); HAND_LANDMARK_COUNT];
        points[landmark::WRIST] = LandmarkPoint::new(0.5, 0.9, 0.0);
        points[landmark::MIDDLE_MCP] = LandmarkPoint::new(0.5, 0.7, 0.0);
        HandSkeleton::new(points, Handedness::Right, 0.99)
    }

    /// Open hand: every non-thumb tip raised well above its PIP, thumb
    /// tip displaced laterally from its MCP
    fn open_hand() -> HandSkeleton {
        let mut skeleton = fist();
        let tips_pips: [(usize, usize); 4] = [
            (landmark::INDEX_TIP, landmark::INDEX_PIP),
            (landmark::MIDDLE_TIP, landmark::MIDDLE_PIP),
            (landmark::RING_TIP, landmark::RING_PIP),
            (landmark::PINKY_TIP, landmark::PINKY_PIP),
        ];
        for (tip, pip) in tips_pips {
            skeleton.points[pip] = LandmarkPoint::new(0.5, 0.6, 0.0);
            skeleton.points[tip] = LandmarkPoint::new(0.5, 0.4, 0.0);
        }
        skeleton.points[landmark::THUMB_MCP] = LandmarkPoint::new(0.5, 0.7, 0.0);
        skeleton.points[landmark::THUMB_TIP] = LandmarkPoint::new(0.42, 0.65, 0.0);
        skeleton
    }

    #[test]
    fn test_fist_has_no_extended_fingers() {
        let analyzer = FingerStateAnalyzer::default();
        let state = analyzer.analyze(&fist());
        assert_eq!(state.extended_count(), 0);
    }

    #[test]
    fn test_open_hand_all_extended() {
        let analyzer = FingerStateAnalyzer::default();
        let state = analyzer.analyze(&open_hand());
        assert!(state.thumb && state.index && state.middle && state.ring && state.pinky);
        assert_eq!(state.extended_count(), 5);
    }

    #[test]
    fn test_thumb_index_touch_detected() {
        let mut skeleton = fist();
        skeleton.points[landmark::THUMB_TIP] = LandmarkPoint::new(0.48, 0.6, 0.0);
        skeleton.points[landmark::INDEX_TIP] = LandmarkPoint::new(0.48, 0.6, 0.0);

        let analyzer = FingerStateAnalyzer::default();
        let state = analyzer.analyze(&skeleton);
        assert!(state.thumb_index_touch);
    }

    #[test]
    fn test_invalid_skeleton_all_false() {
        let skeleton = HandSkeleton::new(
            vec![LandmarkPoint::default(); 10],
            Handedness::Unknown,
            0.5,
        );
        let analyzer = FingerStateAnalyzer::default();
        assert_eq!(analyzer.analyze(&skeleton), FingerState::default());
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let analyzer = FingerStateAnalyzer::default();
        let skeleton = open_hand();
        assert_eq!(analyzer.analyze(&skeleton), analyzer.analyze(&skeleton));
    }
}
