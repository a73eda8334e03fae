//! Landmark geometry primitives
//!
//! All predicates operate in the wrist-relative, scale-normalized frame
//! produced by `normalize`, which gives approximate translation and scale
//! invariance across hand sizes and camera distances. Rotation invariance
//! is deliberately not provided: the engine assumes an upright,
//! camera-facing hand.

use crate::domain::{landmark, LandmarkPoint, HAND_LANDMARK_COUNT};

/// Lateral/vertical margin for the finger extension test
pub const EXTENSION_MARGIN: f32 = 0.15;

/// Distance below which two landmarks count as touching
pub const TOUCH_RADIUS: f32 = 0.08;

/// Guard against near-zero palm scale in `normalize`
pub const NORMALIZE_EPSILON: f32 = 1e-3;

/// Named geometry thresholds, centrally defined and config-tunable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryThresholds {
    pub extension_margin: f32,
    pub touch_radius: f32,
    pub normalize_epsilon: f32,
}

impl Default for GeometryThresholds {
    fn default() -> Self {
        Self {
            extension_margin: EXTENSION_MARGIN,
            touch_radius: TOUCH_RADIUS,
            normalize_epsilon: NORMALIZE_EPSILON,
        }
    }
}

/// Euclidean distance between two landmarks in 3D
#[inline]
pub fn distance(p: LandmarkPoint, q: LandmarkPoint) -> f32 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    let dz = p.z - q.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Translate the wrist to the origin and scale uniformly by the
/// wrist-to-middle-finger-base distance
///
/// Returns the input unchanged when fewer than 21 points are supplied,
/// signalling invalidity to the caller rather than panicking.
pub fn normalize(points: &[LandmarkPoint], epsilon: f32) -> Vec<LandmarkPoint> {
    if points.len() < HAND_LANDMARK_COUNT {
        return points.to_vec();
    }

    let wrist = points[landmark::WRIST];
    let palm = distance(wrist, points[landmark::MIDDLE_MCP]);
    let scale = 1.0 / palm.max(epsilon);

    points
        .iter()
        .map(|p| LandmarkPoint::new((p.x - wrist.x) * scale, (p.y - wrist.y) * scale, (p.z - wrist.z) * scale))
        .collect()
}

/// Extension test for one finger's canonical joint chain
///
/// Non-thumb fingers extend vertically: the tip must sit above the PIP
/// joint by half the extension margin (lower y is higher on screen).
/// The thumb's joint axis makes its extension primarily lateral, so it
/// is tested as tip-to-MCP x displacement instead.
#[inline]
pub fn is_extended(
    mcp: LandmarkPoint,
    pip: LandmarkPoint,
    _dip: LandmarkPoint,
    tip: LandmarkPoint,
    is_thumb: bool,
    margin: f32,
) -> bool {
    if is_thumb {
        (tip.x - mcp.x).abs() > margin
    } else {
        tip.y < pip.y - margin / 2.0
    }
}

/// Proximity test: true iff the two landmarks are within the touch radius
#[inline]
pub fn is_touching(p: LandmarkPoint, q: LandmarkPoint, radius: f32) -> bool {
    distance(p, q) < radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand() -> Vec<LandmarkPoint> {
        // Wrist at (0.5, 0.9), middle MCP a palm's length above it
        let mut points = vec![LandmarkPoint::new(0.5, 0.9, 0.0); HAND_LANDMARK_COUNT];
        points[landmark::MIDDLE_MCP] = LandmarkPoint::new(0.5, 0.7, 0.0);
        points[landmark::INDEX_TIP] = LandmarkPoint::new(0.45, 0.4, 0.0);
        points
    }

    #[test]
    fn test_distance() {
        let p = LandmarkPoint::new(0.0, 0.0, 0.0);
        let q = LandmarkPoint::new(3.0, 4.0, 0.0);
        assert!((distance(p, q) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_moves_wrist_to_origin() {
        let normalized = normalize(&flat_hand(), NORMALIZE_EPSILON);
        let wrist = normalized[landmark::WRIST];
        assert!(wrist.x.abs() < 1e-6 && wrist.y.abs() < 1e-6 && wrist.z.abs() < 1e-6);

        // Palm reference distance becomes unit length
        let palm = distance(wrist, normalized[landmark::MIDDLE_MCP]);
        assert!((palm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_translation_scale_invariance() {
        let original = flat_hand();
        let transformed: Vec<LandmarkPoint> = original
            .iter()
            .map(|p| LandmarkPoint::new(p.x * 3.0 + 0.2, p.y * 3.0 - 0.1, p.z * 3.0))
            .collect();

        let a = normalize(&original, NORMALIZE_EPSILON);
        let b = normalize(&transformed, NORMALIZE_EPSILON);

        for (pa, pb) in a.iter().zip(b.iter()) {
            assert!((pa.x - pb.x).abs() < 1e-4);
            assert!((pa.y - pb.y).abs() < 1e-4);
            assert!((pa.z - pb.z).abs() < 1e-4);
        }
    }

    #[test]
    fn test_normalize_short_input_unchanged() {
        let points = vec![LandmarkPoint::new(0.3, 0.4, 0.0); 5];
        assert_eq!(normalize(&points, NORMALIZE_EPSILON), points);
    }

    #[test]
    fn test_normalize_degenerate_scale_guard() {
        // All 21 points coincident: epsilon keeps the scale finite
        let points = vec![LandmarkPoint::new(0.5, 0.5, 0.0); HAND_LANDMARK_COUNT];
        let normalized = normalize(&points, NORMALIZE_EPSILON);
        assert!(normalized.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_is_extended_non_thumb() {
        let mcp = LandmarkPoint::new(0.5, 0.6, 0.0);
        let pip = LandmarkPoint::new(0.5, 0.5, 0.0);
        let dip = LandmarkPoint::new(0.5, 0.45, 0.0);

        // Tip well above the PIP: extended
        let tip = LandmarkPoint::new(0.5, 0.3, 0.0);
        assert!(is_extended(mcp, pip, dip, tip, false, EXTENSION_MARGIN));

        // Tip barely above the PIP, inside the margin: not extended
        let tip = LandmarkPoint::new(0.5, 0.45, 0.0);
        assert!(!is_extended(mcp, pip, dip, tip, false, EXTENSION_MARGIN));

        // Curled tip below the PIP
        let tip = LandmarkPoint::new(0.5, 0.6, 0.0);
        assert!(!is_extended(mcp, pip, dip, tip, false, EXTENSION_MARGIN));
    }

    #[test]
    fn test_is_extended_thumb_lateral() {
        let mcp = LandmarkPoint::new(0.5, 0.6, 0.0);
        let pip = LandmarkPoint::new(0.45, 0.55, 0.0);
        let dip = LandmarkPoint::new(0.4, 0.55, 0.0);

        // Lateral displacement beyond the margin, either direction
        assert!(is_extended(mcp, pip, dip, LandmarkPoint::new(0.3, 0.55, 0.0), true, EXTENSION_MARGIN));
        assert!(is_extended(mcp, pip, dip, LandmarkPoint::new(0.7, 0.55, 0.0), true, EXTENSION_MARGIN));

        // Tucked thumb
        assert!(!is_extended(mcp, pip, dip, LandmarkPoint::new(0.55, 0.55, 0.0), true, EXTENSION_MARGIN));
    }

    #[test]
    fn test_is_touching() {
        let p = LandmarkPoint::new(0.5, 0.5, 0.0);
        assert!(is_touching(p, LandmarkPoint::new(0.54, 0.5, 0.0), TOUCH_RADIUS));
        assert!(!is_touching(p, LandmarkPoint::new(0.6, 0.5, 0.0), TOUCH_RADIUS));
    }
}
