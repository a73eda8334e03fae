//! Continuous similarity between a live skeleton and a stored reference
//!
//! Complements the rule classifier for signs without (or in addition to)
//! a hand-authored rule. Both skeletons are normalized independently,
//! then the mean per-point distance is mapped linearly onto [0,1]. The
//! falloff factor and zero floor are hand-tuned calibration constants:
//! a perfectly aligned pair scores ~1, a mean distance of 0.5 normalized
//! units or more floors at 0.

use crate::domain::HandSkeleton;
use crate::services::geometry::{self, GeometryThresholds};

/// Linear falloff applied to the mean per-point distance
pub const SIMILARITY_FALLOFF: f32 = 2.0;

/// Scores a live skeleton against a reference for the same sign
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    thresholds: GeometryThresholds,
    falloff: f32,
}

impl SimilarityScorer {
    pub fn new(thresholds: GeometryThresholds, falloff: f32) -> Self {
        Self { thresholds, falloff }
    }

    /// Similarity in [0,1]; 0.0 when either skeleton is invalid
    pub fn compare(&self, detected: &HandSkeleton, reference: &HandSkeleton) -> f32 {
        if !detected.is_valid() || !reference.is_valid() {
            return 0.0;
        }

        let a = geometry::normalize(&detected.points, self.thresholds.normalize_epsilon);
        let b = geometry::normalize(&reference.points, self.thresholds.normalize_epsilon);

        let total: f32 = a
            .iter()
            .zip(b.iter())
            .map(|(&p, &q)| geometry::distance(p, q))
            .sum();
        let mean = total / a.len() as f32;

        (1.0 - self.falloff * mean).max(0.0)
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(GeometryThresholds::default(), SIMILARITY_FALLOFF)
    }
}
