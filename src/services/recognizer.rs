//! Sign recognition coordination
//!
//! One recognition call is independent of every other: obtain a skeleton
//! from the external detector, run the rule classifier and (when a
//! reference is loaded for the expected sign) the similarity scorer,
//! then merge both signals into a final confidence and verdict.
//!
//! Merge semantics:
//! - the rule term counts only when the matched rule IS the expected sign
//! - the comparison term is 0 without a loaded reference
//! - `final = max(rule_term, comparison)`, correct iff it clears the
//!   precision threshold
//! - the reported label falls back to the expected sign when comparison
//!   similarity alone is convincing (> fallback threshold), even absent
//!   a rule match
//!
//! Failure handling favors graceful degradation: a detector error is
//! indistinguishable from "no hand", and nothing in this path panics.

use crate::domain::{HandSkeleton, RecognitionResult, SignId};
use crate::infra::config::Config;
use crate::infra::metrics::Metrics;
use crate::io::detector::{HandDetector, ImageFrame};
use crate::io::reference_store::ReferenceStore;
use crate::services::reference_cache::ReferenceCache;
use crate::services::rules::RuleClassifier;
use crate::services::similarity::SimilarityScorer;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Coordinates one recognition call end to end
pub struct SignRecognizer {
    classifier: RuleClassifier,
    scorer: SimilarityScorer,
    references: ReferenceCache,
    detector: Arc<dyn HandDetector>,
    store: Arc<dyn ReferenceStore>,
    metrics: Arc<Metrics>,
    precision_threshold: f32,
    fallback_similarity: f32,
}

impl SignRecognizer {
    pub fn new(
        config: &Config,
        detector: Arc<dyn HandDetector>,
        store: Arc<dyn ReferenceStore>,
        metrics: Arc<Metrics>,
    ) -> Self {
        let thresholds = config.geometry_thresholds();
        Self {
            classifier: RuleClassifier::new(thresholds),
            scorer: SimilarityScorer::new(thresholds, config.similarity_falloff()),
            references: ReferenceCache::new(),
            detector,
            store,
            metrics,
            precision_threshold: config.precision_threshold(),
            fallback_similarity: config.fallback_similarity(),
        }
    }

    /// Load the stored reference for a sign into the cache
    ///
    /// Returns true when a structurally valid reference is now cached.
    /// A missing or malformed payload leaves the cache untouched; the
    /// per-frame path then simply runs without the comparison term.
    pub async fn load_reference(&self, sign: &SignId) -> bool {
        let records = match self.store.fetch(sign).await {
            Ok(Some(records)) => records,
            Ok(None) => {
                debug!(sign = %sign, "reference_not_found");
                return false;
            }
            Err(e) => {
                warn!(sign = %sign, error = %e, "reference_fetch_failed");
                return false;
            }
        };
        self.references.load(sign.clone(), &records)
    }

    pub fn has_reference(&self, sign: &SignId) -> bool {
        self.references.contains(sign)
    }

    /// Drop all cached references at session end
    pub fn end_session(&self) {
        self.references.clear();
    }

    /// Run one recognition attempt against an expected sign
    pub async fn recognize(&self, expected: &SignId, frame: &ImageFrame) -> RecognitionResult {
        self.metrics.record_frame();

        let hands = match self.detector.detect(frame).await {
            Ok(hands) => hands,
            Err(e) => {
                // Detector unavailability degrades to the no-hand shape
                warn!(expected = %expected, error = %e, "detector_unavailable");
                self.metrics.record_no_hand();
                return RecognitionResult::no_hand(expected.clone());
            }
        };

        // Multi-hand policy: the first skeleton in detector order is
        // used; no ranking across hands is performed.
        let Some(skeleton) = hands.into_iter().next() else {
            self.metrics.record_no_hand();
            return RecognitionResult::no_hand(expected.clone());
        };

        let start = Instant::now();
        let result = self.evaluate(expected, skeleton);
        self.metrics.record_latency(start);
        self.metrics.record_verdict(result.is_correct);

        info!(
            expected = %expected,
            recognized = %result.recognized.as_ref().map(|s| s.as_str()).unwrap_or("-"),
            confidence = %result.confidence,
            is_correct = %result.is_correct,
            "recognition_result"
        );

        result
    }

    /// Merge the rule and comparison signals for one skeleton
    ///
    /// Pure with respect to everything but the reference cache read;
    /// exposed for direct testing of the merge semantics.
    pub fn evaluate(&self, expected: &SignId, skeleton: HandSkeleton) -> RecognitionResult {
        let (rule_sign, rule_confidence) = self.classifier.classify(&skeleton);
        if rule_sign.is_some() {
            self.metrics.record_rule_match();
        }

        let comparison = match self.references.get(expected) {
            Some(reference) => {
                self.metrics.record_comparison();
                self.scorer.compare(&skeleton, &reference)
            }
            None => 0.0,
        };

        let rule_matches_expected = rule_sign.as_ref() == Some(expected);
        let rule_term = if rule_matches_expected { rule_confidence } else { 0.0 };
        let confidence = rule_term.max(comparison);
        let is_correct = confidence >= self.precision_threshold;

        let recognized = if rule_matches_expected {
            rule_sign
        } else if comparison > self.fallback_similarity {
            Some(expected.clone())
        } else {
            None
        };

        RecognitionResult {
            recognized,
            confidence,
            is_correct,
            expected: expected.clone(),
            skeleton: Some(skeleton),
        }
    }
}
