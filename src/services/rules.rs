//! Rule-based categorical sign classification
//!
//! A closed, statically registered table of geometric predicates, one
//! entry per known sign. Evaluation order is part of the contract:
//! rules are checked top to bottom and the first match wins, so the
//! most constrained shapes are registered first. Each rule awards a
//! fixed confidence on match; these are presence/absence heuristics,
//! not graded scores.

use crate::domain::{landmark, FingerState, HandSkeleton, LandmarkPoint, SignId};
use crate::services::finger_state::FingerStateAnalyzer;
use crate::services::geometry::{self, GeometryThresholds};

/// Confidence awarded by any matched rule
pub const RULE_CONFIDENCE: f32 = 0.9;

/// closed-ring: maximum thumb-tip to index-tip distance
pub const RING_INDEX_RADIUS: f32 = 0.08;

/// closed-ring: maximum thumb-tip to middle-tip distance
pub const RING_MIDDLE_RADIUS: f32 = 0.10;

/// Geometric predicate for one registered sign
///
/// An explicit enum rather than closures so the rule table is a plain,
/// inspectable list and each shape test is unit-testable on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulePredicate {
    /// All five fingers extended
    OpenHand,
    /// Thumb and index extended, other fingers closed, tips touching
    Pinch,
    /// Index and middle curled into a ring closed by the thumb tip
    ClosedRing,
    /// Exactly one non-thumb finger extended, thumb closed, no touch
    SinglePoint,
}

impl RulePredicate {
    /// Evaluate against the finger summary and the normalized points
    pub fn matches(&self, state: &FingerState, points: &[LandmarkPoint]) -> bool {
        match self {
            RulePredicate::OpenHand => {
                state.thumb && state.index && state.middle && state.ring && state.pinky
            }
            RulePredicate::Pinch => {
                state.thumb
                    && state.index
                    && !state.middle
                    && !state.ring
                    && !state.pinky
                    && state.thumb_index_touch
            }
            RulePredicate::ClosedRing => {
                let thumb_tip = points[landmark::THUMB_TIP];
                !state.index
                    && !state.middle
                    && geometry::distance(thumb_tip, points[landmark::INDEX_TIP])
                        < RING_INDEX_RADIUS
                    && geometry::distance(thumb_tip, points[landmark::MIDDLE_TIP])
                        < RING_MIDDLE_RADIUS
            }
            RulePredicate::SinglePoint => {
                !state.thumb
                    && state.extended_non_thumb_count() == 1
                    && !state.thumb_index_touch
                    && !state.thumb_middle_touch
            }
        }
    }
}

/// One registered (sign, predicate, confidence) entry
#[derive(Debug, Clone)]
pub struct SignRule {
    pub sign: SignId,
    pub predicate: RulePredicate,
    pub confidence: f32,
}

/// Categorical classifier over the registered rule table
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    analyzer: FingerStateAnalyzer,
    thresholds: GeometryThresholds,
    rules: Vec<SignRule>,
}

impl RuleClassifier {
    /// Build the classifier with the standard rule registry
    ///
    /// Registration order, most constrained first:
    /// open-hand, pinch, closed-ring, single-point.
    pub fn new(thresholds: GeometryThresholds) -> Self {
        let rule = |sign: &str, predicate: RulePredicate| SignRule {
            sign: SignId::from(sign),
            predicate,
            confidence: RULE_CONFIDENCE,
        };
        Self {
            analyzer: FingerStateAnalyzer::new(thresholds),
            thresholds,
            rules: vec![
                rule("open-hand", RulePredicate::OpenHand),
                rule("pinch", RulePredicate::Pinch),
                rule("closed-ring", RulePredicate::ClosedRing),
                rule("single-point", RulePredicate::SinglePoint),
            ],
        }
    }

    /// The registered rules in evaluation order
    pub fn rules(&self) -> &[SignRule] {
        &self.rules
    }

    /// Classify one skeleton against the registry
    ///
    /// Returns the first matching rule's sign and fixed confidence, or
    /// `(None, 0.0)` when nothing matches or the input is invalid.
    pub fn classify(&self, skeleton: &HandSkeleton) -> (Option<SignId>, f32) {
        if !skeleton.is_valid() {
            return (None, 0.0);
        }

        let points = geometry::normalize(&skeleton.points, self.thresholds.normalize_epsilon);
        let state = self.analyzer.analyze_normalized(&points);

        for rule in &self.rules {
            if rule.predicate.matches(&state, &points) {
                return (Some(rule.sign.clone()), rule.confidence);
            }
        }
        (None, 0.0)
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new(GeometryThresholds::default())
    }
}
