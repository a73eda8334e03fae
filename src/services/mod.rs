//! Services - the recognition pipeline
//!
//! This module contains the core recognition logic:
//! - `geometry` - landmark geometry primitives (distance, normalization,
//!   extension and touch tests)
//! - `finger_state` - per-finger extension/touch derivation
//! - `rules` - rule-based categorical sign classification
//! - `similarity` - continuous reference-comparison scoring
//! - `reference_cache` - coordinator-owned reference skeleton cache
//! - `recognizer` - the coordinator merging both signals into a verdict

pub mod finger_state;
pub mod geometry;
pub mod recognizer;
pub mod reference_cache;
pub mod rules;
pub mod similarity;

// Re-export commonly used types
pub use finger_state::FingerStateAnalyzer;
pub use geometry::GeometryThresholds;
pub use recognizer::SignRecognizer;
pub use reference_cache::ReferenceCache;
pub use rules::{RuleClassifier, SignRule};
pub use similarity::SimilarityScorer;
