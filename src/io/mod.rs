//! IO modules - external system interfaces
//!
//! This module contains the engine's boundaries to the outside world:
//! - `detector` - the external landmark-detection service (trait) and a
//!   replay adapter for recorded sessions
//! - `reference_store` - reference skeleton persistence (trait) and a
//!   JSON directory adapter

pub mod detector;
pub mod reference_store;

// Re-export commonly used types
pub use detector::{HandDetector, ImageFrame, RecordedFrame, ReplayDetector};
pub use reference_store::{JsonReferenceStore, ReferenceStore};
