//! Hand landmark detector interface
//!
//! The detection model itself is an external service: given an image
//! frame it returns zero or more hand skeletons with handedness and
//! confidence. The engine only consumes its output, so the boundary is
//! a trait and the crate ships a replay adapter that serves skeletons
//! recorded from a real detector session.

use crate::domain::HandSkeleton;
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tracing::info;

/// One camera frame handed to the detector
///
/// The pixel payload is opaque to the engine; width/height describe the
/// coordinate space the detector normalizes landmarks against.
#[derive(Debug, Clone, Default)]
pub struct ImageFrame {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

/// External landmark-detection service
#[async_trait]
pub trait HandDetector: Send + Sync {
    /// Detect hands in one frame
    ///
    /// An empty vec means no hand was seen. Errors are treated by the
    /// caller exactly like "no hand" (graceful degradation).
    async fn detect(&self, frame: &ImageFrame) -> Result<Vec<HandSkeleton>>;
}

/// One recorded detector output: the hands seen in one frame
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub hands: Vec<HandSkeleton>,
}

/// Replays recorded detector output, one frame per `detect` call
///
/// Used by the offline practice-replay binary and by tests. The pixel
/// payload of the incoming frame is ignored; the recorded skeletons are
/// served in file order and an exhausted recording reports no hands.
pub struct ReplayDetector {
    frames: Mutex<VecDeque<RecordedFrame>>,
}

impl ReplayDetector {
    pub fn new(frames: Vec<RecordedFrame>) -> Self {
        Self { frames: Mutex::new(frames.into()) }
    }

    /// Load a JSONL recording: one `{"hands": [...]}` object per line
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read frames file {}", path.display()))?;

        let mut frames = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let frame: RecordedFrame = serde_json::from_str(line).with_context(|| {
                format!("Failed to parse frame at {}:{}", path.display(), line_no + 1)
            })?;
            frames.push(frame);
        }

        info!(file = %path.display(), frame_count = %frames.len(), "replay_frames_loaded");
        Ok(Self::new(frames))
    }

    pub fn remaining(&self) -> usize {
        self.frames.lock().len()
    }
}

#[async_trait]
impl HandDetector for ReplayDetector {
    async fn detect(&self, _frame: &ImageFrame) -> Result<Vec<HandSkeleton>> {
        let next = self.frames.lock().pop_front();
        Ok(next.map(|f| f.hands).unwrap_or_default())
    }
}
