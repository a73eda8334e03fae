//! Reference skeleton persistence interface
//!
//! Stored references live outside the engine; this module defines the
//! port the coordinator loads them through plus a JSON directory
//! adapter: one `<sign>.json` file holding an ordered array of 21
//! `{x, y, z}` records. A payload with any other record count is
//! rejected as "no reference", never partially loaded.

use crate::domain::{LandmarkRecord, SignId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persistence collaborator for reference skeletons
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Fetch the stored records for a sign; Ok(None) when absent
    async fn fetch(&self, sign: &SignId) -> Result<Option<Vec<LandmarkRecord>>>;

    /// Persist records as the new reference for a sign
    async fn put(&self, sign: &SignId, records: &[LandmarkRecord]) -> Result<()>;
}

/// Directory-of-JSON-files reference store
pub struct JsonReferenceStore {
    dir: PathBuf,
}

impl JsonReferenceStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    fn sign_path(&self, sign: &SignId) -> PathBuf {
        self.dir.join(format!("{}.json", sign.as_str()))
    }
}

#[async_trait]
impl ReferenceStore for JsonReferenceStore {
    async fn fetch(&self, sign: &SignId) -> Result<Option<Vec<LandmarkRecord>>> {
        let path = self.sign_path(sign);
        if !path.exists() {
            debug!(sign = %sign, "reference_file_absent");
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read reference file {}", path.display()))?;

        // A file that exists but does not parse is treated as absent,
        // not as a hard failure; the loader logs and moves on.
        match serde_json::from_str::<Vec<LandmarkRecord>>(&content) {
            Ok(records) => Ok(Some(records)),
            Err(e) => {
                warn!(sign = %sign, error = %e, "reference_file_unparseable");
                Ok(None)
            }
        }
    }

    async fn put(&self, sign: &SignId, records: &[LandmarkRecord]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create reference dir {}", self.dir.display()))?;

        let path = self.sign_path(sign);
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write reference file {}", path.display()))?;

        debug!(sign = %sign, file = %path.display(), "reference_file_written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HAND_LANDMARK_COUNT;
    use tempfile::TempDir;

    fn records() -> Vec<LandmarkRecord> {
        (0..HAND_LANDMARK_COUNT)
            .map(|i| LandmarkRecord { x: i as f32 * 0.01, y: 0.5, z: 0.0 })
            .collect()
    }

    #[tokio::test]
    async fn test_put_then_fetch() {
        let dir = TempDir::new().unwrap();
        let store = JsonReferenceStore::new(dir.path());
        let sign = SignId::from("open-hand");

        store.put(&sign, &records()).await.unwrap();

        let fetched = store.fetch(&sign).await.unwrap().unwrap();
        assert_eq!(fetched.len(), HAND_LANDMARK_COUNT);
        assert_eq!(fetched[3].x, 0.03);
    }

    #[tokio::test]
    async fn test_fetch_absent_sign() {
        let dir = TempDir::new().unwrap();
        let store = JsonReferenceStore::new(dir.path());

        let fetched = store.fetch(&SignId::from("pinch")).await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_fetch_unparseable_file_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.json"), "not json").unwrap();

        let store = JsonReferenceStore::new(dir.path());
        let fetched = store.fetch(&SignId::from("bad")).await.unwrap();
        assert!(fetched.is_none());
    }
}
