//! Configuration loading from TOML files
//!
//! The binary selects the config path via its --config argument
//! (default: config/dev.toml); a missing or unparseable file falls
//! back to built-in defaults.
//!
//! All geometric and recognition thresholds are named config values so
//! tuning never means editing inline literals.

use crate::services::geometry::{
    GeometryThresholds, EXTENSION_MARGIN, NORMALIZE_EPSILON, TOUCH_RADIUS,
};
use crate::services::similarity::SIMILARITY_FALLOFF;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Minimum combined confidence for a correct attempt
pub const PRECISION_THRESHOLD: f32 = 0.85;

/// Comparison similarity above which the expected label is reported
/// even without a rule match
pub const FALLBACK_SIMILARITY: f32 = 0.5;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session/deployment identifier used in log lines
    #[serde(default = "default_session_id")]
    pub id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { id: default_session_id() }
    }
}

fn default_session_id() -> String {
    "signcoach".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeometryConfig {
    #[serde(default = "default_extension_margin")]
    pub extension_margin: f32,
    #[serde(default = "default_touch_radius")]
    pub touch_radius: f32,
    #[serde(default = "default_normalize_epsilon")]
    pub normalize_epsilon: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            extension_margin: default_extension_margin(),
            touch_radius: default_touch_radius(),
            normalize_epsilon: default_normalize_epsilon(),
        }
    }
}

fn default_extension_margin() -> f32 {
    EXTENSION_MARGIN
}

fn default_touch_radius() -> f32 {
    TOUCH_RADIUS
}

fn default_normalize_epsilon() -> f32 {
    NORMALIZE_EPSILON
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionConfig {
    #[serde(default = "default_precision_threshold")]
    pub precision_threshold: f32,
    #[serde(default = "default_similarity_falloff")]
    pub similarity_falloff: f32,
    #[serde(default = "default_fallback_similarity")]
    pub fallback_similarity: f32,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            precision_threshold: default_precision_threshold(),
            similarity_falloff: default_similarity_falloff(),
            fallback_similarity: default_fallback_similarity(),
        }
    }
}

fn default_precision_threshold() -> f32 {
    PRECISION_THRESHOLD
}

fn default_similarity_falloff() -> f32 {
    SIMILARITY_FALLOFF
}

fn default_fallback_similarity() -> f32 {
    FALLBACK_SIMILARITY
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferencesConfig {
    /// Directory holding one <sign>.json reference file per sign
    #[serde(default = "default_references_dir")]
    pub dir: String,
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self { dir: default_references_dir() }
    }
}

fn default_references_dir() -> String {
    "references".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_interval_secs")]
    pub interval_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { interval_secs: default_metrics_interval_secs() }
    }
}

fn default_metrics_interval_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub recognition: RecognitionConfig,
    #[serde(default)]
    pub references: ReferencesConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    session_id: String,
    extension_margin: f32,
    touch_radius: f32,
    normalize_epsilon: f32,
    precision_threshold: f32,
    similarity_falloff: f32,
    fallback_similarity: f32,
    references_dir: String,
    metrics_interval_secs: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_id: default_session_id(),
            extension_margin: EXTENSION_MARGIN,
            touch_radius: TOUCH_RADIUS,
            normalize_epsilon: NORMALIZE_EPSILON,
            precision_threshold: PRECISION_THRESHOLD,
            similarity_falloff: SIMILARITY_FALLOFF,
            fallback_similarity: FALLBACK_SIMILARITY,
            references_dir: default_references_dir(),
            metrics_interval_secs: default_metrics_interval_secs(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            session_id: toml_config.session.id,
            extension_margin: toml_config.geometry.extension_margin,
            touch_radius: toml_config.geometry.touch_radius,
            normalize_epsilon: toml_config.geometry.normalize_epsilon,
            precision_threshold: toml_config.recognition.precision_threshold,
            similarity_falloff: toml_config.recognition.similarity_falloff,
            fallback_similarity: toml_config.recognition.fallback_similarity,
            references_dir: toml_config.references.dir,
            metrics_interval_secs: toml_config.metrics.interval_secs,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Geometry thresholds bundle consumed by the services
    pub fn geometry_thresholds(&self) -> GeometryThresholds {
        GeometryThresholds {
            extension_margin: self.extension_margin,
            touch_radius: self.touch_radius,
            normalize_epsilon: self.normalize_epsilon,
        }
    }

    // Getters for all config fields
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn extension_margin(&self) -> f32 {
        self.extension_margin
    }

    pub fn touch_radius(&self) -> f32 {
        self.touch_radius
    }

    pub fn normalize_epsilon(&self) -> f32 {
        self.normalize_epsilon
    }

    pub fn precision_threshold(&self) -> f32 {
        self.precision_threshold
    }

    pub fn similarity_falloff(&self) -> f32 {
        self.similarity_falloff
    }

    pub fn fallback_similarity(&self) -> f32 {
        self.fallback_similarity
    }

    pub fn references_dir(&self) -> &str {
        &self.references_dir
    }

    pub fn metrics_interval_secs(&self) -> u64 {
        self.metrics_interval_secs
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests to set the precision threshold
    #[cfg(test)]
    pub fn with_precision_threshold(mut self, threshold: f32) -> Self {
        self.precision_threshold = threshold;
        self
    }
}
