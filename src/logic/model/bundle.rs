//! Artifact Bundle - one-shot loading of the fitted transform and model
//!
//! Both artifacts are loaded together, once, at startup, and are read-only
//! afterwards. Either both load or construction fails; the fast threshold
//! path must never mask a broken fallback path.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::{model_dir_candidates, MODEL_FILE_NAME, SCALER_FILE_NAME};
use crate::logic::errors::ClassifyError;
use crate::logic::features::layout::{layout_hash, FEATURE_COUNT, FEATURE_VERSION};
use crate::logic::model::inference::OnnxClassifier;
use crate::logic::model::scaler::StandardScaler;

// ============================================================================
// METADATA
// ============================================================================

/// Bundle metadata, surfaced by the status command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub scaler_path: String,
    pub feature_count: usize,
    pub layout_version: u8,
    pub layout_hash: u32,
    pub model_sha256: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// BUNDLE
// ============================================================================

/// The two external artifacts plus their load-time metadata.
#[derive(Debug)]
pub struct ArtifactBundle {
    pub scaler: StandardScaler,
    pub classifier: OnnxClassifier,
    pub metadata: ModelMetadata,
}

impl ArtifactBundle {
    /// Load `scaler.json` and `model.onnx` from one directory.
    pub fn load(dir: &Path) -> Result<Self, ClassifyError> {
        if !dir.is_dir() {
            return Err(ClassifyError::ModelUnavailable(format!(
                "artifact directory not found: {}",
                dir.display()
            )));
        }

        let scaler_path = dir.join(SCALER_FILE_NAME);
        let model_path = dir.join(MODEL_FILE_NAME);

        let (scaler, params) = StandardScaler::load(&scaler_path)?;

        if !model_path.exists() {
            return Err(ClassifyError::ModelUnavailable(format!(
                "model not found: {}",
                model_path.display()
            )));
        }

        // Scaler and model are fitted as a pair; when the scaler records
        // the model digest, a mismatched model is a corrupt bundle.
        if let Some(expected) = params.model_sha256.as_deref() {
            let actual = sha256_file(&model_path)?;
            if !expected.eq_ignore_ascii_case(&actual) {
                return Err(ClassifyError::ModelUnavailable(format!(
                    "model checksum mismatch: scaler expects {}, {} has {}",
                    expected,
                    model_path.display(),
                    actual
                )));
            }
            log::info!("Model checksum verified ({})", &actual[..12]);
        }

        let classifier = OnnxClassifier::load(&model_path)?;

        let metadata = ModelMetadata {
            model_path: model_path.display().to_string(),
            scaler_path: scaler_path.display().to_string(),
            feature_count: FEATURE_COUNT,
            layout_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            model_sha256: params.model_sha256,
            loaded_at: Utc::now(),
        };

        log::info!(
            "Artifact bundle ready: {} features, layout v{}",
            metadata.feature_count,
            metadata.layout_version
        );

        Ok(Self {
            scaler,
            classifier,
            metadata,
        })
    }

    /// Load from the first candidate directory that contains a scaler file.
    pub fn load_default() -> Result<Self, ClassifyError> {
        let candidates = model_dir_candidates();

        for dir in &candidates {
            if dir.join(SCALER_FILE_NAME).exists() {
                return Self::load(dir);
            }
        }

        Err(ClassifyError::ModelUnavailable(format!(
            "no artifacts found in any candidate directory: {}",
            candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// Hex SHA-256 of a file's contents
fn sha256_file(path: &Path) -> Result<String, ClassifyError> {
    let bytes = std::fs::read(path).map_err(|e| {
        ClassifyError::ModelUnavailable(format!("failed to read {}: {}", path.display(), e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

// ============================================================================
// TESTS
// ============================================================================
