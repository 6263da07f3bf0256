//! Scaling Transform - offline-fitted feature normalization
//!
//! Maps raw readings into the numeric space the classifier was trained
//! on. Parameters are fit once, offline, and loaded unmodified; the core
//! never refits them. The artifact records the feature order it was fit
//! with and loading fails if that order disagrees with the layout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::errors::ClassifyError;
use crate::logic::features::layout::{validate_feature_order, FEATURE_COUNT};

/// Floor for near-zero scale entries (constant feature in training data)
const MIN_SCALE: f32 = 1e-8;

// ============================================================================
// TRAIT
// ============================================================================

/// Fitted normalization transform over one raw feature vector.
pub trait FeatureScaler: Send + Sync {
    /// Scale a raw vector in layout order. Wrong dimensionality is a
    /// caller error, reported with both counts.
    fn scale(&self, raw: &[f32]) -> Result<[f32; FEATURE_COUNT], ClassifyError>;
}

// ============================================================================
// ARTIFACT FORMAT
// ============================================================================

/// On-disk shape of `scaler.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    /// Feature names in the order the transform was fit with
    pub feature_order: Vec<String>,
    /// Per-feature mean, same order
    pub mean: Vec<f32>,
    /// Per-feature scale (standard deviation), same order
    pub scale: Vec<f32>,
    /// Optional hex SHA-256 of the classifier artifact this was fit with
    #[serde(default)]
    pub model_sha256: Option<String>,
}

// ============================================================================
// STANDARD SCALER
// ============================================================================

/// (x - mean) / scale per feature, parameters from the fitted artifact.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: [f32; FEATURE_COUNT],
    scale: [f32; FEATURE_COUNT],
}

impl StandardScaler {
    /// Build from parsed artifact parameters, validating order and lengths.
    pub fn from_params(params: &ScalerParams) -> Result<Self, ClassifyError> {
        validate_feature_order(&params.feature_order)?;

        if params.mean.len() != FEATURE_COUNT || params.scale.len() != FEATURE_COUNT {
            return Err(ClassifyError::ModelUnavailable(format!(
                "scaler parameters malformed: {} means, {} scales, expected {}",
                params.mean.len(),
                params.scale.len(),
                FEATURE_COUNT
            )));
        }

        for value in params.mean.iter().chain(params.scale.iter()) {
            if !value.is_finite() {
                return Err(ClassifyError::ModelUnavailable(
                    "scaler parameters contain non-finite values".to_string(),
                ));
            }
        }

        let mut mean = [0.0f32; FEATURE_COUNT];
        let mut scale = [1.0f32; FEATURE_COUNT];
        mean.copy_from_slice(&params.mean);
        scale.copy_from_slice(&params.scale);

        Ok(Self { mean, scale })
    }

    /// Parse and build from the JSON artifact text.
    pub fn from_json_str(content: &str) -> Result<(Self, ScalerParams), ClassifyError> {
        let params: ScalerParams = serde_json::from_str(content).map_err(|e| {
            ClassifyError::ModelUnavailable(format!("failed to parse scaler parameters: {}", e))
        })?;
        let scaler = Self::from_params(&params)?;
        Ok((scaler, params))
    }

    /// Load from `scaler.json` on disk.
    pub fn load(path: &Path) -> Result<(Self, ScalerParams), ClassifyError> {
        log::info!("Loading scaler parameters from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            ClassifyError::ModelUnavailable(format!(
                "failed to read scaler parameters {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json_str(&content)
    }
}

impl FeatureScaler for StandardScaler {
    fn scale(&self, raw: &[f32]) -> Result<[f32; FEATURE_COUNT], ClassifyError> {
        if raw.len() != FEATURE_COUNT {
            return Err(ClassifyError::dimension_mismatch(FEATURE_COUNT, raw.len()));
        }

        let mut scaled = [0.0f32; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            let denominator = self.scale[i].abs().max(MIN_SCALE);
            scaled[i] = (raw[i] - self.mean[i]) / denominator;
        }

        Ok(scaled)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::FEATURE_LAYOUT;

    fn params() -> ScalerParams {
        ScalerParams {
            feature_order: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
            mean: vec![7.0, 500.0, 5.0, 3.0, 60.0],
            scale: vec![1.0, 250.0, 2.5, 1.5, 30.0],
            model_sha256: None,
        }
    }

    #[test]
    fn test_scale_math() {
        let scaler = StandardScaler::from_params(&params()).unwrap();
        let scaled = scaler.scale(&[7.0, 750.0, 10.0, 4.5, 30.0]).unwrap();

        assert!((scaled[0] - 0.0).abs() < 1e-6);
        assert!((scaled[1] - 1.0).abs() < 1e-6);
        assert!((scaled[2] - 2.0).abs() < 1e-6);
        assert!((scaled[3] - 1.0).abs() < 1e-6);
        assert!((scaled[4] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_scale_clamped() {
        let mut p = params();
        p.scale[2] = 0.0;
        let scaler = StandardScaler::from_params(&p).unwrap();

        let scaled = scaler.scale(&[7.0, 500.0, 5.0, 3.0, 60.0]).unwrap();
        assert!(scaled[2].is_finite());
    }

    #[test]
    fn test_dimension_mismatch_named() {
        let scaler = StandardScaler::from_params(&params()).unwrap();
        let err = scaler.scale(&[1.0, 2.0, 3.0]).unwrap_err();

        assert_eq!(err.kind(), "InvalidFeatureVector");
        assert!(err.to_string().contains('5') && err.to_string().contains('3'));
    }

    #[test]
    fn test_wrong_feature_order_rejected() {
        let mut p = params();
        p.feature_order.swap(0, 2);

        let err = StandardScaler::from_params(&p).unwrap_err();
        assert_eq!(err.kind(), "ModelUnavailable");
    }

    #[test]
    fn test_wrong_length_rejected() {
        let mut p = params();
        p.mean.pop();

        let err = StandardScaler::from_params(&p).unwrap_err();
        assert_eq!(err.kind(), "ModelUnavailable");
    }

    #[test]
    fn test_from_json_str() {
        let content = serde_json::to_string(&params()).unwrap();
        let (_, parsed) = StandardScaler::from_json_str(&content).unwrap();
        assert_eq!(parsed.feature_order.len(), FEATURE_COUNT);

        assert!(StandardScaler::from_json_str("not json").is_err());
    }
}
