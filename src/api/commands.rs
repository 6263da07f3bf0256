//! Command surface consumed by a caller (UI, API layer, CLI).
//!
//! Thin wrappers over the logic layer: typed responses out, string errors
//! outward. The error string always starts with the distinguishing kind.

use serde::{Deserialize, Serialize};

use crate::constants::APP_VERSION;
use crate::logic::classifier::{DecisionPath, PotabilityClassifier};
use crate::logic::features::layout::FEATURE_COUNT;
use crate::logic::features::WaterSample;

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// Classification result for one reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    /// "Safe" or "Unsafe"
    pub verdict: String,
    /// "threshold" or "model"
    pub decided_by: String,
}

/// Engine status for a status surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub version: String,
    pub model_loaded: bool,
    pub model_path: String,
    pub inference_device: String,
    pub feature_count: usize,
    pub loaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Classify five readings. The only fields accepted or required.
pub fn classify_reading(
    engine: &PotabilityClassifier,
    ph: f32,
    tds_mg_per_l: f32,
    turbidity_ntu: f32,
    depth_m: f32,
    flow_discharge_lpm: f32,
) -> Result<ClassifyResponse, String> {
    let sample = WaterSample::new(ph, tds_mg_per_l, turbidity_ntu, depth_m, flow_discharge_lpm)
        .map_err(|e| e.to_string())?;

    classify_sample(engine, &sample)
}

/// Classify a JSON object keyed by feature names.
pub fn classify_json(
    engine: &PotabilityClassifier,
    payload: &serde_json::Value,
) -> Result<ClassifyResponse, String> {
    let sample = WaterSample::from_json(payload).map_err(|e| e.to_string())?;
    classify_sample(engine, &sample)
}

fn classify_sample(
    engine: &PotabilityClassifier,
    sample: &WaterSample,
) -> Result<ClassifyResponse, String> {
    let result = engine.classify_detailed(sample).map_err(|e| e.to_string())?;

    Ok(ClassifyResponse {
        verdict: result.verdict.to_string(),
        decided_by: match result.decided_by {
            DecisionPath::Threshold => "threshold".to_string(),
            DecisionPath::Model => "model".to_string(),
        },
    })
}

/// Report the engine's artifact state.
pub fn engine_status(engine: &PotabilityClassifier) -> EngineStatus {
    let (loaded, path, loaded_at) = match engine.metadata() {
        Some(meta) => (true, meta.model_path.clone(), Some(meta.loaded_at)),
        None => (false, "None".to_string(), None),
    };

    EngineStatus {
        version: APP_VERSION.to_string(),
        model_loaded: loaded,
        model_path: path,
        inference_device: "ONNX Runtime (CPU)".to_string(),
        feature_count: FEATURE_COUNT,
        loaded_at,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::errors::ClassifyError;
    use crate::logic::model::inference::BinaryClassifier;
    use crate::logic::model::scaler::FeatureScaler;

    struct IdentityScaler;
    impl FeatureScaler for IdentityScaler {
        fn scale(&self, raw: &[f32]) -> Result<[f32; FEATURE_COUNT], ClassifyError> {
            let mut out = [0.0f32; FEATURE_COUNT];
            out.copy_from_slice(raw);
            Ok(out)
        }
    }

    struct AlwaysUnsafe;
    impl BinaryClassifier for AlwaysUnsafe {
        fn predict(&self, _scaled: &[f32]) -> Result<i64, ClassifyError> {
            Ok(0)
        }
    }

    fn engine() -> PotabilityClassifier {
        PotabilityClassifier::new(Box::new(IdentityScaler), Box::new(AlwaysUnsafe))
    }

    #[test]
    fn test_classify_reading_threshold_path() {
        let response = classify_reading(&engine(), 7.0, 400.0, 3.0, 2.0, 50.0).unwrap();
        assert_eq!(response.verdict, "Safe");
        assert_eq!(response.decided_by, "threshold");
    }

    #[test]
    fn test_classify_reading_model_path() {
        let response = classify_reading(&engine(), 5.0, 400.0, 3.0, 2.0, 50.0).unwrap();
        assert_eq!(response.verdict, "Unsafe");
        assert_eq!(response.decided_by, "model");
    }

    #[test]
    fn test_classify_json_bad_field_carries_kind() {
        let payload = serde_json::json!({
            "ph": "seven",
            "tds_mg_per_l": 400.0,
            "turbidity_ntu": 3.0,
            "depth_m": 2.0,
            "flow_discharge_lpm": 50.0,
        });
        let err = classify_json(&engine(), &payload).unwrap_err();
        assert!(err.starts_with("InvalidInputValue"));
    }

    #[test]
    fn test_engine_status_without_bundle() {
        let status = engine_status(&engine());
        assert!(!status.model_loaded);
        assert_eq!(status.model_path, "None");
        assert_eq!(status.feature_count, FEATURE_COUNT);
    }
}
