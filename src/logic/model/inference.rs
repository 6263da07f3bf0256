//! Inference Engine - ONNX Runtime Integration
//!
//! Loads and runs the trained potability classifier. The model is an
//! opaque artifact consumed purely through its predict contract: scaled
//! features in, binary label out (1 = potable, 0 = non-potable).

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::logic::errors::ClassifyError;
use crate::logic::features::layout::FEATURE_COUNT;

// ============================================================================
// TRAIT
// ============================================================================

/// Binary classifier over one scaled feature vector.
pub trait BinaryClassifier: Send + Sync {
    /// Predict the label for a scaled vector in layout order.
    /// Returns the raw label code; 1 denotes potable.
    fn predict(&self, scaled: &[f32]) -> Result<i64, ClassifyError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX-backed classifier. The session is loaded once and never mutated
/// afterwards; `run` needs `&mut`, so it sits behind a mutex and the
/// classifier stays shareable across threads.
#[derive(Debug)]
pub struct OnnxClassifier {
    session: Mutex<Session>,
}

impl OnnxClassifier {
    /// Load the model from file. Fails loudly on a missing or malformed
    /// artifact; there is no usable degraded mode.
    pub fn load(model_path: &Path) -> Result<Self, ClassifyError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ClassifyError::ModelUnavailable(format!(
                "model not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| {
                ClassifyError::ModelUnavailable(format!("failed to create session builder: {}", e))
            })?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| {
                ClassifyError::ModelUnavailable(format!("failed to set optimization: {}", e))
            })?
            .commit_from_file(model_path)
            .map_err(|e| ClassifyError::ModelUnavailable(format!("failed to load model: {}", e)))?;

        log::info!("ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl BinaryClassifier for OnnxClassifier {
    fn predict(&self, scaled: &[f32]) -> Result<i64, ClassifyError> {
        if scaled.len() != FEATURE_COUNT {
            return Err(ClassifyError::dimension_mismatch(FEATURE_COUNT, scaled.len()));
        }

        // Input tensor: shape (1, features)
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), scaled.to_vec())
            .map_err(|e| {
                ClassifyError::InvalidFeatureVector(format!("failed to create array: {}", e))
            })?;

        let mut session = self.session.lock();

        // Get output name BEFORE run to avoid borrow conflict
        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| ClassifyError::ModelUnavailable("no output defined".to_string()))?;

        let input_tensor = Value::from_array(input_array).map_err(|e| {
            ClassifyError::InvalidFeatureVector(format!("failed to create tensor: {}", e))
        })?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ClassifyError::ModelUnavailable(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| ClassifyError::ModelUnavailable("no output from model".to_string()))?;

        // sklearn-style exports emit int64 labels; some converters emit float
        if let Ok(output_tensor) = output.try_extract_tensor::<i64>() {
            let data = output_tensor.1;
            return data.first().copied().ok_or_else(|| {
                ClassifyError::ModelUnavailable("empty label output".to_string())
            });
        }

        let output_tensor = output.try_extract_tensor::<f32>().map_err(|e| {
            ClassifyError::ModelUnavailable(format!("failed to extract output: {}", e))
        })?;
        let data = output_tensor.1;

        data.first()
            .map(|v| v.round() as i64)
            .ok_or_else(|| ClassifyError::ModelUnavailable("empty label output".to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_model() {
        let err = OnnxClassifier::load(Path::new("/nonexistent/model.onnx")).unwrap_err();
        assert_eq!(err.kind(), "ModelUnavailable");
    }
}
