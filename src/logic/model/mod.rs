//! External artifact layer: fitted scaler, ONNX classifier, bundle loading.

pub mod bundle;
pub mod inference;
pub mod scaler;

pub use bundle::{ArtifactBundle, ModelMetadata};
pub use inference::{BinaryClassifier, OnnxClassifier};
pub use scaler::{FeatureScaler, ScalerParams, StandardScaler};
