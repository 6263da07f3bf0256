//! AquaShield Core - Water Potability Classification
//!
//! Combines a hand-authored known-good threshold rule with a pre-trained
//! binary classifier (ONNX) and its offline-fitted scaling transform.
//! The threshold rule short-circuits; the model is the fallback path.

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::classifier::{Classification, DecisionPath, PotabilityClassifier, Verdict};
pub use logic::errors::ClassifyError;
pub use logic::features::sample::WaterSample;
pub use logic::model::bundle::ArtifactBundle;
