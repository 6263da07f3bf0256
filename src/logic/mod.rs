//! Logic Module - Classification Core
//!
//! - `features/` - Feature schema (layout, sample type)
//! - `model/` - External artifacts (scaler, ONNX classifier, bundle)
//! - `threshold` - Known-good short-circuit rule
//! - `classifier` - Orchestrator composing rule and model

pub mod classifier;
pub mod errors;
pub mod features;
pub mod model;
pub mod threshold;
