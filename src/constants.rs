//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the threshold bounds or artifact locations, only edit this file.

use std::path::PathBuf;

// ============================================
// Known-good threshold bounds (inclusive)
// ============================================

/// Lower pH bound of the known-good region
pub const PH_SAFE_MIN: f32 = 6.5;

/// Upper pH bound of the known-good region
pub const PH_SAFE_MAX: f32 = 8.5;

/// Maximum total dissolved solids (mg/l) of the known-good region
pub const TDS_SAFE_MAX_MG_PER_L: f32 = 500.0;

/// Maximum turbidity (NTU) of the known-good region
pub const TURBIDITY_SAFE_MAX_NTU: f32 = 5.0;

// ============================================
// Measurable domain bounds
// ============================================

/// pH scale lower bound
pub const PH_DOMAIN_MIN: f32 = 0.0;

/// pH scale upper bound
pub const PH_DOMAIN_MAX: f32 = 14.0;

// ============================================
// Artifact locations
// ============================================

/// File name of the trained classifier artifact
pub const MODEL_FILE_NAME: &str = "model.onnx";

/// File name of the fitted scaler parameters
pub const SCALER_FILE_NAME: &str = "scaler.json";

/// Environment variable overriding the artifact directory
pub const MODEL_DIR_ENV: &str = "AQUASHIELD_MODEL_DIR";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "AquaShield";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get artifact directory override from environment, if set
pub fn get_model_dir_override() -> Option<PathBuf> {
    std::env::var(MODEL_DIR_ENV).ok().map(PathBuf::from)
}

/// Candidate artifact directories, highest priority first
pub fn model_dir_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(dir) = get_model_dir_override() {
        candidates.push(dir);
    }

    if let Some(data_dir) = dirs::data_dir() {
        candidates.push(data_dir.join("aquashield").join("models"));
    }

    candidates.push(PathBuf::from("models"));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bounds_sane() {
        assert!(PH_SAFE_MIN < PH_SAFE_MAX);
        assert!(PH_DOMAIN_MIN <= PH_SAFE_MIN && PH_SAFE_MAX <= PH_DOMAIN_MAX);
        assert!(TDS_SAFE_MAX_MG_PER_L > 0.0);
        assert!(TURBIDITY_SAFE_MAX_NTU > 0.0);
    }

    #[test]
    fn test_model_dir_candidates_non_empty() {
        let candidates = model_dir_candidates();
        assert!(!candidates.is_empty());
        assert_eq!(candidates.last().unwrap(), &PathBuf::from("models"));
    }
}
