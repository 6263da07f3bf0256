//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! The scaler and the classifier were both fit against this exact column
//! order. Reordering silently corrupts predictions, so the order lives in
//! exactly one place and artifacts are validated against it at load time.
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use once_cell::sync::Lazy;

use super::super::errors::ClassifyError;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in the exact order the artifacts were fit with.
/// This is the SINGLE SOURCE OF TRUTH for feature layout.
pub const FEATURE_LAYOUT: &[&str] = &[
    "ph",                  // 0: pH (0-14)
    "tds_mg_per_l",        // 1: Total dissolved solids (mg/l)
    "turbidity_ntu",       // 2: Turbidity (NTU)
    "depth_m",             // 3: Sampling depth (m)
    "flow_discharge_lpm",  // 4: Flow discharge (l/min)
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 5;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

static LAYOUT_HASH: Lazy<u32> = Lazy::new(compute_layout_hash);

/// Get layout hash (cached; inputs are const)
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Validate that an artifact's recorded feature order matches this layout.
///
/// A disagreeing artifact is unusable, not a caller error.
pub fn validate_feature_order(names: &[String]) -> Result<(), ClassifyError> {
    if names.len() != FEATURE_COUNT {
        return Err(ClassifyError::ModelUnavailable(format!(
            "artifact records {} features, layout v{} has {}",
            names.len(),
            FEATURE_VERSION,
            FEATURE_COUNT
        )));
    }

    for (i, (recorded, expected)) in names.iter().zip(FEATURE_LAYOUT.iter()).enumerate() {
        if recorded != expected {
            return Err(ClassifyError::ModelUnavailable(format!(
                "artifact feature order mismatch at index {}: artifact has '{}', layout v{} expects '{}'",
                i, recorded, FEATURE_VERSION, expected
            )));
        }
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================
