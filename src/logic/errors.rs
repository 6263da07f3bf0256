//! Error taxonomy for the classification core.
//!
//! Three kinds, all reported synchronously to the immediate caller:
//! - `ModelUnavailable` — artifacts missing/corrupt, fatal at construction
//! - `InvalidFeatureVector` — out-of-domain value or wrong dimensionality
//! - `InvalidInputValue` — field missing or non-numeric before vectorization

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// External artifacts (scaler, classifier) missing or corrupt.
    /// Raised at construction, never retried automatically.
    ModelUnavailable(String),

    /// A reading outside the measurable domain, or a vector with the
    /// wrong dimensionality after construction. Recoverable by the caller.
    InvalidFeatureVector(String),

    /// A field missing or non-numeric before vector construction.
    /// Rejected before the scaler or classifier is touched.
    InvalidInputValue { field: String, reason: String },
}

impl ClassifyError {
    /// Dimensionality mismatch, naming both counts
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Self::InvalidFeatureVector(format!(
            "expected {} dimensions, got {}",
            expected, got
        ))
    }

    /// Short machine-readable kind, stable across message changes
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelUnavailable(_) => "ModelUnavailable",
            Self::InvalidFeatureVector(_) => "InvalidFeatureVector",
            Self::InvalidInputValue { .. } => "InvalidInputValue",
        }
    }
}

impl std::fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModelUnavailable(msg) => write!(f, "ModelUnavailable: {}", msg),
            Self::InvalidFeatureVector(msg) => write!(f, "InvalidFeatureVector: {}", msg),
            Self::InvalidInputValue { field, reason } => {
                write!(f, "InvalidInputValue: field '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ClassifyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_names_counts() {
        let err = ClassifyError::dimension_mismatch(5, 4);
        let msg = err.to_string();
        assert!(msg.contains('5') && msg.contains('4'));
        assert_eq!(err.kind(), "InvalidFeatureVector");
    }

    #[test]
    fn test_display_carries_kind() {
        let err = ClassifyError::InvalidInputValue {
            field: "ph".to_string(),
            reason: "missing".to_string(),
        };
        assert!(err.to_string().starts_with("InvalidInputValue"));

        let err = ClassifyError::ModelUnavailable("no artifacts".to_string());
        assert!(err.to_string().starts_with("ModelUnavailable"));
    }
}
