//! Water Sample - Core data structure for classification input
//!
//! Named fields instead of a loosely-ordered list, so feature order is
//! enforced by construction. `to_vector()` is the only path from a sample
//! to the raw feature array and always emits `FEATURE_LAYOUT` order.

use serde::{Deserialize, Serialize};

use super::layout::{feature_name, FEATURE_COUNT};
use crate::constants::{PH_DOMAIN_MAX, PH_DOMAIN_MIN};
use crate::logic::errors::ClassifyError;

// ============================================================================
// WATER SAMPLE
// ============================================================================

/// One set of readings for a single classification call.
///
/// Transient: constructed per request, never mutated, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterSample {
    /// pH (0-14)
    pub ph: f32,
    /// Total dissolved solids (mg/l), non-negative
    pub tds_mg_per_l: f32,
    /// Turbidity (NTU), non-negative
    pub turbidity_ntu: f32,
    /// Sampling depth (m), non-negative
    pub depth_m: f32,
    /// Flow discharge (l/min), non-negative
    pub flow_discharge_lpm: f32,
}

impl WaterSample {
    /// Build a sample, rejecting values no real reading can take.
    ///
    /// Non-finite values are an input error; finite values outside the
    /// measurable domain are a feature-vector error.
    pub fn new(
        ph: f32,
        tds_mg_per_l: f32,
        turbidity_ntu: f32,
        depth_m: f32,
        flow_discharge_lpm: f32,
    ) -> Result<Self, ClassifyError> {
        let sample = Self {
            ph,
            tds_mg_per_l,
            turbidity_ntu,
            depth_m,
            flow_discharge_lpm,
        };
        sample.validate()?;
        Ok(sample)
    }

    /// Build a sample from a JSON object keyed by feature names.
    ///
    /// Missing or non-numeric fields are rejected before the threshold
    /// rule or any artifact is touched.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ClassifyError> {
        let obj = value.as_object().ok_or_else(|| ClassifyError::InvalidInputValue {
            field: "<root>".to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        let mut readings = [0.0f32; FEATURE_COUNT];
        for (i, reading) in readings.iter_mut().enumerate() {
            let name = feature_name(i).unwrap_or_default();
            let raw = obj.get(name).ok_or_else(|| ClassifyError::InvalidInputValue {
                field: name.to_string(),
                reason: "missing".to_string(),
            })?;
            let num = raw.as_f64().ok_or_else(|| ClassifyError::InvalidInputValue {
                field: name.to_string(),
                reason: format!("not numeric: {}", raw),
            })?;
            *reading = num as f32;
        }

        Self::new(readings[0], readings[1], readings[2], readings[3], readings[4])
    }

    fn validate(&self) -> Result<(), ClassifyError> {
        for (name, value) in self.named_values() {
            if !value.is_finite() {
                return Err(ClassifyError::InvalidInputValue {
                    field: name.to_string(),
                    reason: format!("not a finite number: {}", value),
                });
            }
        }

        if self.ph < PH_DOMAIN_MIN || self.ph > PH_DOMAIN_MAX {
            return Err(ClassifyError::InvalidFeatureVector(format!(
                "ph {} outside measurable range {}-{}",
                self.ph, PH_DOMAIN_MIN, PH_DOMAIN_MAX
            )));
        }

        for (name, value) in self.named_values().into_iter().skip(1) {
            if value < 0.0 {
                return Err(ClassifyError::InvalidFeatureVector(format!(
                    "{} is negative: {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Raw feature array in `FEATURE_LAYOUT` order.
    pub fn to_vector(&self) -> [f32; FEATURE_COUNT] {
        [
            self.ph,
            self.tds_mg_per_l,
            self.turbidity_ntu,
            self.depth_m,
            self.flow_discharge_lpm,
        ]
    }

    /// (name, value) pairs in layout order, for validation and logging
    pub fn named_values(&self) -> [(&'static str, f32); FEATURE_COUNT] {
        [
            ("ph", self.ph),
            ("tds_mg_per_l", self.tds_mg_per_l),
            ("turbidity_ntu", self.turbidity_ntu),
            ("depth_m", self.depth_m),
            ("flow_discharge_lpm", self.flow_discharge_lpm),
        ]
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::FEATURE_LAYOUT;

    fn sample() -> WaterSample {
        WaterSample::new(7.0, 400.0, 3.0, 2.0, 50.0).unwrap()
    }

    #[test]
    fn test_to_vector_order() {
        let vector = sample().to_vector();
        assert_eq!(vector, [7.0, 400.0, 3.0, 2.0, 50.0]);

        // named_values mirrors the layout
        for ((name, _), expected) in sample().named_values().iter().zip(FEATURE_LAYOUT) {
            assert_eq!(name, expected);
        }
    }

    #[test]
    fn test_from_json_roundtrip() {
        let payload = serde_json::json!({
            "ph": 7.0,
            "tds_mg_per_l": 400.0,
            "turbidity_ntu": 3.0,
            "depth_m": 2.0,
            "flow_discharge_lpm": 50.0,
        });
        let parsed = WaterSample::from_json(&payload).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_from_json_missing_field() {
        let payload = serde_json::json!({
            "tds_mg_per_l": 400.0,
            "turbidity_ntu": 3.0,
            "depth_m": 2.0,
            "flow_discharge_lpm": 50.0,
        });
        let err = WaterSample::from_json(&payload).unwrap_err();
        assert_eq!(err.kind(), "InvalidInputValue");
        assert!(err.to_string().contains("ph"));
    }

    #[test]
    fn test_from_json_non_numeric_field() {
        let payload = serde_json::json!({
            "ph": "seven",
            "tds_mg_per_l": 400.0,
            "turbidity_ntu": 3.0,
            "depth_m": 2.0,
            "flow_discharge_lpm": 50.0,
        });
        let err = WaterSample::from_json(&payload).unwrap_err();
        assert_eq!(err.kind(), "InvalidInputValue");
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = WaterSample::new(f32::NAN, 400.0, 3.0, 2.0, 50.0).unwrap_err();
        assert_eq!(err.kind(), "InvalidInputValue");

        let err = WaterSample::new(7.0, f32::INFINITY, 3.0, 2.0, 50.0).unwrap_err();
        assert_eq!(err.kind(), "InvalidInputValue");
    }

    #[test]
    fn test_out_of_domain_rejected() {
        let err = WaterSample::new(15.0, 400.0, 3.0, 2.0, 50.0).unwrap_err();
        assert_eq!(err.kind(), "InvalidFeatureVector");

        let err = WaterSample::new(7.0, -1.0, 3.0, 2.0, 50.0).unwrap_err();
        assert_eq!(err.kind(), "InvalidFeatureVector");
        assert!(err.to_string().contains("tds_mg_per_l"));
    }

    #[test]
    fn test_ph_domain_bounds_inclusive() {
        assert!(WaterSample::new(0.0, 1.0, 1.0, 1.0, 1.0).is_ok());
        assert!(WaterSample::new(14.0, 1.0, 1.0, 1.0, 1.0).is_ok());
    }
}
