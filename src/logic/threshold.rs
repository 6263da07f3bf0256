//! Known-Good Threshold Rule
//!
//! Fast-path safety check over three readings. The rule only encodes a
//! known-good region: when any bound fails it is indeterminate and the
//! caller must consult the model, which also factors depth and flow.
//! It never asserts Unsafe on its own.

use serde::{Deserialize, Serialize};

use crate::constants::{PH_SAFE_MAX, PH_SAFE_MIN, TDS_SAFE_MAX_MG_PER_L, TURBIDITY_SAFE_MAX_NTU};
use crate::logic::features::WaterSample;

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of the threshold rule. `Indeterminate` defers to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdOutcome {
    Safe,
    Indeterminate,
}

// ============================================================================
// RULE
// ============================================================================

/// Inclusive bounds of the known-good region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub ph_min: f32,
    pub ph_max: f32,
    pub tds_max_mg_per_l: f32,
    pub turbidity_max_ntu: f32,
}

impl Default for ThresholdRule {
    fn default() -> Self {
        Self {
            ph_min: PH_SAFE_MIN,
            ph_max: PH_SAFE_MAX,
            tds_max_mg_per_l: TDS_SAFE_MAX_MG_PER_L,
            turbidity_max_ntu: TURBIDITY_SAFE_MAX_NTU,
        }
    }
}

impl ThresholdRule {
    /// Evaluate the rule. Safe only when all three bounds hold, inclusive.
    pub fn evaluate(&self, sample: &WaterSample) -> ThresholdOutcome {
        let ph_ok = sample.ph >= self.ph_min && sample.ph <= self.ph_max;
        let tds_ok = sample.tds_mg_per_l <= self.tds_max_mg_per_l;
        let turbidity_ok = sample.turbidity_ntu <= self.turbidity_max_ntu;

        if ph_ok && tds_ok && turbidity_ok {
            ThresholdOutcome::Safe
        } else {
            ThresholdOutcome::Indeterminate
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ph: f32, tds: f32, turbidity: f32) -> WaterSample {
        WaterSample::new(ph, tds, turbidity, 2.0, 50.0).unwrap()
    }

    #[test]
    fn test_all_bounds_hold() {
        let rule = ThresholdRule::default();
        assert_eq!(rule.evaluate(&sample(7.0, 400.0, 3.0)), ThresholdOutcome::Safe);
    }

    #[test]
    fn test_ph_bounds_inclusive() {
        let rule = ThresholdRule::default();
        assert_eq!(rule.evaluate(&sample(6.5, 400.0, 3.0)), ThresholdOutcome::Safe);
        assert_eq!(rule.evaluate(&sample(8.5, 400.0, 3.0)), ThresholdOutcome::Safe);
        assert_eq!(
            rule.evaluate(&sample(6.49, 400.0, 3.0)),
            ThresholdOutcome::Indeterminate
        );
        assert_eq!(
            rule.evaluate(&sample(8.51, 400.0, 3.0)),
            ThresholdOutcome::Indeterminate
        );
    }

    #[test]
    fn test_tds_bound_inclusive() {
        let rule = ThresholdRule::default();
        assert_eq!(rule.evaluate(&sample(7.0, 500.0, 3.0)), ThresholdOutcome::Safe);
        assert_eq!(
            rule.evaluate(&sample(7.0, 500.1, 3.0)),
            ThresholdOutcome::Indeterminate
        );
    }

    #[test]
    fn test_turbidity_bound_inclusive() {
        let rule = ThresholdRule::default();
        assert_eq!(rule.evaluate(&sample(7.0, 400.0, 5.0)), ThresholdOutcome::Safe);
        assert_eq!(
            rule.evaluate(&sample(7.0, 400.0, 5.01)),
            ThresholdOutcome::Indeterminate
        );
    }

    #[test]
    fn test_failure_is_indeterminate_not_unsafe() {
        // One failing bound defers; the rule has no Unsafe arm at all.
        let rule = ThresholdRule::default();
        assert_eq!(
            rule.evaluate(&sample(5.0, 400.0, 3.0)),
            ThresholdOutcome::Indeterminate
        );
        assert_eq!(
            rule.evaluate(&sample(7.0, 900.0, 3.0)),
            ThresholdOutcome::Indeterminate
        );
    }
}
