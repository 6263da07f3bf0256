//! Classification Orchestrator
//!
//! Composes the threshold rule with the external scale+predict pipeline.
//! The threshold rule runs first and short-circuits: a clearly-good sample
//! never depends on the artifacts being loaded or correct. Inside the
//! known-good region the rule wins even where the model would disagree;
//! that is the shipped business rule, not an accident.

use serde::{Deserialize, Serialize};

use crate::logic::errors::ClassifyError;
use crate::logic::features::WaterSample;
use crate::logic::model::bundle::{ArtifactBundle, ModelMetadata};
use crate::logic::model::inference::BinaryClassifier;
use crate::logic::model::scaler::FeatureScaler;
use crate::logic::threshold::{ThresholdOutcome, ThresholdRule};

// ============================================================================
// VERDICT
// ============================================================================

/// Two-valued classification outcome. Produced atomically per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Safe,
    Unsafe,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Unsafe => write!(f, "Unsafe"),
        }
    }
}

/// Which path produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionPath {
    Threshold,
    Model,
}

/// Verdict plus the path that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub verdict: Verdict,
    pub decided_by: DecisionPath,
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

/// Stateless per-call classifier over injected artifacts.
///
/// The scaler and classifier are constructor-injected so production code
/// wires the loaded bundle and tests wire in-memory doubles. No mutable
/// state; any number of calls may run concurrently.
pub struct PotabilityClassifier {
    rule: ThresholdRule,
    scaler: Box<dyn FeatureScaler>,
    classifier: Box<dyn BinaryClassifier>,
    metadata: Option<ModelMetadata>,
}

impl PotabilityClassifier {
    /// Wire explicit scaler and classifier implementations.
    pub fn new(scaler: Box<dyn FeatureScaler>, classifier: Box<dyn BinaryClassifier>) -> Self {
        Self {
            rule: ThresholdRule::default(),
            scaler,
            classifier,
            metadata: None,
        }
    }

    /// Wire a loaded artifact bundle.
    pub fn from_bundle(bundle: ArtifactBundle) -> Self {
        let mut engine = Self::new(Box::new(bundle.scaler), Box::new(bundle.classifier));
        engine.metadata = Some(bundle.metadata);
        engine
    }

    /// Load artifacts from a directory and wire them. Missing or corrupt
    /// artifacts fail here, at construction, never mid-request.
    pub fn load(dir: &std::path::Path) -> Result<Self, ClassifyError> {
        Ok(Self::from_bundle(ArtifactBundle::load(dir)?))
    }

    /// Replace the default threshold bounds.
    pub fn with_rule(mut self, rule: ThresholdRule) -> Self {
        self.rule = rule;
        self
    }

    /// Metadata of the loaded bundle, if this engine was built from one.
    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.metadata.as_ref()
    }

    /// Classify one sample.
    pub fn classify(&self, sample: &WaterSample) -> Result<Verdict, ClassifyError> {
        Ok(self.classify_detailed(sample)?.verdict)
    }

    /// Classify one sample, reporting which path decided.
    pub fn classify_detailed(&self, sample: &WaterSample) -> Result<Classification, ClassifyError> {
        if self.rule.evaluate(sample) == ThresholdOutcome::Safe {
            log::debug!("Sample inside known-good region, threshold short-circuit");
            return Ok(Classification {
                verdict: Verdict::Safe,
                decided_by: DecisionPath::Threshold,
            });
        }

        let raw = sample.to_vector();
        let scaled = self.scaler.scale(&raw)?;
        let label = self.classifier.predict(&scaled)?;

        log::debug!("Model fallback: label {}", label);

        Ok(Classification {
            verdict: map_label(label),
            decided_by: DecisionPath::Model,
        })
    }
}

/// Label convention of the training artifact: 1 is potable.
fn map_label(label: i64) -> Verdict {
    if label == 1 {
        Verdict::Safe
    } else {
        Verdict::Unsafe
    }
}

// ============================================================================
// TESTS
// ============================================================================
