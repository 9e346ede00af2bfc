//! Model identifiers and their fixed parameter sets
//!
//! A model identifier does not refer to a trained artefact. It only selects
//! the multipliers, threshold and published metrics used by the scorer and
//! the feature importance generator.

mod metrics;

pub use metrics::{MetricTrend, ModelMetrics, PublishedMetrics, TrendDirection};

use log::warn;
use serde::{Serialize, Serializer};
use std::fmt;

/// Selected model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelId {
    Championship,
    CeilingBreaker,
    UltraOptimized,
    /// Any unrecognised identifier; uses the fallback parameter set
    Other(String),
}

impl ModelId {
    /// The three named models, in dashboard order
    pub const NAMED: [ModelId; 3] = [
        ModelId::Championship,
        ModelId::CeilingBreaker,
        ModelId::UltraOptimized,
    ];

    /// Parse an identifier. Never fails; unknown values become `Other`.
    pub fn parse(id: &str) -> Self {
        match id.trim() {
            "championship" => ModelId::Championship,
            "ceiling-breaker" => ModelId::CeilingBreaker,
            "ultra-optimized" => ModelId::UltraOptimized,
            other => {
                warn!("Unknown model id '{}', using fallback parameters", other);
                ModelId::Other(other.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ModelId::Championship => "championship",
            ModelId::CeilingBreaker => "ceiling-breaker",
            ModelId::UltraOptimized => "ultra-optimized",
            ModelId::Other(id) => id,
        }
    }

    /// Look up the parameter set for this model
    pub fn params(&self) -> ModelParams {
        ModelParams::for_model(self)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ModelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Parameters selected by a model identifier
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub model: ModelId,
    /// Applied to the deterministic base risk score
    pub score_multiplier: f64,
    /// `predicted_nill = 1` when the risk score exceeds this
    pub nill_threshold: f64,
    /// Applied to every base feature importance
    pub importance_multiplier: f64,
    /// Static accuracy-family metrics shown for this model
    pub published: PublishedMetrics,
}

impl ModelParams {
    pub fn for_model(model: &ModelId) -> Self {
        let (score_multiplier, nill_threshold, importance_multiplier, published) = match model {
            ModelId::Championship => (1.05, 0.61, 1.02, PublishedMetrics::new(0.918, 0.882, 0.865, 0.873)),
            ModelId::CeilingBreaker => (0.95, 0.58, 0.98, PublishedMetrics::new(0.932, 0.903, 0.892, 0.898)),
            ModelId::UltraOptimized => (0.90, 0.55, 1.05, PublishedMetrics::new(0.945, 0.916, 0.908, 0.912)),
            ModelId::Other(_) => (1.0, 0.60, 1.0, PublishedMetrics::new(0.915, 0.88, 0.86, 0.87)),
        };

        Self {
            model: model.clone(),
            score_multiplier,
            nill_threshold,
            importance_multiplier,
            published,
        }
    }

    /// Fallback parameter set used for unrecognised models
    pub fn fallback() -> Self {
        Self::for_model(&ModelId::Other(String::new()))
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_named_models() {
        for model in ModelId::NAMED {
            assert_eq!(ModelId::parse(model.as_str()), model);
        }
        assert_eq!(ModelId::parse("gradient-boost"), ModelId::Other("gradient-boost".to_string()));
    }

    #[test]
    fn test_parameter_table() {
        let p = ModelId::Championship.params();
        assert_eq!((p.score_multiplier, p.nill_threshold, p.importance_multiplier), (1.05, 0.61, 1.02));
        let p = ModelId::CeilingBreaker.params();
        assert_eq!((p.score_multiplier, p.nill_threshold, p.importance_multiplier), (0.95, 0.58, 0.98));
        let p = ModelId::UltraOptimized.params();
        assert_eq!((p.score_multiplier, p.nill_threshold, p.importance_multiplier), (0.90, 0.55, 1.05));
        let p = ModelId::parse("anything").params();
        assert_eq!((p.score_multiplier, p.nill_threshold, p.importance_multiplier), (1.0, 0.60, 1.0));
    }

    #[test]
    fn test_unknown_model_falls_back() {
        let p = ModelId::parse("").params();
        assert_eq!(p.published, ModelParams::fallback().published);
        assert_eq!(p.nill_threshold, ModelParams::default().nill_threshold);
    }
}
