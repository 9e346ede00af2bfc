//! Synthetic feature importance ranking
//!
//! The list is fixed; each base importance is scaled by the model's importance
//! multiplier and a uniform jitter in [0.95, 1.05), then capped at 0.99.
//! Entries stay in base-list order, callers sort if they need a ranking.

use crate::model::ModelParams;
use rand::Rng;
use serde::Serialize;

/// Upper cap on any reported importance
pub const MAX_IMPORTANCE: f64 = 0.99;

/// Base importances, in output order
pub const BASE_FEATURES: [(&str, f64); 16] = [
    ("unique_proposal", 0.85),
    ("unique_quotations", 0.78),
    ("unique_proposals_last_7_days", 0.72),
    ("unique_quotations_last_7_days", 0.69),
    ("agent_age", 0.65),
    ("months_with_company", 0.62),
    ("unique_customers", 0.61),
    ("unique_customers_last_7_days", 0.59),
    ("proposal_momentum", 0.58),
    ("quotation_conversion_rate", 0.55),
    ("unique_proposals_last_15_days", 0.54),
    ("unique_quotations_last_15_days", 0.53),
    ("hist_nill_rate", 0.52),
    ("hist_current_nill_streak", 0.48),
    ("months_to_first_sale", 0.45),
    ("proposal_consistency", 0.40),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Scale one base importance with an explicit jitter factor
pub fn scaled_importance(base: f64, multiplier: f64, jitter: f64) -> f64 {
    (base * multiplier * jitter).min(MAX_IMPORTANCE)
}

/// Generate the 16-entry importance list for a model
pub fn feature_importance<R: Rng + ?Sized>(params: &ModelParams, rng: &mut R) -> Vec<FeatureImportance> {
    BASE_FEATURES
        .iter()
        .map(|&(feature, base)| {
            let jitter = 0.95 + rng.gen::<f64>() * 0.1;
            FeatureImportance {
                feature: feature.to_string(),
                importance: scaled_importance(base, params.importance_multiplier, jitter),
            }
        })
        .collect()
}

/// Sort a copy of the list by importance, highest first
pub fn ranked(features: &[FeatureImportance]) -> Vec<FeatureImportance> {
    let mut sorted = features.to_vec();
    sorted.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    sorted
}
