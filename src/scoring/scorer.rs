//! NILL risk scoring heuristic
//!
//! The score is a weighted blend of three activity signals, scaled by the
//! model multiplier, perturbed by uniform noise and clamped:
//!
//! ```text
//! base  = 0.4*(1 - quotations/max(1, proposals))
//!       + 0.3*max(0, (50 - age)/50)
//!       + 0.3*max(0, (20 - proposals)/20)
//! score = clamp(base*multiplier + noise, 0.10, 0.98),  noise in [-0.1, 0.1)
//! ```
//!
//! The noise draw is a parameter of [`score_with_noise`] so the arithmetic can
//! be checked exactly; [`RiskScorer`] draws it from a caller-supplied RNG.

use super::prediction::{factors, PredictionRecord, RiskCategory};
use crate::model::ModelParams;
use crate::records::NormalizedRecord;
use rand::Rng;

/// Lower clamp on the final risk score
pub const MIN_RISK_SCORE: f64 = 0.10;
/// Upper clamp on the final risk score
pub const MAX_RISK_SCORE: f64 = 0.98;
/// Half-width of the uniform noise band
pub const NOISE_AMPLITUDE: f64 = 0.1;
/// Age assumed when the record has none
pub const DEFAULT_AGENT_AGE: f64 = 30.0;

/// Activity signals read from one inference record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInputs {
    pub proposals: f64,
    pub quotations: f64,
    pub age: f64,
    pub activity_ratio: f64,
}

impl RiskInputs {
    pub fn from_record(record: &NormalizedRecord) -> Self {
        let proposals = record.proposals_or_zero();
        let quotations = record.quotations_or_zero();
        // Zero age is treated as missing
        let age = match record.agent_age {
            Some(a) if a.is_finite() && a > 0.0 => a,
            _ => DEFAULT_AGENT_AGE,
        };

        Self {
            proposals,
            quotations,
            age,
            activity_ratio: quotations / proposals.max(1.0),
        }
    }

    /// Deterministic score before the model multiplier and noise
    pub fn base_score(&self) -> f64 {
        0.4 * (1.0 - self.activity_ratio)
            + 0.3 * ((50.0 - self.age) / 50.0).max(0.0)
            + 0.3 * ((20.0 - self.proposals) / 20.0).max(0.0)
    }
}

/// Draw one noise value uniformly from [-0.1, 0.1)
pub fn draw_noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>() * 2.0 * NOISE_AMPLITUDE - NOISE_AMPLITUDE
}

/// Apply multiplier, noise and clamp to a base score
pub fn final_score(base_score: f64, multiplier: f64, noise: f64) -> f64 {
    (base_score * multiplier + noise).clamp(MIN_RISK_SCORE, MAX_RISK_SCORE)
}

/// Top risk factors in fixed priority order, at most three
pub fn top_factors(inputs: &RiskInputs, risk_score: f64) -> Vec<String> {
    let mut found: Vec<&str> = Vec::with_capacity(6);
    if inputs.proposals < 15.0 {
        found.push(factors::LOW_PROPOSALS);
    }
    if inputs.activity_ratio < 0.5 {
        found.push(factors::POOR_CONVERSION);
    }
    if inputs.age < 25.0 {
        found.push(factors::YOUNG_AGENT);
    }
    if inputs.age > 55.0 {
        found.push(factors::SENIOR_AGENT);
    }
    if found.len() < 2 {
        found.push(factors::MODERATE_ACTIVITY);
    }
    if risk_score > 0.7 {
        found.push(factors::ACTIVITY_DECLINE);
    }

    found.into_iter().take(3).map(str::to_string).collect()
}

/// Score one record with an explicit noise value
pub fn score_with_noise(record: &NormalizedRecord, params: &ModelParams, noise: f64) -> PredictionRecord {
    let inputs = RiskInputs::from_record(record);
    let risk_score = final_score(inputs.base_score(), params.score_multiplier, noise);
    let risk_category = RiskCategory::from_score(risk_score);

    PredictionRecord {
        agent_code: record.agent_code.clone(),
        agent_age: inputs.age,
        months_with_company: record.months_or_zero(),
        unique_proposal: inputs.proposals,
        unique_quotations: inputs.quotations,
        risk_score,
        predicted_nill: u8::from(risk_score > params.nill_threshold),
        risk_category,
        top_factors: top_factors(&inputs, risk_score),
        recommendation: risk_category.recommendation().to_string(),
    }
}

/// Scorer bound to one model's parameters
#[derive(Debug, Clone)]
pub struct RiskScorer {
    params: ModelParams,
}

impl RiskScorer {
    pub fn new(params: ModelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Score a single record, drawing one noise value from `rng`
    pub fn predict<R: Rng + ?Sized>(&self, record: &NormalizedRecord, rng: &mut R) -> PredictionRecord {
        let noise = draw_noise(rng);
        score_with_noise(record, &self.params, noise)
    }

    /// Score every record in order; an empty input gives an empty output
    pub fn predict_all<R: Rng + ?Sized>(&self, records: &[NormalizedRecord], rng: &mut R) -> Vec<PredictionRecord> {
        records.iter().map(|r| self.predict(r, rng)).collect()
    }
}
