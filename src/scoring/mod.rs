//! Per-agent NILL risk inference

mod prediction;
mod scorer;

pub use prediction::{factors, PredictionRecord, RiskCategory};
pub use scorer::{
    draw_noise, final_score, score_with_noise, top_factors, RiskInputs, RiskScorer,
    DEFAULT_AGENT_AGE, MAX_RISK_SCORE, MIN_RISK_SCORE, NOISE_AMPLITUDE,
};
