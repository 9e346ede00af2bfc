//! Prediction output structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal risk label derived from the risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// High above 0.70, Medium above 0.40, otherwise Low
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            RiskCategory::High
        } else if score > 0.4 {
            RiskCategory::Medium
        } else {
            RiskCategory::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
        }
    }

    /// Coaching recommendation shown next to the agent
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskCategory::High => "Immediate attention needed. Schedule a one-on-one coaching session focused on improving conversion rates and increasing proposal activity.",
            RiskCategory::Medium => "Regular monitoring required. Provide weekly targets and check-ins to maintain and improve performance.",
            RiskCategory::Low => "Continue with current approach. Consider as potential mentor for high-risk agents.",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk factors in evaluation priority order
pub mod factors {
    pub const LOW_PROPOSALS: &str = "Low proposal count";
    pub const POOR_CONVERSION: &str = "Poor conversion ratio";
    pub const YOUNG_AGENT: &str = "Young agent";
    pub const SENIOR_AGENT: &str = "Senior agent";
    pub const MODERATE_ACTIVITY: &str = "Moderate activity";
    pub const ACTIVITY_DECLINE: &str = "Recent activity decline";
}

/// Per-agent NILL risk inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub agent_code: String,
    /// Age used by the scorer (30 when the source had none)
    pub agent_age: f64,
    pub months_with_company: f64,
    pub unique_proposal: f64,
    pub unique_quotations: f64,
    /// Always within [0.10, 0.98]
    pub risk_score: f64,
    /// 1 = predicted to sell nothing next period
    pub predicted_nill: u8,
    pub risk_category: RiskCategory,
    /// At most three, in priority order
    pub top_factors: Vec<String>,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(RiskCategory::from_score(0.98), RiskCategory::High);
        assert_eq!(RiskCategory::from_score(0.7000001), RiskCategory::High);
        assert_eq!(RiskCategory::from_score(0.70), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(0.41), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(0.40), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(0.10), RiskCategory::Low);
    }

    #[test]
    fn test_recommendation_text() {
        assert_eq!(
            RiskCategory::High.recommendation(),
            "Immediate attention needed. Schedule a one-on-one coaching session focused on improving conversion rates and increasing proposal activity."
        );
        assert_eq!(
            RiskCategory::Medium.recommendation(),
            "Regular monitoring required. Provide weekly targets and check-ins to maintain and improve performance."
        );
        assert_eq!(
            RiskCategory::Low.recommendation(),
            "Continue with current approach. Consider as potential mentor for high-risk agents."
        );
    }

    #[test]
    fn test_category_serializes_as_label() {
        assert_eq!(serde_json::to_string(&RiskCategory::Medium).unwrap(), "\"Medium\"");
    }
}
