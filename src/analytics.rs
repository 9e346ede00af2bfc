//! Summaries and table views over agent predictions

use crate::scoring::{PredictionRecord, RiskCategory};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Tenure at or below which an agent counts as new
const NEW_AGENT_MAX_MONTHS: f64 = 3.0;
/// Tenure above which an agent counts as experienced
const EXPERIENCED_AGENT_MIN_MONTHS: f64 = 12.0;

/// Tally of predicted NILL vs non-NILL agents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionDistribution {
    pub nill: usize,
    pub non_nill: usize,
}

impl PredictionDistribution {
    pub fn from_predictions(predictions: &[PredictionRecord]) -> Self {
        let nill = predictions.iter().filter(|p| p.predicted_nill == 1).count();
        Self {
            nill,
            non_nill: predictions.len() - nill,
        }
    }
}

/// Portfolio-level risk summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub total_agents: usize,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub avg_risk_score: f64,
    /// New agents (tenure <= 3 months) predicted NILL
    pub new_agents_at_risk: usize,
    /// Experienced agents (tenure > 12 months) predicted NILL
    pub experienced_agents_at_risk: usize,
}

impl RiskSummary {
    pub fn from_predictions(predictions: &[PredictionRecord]) -> Self {
        if predictions.is_empty() {
            return Self::default();
        }

        let count = |category: RiskCategory| predictions.iter().filter(|p| p.risk_category == category).count();

        Self {
            total_agents: predictions.len(),
            high_risk_count: count(RiskCategory::High),
            medium_risk_count: count(RiskCategory::Medium),
            low_risk_count: count(RiskCategory::Low),
            avg_risk_score: predictions.iter().map(|p| p.risk_score).sum::<f64>() / predictions.len() as f64,
            new_agents_at_risk: count_at_risk(predictions, |p| p.months_with_company <= NEW_AGENT_MAX_MONTHS),
            experienced_agents_at_risk: count_at_risk(predictions, |p| {
                p.months_with_company > EXPERIENCED_AGENT_MIN_MONTHS
            }),
        }
    }

    /// Share of agents in a category, as a percentage
    pub fn category_share(&self, category: RiskCategory) -> f64 {
        if self.total_agents == 0 {
            return 0.0;
        }
        let n = match category {
            RiskCategory::High => self.high_risk_count,
            RiskCategory::Medium => self.medium_risk_count,
            RiskCategory::Low => self.low_risk_count,
        };
        n as f64 / self.total_agents as f64 * 100.0
    }
}

/// Agents matching `cohort` that are predicted NILL
fn count_at_risk<F>(predictions: &[PredictionRecord], cohort: F) -> usize
where
    F: Fn(&PredictionRecord) -> bool,
{
    predictions.iter().filter(|p| p.predicted_nill == 1 && cohort(p)).count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorCount {
    pub factor: String,
    pub count: usize,
}

/// How often each top factor appears, most frequent first.
///
/// Ties keep the order in which factors were first seen.
pub fn risk_factor_counts(predictions: &[PredictionRecord], limit: usize) -> Vec<FactorCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<FactorCount> = Vec::new();

    for factor in predictions.iter().flat_map(|p| p.top_factors.iter()) {
        match index.get(factor.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(factor.as_str(), counts.len());
                counts.push(FactorCount { factor: factor.clone(), count: 1 });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Sortable columns of the agent risk table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    AgentCode,
    AgentAge,
    MonthsWithCompany,
    #[default]
    RiskScore,
    PredictedNill,
    RiskCategory,
}

impl SortColumn {
    fn compare(&self, a: &PredictionRecord, b: &PredictionRecord) -> Ordering {
        match self {
            SortColumn::AgentCode => a.agent_code.cmp(&b.agent_code),
            SortColumn::AgentAge => a.agent_age.total_cmp(&b.agent_age),
            SortColumn::MonthsWithCompany => a.months_with_company.total_cmp(&b.months_with_company),
            SortColumn::RiskScore => a.risk_score.total_cmp(&b.risk_score),
            SortColumn::PredictedNill => a.predicted_nill.cmp(&b.predicted_nill),
            // Alphabetical, as the table shows the label text
            SortColumn::RiskCategory => a.risk_category.as_str().cmp(b.risk_category.as_str()),
        }
    }
}

/// Search and sort settings for the agent risk table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskTableQuery {
    /// Case-insensitive substring matched against agent code or risk category
    pub search: String,
    pub sort_by: SortColumn,
    pub descending: bool,
}

impl Default for RiskTableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_by: SortColumn::RiskScore,
            descending: true,
        }
    }
}

impl RiskTableQuery {
    /// Filter and stably sort the predictions
    pub fn apply<'a>(&self, predictions: &'a [PredictionRecord]) -> Vec<&'a PredictionRecord> {
        let needle = self.search.to_lowercase();
        let mut rows: Vec<&PredictionRecord> = predictions
            .iter()
            .filter(|p| {
                p.agent_code.to_lowercase().contains(&needle)
                    || p.risk_category.as_str().to_lowercase().contains(&needle)
            })
            .collect();

        rows.sort_by(|a, b| {
            let ord = self.sort_by.compare(a, b);
            if self.descending { ord.reverse() } else { ord }
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pred(code: &str, score: f64, nill: u8, months: f64, factors: &[&str]) -> PredictionRecord {
        let risk_category = RiskCategory::from_score(score);
        PredictionRecord {
            agent_code: code.to_string(),
            agent_age: 30.0,
            months_with_company: months,
            unique_proposal: 10.0,
            unique_quotations: 5.0,
            risk_score: score,
            predicted_nill: nill,
            risk_category,
            top_factors: factors.iter().map(|f| f.to_string()).collect(),
            recommendation: risk_category.recommendation().to_string(),
        }
    }

    fn sample() -> Vec<PredictionRecord> {
        vec![
            pred("AG-1", 0.85, 1, 2.0, &["Low proposal count", "Recent activity decline"]),
            pred("AG-2", 0.50, 0, 20.0, &["Moderate activity"]),
            pred("ag-3", 0.20, 0, 1.0, &["Low proposal count", "Moderate activity"]),
            pred("BX-4", 0.65, 1, 30.0, &["Poor conversion ratio", "Low proposal count"]),
        ]
    }

    #[test]
    fn test_distribution_tally() {
        let dist = PredictionDistribution::from_predictions(&sample());
        assert_eq!(dist, PredictionDistribution { nill: 2, non_nill: 2 });
        assert_eq!(PredictionDistribution::from_predictions(&[]), PredictionDistribution::default());
    }

    #[test]
    fn test_risk_summary() {
        let summary = RiskSummary::from_predictions(&sample());
        assert_eq!(summary.total_agents, 4);
        assert_eq!(summary.high_risk_count, 1);
        assert_eq!(summary.medium_risk_count, 2);
        assert_eq!(summary.low_risk_count, 1);
        assert_abs_diff_eq!(summary.avg_risk_score, 0.55, epsilon = 1e-12);
        assert_eq!(summary.new_agents_at_risk, 1);
        assert_eq!(summary.experienced_agents_at_risk, 1);
        assert_abs_diff_eq!(summary.category_share(RiskCategory::Medium), 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_risk_summary_empty() {
        let summary = RiskSummary::from_predictions(&[]);
        assert_eq!(summary, RiskSummary::default());
        assert_eq!(summary.category_share(RiskCategory::High), 0.0);
    }

    #[test]
    fn test_factor_counts_sorted_and_limited() {
        let counts = risk_factor_counts(&sample(), 6);
        assert_eq!(counts[0], FactorCount { factor: "Low proposal count".to_string(), count: 3 });
        assert_eq!(counts[1].factor, "Moderate activity");
        assert_eq!(counts[1].count, 2);
        // Tied at one: first seen first
        assert_eq!(counts[2].factor, "Recent activity decline");
        assert_eq!(counts[3].factor, "Poor conversion ratio");

        assert_eq!(risk_factor_counts(&sample(), 2).len(), 2);
    }

    #[test]
    fn test_table_default_sorts_by_score_descending() {
        let data = sample();
        let rows = RiskTableQuery::default().apply(&data);
        let codes: Vec<_> = rows.iter().map(|p| p.agent_code.as_str()).collect();
        assert_eq!(codes, vec!["AG-1", "BX-4", "AG-2", "ag-3"]);
    }

    #[test]
    fn test_table_search_is_case_insensitive() {
        let data = sample();
        let query = RiskTableQuery {
            search: "AG".to_string(),
            sort_by: SortColumn::AgentCode,
            descending: false,
        };
        let codes: Vec<_> = query.apply(&data).iter().map(|p| p.agent_code.clone()).collect();
        assert_eq!(codes, vec!["AG-1", "AG-2", "ag-3"]);

        let by_category = RiskTableQuery { search: "medium".to_string(), ..Default::default() };
        assert_eq!(by_category.apply(&data).len(), 2);
    }
}
