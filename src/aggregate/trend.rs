//! Monthly activity trend across all agents

use crate::records::NormalizedRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Averages for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// `YYYY-MM`
    pub month: String,
    pub avg_policies: f64,
    pub avg_proposals: f64,
    pub avg_quotations: f64,
    /// Fraction of agent-months with no policy sold, 0..=1
    pub nill_rate: f64,
}

#[derive(Debug, Default)]
struct MonthAccumulator {
    policies: f64,
    proposals: f64,
    quotations: f64,
    nill: usize,
    agents: usize,
}

/// Per-month averages, ascending by month.
///
/// Records without a resolvable `year_month` are left out.
pub fn monthly_trend(records: &[NormalizedRecord]) -> Vec<MonthlyTrend> {
    let mut months: BTreeMap<String, MonthAccumulator> = BTreeMap::new();

    for record in records {
        let Some(key) = record.month_key() else {
            continue;
        };
        let acc = months.entry(key).or_default();
        acc.policies += record.policies_or_zero();
        acc.proposals += record.proposals_or_zero();
        acc.quotations += record.quotations_or_zero();
        acc.nill += usize::from(record.is_nill());
        acc.agents += 1;
    }

    months
        .into_iter()
        .map(|(month, acc)| {
            let n = acc.agents as f64;
            MonthlyTrend {
                month,
                avg_policies: acc.policies / n,
                avg_proposals: acc.proposals / n,
                avg_quotations: acc.quotations / n,
                nill_rate: acc.nill as f64 / n,
            }
        })
        .collect()
}
