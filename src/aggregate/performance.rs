//! Sales performance by experience bucket

use crate::records::NormalizedRecord;
use serde::Serialize;

/// Fixed experience buckets on `months_with_company`, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceBucket {
    pub label: &'static str,
    pub min_months: f64,
    pub max_months: f64,
}

impl ExperienceBucket {
    pub fn contains(&self, months: f64) -> bool {
        months >= self.min_months && months <= self.max_months
    }
}

pub const EXPERIENCE_BUCKETS: [ExperienceBucket; 5] = [
    ExperienceBucket { label: "0-3 months", min_months: 0.0, max_months: 3.0 },
    ExperienceBucket { label: "4-6 months", min_months: 4.0, max_months: 6.0 },
    ExperienceBucket { label: "7-12 months", min_months: 7.0, max_months: 12.0 },
    ExperienceBucket { label: "1-2 years", min_months: 13.0, max_months: 24.0 },
    ExperienceBucket { label: "2+ years", min_months: 25.0, max_months: f64::INFINITY },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePerformance {
    pub experience: String,
    pub avg_policies: f64,
    /// Percentage of agent-months with no policy sold, 0..=100
    pub nill_rate: f64,
    pub total_agents: usize,
}

/// Performance for each of the five buckets, in bucket order.
///
/// Bounds are whole months, so fractional tenures falling between two
/// buckets (e.g. 3.5) are not counted in either.
pub fn agent_performance(records: &[NormalizedRecord]) -> Vec<ExperiencePerformance> {
    EXPERIENCE_BUCKETS
        .iter()
        .map(|bucket| {
            let members: Vec<&NormalizedRecord> = records
                .iter()
                .filter(|r| bucket.contains(r.months_or_zero()))
                .collect();

            let total_agents = members.len();
            let (avg_policies, nill_rate) = if total_agents > 0 {
                let n = total_agents as f64;
                let policies: f64 = members.iter().map(|r| r.policies_or_zero()).sum();
                let nill = members.iter().filter(|r| r.is_nill()).count() as f64;
                (policies / n, nill / n * 100.0)
            } else {
                (0.0, 0.0)
            };

            ExperiencePerformance {
                experience: bucket.label.to_string(),
                avg_policies,
                nill_rate,
                total_agents,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rec(months: f64, policies: f64) -> NormalizedRecord {
        NormalizedRecord {
            months_with_company: Some(months),
            new_policy_count: Some(policies),
            ..Default::default()
        }
    }

    #[test]
    fn test_bucket_stats() {
        let records = vec![rec(1.0, 0.0), rec(3.0, 4.0), rec(5.0, 1.0), rec(40.0, 0.0), rec(100.0, 0.0)];
        let perf = agent_performance(&records);
        assert_eq!(perf.len(), 5);

        assert_eq!(perf[0].experience, "0-3 months");
        assert_eq!(perf[0].total_agents, 2);
        assert_relative_eq!(perf[0].avg_policies, 2.0);
        assert_relative_eq!(perf[0].nill_rate, 50.0);

        assert_eq!(perf[1].total_agents, 1);
        assert_eq!(perf[1].nill_rate, 0.0);

        assert_eq!(perf[2].total_agents, 0);
        assert_eq!(perf[2].avg_policies, 0.0);

        assert_eq!(perf[4].experience, "2+ years");
        assert_eq!(perf[4].total_agents, 2);
        assert_relative_eq!(perf[4].nill_rate, 100.0);
    }

    #[test]
    fn test_fractional_tenure_between_buckets() {
        let perf = agent_performance(&[rec(3.5, 1.0)]);
        assert!(perf.iter().all(|p| p.total_agents == 0));
    }

    #[test]
    fn test_empty_set_zeroed() {
        let perf = agent_performance(&[]);
        assert_eq!(perf.len(), 5);
        assert!(perf.iter().all(|p| p.total_agents == 0 && p.nill_rate == 0.0 && p.avg_policies == 0.0));
    }

    #[test]
    fn test_nill_rate_is_percentage() {
        let records: Vec<_> = (0..50).map(|i| rec((i % 30) as f64, (i % 4) as f64)).collect();
        for p in agent_performance(&records) {
            assert!((0.0..=100.0).contains(&p.nill_rate));
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(agent_performance(&[rec(2.0, 0.0)])).unwrap();
        assert_eq!(json[0]["totalAgents"], 1);
        assert_eq!(json[0]["nillRate"], 100.0);
    }
}
