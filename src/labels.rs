//! Forward-looking NILL labels for the training set
//!
//! Each agent-month is labelled with whether the agent sold anything in the
//! following month. The agent's final month has no successor and is dropped.

use crate::records::NormalizedRecord;
use std::collections::HashMap;

/// A training record annotated with next-period sales
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRecord {
    pub record: NormalizedRecord,
    /// 1 if the following period's `new_policy_count > 0`, else 0
    pub target_column: u8,
}

/// Group records by `agent_code`, keeping groups in order of first appearance
/// and records in input order within each group.
pub fn group_by_agent(records: &[NormalizedRecord]) -> Vec<Vec<&NormalizedRecord>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&NormalizedRecord>> = Vec::new();

    for record in records {
        let slot = *index.entry(record.agent_code.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(record);
    }

    groups
}

/// Build labelled records from the training set.
///
/// Within an agent, records are ordered by `year_month` (unset sorts as
/// 1970-01-01). The sort is stable: two records in the same period keep the
/// order they had in the input.
pub fn create_target(records: &[NormalizedRecord]) -> Vec<LabeledRecord> {
    let mut labeled = Vec::with_capacity(records.len());

    for mut group in group_by_agent(records) {
        group.sort_by_key(|r| r.period_key());

        for pair in group.windows(2) {
            let next_sold = pair[1].new_policy_count.is_some_and(|n| n > 0.0);
            labeled.push(LabeledRecord {
                record: pair[0].clone(),
                target_column: u8::from(next_sold),
            });
        }
    }

    labeled
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(agent: &str, month: u32, policies: f64) -> NormalizedRecord {
        NormalizedRecord {
            agent_code: agent.to_string(),
            new_policy_count: Some(policies),
            year_month: NaiveDate::from_ymd_opt(2023, month, 1),
            ..Default::default()
        }
    }

    #[test]
    fn test_two_agent_scenario() {
        let records = vec![
            rec("A", 1, 2.0),
            rec("A", 2, 0.0),
            rec("B", 1, 0.0),
            rec("B", 2, 3.0),
        ];
        let labeled = create_target(&records);
        assert_eq!(labeled.len(), 2);
        assert_eq!(labeled[0].record.agent_code, "A");
        assert_eq!(labeled[0].target_column, 0);
        assert_eq!(labeled[1].record.agent_code, "B");
        assert_eq!(labeled[1].target_column, 1);
    }

    #[test]
    fn test_n_minus_one_labels_in_chronological_order() {
        // Deliberately out of order
        let records = vec![
            rec("A", 3, 1.0),
            rec("A", 1, 0.0),
            rec("A", 4, 0.0),
            rec("A", 2, 5.0),
        ];
        let labeled = create_target(&records);
        assert_eq!(labeled.len(), 3);

        let months: Vec<u32> = labeled
            .iter()
            .map(|l| chrono::Datelike::month(&l.record.year_month.unwrap()))
            .collect();
        assert_eq!(months, vec![1, 2, 3]);
        // Jan -> Feb (5 sold), Feb -> Mar (1 sold), Mar -> Apr (0 sold)
        let targets: Vec<u8> = labeled.iter().map(|l| l.target_column).collect();
        assert_eq!(targets, vec![1, 1, 0]);
    }

    #[test]
    fn test_single_record_agent_contributes_nothing() {
        let labeled = create_target(&[rec("solo", 1, 4.0)]);
        assert!(labeled.is_empty());
        assert!(create_target(&[]).is_empty());
    }

    #[test]
    fn test_missing_next_count_labels_zero() {
        let mut next = rec("A", 2, 0.0);
        next.new_policy_count = None;
        let labeled = create_target(&[rec("A", 1, 1.0), next]);
        assert_eq!(labeled[0].target_column, 0);
    }

    #[test]
    fn test_unset_period_sorts_first_and_ties_keep_input_order() {
        let mut undated = rec("A", 1, 7.0);
        undated.year_month = None;
        let first_dup = rec("A", 5, 0.0);
        let second_dup = rec("A", 5, 2.0);
        let records = vec![first_dup, undated, second_dup];

        let labeled = create_target(&records);
        assert_eq!(labeled.len(), 2);
        assert_eq!(labeled[0].record.year_month, None);
        // undated -> first duplicate (0 sold), first duplicate -> second duplicate (2 sold)
        assert_eq!(labeled[0].target_column, 0);
        assert_eq!(labeled[1].record.new_policy_count, Some(0.0));
        assert_eq!(labeled[1].target_column, 1);
    }
}
