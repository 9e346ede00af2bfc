//! Canonical per-agent-per-month records

use super::raw::{RawRecord, RawValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// Columns promoted to typed fields; everything else lands in `extra`
const KNOWN_COLUMNS: [&str; 9] = [
    "agent_code",
    "agent_age",
    "months_with_company",
    "unique_proposal",
    "unique_quotations",
    "new_policy_count",
    "agent_join_month",
    "first_policy_sold_month",
    "year_month",
];

/// A dataset row with typed dates and numeric fields
///
/// Numeric fields keep `None` when the source cell was absent or non-numeric.
/// Downstream code reads them through the `*_or_zero` accessors, which floor
/// the value at 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedRecord {
    pub agent_code: String,
    pub agent_age: Option<f64>,
    pub months_with_company: Option<f64>,
    pub unique_proposal: Option<f64>,
    pub unique_quotations: Option<f64>,
    pub new_policy_count: Option<f64>,
    pub agent_join_month: Option<NaiveDate>,
    pub first_policy_sold_month: Option<NaiveDate>,
    pub year_month: Option<NaiveDate>,
    /// Columns the pipeline does not interpret, carried through unchanged
    pub extra: HashMap<String, RawValue>,
}

impl NormalizedRecord {
    /// Normalise one raw row. Never fails: bad cells are left unset.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let number = |col: &str| raw.get(col).and_then(RawValue::as_number);
        let date = |col: &str| raw.get(col).and_then(parse_period);

        let extra = raw
            .iter()
            .filter(|(k, _)| !KNOWN_COLUMNS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            agent_code: raw.get("agent_code").and_then(RawValue::as_text).unwrap_or_default(),
            agent_age: number("agent_age"),
            months_with_company: number("months_with_company"),
            unique_proposal: number("unique_proposal"),
            unique_quotations: number("unique_quotations"),
            new_policy_count: number("new_policy_count"),
            agent_join_month: date("agent_join_month"),
            first_policy_sold_month: date("first_policy_sold_month"),
            year_month: date("year_month"),
            extra,
        }
    }

    pub fn proposals_or_zero(&self) -> f64 {
        non_negative(self.unique_proposal)
    }

    pub fn quotations_or_zero(&self) -> f64 {
        non_negative(self.unique_quotations)
    }

    pub fn policies_or_zero(&self) -> f64 {
        non_negative(self.new_policy_count)
    }

    pub fn months_or_zero(&self) -> f64 {
        non_negative(self.months_with_company)
    }

    /// True when the agent sold nothing in this period (absent counts as 0)
    pub fn is_nill(&self) -> bool {
        self.policies_or_zero() == 0.0
    }

    /// Ordering key for chronological sorts; unset periods sort as 1970-01-01
    pub fn period_key(&self) -> NaiveDate {
        self.year_month.unwrap_or_default()
    }

    /// `YYYY-MM` bucket key, `None` when the period is unresolved
    pub fn month_key(&self) -> Option<String> {
        self.year_month.map(|d| d.format("%Y-%m").to_string())
    }
}

/// Floor an optional numeric field at 0, mapping unset and non-finite to 0
fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Parse a period cell into a date.
///
/// Only text cells are considered; numbers and booleans are not dates.
pub fn parse_period(value: &RawValue) -> Option<NaiveDate> {
    let text = match value {
        RawValue::Text(s) => s.trim(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc().date());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d);
        }
    }
    // Year-month only: anchor to the first of the month
    NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok()
}

/// Normalise a whole dataset, preserving length and order
pub fn normalize(rows: &[RawRecord]) -> Vec<NormalizedRecord> {
    rows.iter().map(NormalizedRecord::from_raw).collect()
}

/// Normalise the training set and sort it by agent, then chronologically.
///
/// The sort is stable, so records sharing an agent and period keep input order.
pub fn prepare_training_data(rows: &[RawRecord]) -> Vec<NormalizedRecord> {
    let mut records = normalize(rows);
    records.sort_by(|a, b| {
        a.agent_code
            .cmp(&b.agent_code)
            .then_with(|| a.period_key().cmp(&b.period_key()))
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, RawValue)]) -> RawRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    #[test]
    fn test_parse_period_formats() {
        let jan = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(parse_period(&text("2023-01-01")), Some(jan));
        assert_eq!(parse_period(&text("2023-01")), Some(jan));
        assert_eq!(parse_period(&text("2023/01/01")), Some(jan));
        assert_eq!(parse_period(&text("01/01/2023")), Some(jan));
        assert_eq!(parse_period(&text("2023-01-01T10:30:00Z")), Some(jan));
        assert_eq!(parse_period(&text("2023-01-01 00:00:00")), Some(jan));
        assert_eq!(parse_period(&text("not a date")), None);
        assert_eq!(parse_period(&RawValue::Number(202301.0)), None);
        assert_eq!(parse_period(&RawValue::Null), None);
    }

    #[test]
    fn test_from_raw_defaults_bad_cells() {
        let record = NormalizedRecord::from_raw(&raw(&[
            ("agent_code", RawValue::Number(1001.0)),
            ("agent_age", text("forty")),
            ("unique_proposal", RawValue::Number(-4.0)),
            ("unique_quotations", text("6")),
            ("year_month", text("garbage")),
            ("ANBP_value", RawValue::Number(120000.0)),
        ]));

        assert_eq!(record.agent_code, "1001");
        assert_eq!(record.agent_age, None);
        assert_eq!(record.unique_proposal, Some(-4.0));
        assert_eq!(record.proposals_or_zero(), 0.0);
        assert_eq!(record.quotations_or_zero(), 6.0);
        assert_eq!(record.policies_or_zero(), 0.0);
        assert!(record.is_nill());
        assert_eq!(record.year_month, None);
        assert_eq!(record.month_key(), None);
        assert_eq!(record.extra.get("ANBP_value"), Some(&RawValue::Number(120000.0)));
    }

    #[test]
    fn test_accessors_are_finite_and_non_negative() {
        let records = [
            NormalizedRecord::default(),
            NormalizedRecord {
                unique_proposal: Some(f64::NAN),
                unique_quotations: Some(f64::INFINITY),
                new_policy_count: Some(-1.0),
                months_with_company: Some(-12.0),
                ..Default::default()
            },
        ];
        for r in &records {
            for v in [r.proposals_or_zero(), r.quotations_or_zero(), r.policies_or_zero(), r.months_or_zero()] {
                assert!(v.is_finite() && v >= 0.0);
            }
        }
    }

    #[test]
    fn test_normalize_preserves_length_and_order() {
        let rows = vec![
            raw(&[("agent_code", text("B"))]),
            raw(&[("agent_code", text("A"))]),
        ];
        let records = normalize(&rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].agent_code, "B");
        assert_eq!(records[1].agent_code, "A");
    }

    #[test]
    fn test_prepare_training_data_sorts_by_agent_then_period() {
        let rows = vec![
            raw(&[("agent_code", text("B")), ("year_month", text("2023-02-01"))]),
            raw(&[("agent_code", text("A")), ("year_month", text("2023-03-01"))]),
            raw(&[("agent_code", text("A")), ("year_month", text("2023-01-01"))]),
            raw(&[("agent_code", text("A"))]),
        ];
        let records = prepare_training_data(&rows);
        let order: Vec<_> = records
            .iter()
            .map(|r| (r.agent_code.as_str(), r.month_key()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("A", None),
                ("A", Some("2023-01".to_string())),
                ("A", Some("2023-03".to_string())),
                ("B", Some("2023-02".to_string())),
            ]
        );
    }
}
