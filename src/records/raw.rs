//! Raw dataset rows with dynamically typed cells

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single cell value after type inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Empty cell
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Any cell that parses as a finite number
    Number(f64),
    /// Everything else
    Text(String),
}

impl RawValue {
    /// Infer the type of a CSV cell.
    ///
    /// Empty (after trimming) becomes `Null`, booleans and finite numbers are
    /// recognised, anything else stays text as written.
    pub fn infer(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return RawValue::Null;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return RawValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return RawValue::Bool(false);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => RawValue::Number(n),
            _ => RawValue::Text(cell.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Numeric view of the value: numbers and numeric text only
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Text view of the value, `None` for null and empty strings
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Null => None,
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Number(n) => Some(format_number(*n)),
            RawValue::Text(s) if s.trim().is_empty() => None,
            RawValue::Text(s) => Some(s.clone()),
        }
    }
}

/// Render a number the way a spreadsheet would show an identifier:
/// integral values lose the trailing `.0`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One dataset row keyed by column header
pub type RawRecord = HashMap<String, RawValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_types() {
        assert_eq!(RawValue::infer(""), RawValue::Null);
        assert_eq!(RawValue::infer("   "), RawValue::Null);
        assert_eq!(RawValue::infer("42"), RawValue::Number(42.0));
        assert_eq!(RawValue::infer(" 3.5 "), RawValue::Number(3.5));
        assert_eq!(RawValue::infer("TRUE"), RawValue::Bool(true));
        assert_eq!(RawValue::infer("AG-001"), RawValue::Text("AG-001".to_string()));
        assert_eq!(RawValue::infer("NaN"), RawValue::Text("NaN".to_string()));
    }

    #[test]
    fn test_numeric_and_text_views() {
        assert_eq!(RawValue::Text("7".to_string()).as_number(), Some(7.0));
        assert_eq!(RawValue::Bool(true).as_number(), None);
        assert_eq!(RawValue::Null.as_number(), None);
        assert_eq!(RawValue::Number(1234.0).as_text(), Some("1234".to_string()));
        assert_eq!(RawValue::Number(12.5).as_text(), Some("12.5".to_string()));
        assert_eq!(RawValue::Null.as_text(), None);
    }
}
