//! Headline metrics displayed for a model

use rand::Rng;
use serde::Serialize;

/// Fixed accuracy-family figures published for a model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PublishedMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl PublishedMetrics {
    pub const fn new(accuracy: f64, precision: f64, recall: f64, f1_score: f64) -> Self {
        Self { accuracy, precision, recall, f1_score }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Period-over-period change badge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTrend {
    pub direction: TrendDirection,
    pub value: String,
    /// Whether the change is good news
    pub positive: bool,
}

impl MetricTrend {
    fn new(direction: TrendDirection, value: &str) -> Self {
        Self {
            direction,
            value: value.to_string(),
            positive: true,
        }
    }
}

/// The `metrics` block of the dashboard output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub at_risk_count: u32,
    pub accuracy_trend: MetricTrend,
    pub precision_trend: MetricTrend,
    pub recall_trend: MetricTrend,
    pub at_risk_trend: MetricTrend,
}

impl ModelMetrics {
    /// Build the metrics block. `at_risk_count` is drawn from 200..=249.
    pub fn generate<R: Rng + ?Sized>(published: &PublishedMetrics, rng: &mut R) -> Self {
        Self {
            accuracy: published.accuracy,
            precision: published.precision,
            recall: published.recall,
            f1_score: published.f1_score,
            at_risk_count: rng.gen_range(200..250),
            accuracy_trend: MetricTrend::new(TrendDirection::Up, "+2.5%"),
            precision_trend: MetricTrend::new(TrendDirection::Up, "+1.8%"),
            recall_trend: MetricTrend::new(TrendDirection::Up, "+3.2%"),
            at_risk_trend: MetricTrend::new(TrendDirection::Down, "-5%"),
        }
    }
}
