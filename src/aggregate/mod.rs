//! Cohort-level summaries over the training set
//!
//! Three independent reductions, each recomputed per run. Numeric fields are
//! read with missing and negative values treated as 0.

mod trend;
mod conversion;
mod performance;

pub use trend::{monthly_trend, MonthlyTrend};
pub use conversion::{conversion_rates, ConversionRate, TenureBand};
pub use performance::{agent_performance, ExperienceBucket, ExperiencePerformance, EXPERIENCE_BUCKETS};
