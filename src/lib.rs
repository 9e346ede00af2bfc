//! Agent NILL Risk - scoring insurance agents on the risk of selling nothing next month
//!
//! This library provides:
//! - CSV loading and normalisation of per-agent monthly activity records
//! - Next-period NILL labelling of historical records
//! - Heuristic risk scoring with per-model calibration
//! - Monthly, tenure-band and experience-bucket aggregates
//! - Feature importance and headline metrics for the dashboard

pub mod aggregate;
pub mod analytics;
pub mod config;
pub mod error;
pub mod importance;
pub mod labels;
pub mod model;
pub mod pipeline;
pub mod records;
pub mod scoring;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use model::{ModelId, ModelParams};
pub use pipeline::{make_rng, run_all_models, DashboardData, PipelineRunner, SingleEntry};
pub use records::{load_datasets, Datasets, NormalizedRecord, RawRecord};
pub use scoring::{PredictionRecord, RiskCategory, RiskScorer};
