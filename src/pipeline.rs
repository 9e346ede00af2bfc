//! End-to-end pipeline runner
//!
//! Holds one model's parameters and turns the two raw datasets into the
//! dashboard structure: normalise, label, aggregate, score, rank features.
//! Every run is independent; the only state is the caller's RNG.

use crate::aggregate::{
    agent_performance, conversion_rates, monthly_trend, ConversionRate, ExperiencePerformance, MonthlyTrend,
};
use crate::analytics::PredictionDistribution;
use crate::error::Result;
use crate::importance::{feature_importance, FeatureImportance};
use crate::labels::{create_target, LabeledRecord};
use crate::model::{ModelId, ModelMetrics, ModelParams};
use crate::records::{normalize, prepare_training_data, Datasets, NormalizedRecord, RawRecord};
use crate::scoring::{PredictionRecord, RiskScorer};
use chrono::{Duration, NaiveDate};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Everything the presentation layer consumes for one model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub metrics: ModelMetrics,
    pub feature_importance: Vec<FeatureImportance>,
    pub agent_predictions: Vec<PredictionRecord>,
    pub time_series_data: Vec<MonthlyTrend>,
    pub prediction_distribution: PredictionDistribution,
    pub conversion_rates: Vec<ConversionRate>,
    pub agent_performance: Vec<ExperiencePerformance>,
    /// Training records labelled with next-period sales
    #[serde(skip)]
    pub labeled_training: Vec<LabeledRecord>,
}

impl DashboardData {
    /// Serialize as pretty-printed JSON
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write the JSON document to a file, replacing any existing one
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        info!("Dashboard data written to {}", path.display());
        Ok(())
    }
}

/// Hand-entered agent metrics for a one-off prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleEntry {
    pub agent_age: f64,
    pub months_with_company: f64,
    pub unique_proposal: f64,
    pub unique_quotations: f64,
}

impl Default for SingleEntry {
    fn default() -> Self {
        Self {
            agent_age: 35.0,
            months_with_company: 12.0,
            unique_proposal: 15.0,
            unique_quotations: 10.0,
        }
    }
}

impl SingleEntry {
    /// Build a record for scoring, dating it relative to `today`.
    ///
    /// Join month is `today - 30*months` days and first sale one 30-day month later.
    pub fn to_record<R: Rng + ?Sized>(&self, today: NaiveDate, rng: &mut R) -> NormalizedRecord {
        let days_back = |months: f64| {
            Duration::try_days((months.max(0.0) * 30.0) as i64).and_then(|d| today.checked_sub_signed(d))
        };

        NormalizedRecord {
            agent_code: format!("DEMO-{}", rng.gen_range(0..10_000)),
            agent_age: Some(self.agent_age),
            months_with_company: Some(self.months_with_company),
            unique_proposal: Some(self.unique_proposal),
            unique_quotations: Some(self.unique_quotations),
            new_policy_count: None,
            agent_join_month: days_back(self.months_with_company),
            first_policy_sold_month: days_back(self.months_with_company - 1.0),
            year_month: Some(today),
            extra: Default::default(),
        }
    }
}

/// Create the run's random source
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Pipeline bound to one model's parameter set
#[derive(Debug, Clone)]
pub struct PipelineRunner {
    params: ModelParams,
}

impl PipelineRunner {
    pub fn new(model: &ModelId) -> Self {
        Self::with_params(model.params())
    }

    pub fn with_params(params: ModelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Run the full pipeline over raw training and inference rows
    pub fn run<R: Rng + ?Sized>(&self, training: &[RawRecord], inference: &[RawRecord], rng: &mut R) -> DashboardData {
        let train = prepare_training_data(training);
        let test = normalize(inference);
        debug!("Normalised {} training and {} inference records", train.len(), test.len());

        let labeled_training = create_target(&train);
        debug!("Built {} labelled training records", labeled_training.len());

        let feature_importance = feature_importance(&self.params, rng);
        let metrics = ModelMetrics::generate(&self.params.published, rng);
        let agent_predictions = RiskScorer::new(self.params.clone()).predict_all(&test, rng);
        let prediction_distribution = PredictionDistribution::from_predictions(&agent_predictions);

        let data = DashboardData {
            metrics,
            feature_importance,
            time_series_data: monthly_trend(&train),
            conversion_rates: conversion_rates(&train),
            agent_performance: agent_performance(&train),
            agent_predictions,
            prediction_distribution,
            labeled_training,
        };

        info!(
            "Model {}: scored {} agents, {} predicted NILL",
            self.params.model,
            data.agent_predictions.len(),
            data.prediction_distribution.nill
        );
        data
    }

    pub fn run_datasets<R: Rng + ?Sized>(&self, datasets: &Datasets, rng: &mut R) -> DashboardData {
        self.run(&datasets.training, &datasets.inference, rng)
    }

    /// Score one hand-entered agent
    pub fn predict_single<R: Rng + ?Sized>(&self, entry: &SingleEntry, today: NaiveDate, rng: &mut R) -> PredictionRecord {
        let record = entry.to_record(today, rng);
        RiskScorer::new(self.params.clone()).predict(&record, rng)
    }
}

/// Run every named model over the same datasets in parallel.
///
/// Model `i` gets its own RNG seeded with `seed + i`, so results do not
/// depend on scheduling.
pub fn run_all_models(datasets: &Datasets, seed: u64) -> Vec<(ModelId, DashboardData)> {
    ModelId::NAMED
        .par_iter()
        .enumerate()
        .map(|(i, model)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let data = PipelineRunner::new(model).run_datasets(datasets, &mut rng);
            (model.clone(), data)
        })
        .collect()
}
