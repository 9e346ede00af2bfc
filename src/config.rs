//! Run configuration: dataset locations, model and seed
//!
//! Defaults can be overridden from the environment; the CLI overrides both.

use crate::model::ModelId;
use log::warn;
use std::env;
use std::path::PathBuf;

/// Default directory holding the two datasets
pub const DEFAULT_DATASET_DIR: &str = "dataset";
pub const DEFAULT_TRAIN_FILE: &str = "train_storming_round.csv";
pub const DEFAULT_TEST_FILE: &str = "test_storming_round.csv";

/// Configuration for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory containing the training and inference CSVs
    pub dataset_dir: PathBuf,
    pub train_file: String,
    pub test_file: String,
    pub model: ModelId,
    /// Seed for the random source; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from(DEFAULT_DATASET_DIR),
            train_file: DEFAULT_TRAIN_FILE.to_string(),
            test_file: DEFAULT_TEST_FILE.to_string(),
            model: ModelId::Championship,
            seed: None,
        }
    }
}

impl PipelineConfig {
    /// Defaults with `NILL_*` environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("NILL_DATASET_DIR") {
            config.dataset_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup("NILL_TRAIN_FILE") {
            config.train_file = file;
        }
        if let Some(file) = lookup("NILL_TEST_FILE") {
            config.test_file = file;
        }
        if let Some(model) = lookup("NILL_MODEL") {
            config.model = ModelId::parse(&model);
        }
        if let Some(seed) = lookup("NILL_SEED") {
            match seed.trim().parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => warn!("Ignoring NILL_SEED={:?}: not an unsigned integer", seed),
            }
        }

        config
    }

    pub fn train_path(&self) -> PathBuf {
        self.dataset_dir.join(&self.train_file)
    }

    pub fn test_path(&self) -> PathBuf {
        self.dataset_dir.join(&self.test_file)
    }
}
