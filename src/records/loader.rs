//! Load the training and inference datasets from CSV

use super::raw::{RawRecord, RawValue};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use csv::ReaderBuilder;
use log::{debug, info, warn};
use std::fs::File;
use std::path::Path;

/// Both input datasets for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    /// Historical per-agent-per-month records (carries `new_policy_count`)
    pub training: Vec<RawRecord>,
    /// Current-period records to score
    pub inference: Vec<RawRecord>,
}

/// Load a dataset from a CSV file.
///
/// `dataset` names the dataset in the error raised when the file cannot be opened.
pub fn load_dataset<P: AsRef<Path>>(path: P, dataset: &'static str) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PipelineError::DatasetUnavailable {
        dataset,
        path: path.to_path_buf(),
        source,
    })?;

    let rows = load_dataset_from_reader(file)?;
    info!("Loaded {} {} rows from {}", rows.len(), dataset, path.display());
    Ok(rows)
}

/// Load a dataset from any reader (e.g., string buffer, uploaded file)
pub fn load_dataset_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    // Invalid UTF-8 is decoded lossily, cell by cell
    let headers: Vec<String> = csv_reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in csv_reader.byte_records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!("Skipping unreadable CSV row {}: {}", line + 2, err);
                continue;
            }
        };

        let row: RawRecord = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record
                    .get(idx)
                    .map(|cell| RawValue::infer(&String::from_utf8_lossy(cell)))
                    .unwrap_or(RawValue::Null);
                (header.clone(), value)
            })
            .collect();

        if row.values().all(RawValue::is_null) {
            skipped += 1;
            continue;
        }
        rows.push(row);
    }

    if skipped > 0 {
        debug!("Skipped {} empty CSV rows", skipped);
    }

    Ok(rows)
}

/// Load both datasets named by the configuration.
///
/// Either file failing to load fails the whole run; no partial result is returned.
pub fn load_datasets(config: &PipelineConfig) -> Result<Datasets> {
    let training = load_dataset(config.train_path(), "training")?;
    let inference = load_dataset(config.test_path(), "inference")?;
    Ok(Datasets { training, inference })
}
