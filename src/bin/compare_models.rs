//! Run every named model over the same datasets and compare them side by side
//!
//! Dataset locations come from the NILL_* environment variables.
//! Usage: compare_models [seed] [output_dir]

use agent_nill_risk::analytics::RiskSummary;
use agent_nill_risk::{load_datasets, run_all_models, PipelineConfig};
use anyhow::Context;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = PipelineConfig::from_env();
    let seed = match args.get(1) {
        Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed '{}'", s))?,
        None => config.seed.unwrap_or(42),
    };
    let output_dir = args.get(2).map(PathBuf::from);

    let start = Instant::now();
    let datasets = load_datasets(&config)?;
    println!(
        "Loaded {} training and {} inference rows in {:?}",
        datasets.training.len(),
        datasets.inference.len(),
        start.elapsed()
    );

    let run_start = Instant::now();
    let results = run_all_models(&datasets, seed);
    println!("Ran {} models in {:?} (seed {})\n", results.len(), run_start.elapsed(), seed);

    println!(
        "{:<16} {:>9} {:>8} {:>9} {:>7} {:>7} {:>7} {:>6} {:>6} {:>6} {:>9}",
        "Model", "Threshold", "Accuracy", "Precision", "Recall", "F1", "NILL", "High", "Medium", "Low", "AvgScore"
    );
    println!("{}", "-".repeat(102));

    for (model, data) in &results {
        let summary = RiskSummary::from_predictions(&data.agent_predictions);
        println!(
            "{:<16} {:>9.2} {:>8.3} {:>9.3} {:>7.3} {:>7.3} {:>7} {:>6} {:>6} {:>6} {:>9.4}",
            model.as_str(),
            model.params().nill_threshold,
            data.metrics.accuracy,
            data.metrics.precision,
            data.metrics.recall,
            data.metrics.f1_score,
            data.prediction_distribution.nill,
            summary.high_risk_count,
            summary.medium_risk_count,
            summary.low_risk_count,
            summary.avg_risk_score,
        );
    }

    if let Some(dir) = output_dir {
        fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
        for (model, data) in &results {
            let path = dir.join(format!("{}.json", model));
            data.save_json(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
