//! Agent NILL Risk CLI
//!
//! Runs the risk pipeline over the training and inference datasets, or scores
//! a single hand-entered agent.

use agent_nill_risk::analytics::{risk_factor_counts, RiskSummary, RiskTableQuery};
use agent_nill_risk::importance::ranked;
use agent_nill_risk::{
    load_datasets, make_rng, ModelId, PipelineConfig, PipelineRunner, RiskCategory, SingleEntry,
};
use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agent-nill-risk")]
#[command(about = "Score insurance agents on the risk of selling no policy next month", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args)]
struct ModelArgs {
    /// championship, ceiling-breaker or ultra-optimized (overrides NILL_MODEL)
    #[arg(long)]
    model: Option<String>,
    /// Seed for reproducible output (overrides NILL_SEED)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and print a summary
    Run {
        #[command(flatten)]
        model: ModelArgs,
        /// Directory holding both datasets (overrides NILL_DATASET_DIR)
        #[arg(long)]
        dataset_dir: Option<PathBuf>,
        /// Training CSV file name within the dataset directory
        #[arg(long)]
        train: Option<String>,
        /// Inference CSV file name within the dataset directory
        #[arg(long)]
        test: Option<String>,
        /// Write the dashboard data as JSON to this path
        #[arg(long)]
        out: Option<PathBuf>,
        /// Number of agents to list in the risk table
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Score one agent from the command line
    Predict {
        #[command(flatten)]
        model: ModelArgs,
        #[arg(long, default_value_t = 35.0)]
        age: f64,
        #[arg(long, default_value_t = 12.0)]
        months: f64,
        #[arg(long, default_value_t = 15.0)]
        proposals: f64,
        #[arg(long, default_value_t = 10.0)]
        quotations: f64,
    },
}

fn apply_model_args(config: &mut PipelineConfig, args: ModelArgs) {
    if let Some(model) = args.model {
        config.model = ModelId::parse(&model);
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut config = PipelineConfig::from_env();

    match cli.command {
        Commands::Run {
            model,
            dataset_dir,
            train,
            test,
            out,
            limit,
        } => {
            apply_model_args(&mut config, model);
            if let Some(dir) = dataset_dir {
                config.dataset_dir = dir;
            }
            if let Some(file) = train {
                config.train_file = file;
            }
            if let Some(file) = test {
                config.test_file = file;
            }
            run(&config, out, limit)
        }
        Commands::Predict {
            model,
            age,
            months,
            proposals,
            quotations,
        } => {
            apply_model_args(&mut config, model);
            let entry = SingleEntry {
                agent_age: age,
                months_with_company: months,
                unique_proposal: proposals,
                unique_quotations: quotations,
            };
            predict(&config, &entry);
            Ok(())
        }
    }
}

fn run(config: &PipelineConfig, out: Option<PathBuf>, limit: usize) -> anyhow::Result<()> {
    println!("Agent NILL Risk v0.1.0");
    println!("======================\n");

    let datasets = load_datasets(config)?;
    println!(
        "Loaded {} training and {} inference rows from {}",
        datasets.training.len(),
        datasets.inference.len(),
        config.dataset_dir.display()
    );

    let runner = PipelineRunner::new(&config.model);
    let mut rng = make_rng(config.seed);
    let data = runner.run_datasets(&datasets, &mut rng);

    let m = &data.metrics;
    println!("\nModel: {}", config.model);
    println!("  Accuracy:  {:.3} ({})", m.accuracy, m.accuracy_trend.value);
    println!("  Precision: {:.3} ({})", m.precision, m.precision_trend.value);
    println!("  Recall:    {:.3} ({})", m.recall, m.recall_trend.value);
    println!("  F1 Score:  {:.3}", m.f1_score);
    println!("  At Risk:   {} ({})", m.at_risk_count, m.at_risk_trend.value);

    let summary = RiskSummary::from_predictions(&data.agent_predictions);
    println!("\nPredictions:");
    println!("  Agents scored: {}", summary.total_agents);
    println!(
        "  NILL / non-NILL: {} / {}",
        data.prediction_distribution.nill, data.prediction_distribution.non_nill
    );
    println!(
        "  High / Medium / Low: {} ({:.1}%) / {} ({:.1}%) / {} ({:.1}%)",
        summary.high_risk_count,
        summary.category_share(RiskCategory::High),
        summary.medium_risk_count,
        summary.category_share(RiskCategory::Medium),
        summary.low_risk_count,
        summary.category_share(RiskCategory::Low)
    );
    println!("  Average risk score: {:.3}", summary.avg_risk_score);
    println!("  New agents at risk: {}", summary.new_agents_at_risk);
    println!("  Experienced agents at risk: {}", summary.experienced_agents_at_risk);

    println!("\nHighest-risk agents:");
    println!("{:<16} {:>5} {:>7} {:>8} {:<8} {}", "Agent", "Age", "Months", "Score", "Category", "Factors");
    println!("{}", "-".repeat(90));
    for p in RiskTableQuery::default().apply(&data.agent_predictions).iter().take(limit) {
        println!(
            "{:<16} {:>5.0} {:>7.1} {:>8.4} {:<8} {}",
            p.agent_code,
            p.agent_age,
            p.months_with_company,
            p.risk_score,
            p.risk_category.as_str(),
            p.top_factors.join("; ")
        );
    }

    println!("\nMost common risk factors:");
    for fc in risk_factor_counts(&data.agent_predictions, 6) {
        println!("  {:<28} {:>6}", fc.factor, fc.count);
    }

    println!("\nTop features:");
    for f in ranked(&data.feature_importance).iter().take(5) {
        println!("  {:<32} {:.4}", f.feature, f.importance);
    }

    println!("\nMonthly trend:");
    println!("{:<8} {:>10} {:>10} {:>10} {:>9}", "Month", "Policies", "Proposals", "Quotes", "NILL %");
    for t in &data.time_series_data {
        println!(
            "{:<8} {:>10.2} {:>10.2} {:>10.2} {:>8.1}%",
            t.month,
            t.avg_policies,
            t.avg_proposals,
            t.avg_quotations,
            t.nill_rate * 100.0
        );
    }

    println!("\nPerformance by experience:");
    for p in &data.agent_performance {
        println!(
            "  {:<12} agents={:>6} avg_policies={:>7.2} nill={:>5.1}%",
            p.experience, p.total_agents, p.avg_policies, p.nill_rate
        );
    }

    if let Some(path) = out {
        data.save_json(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nDashboard data written to: {}", path.display());
    }

    Ok(())
}

fn predict(config: &PipelineConfig, entry: &SingleEntry) {
    let runner = PipelineRunner::new(&config.model);
    let mut rng = make_rng(config.seed);
    let today = Local::now().date_naive();
    let p = runner.predict_single(entry, today, &mut rng);

    println!("Model: {}", config.model);
    println!("Agent: {}", p.agent_code);
    println!("  Risk Score: {:.1}%", p.risk_score * 100.0);
    println!("  Category: {}", p.risk_category);
    println!("  Predicted NILL: {}", if p.predicted_nill == 1 { "yes" } else { "no" });
    println!("  Top Factors:");
    for factor in &p.top_factors {
        println!("    - {}", factor);
    }
    println!("  Recommendation: {}", p.recommendation);
}
