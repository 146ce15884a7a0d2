//! cacao-grade - grade a cacao pod from its measurements.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cacao_fuzzy::cacao::Grade;
use cacao_fuzzy::config::PodConfig;
use cacao_fuzzy::{configure_with, PodTerm};
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "cacao-grade", version, about = "Grade a cacao pod with fuzzy inference", allow_negative_numbers = true)]
struct Args {
    /// Pod length in cm (10-30)
    length: f64,
    /// Pod width in cm (5-15)
    width: f64,
    /// Pod weight in grams (200-1000)
    weight: f64,
    /// Number of seeds (20-60)
    seed_count: f64,

    /// TOML file overriding universes and operators
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print rule firing strengths and grade activations
    #[arg(short, long)]
    explain: bool,

    /// Log engine internals
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => PodConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PodConfig::default(),
    };

    config
        .apply_env_overrides()
        .context("Failed to apply environment overrides")?;

    let pod = configure_with(&config).context("Failed to configure the classifier")?;

    info!(
        length = args.length,
        width = args.width,
        weight = args.weight,
        seed_count = args.seed_count,
        "classifying"
    );

    let outputs = pod
        .assess(args.length, args.width, args.weight, args.seed_count)
        .context("Classification failed")?;

    println!("Cacao pod grade: {:.2}", outputs.crisp());

    if let Some(PodTerm::Grade(grade)) = outputs.dominant_term() {
        println!("Quality: {}", grade_label(grade));
    }

    if args.explain {
        println!();

        for (rule, strength) in pod.system().rules().iter().zip(outputs.firing_strengths()) {
            println!("  rule {:<12} {:.3}", rule.label().unwrap_or("-"), strength);
        }

        for (term, level) in outputs.activations() {
            if let PodTerm::Grade(grade) = term {
                println!("  grade {:<11} {:.3}", grade_label(*grade), level);
            }
        }
    }

    Ok(())
}

fn grade_label(grade: Grade) -> &'static str {
    match grade {
        Grade::Low => "low",
        Grade::Medium => "medium",
        Grade::High => "high",
    }
}
