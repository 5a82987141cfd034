//! University Housing - command line entry point
//!
//! Runs the recession comparison once and prints the decision as JSON.
//! An optional first argument names a JSON config file with the source paths.

use anyhow::Context;
use std::path::Path;
use tracing::info;
use university_housing::config::load_config;
use university_housing::{run_analysis, AnalysisConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => AnalysisConfig::default(),
    };

    let report = run_analysis(&config).context("running recession analysis")?;
    info!(
        university_mean = report.university.mean,
        non_university_mean = report.non_university.mean,
        recessions = report.recessions.len(),
        "analysis complete"
    );

    println!("{}", serde_json::to_string(&report.result)?);
    Ok(())
}
