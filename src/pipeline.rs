//! Pipeline Module
//! Runs the whole analysis once over the configured sources.

use crate::config::AnalysisConfig;
use crate::data::{DataLoader, GdpReader, HousingReshaper, TownListParser};
use crate::error::Result;
use crate::model::AnalysisResult;
use crate::stats::{AnalysisReport, RecessionDetector, RecessionJoinAnalyzer};
use tracing::info;

/// Load every source, detect recessions and compare the two town groups.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisReport> {
    let text = DataLoader::read_text(&config.university_towns)?;
    let towns = TownListParser::parse(&text)?;
    info!(towns = towns.len(), "loaded university towns");

    let gdp = GdpReader::load(&config.gdp)?;
    let recessions = RecessionDetector::detect(&gdp);
    for r in &recessions {
        info!(start = %r.start, bottom = %r.bottom, end = %r.end, "recession");
    }

    let housing = HousingReshaper::load(&config.housing)?;
    info!(
        towns = housing.rows.len(),
        quarters = housing.quarters.len(),
        "loaded housing prices"
    );

    RecessionJoinAnalyzer::analyze(&housing, &towns, &recessions)
}

/// Decision only.
pub fn run_ttest(config: &AnalysisConfig) -> Result<AnalysisResult> {
    Ok(run_analysis(config)?.result)
}
