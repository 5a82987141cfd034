//! Recession Join Analyzer Module
//! Compares price declines of university and non-university towns across recessions.

use crate::error::{AnalysisError, Result};
use crate::model::{
    AnalysisResult, Better, HousingRow, HousingTable, QuarterlyPeriod, RecessionInterval,
    TownEntry, TownKey,
};
use crate::stats::calculator::{GroupStats, StatsCalculator, TTestResult};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Start, bottom and end prices of one town averaged over all recessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecessionPrices {
    pub key: TownKey,
    pub start: f64,
    pub bottom: f64,
    pub end: f64,
    pub university: bool,
}

impl RecessionPrices {
    /// (Bottom / Start) - 1
    pub fn ratio_of_decline(&self) -> f64 {
        self.bottom / self.start - 1.0
    }
}

/// Result plus the intermediate figures behind it.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub ttest: TTestResult,
    pub recessions: Vec<RecessionInterval>,
    pub university: GroupStats,
    pub non_university: GroupStats,
}

pub struct RecessionJoinAnalyzer;

impl RecessionJoinAnalyzer {
    /// Average the start, bottom and end quarters of every recession per town,
    /// dropping towns missing any of the three, and flag university towns.
    pub fn recession_prices(
        housing: &HousingTable,
        towns: &[TownEntry],
        recessions: &[RecessionInterval],
    ) -> Vec<RecessionPrices> {
        let university: HashSet<&TownKey> = towns.iter().collect();
        let column = |period: QuarterlyPeriod| housing.quarter_index(period);
        let starts: Vec<Option<usize>> = recessions.iter().map(|r| column(r.start)).collect();
        let bottoms: Vec<Option<usize>> = recessions.iter().map(|r| column(r.bottom)).collect();
        let ends: Vec<Option<usize>> = recessions.iter().map(|r| column(r.end)).collect();

        let rows: Vec<RecessionPrices> = housing
            .rows
            .iter()
            .filter_map(|row| {
                Some(RecessionPrices {
                    key: row.key.clone(),
                    start: Self::row_mean(row, &starts)?,
                    bottom: Self::row_mean(row, &bottoms)?,
                    end: Self::row_mean(row, &ends)?,
                    university: university.contains(&row.key),
                })
            })
            // a zero start price has no ratio of decline
            .filter(|prices| prices.ratio_of_decline().is_finite())
            .collect();

        debug!(
            rows = rows.len(),
            dropped = housing.rows.len() - rows.len(),
            "joined recession quarters with university towns"
        );
        rows
    }

    /// Mean of the present values in the given columns; missing columns count as missing values.
    fn row_mean(row: &HousingRow, columns: &[Option<usize>]) -> Option<f64> {
        let present: Vec<f64> = columns
            .iter()
            .filter_map(|idx| idx.and_then(|i| row.prices[i]))
            .collect();
        (!present.is_empty()).then(|| StatsCalculator::mean(&present))
    }

    /// Run the comparison and produce the decision with its supporting figures.
    pub fn analyze(
        housing: &HousingTable,
        towns: &[TownEntry],
        recessions: &[RecessionInterval],
    ) -> Result<AnalysisReport> {
        let rows = Self::recession_prices(housing, towns, recessions);
        let (uni, non_uni): (Vec<&RecessionPrices>, Vec<&RecessionPrices>) =
            rows.iter().partition(|r| r.university);

        let rate_uni: Vec<f64> = uni.iter().map(|r| r.ratio_of_decline()).collect();
        let rate_not_uni: Vec<f64> = non_uni.iter().map(|r| r.ratio_of_decline()).collect();
        if rate_uni.is_empty() || rate_not_uni.is_empty() {
            return Err(AnalysisError::EmptyIntersection {
                university: rate_uni.len(),
                non_university: rate_not_uni.len(),
            });
        }

        let ttest = StatsCalculator::students_ttest(&rate_uni, &rate_not_uni)?;
        let university = StatsCalculator::compute_descriptive_stats("university_town", &rate_uni);
        let non_university =
            StatsCalculator::compute_descriptive_stats("non-university town", &rate_not_uni);

        let better = if university.mean > non_university.mean {
            Better::UniversityTown
        } else {
            Better::NonUniversityTown
        };
        let result = AnalysisResult {
            different: ttest.is_significant(),
            p: ttest.p_value,
            better,
        };

        info!(
            university = university.count,
            non_university = non_university.count,
            statistic = ttest.statistic,
            p = ttest.p_value,
            %better,
            "compared ratio of decline"
        );
        Ok(AnalysisReport {
            result,
            ttest,
            recessions: recessions.to_vec(),
            university,
            non_university,
        })
    }
}
