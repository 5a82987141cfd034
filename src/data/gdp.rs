//! GDP Series Module
//! Extracts the quarterly GDP series from the BEA sheet export.

use crate::data::loader::DataLoader;
use crate::error::{AnalysisError, Result};
use crate::model::{GdpSeries, QuarterlyPeriod};
use polars::prelude::DataFrame;
use std::path::Path;
use tracing::debug;

/// Header and note lines above the first data row.
pub const GDP_HEADER_ROWS: usize = 8;
/// Position of the quarter label column.
pub const GDP_QUARTER_COLUMN: usize = 4;
/// Position of the chained-dollar GDP column.
pub const GDP_VALUE_COLUMN: usize = 6;

const SOURCE_NAME: &str = "GDP sheet";

pub struct GdpReader;

impl GdpReader {
    /// First quarter considered by the analysis.
    pub fn cutoff() -> QuarterlyPeriod {
        QuarterlyPeriod::from_date(crate::data::housing::cutoff_date())
    }

    /// Load the sheet and build the series.
    pub fn load(path: &Path) -> Result<GdpSeries> {
        let df = DataLoader::load_raw_csv(path, GDP_HEADER_ROWS)?;
        Self::from_dataframe(&df)
    }

    /// Build the series from the raw sheet: quarters at or after the cutoff, ascending.
    pub fn from_dataframe(df: &DataFrame) -> Result<GdpSeries> {
        let labels = DataLoader::string_values_at(df, GDP_QUARTER_COLUMN)?;
        let values = DataLoader::string_values_at(df, GDP_VALUE_COLUMN)?;
        let cutoff = Self::cutoff();

        let mut points: Vec<(QuarterlyPeriod, f64)> = Vec::new();
        for (label, value) in labels.iter().zip(values.iter()) {
            let Some(label) = label.as_deref().map(str::trim).filter(|l| !l.is_empty()) else {
                continue;
            };
            let period: QuarterlyPeriod = label
                .parse()
                .map_err(|e: String| AnalysisError::parse(SOURCE_NAME, e))?;
            if period < cutoff {
                continue;
            }
            let value = Self::parse_value(value.as_deref(), period)?;
            points.push((period, value));
        }

        points.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = points.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(AnalysisError::parse(
                SOURCE_NAME,
                format!("quarter {} appears more than once", pair[0].0),
            ));
        }

        debug!(quarters = points.len(), "built GDP series");
        let (periods, values) = points.into_iter().unzip();
        Ok(GdpSeries { periods, values })
    }

    fn parse_value(raw: Option<&str>, period: QuarterlyPeriod) -> Result<f64> {
        let cleaned: String = raw.unwrap_or("").trim().chars().filter(|c| *c != ',').collect();
        cleaned.parse::<f64>().map_err(|_| {
            AnalysisError::parse(
                SOURCE_NAME,
                format!("GDP value '{}' for {period} is not a number", raw.unwrap_or("")),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sheet(rows: &[(&str, &str)]) -> DataFrame {
        let blank: Vec<Option<&str>> = vec![None; rows.len()];
        let labels: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let values: Vec<&str> = rows.iter().map(|r| r.1).collect();
        DataFrame::new(vec![
            Column::new("column_1".into(), blank.clone()),
            Column::new("column_2".into(), blank.clone()),
            Column::new("column_3".into(), blank.clone()),
            Column::new("column_4".into(), blank.clone()),
            Column::new("column_5".into(), labels),
            Column::new("column_6".into(), blank.clone()),
            Column::new("column_7".into(), values),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_quarters_from_cutoff_sorted_and_uppercased() {
        let df = sheet(&[
            ("2000q2", "12,359.1"),
            ("1999q4", "12,000.0"),
            ("2000q1", "12,359.0"),
            ("", ""),
        ]);
        let series = GdpReader::from_dataframe(&df).unwrap();
        let labels: Vec<String> = series.periods.iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["2000Q1", "2000Q2"]);
        assert_eq!(series.values, vec![12359.0, 12359.1]);
    }

    #[test]
    fn rejects_non_numeric_value() {
        let df = sheet(&[("2001q1", "n/a")]);
        assert!(matches!(
            GdpReader::from_dataframe(&df),
            Err(AnalysisError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_quarter() {
        let df = sheet(&[("2001q1", "1"), ("2001Q1", "2")]);
        assert!(GdpReader::from_dataframe(&df).is_err());
    }
}
