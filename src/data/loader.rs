//! Source Loader Module
//! Reads the raw inputs once: whole-file text and CSV tables via Polars.

use crate::error::{AnalysisError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Opens the raw sources of one analysis run.
pub struct DataLoader;

impl DataLoader {
    /// Read a whole text file.
    pub fn read_text(path: &Path) -> Result<String> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            AnalysisError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(path = %path.display(), bytes = text.len(), "read text source");
        Ok(text)
    }

    /// Load a CSV file with a header row, inferring column types from every row.
    pub fn load_csv(path: &Path) -> Result<DataFrame> {
        let file = Self::open(path)?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(file)
            .finish()?;
        debug!(path = %path.display(), rows = df.height(), cols = df.width(), "loaded CSV");
        Ok(df)
    }

    /// Load a CSV file without a usable header, skipping the first `skip_rows` lines.
    /// Every column is read as a string.
    pub fn load_raw_csv(path: &Path, skip_rows: usize) -> Result<DataFrame> {
        let file = Self::open(path)?;
        let df = CsvReadOptions::default()
            .with_has_header(false)
            .with_skip_rows(skip_rows)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|opts| opts.with_truncate_ragged_lines(true))
            .into_reader_with_file_handle(file)
            .finish()?;
        debug!(path = %path.display(), rows = df.height(), cols = df.width(), "loaded raw CSV");
        Ok(df)
    }

    fn open(path: &Path) -> Result<File> {
        File::open(path).map_err(|source| AnalysisError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get list of column names from a DataFrame.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Read a column as optional strings, casting if needed.
    pub fn string_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
        let col = df.column(column)?;
        Self::column_strings(col)
    }

    /// Read a column as optional floats, casting if needed.
    pub fn float_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
        let value_f64 = df.column(column)?.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;
        Ok(value_ca
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Read the column at `idx` as optional strings.
    pub fn string_values_at(df: &DataFrame, idx: usize) -> Result<Vec<Option<String>>> {
        let col = df.select_at_idx(idx).ok_or_else(|| {
            AnalysisError::parse("table", format!("missing column at position {idx}"))
        })?;
        Self::column_strings(col)
    }

    fn column_strings(col: &Column) -> Result<Vec<Option<String>>> {
        let as_str = col.cast(&DataType::String)?;
        let ca = as_str.str()?;
        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = DataLoader::read_text(Path::new("/nonexistent/towns.txt")).unwrap_err();
        assert!(matches!(err, AnalysisError::SourceUnavailable { .. }));
        let err = DataLoader::load_csv(Path::new("/nonexistent/housing.csv")).unwrap_err();
        assert!(matches!(err, AnalysisError::SourceUnavailable { .. }));
    }

    #[test]
    fn loads_csv_with_missing_cells() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "State,RegionName,2000-01").unwrap();
        writeln!(file, "MI,Ann Arbor,100.5").unwrap();
        writeln!(file, "OH,Athens,").unwrap();
        let df = DataLoader::load_csv(file.path()).unwrap();

        assert_eq!(DataLoader::get_columns(&df), vec!["State", "RegionName", "2000-01"]);
        assert_eq!(
            DataLoader::float_values(&df, "2000-01").unwrap(),
            vec![Some(100.5), None]
        );
        assert_eq!(
            DataLoader::string_values(&df, "State").unwrap(),
            vec![Some("MI".to_string()), Some("OH".to_string())]
        );
    }

    #[test]
    fn raw_csv_skips_leading_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title").unwrap();
        writeln!(file, "notes").unwrap();
        writeln!(file, "a,1").unwrap();
        writeln!(file, "b,2").unwrap();
        let df = DataLoader::load_raw_csv(file.path(), 2).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(
            DataLoader::string_values_at(&df, 1).unwrap(),
            vec![Some("1".to_string()), Some("2".to_string())]
        );
    }
}
