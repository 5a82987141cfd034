//! Error Module
//! Failure taxonomy shared by every pipeline stage.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Source unavailable: {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {source_name}: {detail}")]
    Parse { source_name: String, detail: String },
    #[error("Empty comparison group (university: {university}, other: {non_university})")]
    EmptyIntersection {
        university: usize,
        non_university: usize,
    },
    #[error("Two-sample test is undefined over these {total} observations")]
    DegenerateTest { total: usize },
    #[error("Failed to load table: {0}")]
    Polars(#[from] PolarsError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn parse(source_name: impl Into<String>, detail: impl Into<String>) -> Self {
        AnalysisError::Parse {
            source_name: source_name.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
