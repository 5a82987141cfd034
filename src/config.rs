//! Configuration Module
//! Locations of the three input sources.

use crate::error::{AnalysisError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub university_towns: PathBuf,
    pub gdp: PathBuf,
    pub housing: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            university_towns: PathBuf::from("university_towns.txt"),
            gdp: PathBuf::from("gdplev.csv"),
            housing: PathBuf::from("City_Zhvi_AllHomes.csv"),
        }
    }
}

impl AnalysisConfig {
    /// Resolve relative source paths against `dir`.
    pub fn relative_to(mut self, dir: &Path) -> Self {
        for path in [&mut self.university_towns, &mut self.gdp, &mut self.housing] {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
        self
    }
}

/// Load the configuration from a JSON file; missing keys take their defaults.
/// Relative source paths are taken relative to the file's directory.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let content = fs::read_to_string(path).map_err(|source| AnalysisError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AnalysisConfig = serde_json::from_str(&content)?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.relative_to(dir))
}
