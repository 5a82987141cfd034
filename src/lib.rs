//! University Housing - recession resilience of housing prices
//!
//! Tests whether housing prices in university towns held up better than
//! elsewhere during the recessions found in the GDP series.

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod stats;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use model::{AnalysisResult, Better};
pub use pipeline::{run_analysis, run_ttest};
