//! Statistics module - recession detection and the town comparison

pub mod analyzer;
pub mod calculator;
pub mod recession;

pub use analyzer::{AnalysisReport, RecessionJoinAnalyzer};
pub use calculator::{GroupStats, StatsCalculator, TTestResult};
pub use recession::RecessionDetector;
