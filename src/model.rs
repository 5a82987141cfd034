//! Data Model Module
//! Types passed between the pipeline stages.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A calendar quarter, ordered by (year, quarter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuarterlyPeriod {
    year: i32,
    quarter: u8,
}

impl QuarterlyPeriod {
    pub fn new(year: i32, quarter: u8) -> Option<Self> {
        (1..=4).contains(&quarter).then_some(Self { year, quarter })
    }

    /// Quarter containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: (date.month0() / 3 + 1) as u8,
        }
    }
}

impl fmt::Display for QuarterlyPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

impl FromStr for QuarterlyPeriod {
    type Err = String;

    /// Accepts `2000Q1` as well as the lowercase `2000q1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, quarter) = s
            .split_once(['Q', 'q'])
            .ok_or_else(|| format!("'{s}' is not a quarter label"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("'{s}' has an invalid year"))?;
        let quarter: u8 = quarter
            .parse()
            .map_err(|_| format!("'{s}' has an invalid quarter"))?;
        Self::new(year, quarter).ok_or_else(|| format!("'{s}' has a quarter outside 1-4"))
    }
}

impl Serialize for QuarterlyPeriod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// (State, RegionName) pair identifying a town.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TownKey {
    pub state: String,
    pub region: String,
}

impl TownKey {
    pub fn new(state: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            region: region.into(),
        }
    }
}

/// A university town from the town listing.
pub type TownEntry = TownKey;

/// GDP values by quarter, ascending and unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GdpSeries {
    pub periods: Vec<QuarterlyPeriod>,
    pub values: Vec<f64>,
}

/// Start, bottom and end quarters of one recession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecessionInterval {
    pub start: QuarterlyPeriod,
    pub bottom: QuarterlyPeriod,
    pub end: QuarterlyPeriod,
}

/// One town row of quarterly mean prices, aligned with `HousingTable::quarters`.
#[derive(Debug, Clone, PartialEq)]
pub struct HousingRow {
    pub key: TownKey,
    pub prices: Vec<Option<f64>>,
}

/// Quarterly mean prices per town, rows sorted by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HousingTable {
    pub quarters: Vec<QuarterlyPeriod>,
    pub rows: Vec<HousingRow>,
}

impl HousingTable {
    /// Column index of a quarter, if the table has it.
    pub fn quarter_index(&self, period: QuarterlyPeriod) -> Option<usize> {
        self.quarters.binary_search(&period).ok()
    }
}

/// Which group weathered the recessions better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Better {
    #[serde(rename = "university_town")]
    UniversityTown,
    #[serde(rename = "non-university town")]
    NonUniversityTown,
}

impl Better {
    pub fn as_str(&self) -> &'static str {
        match self {
            Better::UniversityTown => "university_town",
            Better::NonUniversityTown => "non-university town",
        }
    }
}

impl fmt::Display for Better {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final decision of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub different: bool,
    pub p: f64,
    pub better: Better,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_labels_parse_case_insensitively() {
        let q: QuarterlyPeriod = "2008q3".parse().unwrap();
        assert_eq!(q, QuarterlyPeriod::new(2008, 3).unwrap());
        assert_eq!(q.to_string(), "2008Q3");
        assert!("2008Q5".parse::<QuarterlyPeriod>().is_err());
        assert!("2008".parse::<QuarterlyPeriod>().is_err());
    }

    #[test]
    fn quarters_order_chronologically() {
        let a = QuarterlyPeriod::new(1999, 4).unwrap();
        let b = QuarterlyPeriod::new(2000, 1).unwrap();
        let c = QuarterlyPeriod::new(2000, 2).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn date_maps_to_its_quarter() {
        let d = NaiveDate::from_ymd_opt(2001, 6, 30).unwrap();
        assert_eq!(QuarterlyPeriod::from_date(d).to_string(), "2001Q2");
        let d = NaiveDate::from_ymd_opt(2001, 10, 1).unwrap();
        assert_eq!(QuarterlyPeriod::from_date(d).to_string(), "2001Q4");
    }

    #[test]
    fn result_serializes_with_group_labels() {
        let result = AnalysisResult {
            different: true,
            p: 0.005,
            better: Better::NonUniversityTown,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"different":true,"p":0.005,"better":"non-university town"}"#
        );
    }
}
