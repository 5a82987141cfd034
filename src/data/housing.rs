//! Housing Reshaper Module
//! Converts the wide monthly town table into quarterly mean prices per town.

use crate::data::loader::DataLoader;
use crate::error::{AnalysisError, Result};
use crate::model::{HousingRow, HousingTable, QuarterlyPeriod, TownKey};
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

const SOURCE_NAME: &str = "housing table";

pub const STATE_COLUMN: &str = "State";
pub const REGION_COLUMN: &str = "RegionName";

/// Identifier and metadata columns not needed downstream.
pub const METADATA_COLUMNS: [&str; 4] = ["RegionID", "Metro", "CountyName", "SizeRank"];

/// Two-letter state codes and their full names.
pub const STATE_CODES: [(&str, &str); 57] = [
    ("OH", "Ohio"),
    ("KY", "Kentucky"),
    ("AS", "American Samoa"),
    ("NV", "Nevada"),
    ("WY", "Wyoming"),
    ("NA", "National"),
    ("AL", "Alabama"),
    ("MD", "Maryland"),
    ("AK", "Alaska"),
    ("UT", "Utah"),
    ("OR", "Oregon"),
    ("MT", "Montana"),
    ("IL", "Illinois"),
    ("TN", "Tennessee"),
    ("DC", "District of Columbia"),
    ("VT", "Vermont"),
    ("ID", "Idaho"),
    ("AR", "Arkansas"),
    ("ME", "Maine"),
    ("WA", "Washington"),
    ("HI", "Hawaii"),
    ("WI", "Wisconsin"),
    ("MI", "Michigan"),
    ("IN", "Indiana"),
    ("NJ", "New Jersey"),
    ("AZ", "Arizona"),
    ("GU", "Guam"),
    ("MS", "Mississippi"),
    ("PR", "Puerto Rico"),
    ("NC", "North Carolina"),
    ("TX", "Texas"),
    ("SD", "South Dakota"),
    ("MP", "Northern Mariana Islands"),
    ("IA", "Iowa"),
    ("MO", "Missouri"),
    ("CT", "Connecticut"),
    ("WV", "West Virginia"),
    ("SC", "South Carolina"),
    ("LA", "Louisiana"),
    ("KS", "Kansas"),
    ("NY", "New York"),
    ("NE", "Nebraska"),
    ("OK", "Oklahoma"),
    ("FL", "Florida"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("PA", "Pennsylvania"),
    ("DE", "Delaware"),
    ("NM", "New Mexico"),
    ("RI", "Rhode Island"),
    ("MN", "Minnesota"),
    ("VI", "Virgin Islands"),
    ("NH", "New Hampshire"),
    ("MA", "Massachusetts"),
    ("GA", "Georgia"),
    ("ND", "North Dakota"),
    ("VA", "Virginia"),
];

static STATE_NAMES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| STATE_CODES.into_iter().collect());

/// Full state name for a code, or the code itself when unknown.
pub fn state_name(code: &str) -> &str {
    STATE_NAMES.get(code).copied().unwrap_or(code)
}

/// Earliest month kept by the analysis.
pub fn cutoff_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parse a monthly column header: `YYYY-MM` or `YYYY-MM-DD`.
pub fn parse_month(header: &str) -> Option<NaiveDate> {
    let header = header.trim();
    NaiveDate::parse_from_str(header, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{header}-01"), "%Y-%m-%d"))
        .ok()
}

pub struct HousingReshaper;

impl HousingReshaper {
    /// Load the town table and reshape it.
    pub fn load(path: &Path) -> Result<HousingTable> {
        let df = DataLoader::load_csv(path)?;
        Self::reshape(&df)
    }

    /// Reshape a wide monthly table into quarterly means keyed by (State name, RegionName).
    pub fn reshape(df: &DataFrame) -> Result<HousingTable> {
        let columns = DataLoader::get_columns(df);
        for required in [STATE_COLUMN, REGION_COLUMN] {
            if !columns.iter().any(|c| c == required) {
                return Err(AnalysisError::parse(
                    SOURCE_NAME,
                    format!("missing column '{required}'"),
                ));
            }
        }

        let groups = Self::quarter_groups(&columns)?;
        let quarters: Vec<QuarterlyPeriod> = groups.keys().copied().collect();
        debug!(quarters = quarters.len(), "grouped monthly columns into quarters");

        let height = df.height();
        let mut prices: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(quarters.len()); height];
        for months in groups.values() {
            let mut sums = vec![0.0; height];
            let mut counts = vec![0usize; height];
            for month in months {
                for (i, value) in DataLoader::float_values(df, month)?.into_iter().enumerate() {
                    if let Some(v) = value {
                        sums[i] += v;
                        counts[i] += 1;
                    }
                }
            }
            for (i, row) in prices.iter_mut().enumerate() {
                row.push((counts[i] > 0).then(|| sums[i] / counts[i] as f64));
            }
        }

        let states = DataLoader::string_values(df, STATE_COLUMN)?;
        let regions = DataLoader::string_values(df, REGION_COLUMN)?;
        let mut unknown_codes = 0usize;
        let mut rows: Vec<HousingRow> = states
            .into_iter()
            .zip(regions)
            .zip(prices)
            .map(|((state, region), prices)| {
                let code = state.unwrap_or_default();
                let name = state_name(&code);
                if name == code {
                    unknown_codes += 1;
                }
                HousingRow {
                    key: TownKey::new(name, region.unwrap_or_default()),
                    prices,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));

        if unknown_codes > 0 {
            warn!(rows = unknown_codes, "state codes without a full name kept as-is");
        }
        debug!(rows = rows.len(), "reshaped housing table");
        Ok(HousingTable { quarters, rows })
    }

    /// Monthly columns at or after the cutoff, grouped by quarter.
    fn quarter_groups(columns: &[String]) -> Result<BTreeMap<QuarterlyPeriod, Vec<String>>> {
        let cutoff = cutoff_date();
        let mut groups: BTreeMap<QuarterlyPeriod, Vec<String>> = BTreeMap::new();
        for column in columns {
            if column == STATE_COLUMN
                || column == REGION_COLUMN
                || METADATA_COLUMNS.contains(&column.as_str())
            {
                continue;
            }
            let date = parse_month(column).ok_or_else(|| {
                AnalysisError::parse(SOURCE_NAME, format!("column '{column}' is not a month"))
            })?;
            if date >= cutoff {
                groups
                    .entry(QuarterlyPeriod::from_date(date))
                    .or_default()
                    .push(column.clone());
            }
        }
        Ok(groups)
    }
}
