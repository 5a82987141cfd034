//! University Town Parser Module
//! Turns the line-oriented town listing into (State, RegionName) entries.

use crate::error::{AnalysisError, Result};
use crate::model::TownEntry;
use tracing::debug;

/// Substring marking a state header line.
const STATE_MARKER: &str = "[edit]";

/// Length of the trailing tag stripped from a state header line.
const STATE_TAG_LEN: usize = 6;

/// Start of the annotation that follows a town name.
const ANNOTATION_START: &str = " (";

pub struct TownListParser;

impl TownListParser {
    /// Parse the listing in file order. A town line before any state header is an error.
    pub fn parse(text: &str) -> Result<Vec<TownEntry>> {
        let mut towns = Vec::new();
        let mut state: Option<String> = None;

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.contains(STATE_MARKER) {
                state = Some(Self::state_name(line).to_string());
            } else if !line.is_empty() {
                let Some(state) = &state else {
                    return Err(AnalysisError::parse(
                        "university town list",
                        format!("line {}: town '{line}' appears before any state", line_no + 1),
                    ));
                };
                towns.push(TownEntry::new(state.clone(), Self::town_name(line)));
            }
        }

        debug!(towns = towns.len(), "parsed university town list");
        Ok(towns)
    }

    fn state_name(line: &str) -> &str {
        let cut = line
            .char_indices()
            .rev()
            .nth(STATE_TAG_LEN - 1)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        &line[..cut]
    }

    fn town_name(line: &str) -> &str {
        match line.find(ANNOTATION_START) {
            Some(idx) => line[..idx].trim(),
            None => line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_states_and_towns_in_order() {
        let text = "Alabama[edit]\n\
                    Auburn (Auburn University)[1]\n\
                    Florence (University of North Alabama)\n\
                    \n\
                    Alaska[edit]\n\
                    Fairbanks (University of Alaska Fairbanks)[2]\n";
        let towns = TownListParser::parse(text).unwrap();
        assert_eq!(
            towns,
            vec![
                TownEntry::new("Alabama", "Auburn"),
                TownEntry::new("Alabama", "Florence"),
                TownEntry::new("Alaska", "Fairbanks"),
            ]
        );
    }

    #[test]
    fn town_without_annotation_is_kept_whole() {
        let towns = TownListParser::parse("Ohio[edit]\n  Athens  \n").unwrap();
        assert_eq!(towns, vec![TownEntry::new("Ohio", "Athens")]);
    }

    #[test]
    fn only_first_annotation_splits() {
        let towns =
            TownListParser::parse("Texas[edit]\nCollege Station (Texas A&M) (main)\n").unwrap();
        assert_eq!(towns[0].region, "College Station");
    }

    #[test]
    fn state_tag_is_stripped_from_the_end() {
        let towns = TownListParser::parse("New York[edit]\nIthaca (Cornell)\n").unwrap();
        assert_eq!(towns[0].state, "New York");
    }

    #[test]
    fn town_before_state_is_rejected() {
        let err = TownListParser::parse("Auburn (Auburn University)\nAlabama[edit]\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { .. }));
    }

    #[test]
    fn blank_input_yields_no_towns() {
        assert!(TownListParser::parse("\n   \n").unwrap().is_empty());
    }
}
