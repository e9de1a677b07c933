//! Aggregate statistics over a classification result.

use serde::Serialize;
use std::fmt;

use crate::classify::{ClassificationResult, UnassignedCounter};
use crate::error::{PlotError, Result};
use crate::palette::{LegendEntry, StatusColorMap};

/// Label for plots without a graveyard
pub const NO_GROUP_LABEL: &str = "(no graveyard)";

/// A graveyard and a count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub group: Option<String>,
    pub count: usize,
}

impl GroupCount {
    pub fn label(&self) -> &str {
        self.group.as_deref().unwrap_or(NO_GROUP_LABEL)
    }
}

/// Graveyard with the most unassigned plots.
///
/// Ties go to the graveyard seen first. An empty counter has no answer and
/// yields [`PlotError::EmptyData`].
pub fn most_unassigned_group(counter: &UnassignedCounter) -> Result<GroupCount> {
    let mut best: Option<(Option<&str>, usize)> = None;
    for (group, count) in counter.iter() {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((group, count)),
        }
    }
    best.map(|(group, count)| GroupCount { group: group.map(str::to_string), count })
        .ok_or_else(|| PlotError::EmptyData("no unassigned plots recorded".into()))
}

/// Read-only queries over one classification
#[derive(Debug, Clone, Copy)]
pub struct StatsReporter<'a> {
    result: &'a ClassificationResult,
}

impl<'a> StatsReporter<'a> {
    pub fn new(result: &'a ClassificationResult) -> Self {
        Self { result }
    }

    pub fn graveyard_count(&self) -> usize {
        self.result.groups.len()
    }

    pub fn target_group_plot_count(&self) -> usize {
        self.result.target_group_plot_count
    }

    pub fn sample_attribute_keys(&self) -> &'a [String] {
        &self.result.sample_attribute_keys
    }

    pub fn most_unassigned_group(&self) -> Result<GroupCount> {
        most_unassigned_group(&self.result.unassigned)
    }

    pub fn report(&self, colors: &StatusColorMap) -> StatsReport {
        StatsReport {
            feature_count: self.result.feature_count,
            graveyard_count: self.graveyard_count(),
            graveyards: self.result.groups.as_slice().to_vec(),
            target_group: self.result.target_group.clone(),
            target_group_plot_count: self.target_group_plot_count(),
            sample_attribute_keys: self.sample_attribute_keys().to_vec(),
            most_unassigned: self.most_unassigned_group().ok(),
            plot_code_count: self.result.plot_codes.len(),
            status_colors: colors.legend().to_vec(),
            source_digest: None,
        }
    }
}

/// Snapshot of every query, ready for display or JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub feature_count: usize,
    pub graveyard_count: usize,
    pub graveyards: Vec<String>,
    pub target_group: String,
    pub target_group_plot_count: usize,
    pub sample_attribute_keys: Vec<String>,
    /// `None` means no data
    pub most_unassigned: Option<GroupCount>,
    pub plot_code_count: usize,
    pub status_colors: Vec<LegendEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_digest: Option<String>,
}

impl StatsReport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Features: {}", self.feature_count)?;
        writeln!(f, "Number of graveyards: {}", self.graveyard_count)?;
        writeln!(
            f,
            "Graves with a plot id in {}: {}",
            self.target_group, self.target_group_plot_count
        )?;
        writeln!(f, "Properties of a grave plot: {}", self.sample_attribute_keys.join(", "))?;
        match &self.most_unassigned {
            Some(top) => writeln!(
                f,
                "Graveyard with most unassigned plots: {} ({} unassigned)",
                top.label(),
                top.count
            )?,
            None => writeln!(f, "Graveyard with most unassigned plots: no data")?,
        }
        writeln!(f, "Distinct plot codes: {}", self.plot_code_count)?;
        if !self.status_colors.is_empty() {
            writeln!(f, "Status colors:")?;
            for entry in &self.status_colors {
                writeln!(f, "  {:<20} {}", entry.status, entry.color)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{assign_colors, Color, Palette};

    #[test]
    fn test_tie_goes_to_first_seen() {
        let mut counter = UnassignedCounter::default();
        counter.increment(Some("X"));
        counter.increment(Some("Y"));
        let top = most_unassigned_group(&counter).unwrap();
        assert_eq!(top, GroupCount { group: Some("X".into()), count: 1 });
    }

    #[test]
    fn test_absent_group_can_win() {
        let mut counter = UnassignedCounter::default();
        counter.increment(Some("X"));
        counter.increment(None);
        counter.increment(None);
        let top = most_unassigned_group(&counter).unwrap();
        assert_eq!(top.group, None);
        assert_eq!(top.label(), NO_GROUP_LABEL);
        assert_eq!(top.count, 2);
    }

    #[test]
    fn test_empty_counter_is_no_data() {
        let err = most_unassigned_group(&UnassignedCounter::default()).unwrap_err();
        assert!(matches!(err, PlotError::EmptyData(_)));
    }

    #[test]
    fn test_report_renders_no_data() {
        let result = ClassificationResult::default();
        let report = StatsReporter::new(&result).report(&StatusColorMap::default());
        assert_eq!(report.most_unassigned, None);
        assert!(report.to_string().contains("no data"));
        let text = report.to_json_pretty().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(json["most_unassigned"].is_null());
    }

    #[test]
    fn test_report_lists_legend() {
        let mut result = ClassificationResult::default();
        result.statuses.insert("belegt");
        let colors = assign_colors(result.statuses.iter(), &Palette::default());
        let report = StatsReporter::new(&result).report(&colors);
        assert_eq!(report.status_colors[0].color, Color::Red);
        assert!(report.to_string().contains("belegt"));
    }
}
