//! Plot Classification
//!
//! A single pass over a [`FeatureCollection`] producing every category set and
//! counter the rest of the crate needs:
//! - graveyard names, status values and plot codes (first-seen order)
//! - the property keys of the first feature carrying any properties
//! - plots in the target graveyard that have a plot id
//! - unassigned plots (no occupant) per graveyard
//!
//! The result is an immutable value. Reloading means classifying again from
//! scratch; nothing is updated incrementally.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::config::PlotConfig;
use crate::feature::FeatureCollection;

// =============================================================================
// Category Set
// =============================================================================

/// Distinct attribute values, enumerated in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    values: Vec<String>,
    seen: HashSet<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the value was not yet present
    pub fn insert(&mut self, value: &str) -> bool {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.values.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }
}

impl Serialize for CategorySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<'a> FromIterator<&'a str> for CategorySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = CategorySet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

// =============================================================================
// Unassigned Counter
// =============================================================================

/// Unassigned plots per graveyard.
///
/// Plots without a graveyard are counted under the `None` key, which takes
/// part in every query like any named graveyard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnassignedCounter {
    entries: Vec<(Option<String>, usize)>,
    index: HashMap<Option<String>, usize>,
}

impl UnassignedCounter {
    pub fn increment(&mut self, group: Option<&str>) {
        let key = group.map(str::to_string);
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get(&self, group: Option<&str>) -> usize {
        let key = group.map(str::to_string);
        self.index.get(&key).map(|&slot| self.entries[slot].1).unwrap_or(0)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, usize)> {
        self.entries.iter().map(|(g, n)| (g.as_deref(), *n))
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for UnassignedCounter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        #[derive(Serialize)]
        struct Entry<'a> {
            group: Option<&'a str>,
            unassigned: usize,
        }

        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (group, unassigned) in self.iter() {
            seq.serialize_element(&Entry { group, unassigned })?;
        }
        seq.end()
    }
}

// =============================================================================
// Classification Result
// =============================================================================

/// Everything one classification pass computed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub feature_count: usize,
    pub groups: CategorySet,
    /// First-seen order; the basis for status colors
    pub statuses: CategorySet,
    pub plot_codes: CategorySet,
    pub sample_attribute_keys: Vec<String>,
    pub target_group: String,
    /// Features in the target graveyard carrying a plot id
    pub target_group_plot_count: usize,
    /// Distinct plot ids among those features
    pub target_group_distinct_plots: usize,
    pub unassigned: UnassignedCounter,
}

// =============================================================================
// Classifier
// =============================================================================

pub const DEFAULT_TARGET_GROUP: &str = "Buschhoven";

/// Classifies a feature collection in one pass
#[derive(Debug, Clone)]
pub struct Classifier {
    target_group: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_GROUP)
    }
}

impl Classifier {
    pub fn new(target_group: impl Into<String>) -> Self {
        Self { target_group: target_group.into() }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::new(config.classify.target_group.clone())
    }

    pub fn target_group(&self) -> &str {
        &self.target_group
    }

    pub fn classify(&self, collection: &FeatureCollection) -> ClassificationResult {
        let mut result = ClassificationResult {
            target_group: self.target_group.clone(),
            ..Default::default()
        };
        let mut sampled = false;
        let mut target_plots: HashSet<&str> = HashSet::new();

        for feature in collection {
            result.feature_count += 1;

            if let Some(group) = feature.group() {
                result.groups.insert(group);
            }
            if let Some(status) = feature.status() {
                result.statuses.insert(status);
            }
            if let Some(code) = feature.plot_code() {
                result.plot_codes.insert(code);
            }

            if !sampled && feature.has_properties() {
                result.sample_attribute_keys =
                    feature.property_keys().map(str::to_string).collect();
                sampled = true;
            }

            if feature.group() == Some(self.target_group.as_str()) {
                if let Some(plot_id) = feature.plot_id() {
                    result.target_group_plot_count += 1;
                    target_plots.insert(plot_id);
                }
            }

            if feature.is_unassigned() {
                result.unassigned.increment(feature.group());
            }
        }

        result.target_group_distinct_plots = target_plots.len();

        debug!(
            features = result.feature_count,
            graveyards = result.groups.len(),
            statuses = result.statuses.len(),
            unassigned = result.unassigned.total(),
            "classified feature collection"
        );

        result
    }
}
