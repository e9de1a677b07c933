//! Plot Layer
//!
//! Owns the one "current" load: the decoded collection together with the
//! classification and status colors derived from it. A reload builds a
//! complete new snapshot first and only then swaps it in, so a failed decode
//! leaves the previous snapshot untouched and readers never see a mix of
//! old and new data.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::checksum::SourceDigest;
use crate::classify::{ClassificationResult, Classifier};
use crate::config::PlotConfig;
use crate::error::{PlotError, Result};
use crate::feature::{Feature, FeatureCollection, LoadOptions};
use crate::locate::{self, BoundingRegion};
use crate::palette::{assign_colors, Palette, StatusColorMap};
use crate::report::{StatsReport, StatsReporter};
use crate::style::{Style, StyleResolver};

/// Everything derived from one load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPlots {
    pub collection: FeatureCollection,
    pub classification: ClassificationResult,
    pub colors: StatusColorMap,
    pub digest: SourceDigest,
}

impl LoadedPlots {
    /// Classify a decoded collection and assign its status colors
    pub fn build(
        collection: FeatureCollection,
        classifier: &Classifier,
        palette: &Palette,
        digest: SourceDigest,
    ) -> Self {
        let classification = classifier.classify(&collection);
        let colors = assign_colors(classification.statuses.iter(), palette);
        Self { collection, classification, colors, digest }
    }

    pub fn reporter(&self) -> StatsReporter<'_> {
        StatsReporter::new(&self.classification)
    }
}

/// The current grave plot layer
#[derive(Debug, Clone)]
pub struct PlotLayer {
    options: LoadOptions,
    classifier: Classifier,
    palette: Palette,
    resolver: StyleResolver,
    current: Option<LoadedPlots>,
}

impl Default for PlotLayer {
    fn default() -> Self {
        Self::new(&PlotConfig::default())
    }
}

impl PlotLayer {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            options: config.load_options(),
            classifier: Classifier::from_config(config),
            palette: config.style.palette.clone(),
            resolver: StyleResolver::from_config(&config.style),
            current: None,
        }
    }

    /// Replace the current snapshot with one decoded from GeoJSON text
    pub fn reload(&mut self, raw: &str) -> Result<&LoadedPlots> {
        let digest = SourceDigest::from_text(raw);
        let decoded = FeatureCollection::load(raw, &self.options);
        self.install(decoded, digest)
    }

    /// Replace the current snapshot with one decoded from a parsed document
    pub fn reload_value(&mut self, value: Value) -> Result<&LoadedPlots> {
        let digest = SourceDigest::from_json(&value);
        let decoded = FeatureCollection::from_value(value, &self.options);
        self.install(decoded, digest)
    }

    pub fn reload_from_path(&mut self, path: impl AsRef<Path>) -> Result<&LoadedPlots> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading grave plots");
        let content = fs::read_to_string(path)?;
        self.reload(&content)
    }

    fn install(
        &mut self,
        decoded: Result<FeatureCollection>,
        digest: SourceDigest,
    ) -> Result<&LoadedPlots> {
        let collection = match decoded {
            Ok(collection) => collection,
            Err(e) => {
                warn!(digest = digest.short(), error = %e, "load rejected, keeping previous plots");
                return Err(e);
            }
        };

        let loaded = LoadedPlots::build(collection, &self.classifier, &self.palette, digest);
        info!(
            digest = loaded.digest.short(),
            features = loaded.classification.feature_count,
            graveyards = loaded.classification.groups.len(),
            statuses = loaded.colors.len(),
            "plots loaded"
        );
        Ok(&*self.current.insert(loaded))
    }

    pub fn current(&self) -> Option<&LoadedPlots> {
        self.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Style for a feature; before any load every status is a lookup miss
    pub fn style_for(&self, feature: &Feature) -> Style {
        match &self.current {
            Some(loaded) => self.resolver.resolve(feature, &loaded.colors),
            None => self.resolver.resolve(feature, &StatusColorMap::default()),
        }
    }

    pub fn locate(&self, group_name: &str) -> Result<&Feature> {
        let loaded = self.current.as_ref().ok_or_else(|| PlotError::not_found(group_name))?;
        locate::locate(group_name, &loaded.collection)
    }

    /// Region to frame for a graveyard; `Ok(None)` if its first plot has no geometry
    pub fn frame_group(&self, group_name: &str) -> Result<Option<BoundingRegion>> {
        self.locate(group_name).map(locate::frame)
    }

    /// Close graveyard names for a failed lookup
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<String> {
        match &self.current {
            Some(loaded) => locate::suggest(query, &loaded.classification.groups, limit),
            None => Vec::new(),
        }
    }

    pub fn report(&self) -> Result<StatsReport> {
        let loaded = self
            .current
            .as_ref()
            .ok_or_else(|| PlotError::EmptyData("no grave plots loaded".into()))?;
        let mut report = loaded.reporter().report(&loaded.colors);
        report.source_digest = Some(loaded.digest.to_string());
        Ok(report)
    }
}
