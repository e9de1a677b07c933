//! Per-feature style resolution.

use serde::{Deserialize, Serialize};

use crate::config::StyleConfig;
use crate::feature::Feature;
use crate::palette::{Color, StatusColorMap};

/// Status used for features that carry none
pub const UNKNOWN_STATUS: &str = "unknown";

/// Outline drawn around every plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self { color: Color::Black, width: 1.0 }
    }
}

/// Where a fill color came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillSource {
    /// Looked up in the status color map
    Assigned,
    /// Lookup miss; the neutral fallback was used
    Fallback,
}

/// Flat fill plus outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Style {
    pub fill: Color,
    pub stroke: Stroke,
    pub fill_source: FillSource,
}

/// Resolves feature styles against a status color map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleResolver {
    fallback: Color,
    stroke: Stroke,
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self { fallback: Color::Gray, stroke: Stroke::default() }
    }
}

impl StyleResolver {
    pub fn new(fallback: Color, stroke: Stroke) -> Self {
        Self { fallback, stroke }
    }

    pub fn from_config(config: &StyleConfig) -> Self {
        Self::new(config.fallback, config.stroke)
    }

    pub fn fallback(&self) -> Color {
        self.fallback
    }

    /// A missing status is looked up as [`UNKNOWN_STATUS`]; a status the map
    /// never saw falls back to the neutral color instead of failing.
    pub fn resolve(&self, feature: &Feature, colors: &StatusColorMap) -> Style {
        let status = feature.status().unwrap_or(UNKNOWN_STATUS);
        let (fill, fill_source) = match colors.get(status) {
            Some(color) => (color, FillSource::Assigned),
            None => (self.fallback, FillSource::Fallback),
        };
        Style { fill, stroke: self.stroke, fill_source }
    }
}

/// Resolve with the default fallback and outline
pub fn resolve_style(feature: &Feature, colors: &StatusColorMap) -> Style {
    StyleResolver::default().resolve(feature, colors)
}
