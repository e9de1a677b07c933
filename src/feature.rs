//! Feature Store
//!
//! Decodes a GeoJSON document into an ordered, immutable collection of grave
//! plot features. Geometry is converted once, at load time, into the
//! configured output projection; the attributes the classifier cares about are
//! pulled out of the property bag up front so every later pass reads typed
//! fields instead of re-parsing JSON.

use geo::{BoundingRect, Geometry, Rect};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{PlotError, Result};
use crate::projection::Projection;

// =============================================================================
// Attribute Keys
// =============================================================================

/// Property names used for each attribute role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeKeys {
    /// Graveyard name
    #[serde(default = "default_group_key")]
    pub group: String,
    #[serde(default = "default_plot_id_key")]
    pub plot_id: String,
    /// Deceased person; absence marks the plot as unassigned
    #[serde(default = "default_occupant_key")]
    pub occupant_id: String,
    #[serde(default = "default_status_key")]
    pub status: String,
    #[serde(default = "default_plot_code_key")]
    pub plot_code: String,
}

fn default_group_key() -> String {
    "friedhof".to_string()
}

fn default_plot_id_key() -> String {
    "grabId".to_string()
}

fn default_occupant_key() -> String {
    "verstorbene".to_string()
}

fn default_status_key() -> String {
    "grabstatus".to_string()
}

fn default_plot_code_key() -> String {
    "grabstelle".to_string()
}

impl Default for AttributeKeys {
    fn default() -> Self {
        Self {
            group: default_group_key(),
            plot_id: default_plot_id_key(),
            occupant_id: default_occupant_key(),
            status: default_status_key(),
            plot_code: default_plot_code_key(),
        }
    }
}

impl AttributeKeys {
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("group", self.group.as_str()),
            ("plot_id", self.plot_id.as_str()),
            ("occupant_id", self.occupant_id.as_str()),
            ("status", self.status.as_str()),
            ("plot_code", self.plot_code.as_str()),
        ]
        .into_iter()
    }
}

/// Options applied while decoding
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub keys: AttributeKeys,
    pub projection: Projection,
}

// =============================================================================
// Attribute values
// =============================================================================

/// Text of a categorical attribute, or `None` when the value is missing.
///
/// `null`, `false`, `0`, `NaN` and `""` all count as missing. Other scalars
/// are rendered as their JSON text so categories are always strings.
pub(crate) fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 || f.is_nan() => None,
            _ => Some(n.to_string()),
        },
        other => Some(other.to_string()),
    }
}

/// The typed attributes of one plot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlotAttributes {
    pub group: Option<String>,
    pub plot_id: Option<String>,
    pub occupant_id: Option<String>,
    pub status: Option<String>,
    pub plot_code: Option<String>,
}

impl PlotAttributes {
    fn extract(properties: &Map<String, Value>, keys: &AttributeKeys) -> Self {
        let get = |key: &str| properties.get(key).and_then(attribute_text);
        Self {
            group: get(&keys.group),
            plot_id: get(&keys.plot_id),
            occupant_id: get(&keys.occupant_id),
            status: get(&keys.status),
            plot_code: get(&keys.plot_code),
        }
    }
}

// =============================================================================
// Feature
// =============================================================================

/// A single grave plot
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    geometry: Option<Geometry<f64>>,
    properties: Map<String, Value>,
    attributes: PlotAttributes,
}

impl Feature {
    /// Build a feature from already projected geometry
    pub fn new(
        geometry: Option<Geometry<f64>>,
        properties: Map<String, Value>,
        keys: &AttributeKeys,
    ) -> Self {
        let attributes = PlotAttributes::extract(&properties, keys);
        Self { geometry, properties, attributes }
    }

    pub fn group(&self) -> Option<&str> {
        self.attributes.group.as_deref()
    }

    pub fn plot_id(&self) -> Option<&str> {
        self.attributes.plot_id.as_deref()
    }

    pub fn occupant_id(&self) -> Option<&str> {
        self.attributes.occupant_id.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.attributes.status.as_deref()
    }

    pub fn plot_code(&self) -> Option<&str> {
        self.attributes.plot_code.as_deref()
    }

    pub fn is_unassigned(&self) -> bool {
        self.attributes.occupant_id.is_none()
    }

    pub fn attributes(&self) -> &PlotAttributes {
        &self.attributes
    }

    /// Raw property lookup for keys outside the attribute roles
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Property keys in document order
    pub fn property_keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    pub fn geometry(&self) -> Option<&Geometry<f64>> {
        self.geometry.as_ref()
    }

    /// Minimal rectangle enclosing the geometry, in the output projection
    pub fn extent(&self) -> Option<Rect<f64>> {
        self.geometry.as_ref().and_then(|g| g.bounding_rect())
    }
}

// =============================================================================
// Feature Collection
// =============================================================================

/// Decoded features in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    features: Vec<Feature>,
    projection: Projection,
}

impl FeatureCollection {
    /// Decode GeoJSON text
    pub fn load(raw: &str, options: &LoadOptions) -> Result<Self> {
        let geojson = raw
            .parse::<GeoJson>()
            .map_err(|e| PlotError::decode(format!("invalid GeoJSON: {}", e)))?;
        Self::from_geojson(geojson, options)
    }

    /// Decode an already parsed JSON document
    pub fn from_value(value: Value, options: &LoadOptions) -> Result<Self> {
        let geojson = GeoJson::from_json_value(value)
            .map_err(|e| PlotError::decode(format!("invalid GeoJSON: {}", e)))?;
        Self::from_geojson(geojson, options)
    }

    /// Read and decode a GeoJSON file
    pub fn from_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::load(&content, options)
    }

    pub fn from_features(features: Vec<Feature>, projection: Projection) -> Self {
        Self { features, projection }
    }

    fn from_geojson(geojson: GeoJson, options: &LoadOptions) -> Result<Self> {
        let raw_features = match geojson {
            GeoJson::FeatureCollection(fc) => fc.features,
            GeoJson::Feature(f) => vec![f],
            GeoJson::Geometry(_) => {
                return Err(PlotError::decode(
                    "expected a FeatureCollection, found a bare Geometry",
                ));
            }
        };

        let mut features = Vec::with_capacity(raw_features.len());
        for (index, raw) in raw_features.into_iter().enumerate() {
            let geometry = match raw.geometry {
                Some(g) => {
                    let geometry = Geometry::<f64>::try_from(g).map_err(|e| {
                        PlotError::decode(format!("feature {}: unsupported geometry: {}", index, e))
                    })?;
                    Some(options.projection.project_geometry(geometry))
                }
                None => None,
            };
            let properties = raw.properties.unwrap_or_default();
            features.push(Feature::new(geometry, properties, &options.keys));
        }

        debug!(
            features = features.len(),
            projection = options.projection.code(),
            "decoded feature collection"
        );

        Ok(Self { features, projection: options.projection })
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
