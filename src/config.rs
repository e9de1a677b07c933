//! Configuration management for grave plot layers
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (graves.toml)
//! - Environment variables (GRAVES__*)
//!
//! ## Example config file (graves.toml):
//! ```toml
//! projection = "EPSG:3857"
//!
//! [classify]
//! target_group = "Buschhoven"
//!
//! [attributes]
//! group = "friedhof"
//! plot_id = "grabId"
//! occupant_id = "verstorbene"
//! status = "grabstatus"
//! plot_code = "grabstelle"
//!
//! [style]
//! palette = ["red", "green", "blue"]
//! fallback = "gray"
//!
//! [style.stroke]
//! color = "black"
//! width = 1.0
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_TARGET_GROUP;
use crate::error::{PlotError, Result};
use crate::feature::{AttributeKeys, LoadOptions};
use crate::palette::{Color, Palette};
use crate::projection::Projection;
use crate::style::Stroke;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlotConfig {
    /// Output CRS for loaded geometry
    #[serde(default)]
    pub projection: Projection,

    /// Classification settings
    #[serde(default)]
    pub classify: ClassifyConfig,

    /// Property names per attribute role
    #[serde(default)]
    pub attributes: AttributeKeys,

    /// Styling settings
    #[serde(default)]
    pub style: StyleConfig,
}

/// Classification configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Graveyard whose plots are counted separately
    #[serde(default = "default_target_group")]
    pub target_group: String,
}

/// Styling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Status colors, assigned in first-seen status order
    #[serde(default)]
    pub palette: Palette,

    /// Fill used when a status has no assigned color
    #[serde(default = "default_fallback")]
    pub fallback: Color,

    /// Outline drawn on every plot
    #[serde(default)]
    pub stroke: Stroke,
}

fn default_target_group() -> String {
    DEFAULT_TARGET_GROUP.to_string()
}

fn default_fallback() -> Color {
    Color::Gray
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self { target_group: default_target_group() }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            fallback: default_fallback(),
            stroke: Stroke::default(),
        }
    }
}

impl PlotConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering a specific file over the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "graves.toml",
            ".graves.toml",
            "config/graves.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        let project_dirs = directories::ProjectDirs::from("org", "graveplots", "grave-plots");
        if let Some(config_dir) = project_dirs {
            let xdg_config = config_dir.config_dir().join("graves.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // GRAVES__CLASSIFY__TARGET_GROUP=Ollheim
        builder = builder.add_source(
            Environment::with_prefix("GRAVES")
                .separator("__")
                .try_parsing(true),
        );

        let config: PlotConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make loads or styling meaningless
    pub fn validate(&self) -> Result<()> {
        if self.classify.target_group.trim().is_empty() {
            return Err(PlotError::InvalidConfig("classify.target_group must not be empty".into()));
        }
        for (role, key) in self.attributes.iter() {
            if key.trim().is_empty() {
                return Err(PlotError::InvalidConfig(format!(
                    "attributes.{} must not be empty",
                    role
                )));
            }
        }
        if self.style.palette.is_empty() {
            return Err(PlotError::InvalidConfig(
                "style.palette must contain at least one color".into(),
            ));
        }
        let width = self.style.stroke.width;
        if !width.is_finite() || width <= 0.0 {
            return Err(PlotError::InvalidConfig(format!(
                "style.stroke.width must be a positive number, got {}",
                width
            )));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PlotError::InvalidConfig(e.to_string()))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            keys: self.attributes.clone(),
            projection: self.projection,
        }
    }
}
