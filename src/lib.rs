//! Grave Plots
//!
//! Classification and styling engine for cemetery grave-plot layers delivered
//! as GeoJSON.
//!
//! ## Features
//!
//! - **Single-pass classification**: graveyards, statuses, plot codes and
//!   unassigned plots per graveyard in one scan
//! - **Deterministic status colors**: the n-th distinct status always gets
//!   `palette[n % len]`
//! - **Explicit fallbacks**: unknown statuses style as a neutral color, empty
//!   aggregates report "no data"
//! - **Framing**: locate a graveyard and hand the renderer the extent to show
//!
//! ## Data flow
//!
//! ```text
//! GeoJSON ─▶ FeatureCollection ─▶ Classifier ─▶ ClassificationResult
//!                                                 ├─▶ assign_colors ─▶ StatusColorMap ─▶ StyleResolver
//!                                                 ├─▶ StatsReporter
//!                                                 └─▶ locate / frame
//! ```

pub mod checksum;
pub mod classify;
pub mod config;
pub mod directory;
pub mod error;
pub mod feature;
pub mod layer;
pub mod locate;
pub mod palette;
pub mod projection;
pub mod report;
pub mod style;

pub use checksum::SourceDigest;
pub use classify::{CategorySet, ClassificationResult, Classifier, UnassignedCounter};
pub use config::PlotConfig;
pub use directory::{GraveyardDirectory, GraveyardEntry};
pub use error::{PlotError, Result};
pub use feature::{AttributeKeys, Feature, FeatureCollection, LoadOptions};
pub use layer::{LoadedPlots, PlotLayer};
pub use locate::{frame, locate, suggest, BoundingRegion};
pub use palette::{assign_colors, Color, Palette, StatusColorMap};
pub use projection::Projection;
pub use report::{most_unassigned_group, GroupCount, StatsReport, StatsReporter};
pub use style::{resolve_style, FillSource, Stroke, Style, StyleResolver};
