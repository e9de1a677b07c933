//! Status Colors
//!
//! Maps each distinct grave status to a color from a fixed, ordered palette.
//! The assignment depends only on the order statuses were first seen and on
//! the palette itself: the status at position `i` gets `palette[i % len]`.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{PlotError, Result};

// =============================================================================
// Color
// =============================================================================

/// Named color understood by the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Cyan,
    Pink,
    Teal,
    Lime,
    Indigo,
    Gray,
    Black,
    White,
}

impl Color {
    pub const ALL: [Color; 14] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
        Color::Cyan,
        Color::Pink,
        Color::Teal,
        Color::Lime,
        Color::Indigo,
        Color::Gray,
        Color::Black,
        Color::White,
    ];

    /// CSS color keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Orange => "orange",
            Color::Cyan => "cyan",
            Color::Pink => "pink",
            Color::Teal => "teal",
            Color::Lime => "lime",
            Color::Indigo => "indigo",
            Color::Gray => "gray",
            Color::Black => "black",
            Color::White => "white",
        }
    }

    /// Hex value of the CSS keyword, for renderers without named colors
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#ff0000",
            Color::Green => "#008000",
            Color::Blue => "#0000ff",
            Color::Yellow => "#ffff00",
            Color::Purple => "#800080",
            Color::Orange => "#ffa500",
            Color::Cyan => "#00ffff",
            Color::Pink => "#ffc0cb",
            Color::Teal => "#008080",
            Color::Lime => "#00ff00",
            Color::Indigo => "#4b0082",
            Color::Gray => "#808080",
            Color::Black => "#000000",
            Color::White => "#ffffff",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let lower = if lower == "grey" { "gray".to_string() } else { lower };
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| PlotError::InvalidConfig(format!("unknown color: {}", s)))
    }
}

impl TryFrom<String> for Color {
    type Error = PlotError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

// =============================================================================
// Palette
// =============================================================================

/// Fixed, non-empty, ordered list of distinct colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(PlotError::InvalidConfig("palette must contain at least one color".into()));
        }
        let mut seen = HashSet::with_capacity(colors.len());
        if let Some(repeated) = colors.iter().find(|c| !seen.insert(**c)) {
            return Err(PlotError::InvalidConfig(format!(
                "palette lists {} more than once",
                repeated
            )));
        }
        Ok(Self(colors))
    }

    /// Color for the status at `position` in first-seen order
    pub fn color_at(&self, position: usize) -> Color {
        self.0[position % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(vec![
            Color::Red,
            Color::Green,
            Color::Blue,
            Color::Yellow,
            Color::Purple,
            Color::Orange,
            Color::Cyan,
            Color::Pink,
            Color::Teal,
            Color::Lime,
            Color::Indigo,
            Color::Gray,
        ])
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = PlotError;

    fn try_from(colors: Vec<Color>) -> Result<Self> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

// =============================================================================
// Status Color Map
// =============================================================================

/// One row of the status legend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub status: String,
    pub color: Color,
}

/// Status value to color, in first-seen status order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusColorMap {
    legend: Vec<LegendEntry>,
    lookup: HashMap<String, Color>,
}

impl StatusColorMap {
    pub fn get(&self, status: &str) -> Option<Color> {
        self.lookup.get(status).copied()
    }

    pub fn contains(&self, status: &str) -> bool {
        self.lookup.contains_key(status)
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn len(&self) -> usize {
        self.legend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legend.is_empty()
    }
}

impl Serialize for StatusColorMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.legend.serialize(serializer)
    }
}

/// Assign palette colors to statuses in the order given.
///
/// Repeated statuses keep their first color and do not advance the palette,
/// so the n-th *distinct* status always receives `palette[n % len]`.
pub fn assign_colors<'a, I>(ordered_statuses: I, palette: &Palette) -> StatusColorMap
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map = StatusColorMap::default();
    for status in ordered_statuses {
        if map.lookup.contains_key(status) {
            continue;
        }
        let color = palette.color_at(map.legend.len());
        map.lookup.insert(status.to_string(), color);
        map.legend.push(LegendEntry { status: status.to_string(), color });
    }
    map
}
