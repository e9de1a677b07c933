//! Graveyard directory
//!
//! The municipal registry endpoint lists graveyards as a JSON array of
//! objects carrying a `friedhof` name and a `friedhofId`. Fetching it is the
//! embedder's job; this module only turns the fetched document into a
//! category set of names and ids.

use serde::Deserialize;
use serde_json::Value;

use crate::classify::CategorySet;
use crate::error::{PlotError, Result};
use crate::feature::attribute_text;

/// One listing row
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraveyardEntry {
    #[serde(default)]
    pub friedhof: Value,
    #[serde(rename = "friedhofId", default)]
    pub friedhof_id: Value,
}

impl GraveyardEntry {
    pub fn name(&self) -> Option<String> {
        attribute_text(&self.friedhof)
    }

    pub fn id(&self) -> Option<String> {
        attribute_text(&self.friedhof_id)
    }
}

/// Decoded registry listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraveyardDirectory {
    entries: Vec<GraveyardEntry>,
}

impl GraveyardDirectory {
    pub fn from_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| PlotError::decode(format!("invalid graveyard listing: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Array(rows) = value else {
            return Err(PlotError::decode("graveyard listing must be a JSON array"));
        };
        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                serde_json::from_value(row)
                    .map_err(|e| PlotError::decode(format!("graveyard listing row {}: {}", i, e)))
            })
            .collect::<Result<Vec<GraveyardEntry>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[GraveyardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every present name and id, name first within a row
    pub fn names(&self) -> CategorySet {
        let mut set = CategorySet::new();
        for entry in &self.entries {
            if let Some(name) = entry.name() {
                set.insert(&name);
            }
            if let Some(id) = entry.id() {
                set.insert(&id);
            }
        }
        set
    }
}
