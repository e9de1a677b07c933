//! Source fingerprints, used to tell whether two loads saw the same input

use sha2::{Digest, Sha256};
use serde::Serialize;
use std::fmt;

/// SHA256 digest of raw GeoJSON input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceDigest(String);

impl SourceDigest {
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(data)))
    }

    pub fn from_text(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Digest of the compact serialization of an already parsed document
    pub fn from_json(value: &serde_json::Value) -> Self {
        Self::from_text(&value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for log lines
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }

    pub fn matches(&self, content: &str) -> bool {
        *self == Self::from_text(content)
    }
}

impl fmt::Display for SourceDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
