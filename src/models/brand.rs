use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::services::text::location_to_text;

/// Directory of brands keyed by id, in insertion order.
///
/// Inserting an id that is already present replaces the brand but keeps its
/// first position, so the last occurrence in a bundle wins.
pub type BrandDirectory = IndexMap<String, Brand>;

/// A node in the brand hierarchy
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alias: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub portal: Portal,
    #[serde(default)]
    pub portal_inherit: PortalInherit,
}

impl Brand {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Patient-facing portal details, separate from the public website
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Portal {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.website.is_none()
    }
}

/// Per-field flags: `true` means the value comes from the parent brand.
/// Only meaningful when the brand has a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortalInherit {
    #[serde(default)]
    pub name: bool,
    #[serde(default)]
    pub description: bool,
    #[serde(default)]
    pub website: bool,
}

/// Structured address. `text` is always derived from the other fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "LocationFields")]
pub struct Location {
    pub line: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    text: String,
}

impl Location {
    pub fn new(
        line: Vec<String>,
        city: Option<String>,
        state: Option<String>,
        postal_code: Option<String>,
    ) -> Self {
        let text = location_to_text(&line, city.as_deref(), state.as_deref(), postal_code.as_deref());
        Self {
            line,
            city,
            state,
            postal_code,
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

// Incoming `text` is dropped and recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationFields {
    #[serde(default)]
    line: Vec<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    postal_code: Option<String>,
}

impl From<LocationFields> for Location {
    fn from(fields: LocationFields) -> Self {
        Location::new(fields.line, fields.city, fields.state, fields.postal_code)
    }
}
