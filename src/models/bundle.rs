use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BUNDLE_RESOURCE_TYPE: &str = "Bundle";
pub const COLLECTION_BUNDLE_TYPE: &str = "collection";

/// FHIR Bundle of type `collection` carrying Organization entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandBundle {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    #[serde(rename = "type")]
    pub bundle_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

impl BrandBundle {
    pub fn collection(timestamp: Option<String>, entry: Vec<BundleEntry>) -> Self {
        Self {
            resource_type: BUNDLE_RESOURCE_TYPE.to_string(),
            bundle_type: COLLECTION_BUNDLE_TYPE.to_string(),
            timestamp,
            entry,
        }
    }
}

/// Entry resources stay raw JSON so that unrelated resource types pass through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
    #[serde(default)]
    pub resource: Value,
}

impl BundleEntry {
    pub fn resource_type(&self) -> Option<&str> {
        self.resource.get("resourceType").and_then(|r| r.as_str())
    }
}
