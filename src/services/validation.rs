use serde_json::Value;

use crate::error::{BrandError, Result};
use crate::models::bundle::{BUNDLE_RESOURCE_TYPE, COLLECTION_BUNDLE_TYPE};

/// Validates the envelope of an incoming Bundle before typed decoding.
///
/// Only the envelope is checked; the contents of each resource are read
/// leniently by the parser.
pub fn validate_bundle(content: &Value) -> Result<()> {
    // Validate resourceType
    let resource_type = content
        .get("resourceType")
        .and_then(|r| r.as_str())
        .ok_or_else(|| BrandError::InvalidBundle("Missing resourceType".to_string()))?;

    if resource_type != BUNDLE_RESOURCE_TYPE {
        return Err(BrandError::InvalidBundle(format!(
            "Expected resourceType 'Bundle', got '{}'",
            resource_type
        )));
    }

    let bundle_type = content
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| BrandError::InvalidBundle("Bundle must have a type".to_string()))?;

    if bundle_type != COLLECTION_BUNDLE_TYPE {
        tracing::warn!(bundle_type, "Reading a non-collection bundle as a brand collection");
    }

    let Some(entries) = content.get("entry") else {
        return Ok(());
    };

    let entries = entries
        .as_array()
        .ok_or_else(|| BrandError::InvalidBundle("entry must be an array".to_string()))?;

    for (i, entry) in entries.iter().enumerate() {
        if !entry.is_object() {
            return Err(BrandError::InvalidBundle(format!(
                "entry[{}] must be an object",
                i
            )));
        }

        if !entry.get("resource").is_some_and(Value::is_object) {
            return Err(BrandError::InvalidBundle(format!(
                "entry[{}].resource must be an object",
                i
            )));
        }

        if let Some(full_url) = entry.get("fullUrl") {
            if !full_url.is_string() {
                return Err(BrandError::InvalidBundle(format!(
                    "entry[{}].fullUrl must be a string",
                    i
                )));
            }
        }
    }

    Ok(())
}
