use std::collections::HashSet;
use url::Url;

use crate::error::{BrandError, Result};
use crate::models::BrandDirectory;

/// Validates a brand id according to the FHIR id rules.
///
/// FHIR IDs must match the pattern: [A-Za-z0-9\-\.]{1,64}
/// - Only alphanumeric characters, hyphens, and periods allowed
/// - Length must be between 1 and 64 characters
pub fn validate_brand_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 64 {
        return Err(BrandError::ValidationError(format!(
            "Brand id must be between 1 and 64 characters, got {}",
            id.len()
        )));
    }

    for ch in id.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '-' && ch != '.' {
            return Err(BrandError::ValidationError(format!(
                "Brand id '{}' contains invalid character '{}'. Only alphanumeric characters, hyphens, and periods are allowed.",
                id, ch
            )));
        }
    }

    Ok(())
}

/// Validates the structure of a brand directory.
///
/// Every key must match its brand's id and be a valid id, and the parent
/// relation must be acyclic. Parents missing from the directory are allowed.
pub fn validate_directory(directory: &BrandDirectory) -> Result<()> {
    for (key, brand) in directory {
        if key != &brand.id {
            return Err(BrandError::InvalidDirectory(format!(
                "Directory key '{}' does not match brand id '{}'",
                key, brand.id
            )));
        }
        validate_brand_id(key)?;

        if brand.parent_id.as_deref() == Some(key.as_str()) {
            return Err(BrandError::CyclicHierarchy(key.clone()));
        }
    }

    // Walk each parent chain; revisiting a brand on the same walk is a cycle.
    let mut acyclic: HashSet<&str> = HashSet::new();
    for start in directory.keys() {
        let mut path: Vec<&str> = Vec::new();
        let mut current = Some(start.as_str());

        while let Some(id) = current {
            if acyclic.contains(id) {
                break;
            }
            if path.contains(&id) {
                return Err(BrandError::CyclicHierarchy(id.to_string()));
            }
            path.push(id);
            current = directory.get(id).and_then(|b| b.parent_id.as_deref());
        }

        acyclic.extend(path);
    }

    Ok(())
}

/// Validates an export base URL: an absolute http(s) URL without query or
/// fragment
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let parsed = Url::parse(base_url).map_err(|e| {
        BrandError::ValidationError(format!("Invalid base URL '{}': {}", base_url, e))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BrandError::ValidationError(format!(
            "Base URL '{}' must use http or https",
            base_url
        )));
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(BrandError::ValidationError(format!(
            "Base URL '{}' must not carry a query or fragment",
            base_url
        )));
    }

    Ok(())
}
