use serde_json::Value;

use crate::models::organization::{
    Address, CodeableConcept, Coding, ContactPoint, Identifier, Reference, CATEGORY_SYSTEM,
    ORGANIZATION_REFERENCE_PREFIX, ORGANIZATION_RESOURCE_TYPE, RFC3986_SYSTEM,
};
use crate::models::{Brand, BrandBundle, BrandDirectory, BundleEntry, Clock, Organization, SystemClock};
use crate::services::extensions::{write_branding, BrandingFacts};
use crate::services::inheritance::resolve_portal;
use crate::services::text::identifier_from_url;

/// Organization fields dropped from the wire when they serialize to `[]`
pub const PRUNABLE_FIELDS: [&str; 5] = ["alias", "address", "extension", "identifier", "type"];

/// Convert a brand directory into a collection bundle stamped with the
/// current time
pub fn serialize(directory: &BrandDirectory, base_url: &str) -> BrandBundle {
    serialize_with_clock(directory, base_url, &SystemClock)
}

/// Convert a brand directory into a collection bundle, in directory order
pub fn serialize_with_clock(
    directory: &BrandDirectory,
    base_url: &str,
    clock: &dyn Clock,
) -> BrandBundle {
    let base_url = base_url.trim_end_matches('/');

    let entry: Vec<BundleEntry> = directory
        .iter()
        .map(|(id, brand)| BundleEntry {
            full_url: Some(format!("{}/{}{}", base_url, ORGANIZATION_REFERENCE_PREFIX, id)),
            resource: organization_resource(id, brand, directory),
        })
        .collect();

    tracing::debug!(entries = entry.len(), base_url, "Serialized brand directory");

    let timestamp = clock
        .now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    BrandBundle::collection(Some(timestamp), entry)
}

/// Build the wire Organization for one brand, with inherited portal fields
/// resolved against its parent
pub fn brand_to_organization(id: &str, brand: &Brand, directory: &BrandDirectory) -> Organization {
    let portal = resolve_portal(brand, directory);
    let website = brand.website.as_deref().filter(|w| !w.is_empty());
    let branding = BrandingFacts {
        logo: brand.logo.clone(),
        portal_name: portal.name,
        portal_description: portal.description,
        portal_url: portal.website,
    };

    Organization {
        resource_type: ORGANIZATION_RESOURCE_TYPE,
        id: id.to_string(),
        extension: write_branding(&branding),
        identifier: identifier_from_url(website)
            .map(|value| Identifier {
                system: RFC3986_SYSTEM.to_string(),
                value,
            })
            .into_iter()
            .collect(),
        name: brand.name.clone(),
        part_of: brand.parent_id.as_deref().map(Reference::organization),
        alias: brand.alias.clone(),
        address: brand
            .locations
            .iter()
            .map(|location| Address {
                line: location.line.clone(),
                city: location.city.clone(),
                state: location.state.clone(),
                postal_code: location.postal_code.clone(),
            })
            .collect(),
        telecom: website
            .iter()
            .map(|website| ContactPoint {
                system: "url".to_string(),
                value: website.to_string(),
            })
            .collect(),
        organization_type: brand
            .categories
            .iter()
            .map(|code| CodeableConcept {
                coding: vec![Coding {
                    system: CATEGORY_SYSTEM.to_string(),
                    code: code.clone(),
                }],
            })
            .collect(),
    }
}

fn organization_resource(id: &str, brand: &Brand, directory: &BrandDirectory) -> Value {
    let organization = brand_to_organization(id, brand, directory);
    // Organization holds only strings, options and vectors with string keys,
    // for which serde_json::to_value cannot fail.
    let mut resource =
        serde_json::to_value(&organization).expect("Organization serializes to a JSON object");
    prune_empty_lists(&mut resource);
    resource
}

/// Remove each of [`PRUNABLE_FIELDS`] that holds an empty array
pub fn prune_empty_lists(resource: &mut Value) {
    let Some(object) = resource.as_object_mut() else {
        return;
    };

    for field in PRUNABLE_FIELDS {
        let empty = object
            .get(field)
            .and_then(|v| v.as_array())
            .is_some_and(|items| items.is_empty());
        if empty {
            object.remove(field);
        }
    }
}
