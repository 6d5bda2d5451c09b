use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::organization::{ORGANIZATION_REFERENCE_PREFIX, ORGANIZATION_RESOURCE_TYPE};
use crate::models::{Brand, BrandBundle, BrandDirectory, Location, Portal};
use crate::services::extensions::{read_branding, SchemaGeneration};
use crate::services::inheritance::inherit_flags;

const SECURE_SCHEME: &str = "https://";

// Everything before the last two non-empty path segments
// (`.../Organization/<id>`). Unanchored at the end, so a trailing `/` is
// tolerated.
static BASE_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https://.+)/[^/]+/[^/]+").expect("valid base URL pattern"));

/// Base URL shared by a bundle's entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUrl {
    /// Every secure entry locator agrees on this base
    Detected(String),
    /// No entry locator yielded a base
    Unknown,
    /// Entry locators disagree; the distinct candidates in first-seen order
    Ambiguous(Vec<String>),
}

impl BaseUrl {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BaseUrl::Detected(url) => Some(url),
            BaseUrl::Unknown | BaseUrl::Ambiguous(_) => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            BaseUrl::Detected(_) => "detected",
            BaseUrl::Unknown => "unknown",
            BaseUrl::Ambiguous(_) => "ambiguous",
        }
    }

    pub fn candidates(&self) -> Vec<String> {
        match self {
            BaseUrl::Detected(url) => vec![url.clone()],
            BaseUrl::Unknown => Vec::new(),
            BaseUrl::Ambiguous(candidates) => candidates.clone(),
        }
    }
}

/// Result of reading a bundle
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBundle {
    pub directory: BrandDirectory,
    pub base_url: BaseUrl,
}

/// Convert a bundle into a brand directory.
///
/// Entries that are not Organizations are ignored. With `root_brand_id`, only
/// the root itself and brands whose parent is exactly the root are kept.
/// Duplicate ids are accepted; the last one wins.
pub fn parse(bundle: &BrandBundle, root_brand_id: Option<&str>) -> ParsedBundle {
    let base_url = detect_base_url(bundle.entry.iter().filter_map(|e| e.full_url.as_deref()));

    let mut directory = BrandDirectory::new();
    let mut organizations = 0usize;

    for entry in &bundle.entry {
        if entry.resource_type() != Some(ORGANIZATION_RESOURCE_TYPE) {
            continue;
        }
        organizations += 1;

        let brand = organization_to_brand(&entry.resource);
        if let Some(root) = root_brand_id {
            if !in_scope(&brand, root) {
                continue;
            }
        }

        if directory.contains_key(&brand.id) {
            tracing::warn!(brand_id = %brand.id, "Duplicate brand id in bundle, keeping last entry");
        }
        directory.insert(brand.id.clone(), brand);
    }

    if let BaseUrl::Ambiguous(candidates) = &base_url {
        tracing::warn!(?candidates, "Cannot determine bundle base URL");
    }

    tracing::debug!(
        entries = bundle.entry.len(),
        organizations,
        brands = directory.len(),
        base_url = ?base_url.as_str(),
        "Parsed brand bundle"
    );

    ParsedBundle {
        directory,
        base_url,
    }
}

/// Infer the base URL from entry locators such as
/// `https://host/fhir/Organization/1`.
///
/// Locators that are not `https://` or do not have two trailing path
/// segments contribute nothing.
pub fn detect_base_url<'a>(full_urls: impl IntoIterator<Item = &'a str>) -> BaseUrl {
    let mut candidates: Vec<String> = Vec::new();

    for full_url in full_urls {
        if !full_url.starts_with(SECURE_SCHEME) {
            continue;
        }
        let Some(base) = BASE_URL_PATTERN.captures(full_url).and_then(|c| c.get(1)) else {
            continue;
        };
        if !candidates.iter().any(|c| c == base.as_str()) {
            candidates.push(base.as_str().to_string());
        }
    }

    match candidates.len() {
        0 => BaseUrl::Unknown,
        1 => BaseUrl::Detected(candidates.remove(0)),
        _ => BaseUrl::Ambiguous(candidates),
    }
}

/// Brand id referenced by a `partOf.reference` value.
///
/// `Organization/42` and `https://host/fhir/Organization/42` both yield `42`;
/// a reference without the `Organization/` marker is taken as a bare id.
pub fn parent_id_from_reference(reference: &str) -> Option<String> {
    let id = match reference.rfind(ORGANIZATION_REFERENCE_PREFIX) {
        Some(idx) => &reference[idx + ORGANIZATION_REFERENCE_PREFIX.len()..],
        None => reference,
    };
    let id = id.split('/').next().unwrap_or_default().trim();

    (!id.is_empty()).then(|| id.to_string())
}

fn in_scope(brand: &Brand, root: &str) -> bool {
    brand.id == root || brand.parent_id.as_deref() == Some(root)
}

/// Map one Organization resource onto a Brand.
///
/// Absent or malformed optional fields leave the corresponding brand field
/// empty.
pub fn organization_to_brand(resource: &Value) -> Brand {
    let id = str_field(resource, "id").unwrap_or_default();

    let parent_id = resource
        .get("partOf")
        .and_then(|p| p.get("reference"))
        .and_then(|r| r.as_str())
        .and_then(parent_id_from_reference);

    let extensions = array_field(resource, "extension");
    let generations = SchemaGeneration::detect(extensions);
    if generations.iter().any(|g| *g != SchemaGeneration::Nested) {
        tracing::debug!(brand_id = %id, ?generations, "Reading legacy branding extensions");
    }
    let branding = read_branding(extensions);

    let portal = Portal {
        name: branding.portal_name,
        description: branding.portal_description,
        website: branding.portal_url,
    };
    let portal_inherit = inherit_flags(parent_id.is_some(), &portal);

    Brand {
        categories: categories(&id, resource),
        locations: array_field(resource, "address").iter().map(location).collect(),
        website: website(resource),
        name: str_field(resource, "name").unwrap_or_default(),
        alias: strings(array_field(resource, "alias")),
        logo: branding.logo,
        id,
        parent_id,
        portal,
        portal_inherit,
    }
}

// First coding code of each `type` grouping. Groupings without a usable
// first coding are skipped.
fn categories(brand_id: &str, resource: &Value) -> Vec<String> {
    let mut codes = Vec::new();

    for (i, grouping) in array_field(resource, "type").iter().enumerate() {
        let code = array_field(grouping, "coding")
            .first()
            .and_then(|coding| str_field(coding, "code"));

        match code {
            Some(code) => codes.push(code),
            None => tracing::warn!(brand_id, grouping = i, "Skipping type grouping without a coded first coding"),
        }
    }

    codes
}

fn location(address: &Value) -> Location {
    Location::new(
        strings(array_field(address, "line")),
        str_field(address, "city"),
        str_field(address, "state"),
        str_field(address, "postalCode"),
    )
}

fn website(resource: &Value) -> Option<String> {
    array_field(resource, "telecom")
        .iter()
        .find(|t| t.get("system").and_then(|s| s.as_str()) == Some("url"))
        .and_then(|t| str_field(t, "value"))
}

// Empty strings read as absent.
fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn strings(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BundleEntry;
    use serde_json::json;

    fn bundle(entries: Vec<(&str, Value)>) -> BrandBundle {
        BrandBundle::collection(
            None,
            entries
                .into_iter()
                .map(|(full_url, resource)| BundleEntry {
                    full_url: Some(full_url.to_string()),
                    resource,
                })
                .collect(),
        )
    }

    fn organization(id: &str) -> Value {
        json!({"resourceType": "Organization", "id": id, "name": format!("Org {}", id)})
    }

    #[test]
    fn test_base_url_detected() {
        let base = detect_base_url([
            "https://host/fhir/Organization/1",
            "https://host/fhir/Organization/2",
        ]);
        assert_eq!(base, BaseUrl::Detected("https://host/fhir".to_string()));
        assert_eq!(base.as_str(), Some("https://host/fhir"));
    }

    #[test]
    fn test_base_url_ambiguous() {
        let base = detect_base_url([
            "https://a.example.org/fhir/Organization/1",
            "https://b.example.org/fhir/Organization/2",
            "https://a.example.org/fhir/Organization/3",
        ]);
        assert_eq!(
            base,
            BaseUrl::Ambiguous(vec![
                "https://a.example.org/fhir".to_string(),
                "https://b.example.org/fhir".to_string(),
            ])
        );
        assert_eq!(base.as_str(), None);
        assert_eq!(base.status(), "ambiguous");
    }

    #[test]
    fn test_base_url_tolerates_trailing_slash() {
        let base = detect_base_url([
            "https://host/fhir/Organization/1/",
            "https://host/fhir/Organization/2",
        ]);
        assert_eq!(base, BaseUrl::Detected("https://host/fhir".to_string()));
    }

    #[test]
    fn test_base_url_unknown() {
        assert_eq!(detect_base_url(["http://host/fhir/Organization/1"]), BaseUrl::Unknown);
        assert_eq!(detect_base_url(["urn:uuid:1234"]), BaseUrl::Unknown);
        assert_eq!(detect_base_url(["https://host"]), BaseUrl::Unknown);
        assert_eq!(detect_base_url(Vec::<&str>::new()), BaseUrl::Unknown);
    }

    #[test]
    fn test_parent_id_from_reference() {
        assert_eq!(parent_id_from_reference("Organization/42").as_deref(), Some("42"));
        assert_eq!(
            parent_id_from_reference("https://host/fhir/Organization/42").as_deref(),
            Some("42")
        );
        assert_eq!(
            parent_id_from_reference("Organization/42/_history/3").as_deref(),
            Some("42")
        );
        assert_eq!(parent_id_from_reference("42").as_deref(), Some("42"));
        assert_eq!(parent_id_from_reference("Organization/"), None);
        assert_eq!(parent_id_from_reference(""), None);
    }

    #[test]
    fn test_non_organizations_ignored() {
        let parsed = parse(
            &bundle(vec![
                ("https://host/fhir/Organization/1", organization("1")),
                (
                    "https://host/fhir/Endpoint/e1",
                    json!({"resourceType": "Endpoint", "id": "e1"}),
                ),
            ]),
            None,
        );

        assert_eq!(parsed.directory.len(), 1);
        assert!(parsed.directory.contains_key("1"));
        assert_eq!(parsed.base_url.as_str(), Some("https://host/fhir"));
    }

    #[test]
    fn test_full_organization_mapping() {
        let resource = json!({
            "resourceType": "Organization",
            "id": "7",
            "name": "Example Health",
            "alias": ["EH", 12],
            "partOf": {"reference": "Organization/1"},
            "telecom": [
                {"system": "phone", "value": "555-0100"},
                {"system": "url", "value": "https://www.examplehealth.org"},
                {"system": "url", "value": "https://second.example.org"}
            ],
            "address": [{
                "line": ["100 Main St"],
                "city": "Springfield",
                "state": "IL",
                "postalCode": "62701",
                "text": "ignored"
            }],
            "type": [
                {"coding": [{"system": "https://argonaut.fhir.us", "code": "prov"}, {"code": "other"}]},
                {"coding": [{"code": "ins"}]}
            ],
            "extension": [{
                "url": "http://hl7.org/fhir/StructureDefinition/organization-portal",
                "extension": [{"url": "portalName", "valueString": "EH Portal"}]
            }]
        });

        let brand = organization_to_brand(&resource);
        assert_eq!(brand.id, "7");
        assert_eq!(brand.parent_id.as_deref(), Some("1"));
        assert_eq!(brand.name, "Example Health");
        assert_eq!(brand.alias, vec!["EH"]);
        assert_eq!(brand.categories, vec!["prov", "ins"]);
        assert_eq!(brand.website.as_deref(), Some("https://www.examplehealth.org"));
        assert_eq!(brand.locations.len(), 1);
        assert_eq!(brand.locations[0].text(), "100 Main St Springfield, IL 62701");
        assert_eq!(brand.portal.name.as_deref(), Some("EH Portal"));
        assert!(!brand.portal_inherit.name);
        assert!(brand.portal_inherit.description);
        assert!(brand.portal_inherit.website);
    }

    #[test]
    fn test_sparse_organization_degrades() {
        let brand = organization_to_brand(&json!({
            "resourceType": "Organization",
            "id": "9",
            "alias": "not a list",
            "telecom": {"system": "url"},
            "address": null
        }));

        assert_eq!(brand.name, "");
        assert!(brand.alias.is_empty());
        assert!(brand.locations.is_empty());
        assert_eq!(brand.website, None);
        assert_eq!(brand.logo, None);
        assert!(brand.portal.is_empty());
        assert_eq!(brand.portal_inherit, Default::default());
    }

    #[test]
    fn test_empty_type_groupings() {
        let brand = organization_to_brand(&json!({
            "resourceType": "Organization",
            "id": "3",
            "type": []
        }));
        assert!(brand.categories.is_empty());

        let brand = organization_to_brand(&json!({
            "resourceType": "Organization",
            "id": "3",
            "type": [{"coding": []}, {"text": "no coding"}, {"coding": [{"code": "prov"}]}]
        }));
        assert_eq!(brand.categories, vec!["prov"]);
    }

    #[test]
    fn test_root_scope_is_exact() {
        let mut child = organization("7");
        child["partOf"] = json!({"reference": "Organization/42"});
        let mut unrelated = organization("8");
        unrelated["partOf"] = json!({"reference": "Organization/142"});

        let parsed = parse(
            &bundle(vec![
                ("https://host/fhir/Organization/42", organization("42")),
                ("https://host/fhir/Organization/142", organization("142")),
                ("https://host/fhir/Organization/7", child),
                ("https://host/fhir/Organization/8", unrelated),
            ]),
            Some("42"),
        );

        let ids: Vec<_> = parsed.directory.keys().cloned().collect();
        assert_eq!(ids, vec!["42", "7"]);
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let mut second = organization("1");
        second["name"] = json!("Replacement");

        let parsed = parse(
            &bundle(vec![
                ("https://host/fhir/Organization/1", organization("1")),
                ("https://host/fhir/Organization/2", organization("2")),
                ("https://host/fhir/Organization/1", second),
            ]),
            None,
        );

        assert_eq!(parsed.directory.len(), 2);
        assert_eq!(parsed.directory["1"].name, "Replacement");
        assert_eq!(parsed.directory.get_index(0).map(|(k, _)| k.as_str()), Some("1"));
    }
}
