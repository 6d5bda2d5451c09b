use serde_json::Value;

use crate::models::organization::Extension;

/// Nested brand group, current generation
pub const BRAND_GROUP_URL: &str = "http://hl7.org/fhir/StructureDefinition/organization-brand";
/// Nested portal group, current generation
pub const PORTAL_GROUP_URL: &str = "http://hl7.org/fhir/StructureDefinition/organization-portal";

pub const BRAND_LOGO: &str = "brandLogo";
pub const PORTAL_URL: &str = "portalUrl";
pub const PORTAL_DESCRIPTION: &str = "portalDescription";
pub const PORTAL_NAME: &str = "portalName";

/// Flat keys of one legacy generation
struct FlatKeys {
    logo: &'static str,
    portal_name: &'static str,
    portal_description: &'static str,
    portal_url: &'static str,
}

const ARGONAUT_KEYS: FlatKeys = FlatKeys {
    logo: "https://argonaut.fhir.us/brand-logo",
    portal_name: "https://argonaut.fhir.us/patient-access-name",
    portal_description: "https://argonaut.fhir.us/patient-access-description",
    portal_url: "https://argonaut.fhir.us/patient-access-url",
};

const HL7_FLAT_KEYS: FlatKeys = FlatKeys {
    logo: "http://hl7.org/fhir/StructureDefinition/brand-logo",
    portal_name: "http://hl7.org/fhir/StructureDefinition/patient-access-name",
    portal_description: "http://hl7.org/fhir/StructureDefinition/patient-access-description",
    portal_url: "http://hl7.org/fhir/StructureDefinition/patient-access-url",
};

// Any string-typed value[x] is accepted on read.
const STRING_VALUE_KEYS: [&str; 4] = ["valueUrl", "valueUri", "valueString", "valueMarkdown"];

/// Encodings of branding metadata seen in the wild, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaGeneration {
    /// `organization-brand` / `organization-portal` groups with nested children
    Nested,
    /// Flat `https://argonaut.fhir.us/...` extensions
    ArgonautFlat,
    /// Flat `http://hl7.org/fhir/StructureDefinition/...` extensions
    Hl7Flat,
}

impl SchemaGeneration {
    /// Order in which generations are consulted on read
    pub const READ_ORDER: [SchemaGeneration; 3] = [
        SchemaGeneration::Nested,
        SchemaGeneration::ArgonautFlat,
        SchemaGeneration::Hl7Flat,
    ];

    /// Extract whatever branding facts this generation carries
    pub fn read(self, extensions: &[Value]) -> BrandingFacts {
        match self {
            SchemaGeneration::Nested => read_nested(extensions),
            SchemaGeneration::ArgonautFlat => read_flat(extensions, &ARGONAUT_KEYS),
            SchemaGeneration::Hl7Flat => read_flat(extensions, &HL7_FLAT_KEYS),
        }
    }

    /// True when any extension uses one of this generation's keys
    pub fn is_present(self, extensions: &[Value]) -> bool {
        let urls: Vec<&str> = match self {
            SchemaGeneration::Nested => vec![BRAND_GROUP_URL, PORTAL_GROUP_URL],
            SchemaGeneration::ArgonautFlat => ARGONAUT_KEYS.all().to_vec(),
            SchemaGeneration::Hl7Flat => HL7_FLAT_KEYS.all().to_vec(),
        };
        extensions
            .iter()
            .filter_map(extension_url)
            .any(|url| urls.contains(&url))
    }

    /// Generations present in an extension list, in read order
    pub fn detect(extensions: &[Value]) -> Vec<SchemaGeneration> {
        Self::READ_ORDER
            .into_iter()
            .filter(|generation| generation.is_present(extensions))
            .collect()
    }
}

impl FlatKeys {
    fn all(&self) -> [&'static str; 4] {
        [self.logo, self.portal_name, self.portal_description, self.portal_url]
    }
}

/// Branding metadata independent of wire encoding
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrandingFacts {
    pub logo: Option<String>,
    pub portal_name: Option<String>,
    pub portal_description: Option<String>,
    pub portal_url: Option<String>,
}

impl BrandingFacts {
    /// Fill facts missing here from `other`
    pub fn or(self, other: BrandingFacts) -> BrandingFacts {
        BrandingFacts {
            logo: self.logo.or(other.logo),
            portal_name: self.portal_name.or(other.portal_name),
            portal_description: self.portal_description.or(other.portal_description),
            portal_url: self.portal_url.or(other.portal_url),
        }
    }

    /// Same facts with empty strings treated as absent
    pub fn non_empty(self) -> BrandingFacts {
        BrandingFacts {
            logo: non_empty(self.logo),
            portal_name: non_empty(self.portal_name),
            portal_description: non_empty(self.portal_description),
            portal_url: non_empty(self.portal_url),
        }
    }

    fn has_portal(&self) -> bool {
        self.portal_name.is_some() || self.portal_description.is_some() || self.portal_url.is_some()
    }
}

/// Read branding facts from an Organization's `extension` list.
///
/// Each fact is resolved independently: the first generation in
/// [`SchemaGeneration::READ_ORDER`] that carries it wins.
pub fn read_branding(extensions: &[Value]) -> BrandingFacts {
    SchemaGeneration::READ_ORDER
        .into_iter()
        .fold(BrandingFacts::default(), |facts, generation| {
            facts.or(generation.read(extensions))
        })
}

/// Encode branding facts using the nested generation only.
///
/// A group is omitted when none of its children has a value. When the portal
/// group is written, all three children are written, valueless if unset.
/// Empty strings count as unset.
pub fn write_branding(facts: &BrandingFacts) -> Vec<Extension> {
    let facts = facts.clone().non_empty();
    let mut extensions = Vec::new();

    if facts.logo.is_some() {
        extensions.push(Extension::group(
            BRAND_GROUP_URL,
            vec![Extension::url(BRAND_LOGO, facts.logo.clone())],
        ));
    }

    if facts.has_portal() {
        extensions.push(Extension::group(
            PORTAL_GROUP_URL,
            vec![
                Extension::url(PORTAL_URL, facts.portal_url.clone()),
                Extension::markdown(PORTAL_DESCRIPTION, facts.portal_description.clone()),
                Extension::string(PORTAL_NAME, facts.portal_name.clone()),
            ],
        ));
    }

    extensions
}

fn read_nested(extensions: &[Value]) -> BrandingFacts {
    let brand = find_extension(extensions, BRAND_GROUP_URL).map(children).unwrap_or_default();
    let portal = find_extension(extensions, PORTAL_GROUP_URL).map(children).unwrap_or_default();

    BrandingFacts {
        logo: find_value(brand, BRAND_LOGO),
        portal_name: find_value(portal, PORTAL_NAME),
        portal_description: find_value(portal, PORTAL_DESCRIPTION),
        portal_url: find_value(portal, PORTAL_URL),
    }
}

fn read_flat(extensions: &[Value], keys: &FlatKeys) -> BrandingFacts {
    BrandingFacts {
        logo: find_value(extensions, keys.logo),
        portal_name: find_value(extensions, keys.portal_name),
        portal_description: find_value(extensions, keys.portal_description),
        portal_url: find_value(extensions, keys.portal_url),
    }
}

fn extension_url(extension: &Value) -> Option<&str> {
    extension.get("url").and_then(|u| u.as_str())
}

fn find_extension<'a>(extensions: &'a [Value], url: &str) -> Option<&'a Value> {
    extensions.iter().find(|e| extension_url(e) == Some(url))
}

fn children(extension: &Value) -> &[Value] {
    extension
        .get("extension")
        .and_then(|e| e.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

// First extension with this url that carries a non-empty string value.
fn find_value(extensions: &[Value], url: &str) -> Option<String> {
    extensions
        .iter()
        .filter(|e| extension_url(e) == Some(url))
        .find_map(|e| {
            STRING_VALUE_KEYS
                .iter()
                .find_map(|key| e.get(*key).and_then(|v| v.as_str()))
                .filter(|v| !v.is_empty())
        })
        .map(str::to_string)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_list(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap()
    }

    #[test]
    fn test_read_nested_generation() {
        let extensions = as_list(json!([
            {
                "url": PORTAL_GROUP_URL,
                "extension": [
                    {"url": "portalName", "valueString": "MyChart"},
                    {"url": "portalDescription", "valueMarkdown": "Book **visits**"},
                    {"url": "portalUrl", "valueUrl": "https://mychart.example.org"}
                ]
            },
            {
                "url": BRAND_GROUP_URL,
                "extension": [{"url": "brandLogo", "valueUrl": "https://example.org/logo.svg"}]
            }
        ]));

        let facts = read_branding(&extensions);
        assert_eq!(facts.logo.as_deref(), Some("https://example.org/logo.svg"));
        assert_eq!(facts.portal_name.as_deref(), Some("MyChart"));
        assert_eq!(facts.portal_description.as_deref(), Some("Book **visits**"));
        assert_eq!(facts.portal_url.as_deref(), Some("https://mychart.example.org"));
        assert_eq!(SchemaGeneration::detect(&extensions), vec![SchemaGeneration::Nested]);
    }

    #[test]
    fn test_read_argonaut_generation() {
        let extensions = as_list(json!([
            {"url": "https://argonaut.fhir.us/patient-access-url", "valueUrl": "https://portal.example.org"},
            {"url": "https://argonaut.fhir.us/brand-logo", "valueUrl": "https://example.org/logo.png"},
            {"url": "https://argonaut.fhir.us/patient-access-name", "valueString": "Portal"}
        ]));

        let facts = read_branding(&extensions);
        assert_eq!(facts.logo.as_deref(), Some("https://example.org/logo.png"));
        assert_eq!(facts.portal_name.as_deref(), Some("Portal"));
        assert_eq!(facts.portal_description, None);
        assert_eq!(facts.portal_url.as_deref(), Some("https://portal.example.org"));
        assert_eq!(SchemaGeneration::detect(&extensions), vec![SchemaGeneration::ArgonautFlat]);
    }

    #[test]
    fn test_read_hl7_flat_generation() {
        let extensions = as_list(json!([
            {"url": "http://hl7.org/fhir/StructureDefinition/patient-access-description", "valueString": "Labs and visits"}
        ]));

        let facts = read_branding(&extensions);
        assert_eq!(facts.portal_description.as_deref(), Some("Labs and visits"));
        assert_eq!(SchemaGeneration::detect(&extensions), vec![SchemaGeneration::Hl7Flat]);
    }

    #[test]
    fn test_nested_takes_priority_per_fact() {
        let extensions = as_list(json!([
            {"url": "https://argonaut.fhir.us/patient-access-name", "valueString": "Old name"},
            {"url": "https://argonaut.fhir.us/brand-logo", "valueUrl": "https://example.org/old.png"},
            {
                "url": PORTAL_GROUP_URL,
                "extension": [{"url": "portalName", "valueString": "New name"}]
            }
        ]));

        let facts = read_branding(&extensions);
        assert_eq!(facts.portal_name.as_deref(), Some("New name"));
        // Not carried by the nested groups, so the legacy value fills in
        assert_eq!(facts.logo.as_deref(), Some("https://example.org/old.png"));
    }

    #[test]
    fn test_valueless_children_read_as_absent() {
        let extensions = as_list(json!([
            {
                "url": PORTAL_GROUP_URL,
                "extension": [
                    {"url": "portalUrl"},
                    {"url": "portalDescription"},
                    {"url": "portalName", "valueString": "Only name"}
                ]
            }
        ]));

        let facts = read_branding(&extensions);
        assert_eq!(facts.portal_url, None);
        assert_eq!(facts.portal_description, None);
        assert_eq!(facts.portal_name.as_deref(), Some("Only name"));
    }

    #[test]
    fn test_malformed_extensions_are_ignored() {
        let extensions = as_list(json!([
            "not an object",
            {"valueString": "no url"},
            {"url": PORTAL_GROUP_URL, "extension": "not a list"},
            {"url": "https://argonaut.fhir.us/brand-logo", "valueUrl": 42}
        ]));

        assert_eq!(read_branding(&extensions), BrandingFacts::default());
    }

    #[test]
    fn test_empty_values_read_as_absent() {
        let extensions = as_list(json!([
            {"url": "https://argonaut.fhir.us/patient-access-name", "valueString": ""},
            {"url": "https://argonaut.fhir.us/brand-logo", "valueUrl": ""},
            {"url": "http://hl7.org/fhir/StructureDefinition/patient-access-name", "valueString": "Fallback"}
        ]));

        let facts = read_branding(&extensions);
        assert_eq!(facts.logo, None);
        // The empty legacy value does not shadow a later generation
        assert_eq!(facts.portal_name.as_deref(), Some("Fallback"));
    }

    #[test]
    fn test_write_empty_facts() {
        assert!(write_branding(&BrandingFacts::default()).is_empty());
    }

    #[test]
    fn test_write_skips_empty_strings() {
        let facts = BrandingFacts {
            logo: Some(String::new()),
            portal_name: Some(String::new()),
            portal_url: Some(String::new()),
            ..Default::default()
        };
        assert!(write_branding(&facts).is_empty());

        let facts = BrandingFacts {
            portal_name: Some("Portal".to_string()),
            portal_url: Some(String::new()),
            ..Default::default()
        };
        let value = serde_json::to_value(write_branding(&facts)).unwrap();
        assert_eq!(value[0]["extension"][0], json!({"url": "portalUrl"}));
        assert_eq!(value[0]["extension"][2], json!({"url": "portalName", "valueString": "Portal"}));
    }

    #[test]
    fn test_write_logo_only() {
        let facts = BrandingFacts {
            logo: Some("https://example.org/logo.svg".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(write_branding(&facts)).unwrap();
        assert_eq!(
            value,
            json!([{
                "url": BRAND_GROUP_URL,
                "extension": [{"url": "brandLogo", "valueUrl": "https://example.org/logo.svg"}]
            }])
        );
    }

    #[test]
    fn test_write_portal_group_carries_all_children() {
        let facts = BrandingFacts {
            portal_description: Some("Results online".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(write_branding(&facts)).unwrap();
        assert_eq!(
            value,
            json!([{
                "url": PORTAL_GROUP_URL,
                "extension": [
                    {"url": "portalUrl"},
                    {"url": "portalDescription", "valueMarkdown": "Results online"},
                    {"url": "portalName"}
                ]
            }])
        );
    }
}
