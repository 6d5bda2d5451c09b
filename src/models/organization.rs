use serde::Serialize;

pub const ORGANIZATION_RESOURCE_TYPE: &str = "Organization";
pub const ORGANIZATION_REFERENCE_PREFIX: &str = "Organization/";

/// Identifier system for URL-derived identifiers
pub const RFC3986_SYSTEM: &str = "urn:ietf:rfc:3986";

/// Code system stamped on exported categories
pub const CATEGORY_SYSTEM: &str = "https://argonaut.fhir.us";

/// Organization resource as written on export.
///
/// List fields are always serialized here; empty ones are pruned from the
/// resulting JSON by the serializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub resource_type: &'static str,
    pub id: String,
    pub extension: Vec<Extension>,
    pub identifier: Vec<Identifier>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Reference>,
    pub alias: Vec<String>,
    pub address: Vec<Address>,
    pub telecom: Vec<ContactPoint>,
    #[serde(rename = "type")]
    pub organization_type: Vec<CodeableConcept>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_markdown: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

impl Extension {
    pub fn group(url: &str, children: Vec<Extension>) -> Self {
        Self {
            url: url.to_string(),
            extension: children,
            ..Default::default()
        }
    }

    pub fn url(url: &str, value: Option<String>) -> Self {
        Self {
            url: url.to_string(),
            value_url: value,
            ..Default::default()
        }
    }

    pub fn string(url: &str, value: Option<String>) -> Self {
        Self {
            url: url.to_string(),
            value_string: value,
            ..Default::default()
        }
    }

    pub fn markdown(url: &str, value: Option<String>) -> Self {
        Self {
            url: url.to_string(),
            value_markdown: value,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub system: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactPoint {
    pub system: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub reference: String,
}

impl Reference {
    pub fn organization(id: &str) -> Self {
        Self {
            reference: format!("{}{}", ORGANIZATION_REFERENCE_PREFIX, id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}
