#![allow(dead_code)]

use brandbook::models::{Brand, BrandDirectory, FixedClock, Location, Portal, PortalInherit};
use chrono::TimeZone;
use serde_json::{json, Value};

pub const BASE_URL: &str = "https://brands.example.org/fhir";

/// Clock used wherever an export timestamp is asserted
pub fn test_clock() -> FixedClock {
    FixedClock(chrono::Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
}

/// Create a test bundle JSON: a health system with two clinics, a
/// practitioner entry that must be ignored, and one organization per legacy
/// extension encoding
pub fn test_bundle_json() -> Value {
    json!({
        "resourceType": "Bundle",
        "type": "collection",
        "timestamp": "2023-06-01T00:00:00Z",
        "entry": [
            {
                "fullUrl": format!("{}/Organization/health", BASE_URL),
                "resource": {
                    "resourceType": "Organization",
                    "id": "health",
                    "name": "Example Health",
                    "alias": ["EH"],
                    "telecom": [{"system": "url", "value": "https://www.examplehealth.org"}],
                    "identifier": [{"system": "urn:ietf:rfc:3986", "value": "https://examplehealth.org"}],
                    "type": [{"coding": [{"system": "https://argonaut.fhir.us", "code": "prov"}]}],
                    "extension": [
                        {
                            "url": "http://hl7.org/fhir/StructureDefinition/organization-brand",
                            "extension": [{"url": "brandLogo", "valueUrl": "https://examplehealth.org/logo.svg"}]
                        },
                        {
                            "url": "http://hl7.org/fhir/StructureDefinition/organization-portal",
                            "extension": [
                                {"url": "portalUrl", "valueUrl": "https://mychart.examplehealth.org"},
                                {"url": "portalDescription", "valueMarkdown": "View results and book visits"},
                                {"url": "portalName", "valueString": "MyChart"}
                            ]
                        }
                    ]
                }
            },
            {
                "fullUrl": format!("{}/Organization/north", BASE_URL),
                "resource": {
                    "resourceType": "Organization",
                    "id": "north",
                    "name": "Example Health North Clinic",
                    "partOf": {"reference": "Organization/health"},
                    "address": [{
                        "line": ["100 Main St"],
                        "city": "Springfield",
                        "state": "IL",
                        "postalCode": "62701"
                    }],
                    "extension": [
                        {
                            "url": "https://argonaut.fhir.us/patient-access-name",
                            "valueString": "North Portal"
                        }
                    ]
                }
            },
            {
                "fullUrl": format!("{}/Organization/south", BASE_URL),
                "resource": {
                    "resourceType": "Organization",
                    "id": "south",
                    "name": "Example Health South Clinic",
                    "partOf": {"reference": "Organization/health"},
                    "extension": [
                        {
                            "url": "http://hl7.org/fhir/StructureDefinition/patient-access-url",
                            "valueUrl": "https://south.examplehealth.org/portal"
                        }
                    ]
                }
            },
            {
                "fullUrl": format!("{}/Practitioner/p1", BASE_URL),
                "resource": {
                    "resourceType": "Practitioner",
                    "id": "p1"
                }
            }
        ]
    })
}

/// Create a test brand directory: a root with a full portal and a child
/// inheriting every portal field
pub fn test_directory() -> BrandDirectory {
    let root = Brand {
        id: "health".to_string(),
        name: "Example Health".to_string(),
        alias: vec!["EH".to_string()],
        categories: vec!["prov".to_string()],
        logo: Some("https://examplehealth.org/logo.svg".to_string()),
        website: Some("https://www.examplehealth.org".to_string()),
        portal: Portal {
            name: Some("MyChart".to_string()),
            description: Some("View results and book visits".to_string()),
            website: Some("https://mychart.examplehealth.org".to_string()),
        },
        ..Default::default()
    };

    let clinic = Brand {
        id: "north".to_string(),
        parent_id: Some("health".to_string()),
        name: "Example Health North Clinic".to_string(),
        locations: vec![Location::new(
            vec!["100 Main St".to_string()],
            Some("Springfield".to_string()),
            Some("IL".to_string()),
            Some("62701".to_string()),
        )],
        portal_inherit: PortalInherit {
            name: true,
            description: true,
            website: true,
        },
        ..Default::default()
    };

    vec![root, clinic]
        .into_iter()
        .map(|brand| (brand.id.clone(), brand))
        .collect()
}
