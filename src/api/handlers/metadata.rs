use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

use crate::services::extensions::{BRAND_GROUP_URL, PORTAL_GROUP_URL};

/// Capability statement for the brand conversion operations
pub async fn capability_statement() -> (StatusCode, Json<Value>) {
    tracing::debug!("Serving capability statement");

    let capability = json!({
        "resourceType": "CapabilityStatement",
        "status": "active",
        "date": "2024-01-01",
        "kind": "instance",
        "software": {
            "name": "Brandbook",
            "version": env!("CARGO_PKG_VERSION")
        },
        "implementation": {
            "description": "Converter between Organization bundles and a brand directory"
        },
        "fhirVersion": "4.0.1",
        "format": ["json", "xml"],
        "rest": [{
            "mode": "server",
            "resource": [{
                "type": "Organization",
                "documentation": format!(
                    "Branding is written with the {} and {} extensions; two older flat encodings are read as well.",
                    BRAND_GROUP_URL, PORTAL_GROUP_URL
                )
            }],
            "operation": [
                {
                    "name": "import",
                    "definition": "/brands/$import",
                    "documentation": "POST a collection Bundle; returns the brand directory. Optional `root` keeps one brand and its direct children."
                },
                {
                    "name": "export",
                    "definition": "/brands/$export",
                    "documentation": "POST a brand directory; returns a collection Bundle. Optional `baseUrl` sets entry locators."
                }
            ]
        }]
    });

    (StatusCode::OK, Json(capability))
}
