use axum::http::{header, HeaderMap};

use crate::error::{BrandError, Result};

pub const FHIR_JSON: &str = "application/fhir+json";
pub const FHIR_XML: &str = "application/fhir+xml";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseFormat {
    Json,
    Xml,
}

impl ResponseFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ResponseFormat::Json => FHIR_JSON,
            ResponseFormat::Xml => FHIR_XML,
        }
    }
}

/// Determine the preferred response format based on Accept header
pub fn preferred_format(headers: &HeaderMap) -> ResponseFormat {
    if let Some(accept) = headers.get(header::ACCEPT) {
        if let Ok(accept_str) = accept.to_str() {
            // Explicit JSON wins when both are listed
            if accept_str.contains("application/json") || accept_str.contains(FHIR_JSON) {
                return ResponseFormat::Json;
            }
            if accept_str.contains(FHIR_XML) || accept_str.contains("application/xml") {
                return ResponseFormat::Xml;
            }
        }
    }

    // Default to JSON for API clients
    ResponseFormat::Json
}

/// Parse a `_format`-style name
pub fn format_from_name(name: &str) -> Option<ResponseFormat> {
    match name {
        "json" | FHIR_JSON | "application/json" => Some(ResponseFormat::Json),
        "xml" | FHIR_XML | "application/xml" => Some(ResponseFormat::Xml),
        _ => None,
    }
}

/// Resolve an explicitly requested format, rejecting names we cannot render
pub fn requested_format(name: &str) -> Result<ResponseFormat> {
    format_from_name(name).ok_or_else(|| {
        BrandError::UnsupportedFormat(format!("'{}', expected json or xml", name))
    })
}
