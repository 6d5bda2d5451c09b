use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::api::content_negotiation::{preferred_format, requested_format, ResponseFormat};
use crate::api::xml_serializer::json_to_xml;
use crate::config::Config;
use crate::error::{BrandError, Result};
use crate::extractors::FhirJson;
use crate::models::{BrandBundle, BrandDirectory};
use crate::services::{parse, serialize, validate_bundle, ParsedBundle};
use crate::validation::{validate_base_url, validate_directory};

pub struct BrandState {
    pub config: Arc<Config>,
}

pub type SharedBrandState = Arc<BrandState>;

#[derive(Debug, Default, Deserialize)]
pub struct ImportParams {
    /// Keep only this brand and its direct children
    pub root: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    pub base_url: Option<String>,
    /// Overrides the Accept header when present
    #[serde(rename = "_format")]
    pub format: Option<String>,
}

/// Directory read from a bundle, with the outcome of base URL detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    pub brands: BrandDirectory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub base_url_status: String,
    #[serde(default)]
    pub base_url_candidates: Vec<String>,
}

impl From<ParsedBundle> for ImportDocument {
    fn from(parsed: ParsedBundle) -> Self {
        Self {
            base_url: parsed.base_url.as_str().map(str::to_string),
            base_url_status: parsed.base_url.status().to_string(),
            base_url_candidates: parsed.base_url.candidates(),
            brands: parsed.directory,
        }
    }
}

/// Decode and check an incoming bundle, then convert it
pub fn import_value(bundle: Value, root: Option<&str>) -> Result<ImportDocument> {
    validate_bundle(&bundle)?;
    let bundle: BrandBundle = serde_json::from_value(bundle)?;

    let parsed = parse(&bundle, root);
    validate_directory(&parsed.directory)?;

    Ok(parsed.into())
}

/// Check a directory and base URL, then convert to a bundle
pub fn export_directory_to_bundle(directory: &BrandDirectory, base_url: &str) -> Result<BrandBundle> {
    validate_base_url(base_url)?;
    validate_directory(directory)?;

    Ok(serialize(directory, base_url))
}

/// Render a bundle in the requested format
pub fn render_bundle(bundle: &BrandBundle, format: ResponseFormat) -> Result<String> {
    let value = serde_json::to_value(bundle)?;
    match format {
        ResponseFormat::Json => Ok(serde_json::to_string_pretty(&value)?),
        ResponseFormat::Xml => json_to_xml(&value).map_err(|e| BrandError::Internal(anyhow::anyhow!(e))),
    }
}

/// Read a brand directory out of a collection bundle
pub async fn import_bundle(
    Query(params): Query<ImportParams>,
    FhirJson(bundle): FhirJson<Value>,
) -> Result<Json<ImportDocument>> {
    let document = import_value(bundle, params.root.as_deref())?;

    tracing::info!(
        brands = document.brands.len(),
        root = ?params.root,
        base_url_status = %document.base_url_status,
        "Imported brand bundle"
    );

    Ok(Json(document))
}

/// Write a brand directory out as a collection bundle
pub async fn export_directory(
    State(state): State<SharedBrandState>,
    Query(params): Query<ExportParams>,
    headers: HeaderMap,
    FhirJson(directory): FhirJson<BrandDirectory>,
) -> Result<Response> {
    let base_url = params
        .base_url
        .unwrap_or_else(|| state.config.default_base_url.clone());

    let format = match params.format.as_deref() {
        Some(name) => requested_format(name)?,
        None => preferred_format(&headers),
    };
    let bundle = export_directory_to_bundle(&directory, &base_url)?;

    tracing::info!(
        brands = directory.len(),
        base_url = %base_url,
        format = ?format,
        "Exported brand directory"
    );

    let body = render_bundle(&bundle, format)?;
    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}
