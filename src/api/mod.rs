pub mod content_negotiation;
pub mod handlers;
pub mod routes;
pub mod xml_serializer;

pub use routes::{app, brand_routes, health_routes, metadata_routes};
