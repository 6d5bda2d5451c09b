pub mod extensions;
pub mod inheritance;
pub mod parser;
pub mod serializer;
pub mod text;
pub mod validation;

pub use extensions::{read_branding, write_branding, BrandingFacts, SchemaGeneration};
pub use inheritance::{inherit_flags, resolve_portal};
pub use parser::{parse, BaseUrl, ParsedBundle};
pub use serializer::{serialize, serialize_with_clock};
pub use text::{identifier_from_url, location_to_text};
pub use validation::validate_bundle;
