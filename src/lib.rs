#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use models::{Brand, BrandBundle, BrandDirectory};
pub use services::{parse, serialize, BaseUrl, ParsedBundle};
