pub mod brands;
pub mod health;
pub mod metadata;
