//! Configuration module for the sprite sheet builder
//!
//! Provides types and parsing for `ssb.toml` configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
