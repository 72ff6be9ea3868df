//! # Coursecat Common Library
//!
//! Shared code for the course catalog generator:
//! - Error type and result alias
//! - Configuration loading (CLI / environment / TOML / defaults)
//! - Catalog record types written to and read from the output directory
//! - Best-effort lookup outcome for optional JSON inputs

pub mod config;
pub mod error;
pub mod lookup;
pub mod models;

pub use config::{CatalogMode, GeneratorConfig};
pub use error::{Error, Result};
pub use lookup::Lookup;
