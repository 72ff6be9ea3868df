//! coursecat-gen library interface
//!
//! Builds per-semester course catalogs from a folder tree of documents.
//! Exposed as a library so the binary and the integration tests share it.

pub mod cli;
pub mod generator;
pub mod services;

pub use generator::{generate, RunReport, SemesterReport};
