//! Generator pipeline stages

pub mod catalog_builder;
pub mod catalog_merger;
pub mod catalog_writer;
pub mod file_scanner;
pub mod path_classifier;
pub mod sidecar;

pub use catalog_builder::DocumentRecord;
pub use file_scanner::{FileScanner, ScanResult};
pub use path_classifier::{classify, Classification};
