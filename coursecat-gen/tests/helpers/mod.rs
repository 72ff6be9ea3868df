//! Shared fixtures for generator integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use coursecat_common::{CatalogMode, GeneratorConfig};
use tempfile::TempDir;

/// Temporary site layout: `<tmp>/pdfs` as input, `<tmp>/data` as output
pub struct TestSite {
    dir: TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pdfs")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("pdfs")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn config(&self, mode: CatalogMode) -> GeneratorConfig {
        GeneratorConfig::new(self.root(), self.output()).with_mode(mode)
    }

    /// Create a document under the root (path relative to the root)
    pub fn add_document(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"%PDF-1.4\n").unwrap();
        path
    }

    /// Write `<document>.json` next to a document
    pub fn add_sidecar(&self, relative: &str, json: &str) {
        let path = self.root().join(format!("{relative}.json"));
        std::fs::write(path, json).unwrap();
    }

    pub fn remove_document(&self, relative: &str) {
        std::fs::remove_file(self.root().join(relative)).unwrap();
    }

    pub fn output_file(&self, name: &str) -> PathBuf {
        self.output().join(name)
    }

    pub fn read_output(&self, name: &str) -> String {
        std::fs::read_to_string(self.output_file(name)).unwrap()
    }

    pub fn read_json(&self, name: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_output(name)).unwrap()
    }

    pub fn write_output(&self, name: &str, content: &str) {
        std::fs::create_dir_all(self.output()).unwrap();
        std::fs::write(self.output_file(name), content).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
