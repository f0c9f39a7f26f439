//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;

/// Builder for creating test dump directory structures
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    /// Create a new builder with an empty dump directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the dump directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a UTF-8 text file with the given name and content
    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.with_bytes(name, content.as_bytes())
    }

    /// Add a file with raw bytes (for non-UTF-8 encoding fixtures)
    pub fn with_bytes(self, name: &str, bytes: &[u8]) -> Self {
        let path = self.temp_dir.path().join(name);
        let mut file = fs::File::create(path).expect("Failed to create test file");
        file.write_all(bytes).expect("Failed to write test file");
        self
    }

    /// Add a file of concatenated invoice objects with sequential ids
    pub fn with_invoices(self, name: &str, count: usize) -> Self {
        let mut content = String::new();
        for i in 0..count {
            content.push_str(&format!(
                r#"{{"_id": "FAC-{:03}", "Client": {{"name": "Client {}"}}, "TOTAL": {}.0, "charge date": "07/05/2022"}}"#,
                i, i, i
            ));
        }
        self.with_file(name, &content)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}
