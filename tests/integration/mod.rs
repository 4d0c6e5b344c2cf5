// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use humanizer::{Converter, HumanizerConfig};

/// Temporary directory holding input and output text files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Create a text file with given content, creating parent directories as needed
    pub fn create_text_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Create a file from raw bytes
    pub fn create_binary_file<P: AsRef<Path>>(&self, relative_path: P, content: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        fs::write(&file_path, content).expect("Failed to write binary file");
        file_path
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("Failed to read output file")
    }
}

/// Converter with a fixed seed
pub fn seeded_converter(seed: u64) -> Converter {
    Converter::new(HumanizerConfig {
        seed: Some(seed),
        ..Default::default()
    })
    .expect("Converter creation should succeed")
}

/// Seeded converter that never injects fillers
pub fn quiet_converter(seed: u64) -> Converter {
    Converter::new(HumanizerConfig {
        seed: Some(seed),
        filler_probability: 0.0,
        ..Default::default()
    })
    .expect("Converter creation should succeed")
}
