use std::path::{Path, PathBuf};

use crate::domain::value_objects::StoredName;

/// An upload that has been written to storage.
///
/// Created once by the store, then only read by the validation stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    name: StoredName,
    path: PathBuf,
    size_bytes: u64,
    original_name: String,
}

impl StoredFile {
    pub fn new(name: StoredName, path: PathBuf, size_bytes: u64, original_name: String) -> Self {
        Self {
            name,
            path,
            size_bytes,
            original_name,
        }
    }

    pub fn name(&self) -> &StoredName {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte length measured on disk
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }
}
