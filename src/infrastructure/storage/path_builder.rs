use std::path::{Path, PathBuf};

use crate::domain::value_objects::StoredName;

/// Utility for generating storage paths
pub struct PathBuilder {
    upload_dir: PathBuf,
}

impl PathBuilder {
    pub fn new(storage_root: PathBuf, temp_subdir: Option<&str>) -> Self {
        let upload_dir = match temp_subdir.map(str::trim).filter(|s| !s.is_empty()) {
            Some(subdir) => storage_root.join(subdir),
            None => storage_root,
        };
        Self { upload_dir }
    }

    /// Directory uploads land in: /root[/temp_subdir]
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Generate upload path: /root[/temp_subdir]/{stored_name}
    pub fn file_path(&self, name: &StoredName) -> PathBuf {
        self.upload_dir.join(name.as_str())
    }
}
