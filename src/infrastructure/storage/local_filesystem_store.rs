use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::application::ports::{FileStore, StorageError, UploadReader};
use crate::domain::entities::StoredFile;
use crate::domain::value_objects::StoredName;
use crate::infrastructure::storage::{PathBuilder, StreamWriter};

/// Local filesystem upload store
pub struct LocalFilesystemStore {
    path_builder: PathBuilder,
    durable_writes: bool,
}

impl LocalFilesystemStore {
    pub fn new(storage_root: PathBuf, temp_subdir: Option<&str>) -> Self {
        Self::with_durability(storage_root, temp_subdir, true)
    }

    pub fn with_durability(
        storage_root: PathBuf,
        temp_subdir: Option<&str>,
        durable_writes: bool,
    ) -> Self {
        Self {
            path_builder: PathBuilder::new(storage_root, temp_subdir),
            durable_writes,
        }
    }

    /// Initialize storage directories
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.path_builder.upload_dir()).await?;
        Ok(())
    }

    pub fn upload_dir(&self) -> &Path {
        self.path_builder.upload_dir()
    }
}

#[async_trait]
impl FileStore for LocalFilesystemStore {
    async fn write(
        &self,
        name: &StoredName,
        original_name: &str,
        reader: UploadReader<'_>,
        max_bytes: u64,
    ) -> Result<StoredFile, StorageError> {
        let path = self.path_builder.file_path(name);

        debug!("Writing upload to {:?}", path);
        let written =
            match StreamWriter::write_capped(&path, reader, max_bytes, self.durable_writes).await {
                Ok(written) => written,
                Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    // Name collision: the existing file belongs to another upload
                    warn!("Stored name already taken: {:?}", path);
                    return Err(StorageError::Io(e));
                }
                Err(e) => {
                    // Clean up the partial file on write failure or cap breach
                    if !matches!(e, StorageError::LimitExceeded { .. }) {
                        warn!("Failed to write upload to {:?}: {}", path, e);
                    }
                    if let Err(remove_err) = fs::remove_file(&path).await {
                        if remove_err.kind() != std::io::ErrorKind::NotFound {
                            warn!("Failed to remove partial upload {:?}: {}", path, remove_err);
                        }
                    }
                    return Err(e);
                }
            };

        // The size on disk is what later stages trust
        let size_bytes = fs::metadata(&path).await?.len();
        if size_bytes != written {
            warn!(
                "Size mismatch for {:?}: wrote {} bytes, disk reports {}",
                path, written, size_bytes
            );
        }

        debug!("Upload written: {} ({} bytes)", name, size_bytes);
        Ok(StoredFile::new(
            name.clone(),
            path,
            size_bytes,
            original_name.to_string(),
        ))
    }

    async fn delete(&self, file: &StoredFile) -> Result<(), StorageError> {
        fs::remove_file(file.path()).await?;
        Ok(())
    }
}
