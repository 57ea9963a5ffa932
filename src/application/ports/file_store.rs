use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::entities::StoredFile;
use crate::domain::value_objects::StoredName;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload exceeds {limit} bytes")]
    LimitExceeded { limit: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Type alias for the incoming upload stream.
///
/// The lifetime lets a reader borrow the request it streams from.
pub type UploadReader<'a> = Pin<Box<dyn AsyncRead + Send + 'a>>;

/// Port for persisting uploads
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Stream `reader` to a new file called `name`.
    ///
    /// Reading stops with [`StorageError::LimitExceeded`] once more than
    /// `max_bytes` bytes have arrived; the partial file is removed first.
    async fn write(
        &self,
        name: &StoredName,
        original_name: &str,
        reader: UploadReader<'_>,
        max_bytes: u64,
    ) -> Result<StoredFile, StorageError>;

    /// Remove a stored file
    async fn delete(&self, file: &StoredFile) -> Result<(), StorageError>;
}
