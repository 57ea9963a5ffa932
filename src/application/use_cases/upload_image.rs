use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::dto::{IncomingFile, UploadAccepted, UploadRequest};
use crate::application::errors::UploadError;
use crate::application::policy::UploadPolicy;
use crate::application::ports::{FileStore, ImageInspector, StorageError};
use crate::application::stages::{
    check_declared_type, check_file_count, check_probe, check_sniffed_type, check_stored_size,
    resolve_public_path,
};
use crate::domain::entities::StoredFile;
use crate::domain::errors::Rejection;
use crate::domain::value_objects::{ImageFormat, StoredName};

/// First file of a request, admitted and written but not yet validated
#[derive(Debug)]
pub struct StagedUpload {
    stored: StoredFile,
    declared: ImageFormat,
}

impl StagedUpload {
    pub fn stored(&self) -> &StoredFile {
        &self.stored
    }
}

/// Use case: validate an uploaded image and keep it in storage
pub struct UploadImageUseCase {
    store: Arc<dyn FileStore>,
    inspector: Arc<dyn ImageInspector>,
    policy: UploadPolicy,
}

impl UploadImageUseCase {
    pub fn new(
        store: Arc<dyn FileStore>,
        inspector: Arc<dyn ImageInspector>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            store,
            inspector,
            policy,
        }
    }

    /// Execute upload workflow for a request whose files are all known.
    ///
    /// Stages run strictly in order and the first rejection ends the
    /// request. Once the file is on disk, any failure removes it again; it is
    /// kept only when every stage passes.
    pub async fn execute(&self, request: UploadRequest) -> Result<UploadAccepted, UploadError> {
        let files_seen = request.files.len();
        let staged = match request.files.into_iter().next() {
            Some(first) => Some(self.stage(first).await?),
            None => None,
        };
        self.finish(staged, files_seen).await
    }

    /// Admit the first file of a request and stream it to storage.
    ///
    /// The declared type is checked before any byte is read. Reading stops
    /// as soon as the stream passes the maximum size.
    pub async fn stage(&self, incoming: IncomingFile<'_>) -> Result<StagedUpload, UploadError> {
        let IncomingFile {
            declared_type,
            original_name,
            declared_len,
            reader,
        } = incoming;

        let declared = check_declared_type(declared_type.as_deref()).inspect_err(log_rejection)?;
        if let Some(len) = declared_len {
            debug!("Client declared {} bytes for {}", len, original_name);
        }

        let name = StoredName::generate(&original_name);
        let max_bytes = self.policy.size_bounds.max();
        let stored = match self
            .store
            .write(&name, &original_name, reader, max_bytes)
            .await
        {
            Ok(stored) => stored,
            Err(StorageError::LimitExceeded { limit }) => {
                let rejection = Rejection::FileTooLarge {
                    size: None,
                    max: limit,
                };
                log_rejection(&rejection);
                return Err(rejection.into());
            }
            Err(e) => {
                tracing::error!("Failed to store upload {}: {}", name, e);
                return Err(e.into());
            }
        };

        Ok(StagedUpload { stored, declared })
    }

    /// Validate the staged file once the request has been read to the end.
    ///
    /// `files_seen` counts every file part of the request, the staged one
    /// included.
    pub async fn finish(
        &self,
        staged: Option<StagedUpload>,
        files_seen: usize,
    ) -> Result<UploadAccepted, UploadError> {
        let StagedUpload { stored, declared } = match staged {
            Some(staged) => staged,
            None => {
                let rejection = Rejection::NoFileProvided;
                log_rejection(&rejection);
                return Err(rejection.into());
            }
        };

        // Size, content and structure checks on the stored bytes
        let sniffed = match self.validate_stored(&stored, files_seen).await {
            Ok(format) => format,
            Err(err) => {
                match err.rejection() {
                    Some(rejection) => log_rejection(rejection),
                    None => tracing::error!("Validation of {} failed: {}", stored.name(), err),
                }
                self.discard(&stored).await;
                return Err(err);
            }
        };

        if sniffed != declared {
            debug!(
                "Declared type {} differs from sniffed type {} for {}",
                declared,
                sniffed,
                stored.name()
            );
        }

        let file_name =
            resolve_public_path(self.policy.public_path_prefix.as_deref(), stored.name());

        info!(
            stored_name = %stored.name(),
            size_bytes = stored.size_bytes(),
            format = %sniffed,
            "Upload accepted"
        );

        Ok(UploadAccepted {
            file_name,
            original_name: stored.original_name().to_string(),
        })
    }

    /// Drop a staged file after the request failed to arrive in full
    pub async fn abandon(&self, staged: StagedUpload) {
        self.discard(&staged.stored).await;
    }

    async fn validate_stored(
        &self,
        stored: &StoredFile,
        files_seen: usize,
    ) -> Result<ImageFormat, UploadError> {
        check_file_count(files_seen)?;
        check_stored_size(stored, &self.policy.size_bounds)?;

        let sniffed = self.inspector.sniff(stored.path()).await?;
        let format = check_sniffed_type(sniffed)?;

        let outcome = self.inspector.probe(stored.path(), format).await?;
        check_probe(outcome)?;

        Ok(format)
    }

    async fn discard(&self, stored: &StoredFile) {
        match self.store.delete(stored).await {
            Ok(()) => debug!("Removed rejected upload {}", stored.name()),
            Err(e) => warn!(
                "Failed to remove rejected upload {:?}: {}",
                stored.path(),
                e
            ),
        }
    }
}

fn log_rejection(rejection: &Rejection) {
    warn!(code = rejection.code(), "Upload rejected: {}", rejection);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        ImageDimensions, InspectionError, MockImageInspector, ProbeOutcome, SniffedType,
    };
    use crate::domain::value_objects::SizeBounds;
    use crate::infrastructure::storage::LocalFilesystemStore;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn incoming(declared: &str, name: &str, len: usize) -> IncomingFile<'static> {
        IncomingFile {
            declared_type: Some(declared.to_string()),
            original_name: name.to_string(),
            declared_len: Some(len as u64),
            reader: Box::pin(Cursor::new(vec![0xAB; len])),
        }
    }

    fn files_in(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    async fn use_case(
        dir: &TempDir,
        inspector: MockImageInspector,
        policy: UploadPolicy,
    ) -> UploadImageUseCase {
        let store = LocalFilesystemStore::with_durability(dir.path().to_path_buf(), None, false);
        store.init().await.unwrap();
        UploadImageUseCase::new(Arc::new(store), Arc::new(inspector), policy)
    }

    fn passing_inspector() -> MockImageInspector {
        let mut inspector = MockImageInspector::new();
        inspector
            .expect_sniff()
            .times(1)
            .returning(|_| Ok(SniffedType::Allowed(ImageFormat::Png)));
        inspector.expect_probe().times(1).returning(|_, _| {
            Ok(ProbeOutcome::Decoded(ImageDimensions {
                width: 32,
                height: 32,
            }))
        });
        inspector
    }

    #[tokio::test]
    async fn test_upload_happy_path() {
        let dir = TempDir::new().unwrap();
        let policy = UploadPolicy::new(SizeBounds::default(), Some("images".to_string()));
        let use_case = use_case(&dir, passing_inspector(), policy).await;

        let accepted = use_case
            .execute(UploadRequest::single(incoming("image/png", "cat.png", 4096)))
            .await
            .unwrap();

        assert!(accepted.file_name.starts_with("/images/"));
        assert!(accepted.file_name.ends_with(".png"));
        assert_eq!(accepted.original_name, "cat.png");

        let stored_name = accepted.file_name.trim_start_matches("/images/");
        let on_disk = dir.path().join(stored_name);
        assert_eq!(std::fs::metadata(on_disk).unwrap().len(), 4096);
    }

    #[tokio::test]
    async fn test_no_file_rejected_without_write() {
        let dir = TempDir::new().unwrap();
        let use_case = use_case(&dir, MockImageInspector::new(), UploadPolicy::default()).await;

        let err = use_case.execute(UploadRequest::default()).await.unwrap_err();

        assert_eq!(err.rejection(), Some(&Rejection::NoFileProvided));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_too_many_files_rejected() {
        let dir = TempDir::new().unwrap();
        let use_case = use_case(&dir, MockImageInspector::new(), UploadPolicy::default()).await;

        let request = UploadRequest {
            files: vec![
                incoming("image/png", "a.png", 4096),
                incoming("image/png", "b.png", 4096),
            ],
        };
        let err = use_case.execute(request).await.unwrap_err();

        assert_eq!(
            err.rejection(),
            Some(&Rejection::TooManyFiles { count: 2 })
        );
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_declared_type_rejected_before_write() {
        let dir = TempDir::new().unwrap();
        let use_case = use_case(&dir, MockImageInspector::new(), UploadPolicy::default()).await;

        let err = use_case
            .execute(UploadRequest::single(incoming(
                "application/pdf",
                "doc.pdf",
                4096,
            )))
            .await
            .unwrap_err();

        assert!(matches!(
            err.rejection(),
            Some(Rejection::InvalidDeclaredType { .. })
        ));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_too_small_skips_inspection_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        // No expectations: any inspector call panics
        let use_case = use_case(&dir, MockImageInspector::new(), UploadPolicy::default()).await;

        let err = use_case
            .execute(UploadRequest::single(incoming("image/png", "tiny.png", 100)))
            .await
            .unwrap_err();

        assert!(matches!(
            err.rejection(),
            Some(Rejection::FileTooSmall { size: 100, .. })
        ));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_streaming_cap_rejects_oversized_upload() {
        let dir = TempDir::new().unwrap();
        let policy = UploadPolicy::new(SizeBounds::new(16, 1024).unwrap(), None);
        let use_case = use_case(&dir, MockImageInspector::new(), policy).await;

        let err = use_case
            .execute(UploadRequest::single(incoming("image/png", "big.png", 4096)))
            .await
            .unwrap_err();

        assert!(matches!(
            err.rejection(),
            Some(Rejection::FileTooLarge { max: 1024, .. })
        ));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_sniffed_type_overrides_declared_type() {
        let dir = TempDir::new().unwrap();
        let mut inspector = MockImageInspector::new();
        inspector.expect_sniff().times(1).returning(|_| {
            Ok(SniffedType::Other(
                "application/vnd.microsoft.portable-executable".to_string(),
            ))
        });
        inspector.expect_probe().times(0);
        let use_case = use_case(&dir, inspector, UploadPolicy::default()).await;

        let err = use_case
            .execute(UploadRequest::single(incoming("image/png", "evil.png", 4096)))
            .await
            .unwrap_err();

        assert!(matches!(
            err.rejection(),
            Some(Rejection::UnsupportedFileFormat { .. })
        ));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_corrupt_image_rejected_and_removed() {
        let dir = TempDir::new().unwrap();
        let mut inspector = MockImageInspector::new();
        inspector
            .expect_sniff()
            .times(1)
            .returning(|_| Ok(SniffedType::Allowed(ImageFormat::Png)));
        inspector
            .expect_probe()
            .times(1)
            .returning(|_, _| Ok(ProbeOutcome::Corrupt("truncated".to_string())));
        let use_case = use_case(&dir, inspector, UploadPolicy::default()).await;

        let err = use_case
            .execute(UploadRequest::single(incoming("image/png", "cut.png", 4096)))
            .await
            .unwrap_err();

        assert_eq!(err.rejection(), Some(&Rejection::InvalidImageFile));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_probe_receives_sniffed_format() {
        let dir = TempDir::new().unwrap();
        let mut inspector = MockImageInspector::new();
        inspector
            .expect_sniff()
            .times(1)
            .returning(|_| Ok(SniffedType::Allowed(ImageFormat::Gif)));
        inspector
            .expect_probe()
            .withf(|_, format| *format == ImageFormat::Gif)
            .times(1)
            .returning(|_, _| {
                Ok(ProbeOutcome::Decoded(ImageDimensions {
                    width: 1,
                    height: 1,
                }))
            });
        let use_case = use_case(&dir, inspector, UploadPolicy::default()).await;

        let accepted = use_case
            .execute(UploadRequest::single(incoming("image/jpg", "anim.gif", 4096)))
            .await
            .unwrap();

        assert!(accepted.file_name.ends_with(".gif"));
        assert_eq!(files_in(dir.path()), 1);
    }

    #[tokio::test]
    async fn test_inspection_fault_is_not_a_rejection() {
        let dir = TempDir::new().unwrap();
        let mut inspector = MockImageInspector::new();
        inspector.expect_sniff().times(1).returning(|_| {
            Err(InspectionError::Internal("decoder thread panicked".to_string()))
        });
        let use_case = use_case(&dir, inspector, UploadPolicy::default()).await;

        let err = use_case
            .execute(UploadRequest::single(incoming("image/png", "a.png", 4096)))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Inspection(_)));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_endless_stream_is_cut_off_at_cap() {
        let dir = TempDir::new().unwrap();
        let policy = UploadPolicy::new(SizeBounds::new(16, 64 * 1024).unwrap(), None);
        let use_case = use_case(&dir, MockImageInspector::new(), policy).await;

        // A reader that never ends: only the cap can stop the write
        let endless = IncomingFile {
            declared_type: Some("image/png".to_string()),
            original_name: "endless.png".to_string(),
            declared_len: None,
            reader: Box::pin(tokio::io::repeat(0x42)),
        };
        let err = use_case.stage(endless).await.unwrap_err();

        assert!(matches!(
            err.rejection(),
            Some(Rejection::FileTooLarge { max: 65536, .. })
        ));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_second_file_part_after_staging() {
        let dir = TempDir::new().unwrap();
        let use_case = use_case(&dir, MockImageInspector::new(), UploadPolicy::default()).await;

        let staged = use_case
            .stage(incoming("image/png", "first.png", 4096))
            .await
            .unwrap();
        assert!(staged.stored().path().exists());

        let err = use_case.finish(Some(staged), 2).await.unwrap_err();

        assert_eq!(
            err.rejection(),
            Some(&Rejection::TooManyFiles { count: 2 })
        );
        assert_eq!(files_in(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_finish_without_staged_file() {
        let dir = TempDir::new().unwrap();
        let use_case = use_case(&dir, MockImageInspector::new(), UploadPolicy::default()).await;

        let err = use_case.finish(None, 0).await.unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::NoFileProvided));
    }

    #[tokio::test]
    async fn test_abandon_removes_staged_file() {
        let dir = TempDir::new().unwrap();
        let use_case = use_case(&dir, MockImageInspector::new(), UploadPolicy::default()).await;

        let staged = use_case
            .stage(incoming("image/gif", "a.gif", 4096))
            .await
            .unwrap();
        assert_eq!(files_in(dir.path()), 1);

        use_case.abandon(staged).await;
        assert_eq!(files_in(dir.path()), 0);
    }
}
