use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use crate::application::ports::{ImageInspector, InspectionError, ProbeOutcome, SniffedType};
use crate::domain::value_objects::ImageFormat;
use crate::infrastructure::inspection::{ContentSniffer, ImageProbe};

/// Inspects stored uploads on the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalImageInspector;

impl LocalImageInspector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageInspector for LocalImageInspector {
    async fn sniff(&self, path: &Path) -> Result<SniffedType, InspectionError> {
        let head = ContentSniffer::read_head(path).await?;
        let sniffed = ContentSniffer::sniff_bytes(&head);
        debug!("Sniffed {:?} as {:?}", path, sniffed);
        Ok(sniffed)
    }

    async fn probe(
        &self,
        path: &Path,
        format: ImageFormat,
    ) -> Result<ProbeOutcome, InspectionError> {
        let path = path.to_path_buf();
        // Decoding is CPU-bound
        tokio::task::spawn_blocking(move || ImageProbe::probe_file(&path, format))
            .await
            .map_err(|e| InspectionError::Internal(format!("Decode task failed: {}", e)))?
    }
}
