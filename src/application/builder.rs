use std::sync::Arc;

use tracing::info;

use crate::api::router::AppState;
use crate::application::{
    ports::{FileStore, ImageInspector},
    use_cases::UploadImageUseCase,
};
use crate::config::Config;
use crate::infrastructure::{inspection::LocalImageInspector, storage::LocalFilesystemStore};

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    file_store: Option<Arc<dyn FileStore>>,
    inspector: Option<Arc<dyn ImageInspector>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            file_store: None,
            inspector: None,
        }
    }

    /// Initialize infrastructure layer (storage and inspection)
    pub async fn with_infrastructure(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let store = Arc::new(LocalFilesystemStore::with_durability(
            self.config.storage_root.clone(),
            self.config.temp_subdir.as_deref(),
            self.config.durable_writes,
        ));
        store.init().await?;
        info!("Upload directory ready: {:?}", store.upload_dir());

        self.file_store = Some(store);
        self.inspector = Some(Arc::new(LocalImageInspector::new()));

        info!("Infrastructure layer initialized");
        Ok(self)
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let file_store = self.file_store.ok_or("File store not initialized")?;
        let inspector = self.inspector.ok_or("Image inspector not initialized")?;

        let upload_use_case = Arc::new(UploadImageUseCase::new(
            file_store,
            inspector,
            self.config.upload_policy(),
        ));

        info!("Application layer initialized");

        Ok(AppState {
            upload_use_case,
            body_limit: self.config.request_body_limit(),
        })
    }
}
