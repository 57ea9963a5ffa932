mod file_store;
mod image_inspector;

pub use file_store::{FileStore, StorageError, UploadReader};
pub use image_inspector::{
    ImageDimensions, ImageInspector, InspectionError, ProbeOutcome, SniffedType,
};

#[cfg(test)]
pub use image_inspector::MockImageInspector;
