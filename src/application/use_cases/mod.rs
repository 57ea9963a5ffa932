mod upload_image;

pub use upload_image::{StagedUpload, UploadImageUseCase};
