use crate::domain::value_objects::SizeBounds;

/// Per-deployment settings consumed by the upload pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPolicy {
    pub size_bounds: SizeBounds,
    /// Prefix of the public path, e.g. `images` for `/images/<name>`
    pub public_path_prefix: Option<String>,
}

impl UploadPolicy {
    pub fn new(size_bounds: SizeBounds, public_path_prefix: Option<String>) -> Self {
        Self {
            size_bounds,
            public_path_prefix,
        }
    }
}
