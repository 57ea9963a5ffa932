use thiserror::Error;

/// Client-input rejection raised by a pipeline stage.
///
/// Every variant is an expected outcome of validating untrusted input,
/// never a system fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("File not provided")]
    NoFileProvided,

    #[error("Only one file may be uploaded per request (received {count})")]
    TooManyFiles { count: usize },

    #[error("Invalid file type. Only JPEG, JPG, PNG, GIF, and SVG+XML are allowed.")]
    InvalidDeclaredType { declared: Option<String> },

    #[error("File size must be at least {min} bytes (received {size})")]
    FileTooSmall { size: u64, min: u64 },

    #[error("File size must not exceed {max} bytes")]
    FileTooLarge { size: Option<u64>, max: u64 },

    #[error("Unsupported file format")]
    UnsupportedFileFormat { detected: Option<String> },

    #[error("Invalid image metadata")]
    InvalidImageMetadata,

    #[error("Invalid image file")]
    InvalidImageFile,
}

impl Rejection {
    /// Stable machine-readable code for API consumers
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::NoFileProvided => "NO_FILE_PROVIDED",
            Rejection::TooManyFiles { .. } => "TOO_MANY_FILES",
            Rejection::InvalidDeclaredType { .. } => "INVALID_DECLARED_TYPE",
            Rejection::FileTooSmall { .. } => "FILE_TOO_SMALL",
            Rejection::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Rejection::UnsupportedFileFormat { .. } => "UNSUPPORTED_FILE_FORMAT",
            Rejection::InvalidImageMetadata => "INVALID_IMAGE_METADATA",
            Rejection::InvalidImageFile => "INVALID_IMAGE_FILE",
        }
    }
}
