use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::path::Path;
use thiserror::Error;

use crate::domain::value_objects::ImageFormat;

#[derive(Debug, Error)]
pub enum InspectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// What magic-byte detection found in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SniffedType {
    /// Recognised and on the allow-list
    Allowed(ImageFormat),
    /// Recognised but not an accepted image format
    Other(String),
    /// No signature matched
    Unknown,
}

/// Pixel size reported by a successful decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Outcome of decoding a file as an image container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Decoded(ImageDimensions),
    /// Well-formed as far as read, but larger than the decoder may handle
    ExceedsLimits(String),
    Corrupt(String),
}

/// Port for content inspection of stored files
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageInspector: Send + Sync {
    /// Detect the real content type from the file's leading bytes
    async fn sniff(&self, path: &Path) -> Result<SniffedType, InspectionError>;

    /// Decode the file as `format` and report its dimensions
    async fn probe(&self, path: &Path, format: ImageFormat)
        -> Result<ProbeOutcome, InspectionError>;
}
