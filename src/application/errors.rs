//! Error type for the upload use case
//!
//! Keeps "your file is invalid" ([`UploadError::Rejected`]) apart from
//! "the system failed" (storage and inspection faults).

use thiserror::Error;

use crate::application::ports::{InspectionError, StorageError};
use crate::domain::errors::Rejection;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Upload rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Inspection error: {0}")]
    Inspection(#[from] InspectionError),
}

impl UploadError {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            UploadError::Rejected(r) => Some(r),
            _ => None,
        }
    }
}
