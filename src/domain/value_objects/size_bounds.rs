use serde::{Deserialize, Serialize};

use crate::domain::errors::Rejection;

/// Smallest accepted upload (2 KB)
pub const MIN_FILE_SIZE: u64 = 2 * 1024;

/// Largest accepted upload (10 MB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Inclusive byte-length window an upload must fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBounds {
    min: u64,
    max: u64,
}

impl SizeBounds {
    pub fn new(min: u64, max: u64) -> Result<Self, String> {
        if min > max {
            return Err(format!(
                "minimum size {} exceeds maximum size {}",
                min, max
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Check a measured size against the window
    pub fn check(&self, size: u64) -> Result<(), Rejection> {
        if size < self.min {
            return Err(Rejection::FileTooSmall {
                size,
                min: self.min,
            });
        }

        if size > self.max {
            return Err(Rejection::FileTooLarge {
                size: Some(size),
                max: self.max,
            });
        }

        Ok(())
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min: MIN_FILE_SIZE,
            max: MAX_FILE_SIZE,
        }
    }
}
