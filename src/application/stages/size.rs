use tracing::debug;

use crate::domain::entities::StoredFile;
use crate::domain::errors::Rejection;
use crate::domain::value_objects::SizeBounds;

/// Check the measured size of a stored file; the client-declared length is
/// never consulted here.
pub fn check_stored_size(file: &StoredFile, bounds: &SizeBounds) -> Result<(), Rejection> {
    bounds.check(file.size_bytes())?;
    debug!(
        "Size check passed for {}: {} bytes",
        file.name(),
        file.size_bytes()
    );
    Ok(())
}
