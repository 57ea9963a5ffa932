use tracing::{debug, warn};

use crate::application::ports::{ImageDimensions, ProbeOutcome};
use crate::domain::errors::Rejection;

/// Require a successful decode with non-zero width and height.
///
/// An image the decoder refuses to process counts as an invalid file, the
/// same as one it fails to parse.
pub fn check_probe(outcome: ProbeOutcome) -> Result<ImageDimensions, Rejection> {
    match outcome {
        ProbeOutcome::Decoded(dims) if dims.width > 0 && dims.height > 0 => {
            debug!("Image decoded: {}x{}", dims.width, dims.height);
            Ok(dims)
        }
        ProbeOutcome::Decoded(dims) => {
            warn!(
                width = dims.width,
                height = dims.height,
                "Decoded image has no usable dimensions"
            );
            Err(Rejection::InvalidImageMetadata)
        }
        ProbeOutcome::ExceedsLimits(reason) => {
            warn!(%reason, "Image refused by decoder limits");
            Err(Rejection::InvalidImageFile)
        }
        ProbeOutcome::Corrupt(reason) => {
            warn!(%reason, "Image failed to decode");
            Err(Rejection::InvalidImageFile)
        }
    }
}
