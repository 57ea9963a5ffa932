use tracing::{debug, warn};

use crate::application::ports::SniffedType;
use crate::domain::errors::Rejection;
use crate::domain::value_objects::ImageFormat;

/// Turn a sniffing result into a verdict.
///
/// The sniffed type is authoritative: a declared `image/png` carrying an
/// executable is rejected here.
pub fn check_sniffed_type(sniffed: SniffedType) -> Result<ImageFormat, Rejection> {
    match sniffed {
        SniffedType::Allowed(format) => {
            debug!("Content sniffed as {}", format);
            Ok(format)
        }
        SniffedType::Other(mime) => {
            warn!(detected = %mime, "Stored bytes are not an accepted image format");
            Err(Rejection::UnsupportedFileFormat {
                detected: Some(mime),
            })
        }
        SniffedType::Unknown => {
            warn!("Stored bytes match no known signature");
            Err(Rejection::UnsupportedFileFormat { detected: None })
        }
    }
}
