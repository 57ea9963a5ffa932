//! Admission checks on client-supplied metadata

use tracing::debug;

use crate::domain::errors::Rejection;
use crate::domain::value_objects::ImageFormat;

/// Require exactly one attached file.
///
/// `files_seen` may undercount past two: a streamed request stops reading at
/// the second file part.
pub fn check_file_count(files_seen: usize) -> Result<(), Rejection> {
    match files_seen {
        0 => Err(Rejection::NoFileProvided),
        1 => Ok(()),
        count => Err(Rejection::TooManyFiles { count }),
    }
}

/// Check the client-declared MIME type against the allow-list.
///
/// Trusts client metadata only; content sniffing runs later on the stored
/// bytes.
pub fn check_declared_type(declared: Option<&str>) -> Result<ImageFormat, Rejection> {
    let format = declared
        .and_then(ImageFormat::from_mime)
        .ok_or_else(|| Rejection::InvalidDeclaredType {
            declared: declared.map(str::to_string),
        })?;

    debug!("Declared type accepted: {}", format);
    Ok(format)
}
