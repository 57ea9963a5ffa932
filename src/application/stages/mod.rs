//! Validation stages of the upload pipeline, in execution order:
//! admission (file count, declared type), stored size, sniffed content type,
//! image structure, and finally the public path.

mod content_type;
mod declared_type;
mod image_structure;
mod public_path;
mod size;

pub use content_type::check_sniffed_type;
pub use declared_type::{check_declared_type, check_file_count};
pub use image_structure::check_probe;
pub use public_path::resolve_public_path;
pub use size::check_stored_size;
