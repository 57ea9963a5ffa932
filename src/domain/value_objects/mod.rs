mod image_format;
mod size_bounds;
mod stored_name;

pub use image_format::ImageFormat;
pub use size_bounds::{SizeBounds, MAX_FILE_SIZE, MIN_FILE_SIZE};
pub use stored_name::{extension_of, StoredName, RANDOM_SUFFIX_MAX};
