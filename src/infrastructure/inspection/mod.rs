mod content_sniffer;
mod image_probe;
mod local_image_inspector;

pub use content_sniffer::{ContentSniffer, SNIFF_LEN};
pub use image_probe::{ImageProbe, MAX_DECODE_ALLOC, MAX_PIXELS};
pub use local_image_inspector::LocalImageInspector;
