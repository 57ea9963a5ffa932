use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{
    DynamicImage, ImageDecoder, ImageError, ImageFormat as RasterFormat, ImageReader, Limits,
};

use crate::application::ports::{ImageDimensions, InspectionError, ProbeOutcome};
use crate::domain::value_objects::ImageFormat;

/// Largest accepted raster area, in pixels (0x3FFF squared). Width and
/// height are not capped on their own, so long banners decode fine.
pub const MAX_PIXELS: u64 = 0x3FFF * 0x3FFF;

/// Decoder allocation ceiling
pub const MAX_DECODE_ALLOC: u64 = 512 * 1024 * 1024;

/// Blocking structural validation of a stored image.
///
/// Raster images are fully decoded, not just header-parsed, so truncated or
/// tampered pixel data is caught. SVG documents are parsed into a render tree.
pub struct ImageProbe;

impl ImageProbe {
    /// Decode `path` as `format`.
    ///
    /// Failing to open or read the file is an inspection fault; anything the
    /// decoder rejects is reported as [`ProbeOutcome::Corrupt`].
    pub fn probe_file(path: &Path, format: ImageFormat) -> Result<ProbeOutcome, InspectionError> {
        match format {
            ImageFormat::Svg => Self::probe_svg(path),
            ImageFormat::Png => Self::probe_raster(path, RasterFormat::Png),
            ImageFormat::Jpeg => Self::probe_raster(path, RasterFormat::Jpeg),
            ImageFormat::Gif => Self::probe_raster(path, RasterFormat::Gif),
        }
    }

    fn probe_raster(path: &Path, format: RasterFormat) -> Result<ProbeOutcome, InspectionError> {
        let file = File::open(path)?;
        let mut reader = ImageReader::new(BufReader::new(file));
        reader.set_format(format);
        reader.limits(decoder_limits());

        // Read errors past this point are truncation, i.e. bad content
        let decoder = match reader.into_decoder() {
            Ok(decoder) => decoder,
            Err(e) => return Ok(decode_failure(e)),
        };

        let (width, height) = decoder.dimensions();
        let pixels = u64::from(width) * u64::from(height);
        if pixels > MAX_PIXELS {
            return Ok(ProbeOutcome::ExceedsLimits(format!(
                "{}x{} exceeds the {} pixel limit",
                width, height, MAX_PIXELS
            )));
        }

        match DynamicImage::from_decoder(decoder) {
            Ok(image) => Ok(ProbeOutcome::Decoded(ImageDimensions {
                width: image.width(),
                height: image.height(),
            })),
            Err(e) => Ok(decode_failure(e)),
        }
    }

    fn probe_svg(path: &Path) -> Result<ProbeOutcome, InspectionError> {
        let data = std::fs::read(path)?;

        let mut options = usvg::Options::default();
        // Never follow external references
        options.image_href_resolver.resolve_string = Box::new(|_, _| None);

        match usvg::Tree::from_data(&data, &options) {
            Ok(tree) => {
                let size = tree.size();
                Ok(ProbeOutcome::Decoded(ImageDimensions {
                    width: size.width().ceil() as u32,
                    height: size.height().ceil() as u32,
                }))
            }
            Err(e) => Ok(ProbeOutcome::Corrupt(e.to_string())),
        }
    }
}

fn decoder_limits() -> Limits {
    let mut limits = Limits::no_limits();
    limits.max_alloc = Some(MAX_DECODE_ALLOC);
    limits
}

fn decode_failure(err: ImageError) -> ProbeOutcome {
    match err {
        ImageError::Limits(e) => ProbeOutcome::ExceedsLimits(e.to_string()),
        e => ProbeOutcome::Corrupt(e.to_string()),
    }
}
