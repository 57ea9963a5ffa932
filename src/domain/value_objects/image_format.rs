use serde::{Deserialize, Serialize};

/// Image formats the service accepts.
///
/// This is the single allow-list shared by the declared-type filter and the
/// content sniffer. MIME aliases (`image/jpg` vs `image/jpeg`) collapse onto
/// one variant so both stages agree on what a JPEG is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Svg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 4] = [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Gif,
        ImageFormat::Svg,
    ];

    /// Canonicalize a MIME string onto an allowed format.
    ///
    /// Case, surrounding whitespace and parameters (`; charset=...`) are
    /// ignored. Returns `None` for anything outside the allow-list.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();

        match essence.to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/gif" => Some(ImageFormat::Gif),
            "image/svg+xml" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    /// Canonical MIME type
    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mime())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_allowed() {
        assert_eq!(ImageFormat::from_mime("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime("image/gif"), Some(ImageFormat::Gif));
        assert_eq!(
            ImageFormat::from_mime("image/svg+xml"),
            Some(ImageFormat::Svg)
        );
    }

    #[test]
    fn test_jpg_and_jpeg_are_the_same_format() {
        assert_eq!(ImageFormat::from_mime("image/jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(
            ImageFormat::from_mime("image/jpeg"),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::Jpeg.mime(), "image/jpeg");
    }

    #[test]
    fn test_from_mime_normalizes() {
        assert_eq!(ImageFormat::from_mime("IMAGE/PNG"), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::from_mime(" image/svg+xml; charset=utf-8 "),
            Some(ImageFormat::Svg)
        );
    }

    #[test]
    fn test_from_mime_rejects_others() {
        assert_eq!(ImageFormat::from_mime("image/webp"), None);
        assert_eq!(ImageFormat::from_mime("application/octet-stream"), None);
        assert_eq!(ImageFormat::from_mime(""), None);
        assert_eq!(ImageFormat::from_mime("image/png2"), None);
    }

    #[test]
    fn test_mime_round_trips() {
        for format in ImageFormat::ALL {
            assert_eq!(ImageFormat::from_mime(format.mime()), Some(format));
        }
    }
}
