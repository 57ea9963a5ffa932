use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the random name component
pub const RANDOM_SUFFIX_MAX: u32 = 1_000_000_000;

/// Longest extension carried over from the original file name
const MAX_EXTENSION_LEN: usize = 16;

/// Generated on-disk name of an upload: `<unix-ms>-<random><ext>`.
///
/// Uniqueness is probabilistic. Two uploads in the same millisecond differ
/// unless they draw the same random suffix; no existence check or retry is
/// made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoredName(String);

impl StoredName {
    /// Generate a fresh name for an upload with the given original file name
    pub fn generate(original_name: &str) -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix = rand::rng().random_range(0..=RANDOM_SUFFIX_MAX);
        Self::from_parts(millis, suffix, extension_of(original_name).as_deref())
    }

    /// Build a name from explicit components
    pub fn from_parts(millis: i64, suffix: u32, extension: Option<&str>) -> Self {
        match extension {
            Some(ext) => Self(format!("{}-{}.{}", millis, suffix, ext)),
            None => Self(format!("{}-{}", millis, suffix)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension without the leading dot
    pub fn extension(&self) -> Option<&str> {
        self.0.split_once('.').map(|(_, ext)| ext)
    }
}

impl std::fmt::Display for StoredName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for StoredName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stem, ext) = match s.split_once('.') {
            Some((stem, ext)) => (stem, Some(ext)),
            None => (s, None),
        };

        let (millis, suffix) = stem
            .split_once('-')
            .ok_or_else(|| format!("missing '-' separator in stored name: {}", s))?;

        let millis: i64 = millis
            .parse()
            .map_err(|_| format!("invalid timestamp in stored name: {}", s))?;
        let suffix: u32 = suffix
            .parse()
            .map_err(|_| format!("invalid random suffix in stored name: {}", s))?;
        if suffix > RANDOM_SUFFIX_MAX {
            return Err(format!("random suffix out of range: {}", suffix));
        }

        if let Some(ext) = ext {
            if !is_valid_extension(ext) {
                return Err(format!("invalid extension in stored name: {}", s));
            }
        }

        Ok(Self::from_parts(millis, suffix, ext))
    }
}

/// Extension of a client-supplied file name, normalized for the on-disk name.
///
/// The client's extension is not carried over verbatim: it is lower-cased
/// (`Photo.PNG` is stored as `.png`), and one that is not short ASCII
/// alphanumerics is dropped entirely so a hostile name cannot steer the
/// on-disk path. Only the base name is considered, and a leading dot does
/// not start an extension.
pub fn extension_of(original_name: &str) -> Option<String> {
    let base = original_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(original_name);

    let dot = base.rfind('.')?;
    if dot == 0 {
        return None;
    }

    let ext = base[dot + 1..].to_ascii_lowercase();
    is_valid_extension(&ext).then_some(ext)
}

fn is_valid_extension(ext: &str) -> bool {
    !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
}
