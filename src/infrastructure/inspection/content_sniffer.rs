use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::application::ports::SniffedType;
use crate::domain::value_objects::ImageFormat;

/// Number of leading bytes inspected. Enough for every signature `infer`
/// knows and for an XML prolog in front of an `<svg>` root.
pub const SNIFF_LEN: u64 = 8 * 1024;

/// Magic-byte content type detection
pub struct ContentSniffer;

impl ContentSniffer {
    /// Read the leading bytes of a file
    pub async fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
        let file = File::open(path).await?;
        let mut head = Vec::with_capacity(SNIFF_LEN as usize);
        file.take(SNIFF_LEN).read_to_end(&mut head).await?;
        Ok(head)
    }

    /// Classify leading bytes.
    ///
    /// SVG has no binary signature, so it is recognised as text whose root
    /// element is `<svg`. Everything else goes through `infer`.
    pub fn sniff_bytes(head: &[u8]) -> SniffedType {
        if looks_like_svg(head) {
            return SniffedType::Allowed(ImageFormat::Svg);
        }

        match infer::get(head) {
            Some(kind) => match ImageFormat::from_mime(kind.mime_type()) {
                Some(format) => SniffedType::Allowed(format),
                None => SniffedType::Other(kind.mime_type().to_string()),
            },
            None => SniffedType::Unknown,
        }
    }
}

/// Whether the first element of a text document is an `<svg>` root.
///
/// Skips a BOM, whitespace, the XML declaration, processing instructions,
/// comments and a DOCTYPE (including an internal subset).
fn looks_like_svg(head: &[u8]) -> bool {
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        // Truncated in the middle of a character: use the valid prefix
        Err(e) if e.error_len().is_none() => match std::str::from_utf8(&head[..e.valid_up_to()]) {
            Ok(text) => text,
            Err(_) => return false,
        },
        Err(_) => return false,
    };

    let mut rest = text.trim_start_matches('\u{feff}').trim_start();
    loop {
        let skipped = if let Some(after) = rest.strip_prefix("<?") {
            after.split_once("?>").map(|(_, tail)| tail)
        } else if let Some(after) = rest.strip_prefix("<!--") {
            after.split_once("-->").map(|(_, tail)| tail)
        } else if starts_with_ignore_case(rest, "<!doctype") {
            skip_doctype(rest)
        } else {
            break;
        };

        match skipped {
            Some(tail) => rest = tail.trim_start(),
            None => return false,
        }
    }

    match rest.strip_prefix("<svg") {
        Some(after) => after.starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/'),
        None => false,
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn skip_doctype(text: &str) -> Option<&str> {
    let close = text.find('>')?;
    match text.find('[') {
        Some(open) if open < close => text[open..].split_once("]>").map(|(_, tail)| tail),
        _ => Some(&text[close + 1..]),
    }
}
