//! SEO outputs: page metadata and the RSS feed.
//!
//! - **Metadata**: `<title>`, Open Graph and Twitter card tags per page
//! - **Feed**: RSS 2.0 document of every post (`rss.xml`)

pub mod feed;
pub mod meta;

use std::borrow::Cow;

const CDATA_OPEN: &[u8] = b"<![CDATA[";
const CDATA_CLOSE: &[u8] = b"]]>";

/// Minify XML content if enabled.
///
/// Drops whitespace-only runs between tags. Text nodes and CDATA sections
/// are copied verbatim, so item HTML is never rewritten.
pub fn minify_xml(content: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if !enabled {
        return Cow::Borrowed(content);
    }

    let mut out = Vec::with_capacity(content.len());
    let mut rest = content;

    while !rest.is_empty() {
        let end = if rest.starts_with(CDATA_OPEN) {
            find(rest, CDATA_CLOSE).map_or(rest.len(), |i| i + CDATA_CLOSE.len())
        } else if rest[0] == b'<' {
            rest.iter().position(|&b| b == b'>').map_or(rest.len(), |i| i + 1)
        } else {
            let end = rest.iter().position(|&b| b == b'<').unwrap_or(rest.len());
            if rest[..end].iter().all(u8::is_ascii_whitespace) {
                rest = &rest[end..];
                continue;
            }
            end
        };
        out.extend_from_slice(&rest[..end]);
        rest = &rest[end..];
    }

    Cow::Owned(out)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
