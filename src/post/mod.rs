//! Posts: metadata, front-matter parsing and loading from disk.
//!
//! ```text
//! posts/
//! ├── hello-world.md          # default language
//! └── zh_CN/
//!     └── hello-world.md      # zh_CN translation of hello-world
//! ```

mod error;
mod frontmatter;
mod loader;
mod meta;

use regex::Regex;
use std::sync::LazyLock;

pub use error::PostError;
pub use loader::{PostLoader, sort_newest_first};
pub use meta::{Post, PostMeta};

/// URL-safe slug: must start with a letter or digit, no path separators.
pub fn is_valid_slug(slug: &str) -> bool {
    static RE_SLUG: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap());
    RE_SLUG.is_match(slug)
}

/// Language tag such as `en`, `zh_CN` or `zh-Hans`.
pub fn is_valid_lang(lang: &str) -> bool {
    static RE_LANG: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}(?:[_-][A-Za-z0-9]+)*$").unwrap());
    RE_LANG.is_match(lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("2023_recap.v2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("../etc/passwd"));
        assert!(!is_valid_slug(".hidden"));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("a/b"));
    }

    #[test]
    fn test_valid_langs() {
        assert!(is_valid_lang("en"));
        assert!(is_valid_lang("zh_CN"));
        assert!(is_valid_lang("zh-Hans"));
        assert!(!is_valid_lang("e"));
        assert!(!is_valid_lang("zh_"));
        assert!(!is_valid_lang(".."));
    }
}
