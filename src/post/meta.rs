//! Post metadata and loaded posts.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::utils::date::DateTimeUtc;

/// Metadata parsed from a post's front-matter.
///
/// Immutable once loaded; rebuilt on every build or request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMeta {
    /// Derived from the file name, never from front-matter.
    pub slug: String,
    pub title: String,
    pub tag: String,
    pub date: DateTimeUtc,
    pub description: String,
    /// Language codes with a translated variant of this post.
    pub translations: BTreeSet<String>,
}

impl PostMeta {
    pub fn has_translation(&self, lang: &str) -> bool {
        self.translations.contains(lang)
    }
}

/// A loaded post: metadata plus the raw markdown file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub meta: PostMeta,
    /// Language variant, `None` for the default language.
    pub lang: Option<String>,
    raw: String,
    body_start: usize,
}

impl Post {
    /// `body` must be a suffix of `raw`.
    pub(super) fn new(meta: PostMeta, lang: Option<String>, raw: String, body_len: usize) -> Self {
        let body_start = raw.len() - body_len;
        Self {
            meta,
            lang,
            raw,
            body_start,
        }
    }

    #[inline]
    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    /// Raw file contents, front-matter included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Markdown after the front-matter block.
    pub fn body(&self) -> &str {
        &self.raw[self.body_start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> PostMeta {
        PostMeta {
            slug: "hello".into(),
            title: "Hello".into(),
            tag: "rust".into(),
            date: DateTimeUtc::from_ymd(2023, 1, 1),
            description: "d".into(),
            translations: BTreeSet::from(["zh_CN".to_string()]),
        }
    }

    #[test]
    fn test_post_body_slice() {
        let raw = "---\ntitle: Hello\n---\n# Body".to_string();
        let post = Post::new(meta(), None, raw, "# Body".len());
        assert_eq!(post.body(), "# Body");
        assert!(post.raw().starts_with("---"));
        assert_eq!(post.slug(), "hello");
    }

    #[test]
    fn test_has_translation() {
        let meta = meta();
        assert!(meta.has_translation("zh_CN"));
        assert!(!meta.has_translation("ja"));
    }

    #[test]
    fn test_meta_serializes_date_as_string() {
        let json = serde_json::to_value(meta()).unwrap();
        assert_eq!(json["date"], "2023-01-01");
        assert_eq!(json["translations"], serde_json::json!(["zh_CN"]));
    }
}
