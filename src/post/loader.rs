//! Locate, read and parse posts from the posts directory.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::PostError;
use super::frontmatter;
use super::meta::{Post, PostMeta};
use super::{is_valid_lang, is_valid_slug};
use crate::config::SiteConfig;
use crate::debug;

/// Markdown file extension for posts.
const POST_EXT: &str = "md";

/// Loads posts from a directory of `<slug>.md` files.
///
/// Translations live in `<lang>/<slug>.md` sub-directories.
#[derive(Debug, Clone)]
pub struct PostLoader {
    dir: PathBuf,
}

impl PostLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.build.posts)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a slug and optional language variant.
    pub fn path_for(&self, slug: &str, lang: Option<&str>) -> PathBuf {
        let file = format!("{slug}.{POST_EXT}");
        match lang {
            Some(lang) => self.dir.join(lang).join(file),
            None => self.dir.join(file),
        }
    }

    /// Load a post by slug, optionally in a translated language.
    ///
    /// The returned metadata's `slug` always equals the requested slug, and
    /// `translations` includes every variant found on disk.
    pub fn load(&self, slug: Option<&str>, lang: Option<&str>) -> Result<Post, PostError> {
        let slug = slug
            .filter(|s| !s.is_empty())
            .ok_or(PostError::MissingSlug)?;
        if !is_valid_slug(slug) {
            return Err(PostError::InvalidSlug(slug.to_string()));
        }
        if let Some(lang) = lang
            && !is_valid_lang(lang)
        {
            return Err(PostError::InvalidLang(lang.to_string()));
        }

        let path = self.path_for(slug, lang);
        let raw = fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => PostError::NotFound {
                slug: slug.to_string(),
                path: path.clone(),
            },
            _ => PostError::Io(path.clone(), err),
        })?;

        let (mut meta, body_len) = Self::parse(&raw, slug, &path)?;
        meta.translations.extend(self.discover_translations(slug)?);

        debug!("post"; "loaded {}", path.display());
        Ok(Post::new(meta, lang.map(str::to_string), raw, body_len))
    }

    fn parse(raw: &str, slug: &str, path: &Path) -> Result<(PostMeta, usize), PostError> {
        let metadata_error = |source| PostError::Metadata {
            path: path.to_path_buf(),
            source,
        };
        let (front, body) = frontmatter::extract(raw).map_err(metadata_error)?;
        let meta = front.into_meta(slug).map_err(metadata_error)?;
        Ok((meta, body.len()))
    }

    /// Language sub-directories that contain a variant of `slug`.
    fn discover_translations(&self, slug: &str) -> Result<BTreeSet<String>, PostError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| PostError::Io(self.dir.clone(), e))?;
        let file = format!("{slug}.{POST_EXT}");

        let mut langs = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| PostError::Io(self.dir.clone(), e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(lang) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if is_valid_lang(lang) && path.join(&file).is_file() {
                langs.insert(lang.to_string());
            }
        }
        Ok(langs)
    }

    /// Slugs of all posts: `*.md` files in the posts directory, extension
    /// stripped, sorted.
    pub fn slugs(&self) -> Result<Vec<String>, PostError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| PostError::Io(self.dir.clone(), e))?;

        let mut slugs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PostError::Io(self.dir.clone(), e))?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(POST_EXT) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if is_valid_slug(stem) {
                slugs.push(stem.to_string());
            } else {
                crate::log!("warning"; "skipping `{}`: file name is not a valid slug", path.display());
            }
        }

        slugs.sort_unstable();
        Ok(slugs)
    }

    /// All default-language posts, newest first (ties by slug).
    ///
    /// Fails on the first post that cannot be loaded.
    pub fn ordered_posts(&self) -> Result<Vec<Post>, PostError> {
        let mut posts = self
            .slugs()?
            .iter()
            .map(|slug| self.load(Some(slug), None))
            .collect::<Result<Vec<_>, _>>()?;

        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// Every `(slug, lang)` route to pre-generate: each post plus each of its
    /// translations.
    ///
    /// A post whose metadata fails to load still yields its default route, so
    /// the failure surfaces when that route is built.
    pub fn static_paths(&self) -> Result<Vec<(String, Option<String>)>, PostError> {
        let mut paths = Vec::new();
        for slug in self.slugs()? {
            let translations = match self.load(Some(&slug), None) {
                Ok(post) => post.meta.translations,
                Err(_) => BTreeSet::new(),
            };
            paths.push((slug.clone(), None));
            paths.extend(translations.into_iter().map(|lang| (slug.clone(), Some(lang))));
        }
        Ok(paths)
    }
}

/// Sort by date descending, ties by slug ascending.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.meta
            .date
            .cmp(&a.meta.date)
            .then_with(|| a.slug().cmp(b.slug()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::DateTimeUtc;
    use tempfile::TempDir;

    fn write_post(dir: &Path, rel: &str, title: &str, date: &str, extra: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let content = format!(
            "---\ntitle: {title}\ntag: notes\ndate: {date}\ndescription: About {title}\n{extra}---\n\nHello from *{title}*.\n"
        );
        fs::write(path, content).unwrap();
    }

    fn fixture() -> (TempDir, PostLoader) {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "first.md", "First", "2023-01-01", "");
        write_post(
            dir.path(),
            "second.md",
            "Second",
            "2023-06-01",
            "translations: zh_CN\n",
        );
        write_post(dir.path(), "zh_CN/second.md", "第二篇", "2023-06-01", "");
        fs::write(dir.path().join("notes.txt"), "not a post").unwrap();
        let loader = PostLoader::new(dir.path());
        (dir, loader)
    }

    #[test]
    fn test_load_returns_requested_slug() {
        let (_dir, loader) = fixture();
        for slug in loader.slugs().unwrap() {
            let post = loader.load(Some(&slug), None).unwrap();
            assert_eq!(post.meta.slug, slug);
        }
    }

    #[test]
    fn test_load_metadata_matches_frontmatter() {
        let (_dir, loader) = fixture();
        let post = loader.load(Some("first"), None).unwrap();
        assert_eq!(post.meta.title, "First");
        assert_eq!(post.meta.tag, "notes");
        assert_eq!(post.meta.date, DateTimeUtc::from_ymd(2023, 1, 1));
        assert_eq!(post.meta.description, "About First");
        assert!(post.meta.translations.is_empty());
        assert_eq!(post.body(), "Hello from *First*.\n");
        assert!(post.raw().starts_with("---\ntitle: First"));
    }

    #[test]
    fn test_load_is_idempotent() {
        let (_dir, loader) = fixture();
        let a = loader.load(Some("second"), None).unwrap();
        let b = loader.load(Some("second"), None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_load_translation() {
        let (_dir, loader) = fixture();
        let post = loader.load(Some("second"), Some("zh_CN")).unwrap();
        assert_eq!(post.meta.slug, "second");
        assert_eq!(post.meta.title, "第二篇");
        assert_eq!(post.lang.as_deref(), Some("zh_CN"));
        assert!(post.meta.has_translation("zh_CN"));
    }

    #[test]
    fn test_translations_discovered_without_marker() {
        let (dir, loader) = fixture();
        write_post(dir.path(), "ja/first.md", "最初", "2023-01-01", "");
        let post = loader.load(Some("first"), None).unwrap();
        assert!(post.meta.has_translation("ja"));
    }

    #[test]
    fn test_missing_slug() {
        let (_dir, loader) = fixture();
        assert!(matches!(loader.load(None, None), Err(PostError::MissingSlug)));
        assert!(matches!(
            loader.load(Some(""), None),
            Err(PostError::MissingSlug)
        ));
    }

    #[test]
    fn test_not_found() {
        let (_dir, loader) = fixture();
        assert!(matches!(
            loader.load(Some("nope"), None),
            Err(PostError::NotFound { slug, .. }) if slug == "nope"
        ));
        assert!(matches!(
            loader.load(Some("first"), Some("zh_CN")),
            Err(PostError::NotFound { .. })
        ));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let (_dir, loader) = fixture();
        assert!(matches!(
            loader.load(Some("../secret"), None),
            Err(PostError::InvalidSlug(_))
        ));
        assert!(matches!(
            loader.load(Some("first"), Some("../..")),
            Err(PostError::InvalidLang(_))
        ));
    }

    #[test]
    fn test_metadata_parse_failure() {
        let (dir, loader) = fixture();
        fs::write(dir.path().join("broken.md"), "# no front-matter").unwrap();
        let err = loader.load(Some("broken"), None).unwrap_err();
        assert!(matches!(err, PostError::Metadata { .. }));
    }

    #[test]
    fn test_slugs_strip_extension_and_skip_others() {
        let (_dir, loader) = fixture();
        assert_eq!(loader.slugs().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_slugs_missing_dir() {
        let loader = PostLoader::new("/definitely/not/a/posts/dir");
        assert!(matches!(loader.slugs(), Err(PostError::Io(..))));
    }

    #[test]
    fn test_ordered_posts_newest_first() {
        let (_dir, loader) = fixture();
        let slugs: Vec<_> = loader
            .ordered_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.meta.slug)
            .collect();
        assert_eq!(slugs, vec!["second", "first"]);
    }

    #[test]
    fn test_same_date_sorted_by_slug() {
        let (dir, loader) = fixture();
        write_post(dir.path(), "aaa.md", "Aaa", "2023-06-01", "");
        let slugs: Vec<_> = loader
            .ordered_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.meta.slug)
            .collect();
        assert_eq!(slugs, vec!["aaa", "second", "first"]);
    }

    #[test]
    fn test_ordered_posts_fails_fast() {
        let (dir, loader) = fixture();
        fs::write(dir.path().join("broken.md"), "---\ntitle: x\n---\n").unwrap();
        assert!(matches!(
            loader.ordered_posts(),
            Err(PostError::Metadata { .. })
        ));
    }

    #[test]
    fn test_static_paths() {
        let (_dir, loader) = fixture();
        assert_eq!(
            loader.static_paths().unwrap(),
            vec![
                ("first".to_string(), None),
                ("second".to_string(), None),
                ("second".to_string(), Some("zh_CN".to_string())),
            ]
        );
    }

    #[test]
    fn test_static_paths_keep_broken_posts() {
        let (dir, loader) = fixture();
        fs::write(dir.path().join("broken.md"), "no front-matter").unwrap();
        let paths = loader.static_paths().unwrap();
        assert!(paths.contains(&("broken".to_string(), None)));
        assert_eq!(paths.len(), 4);
    }
}
