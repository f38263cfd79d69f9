//! Feed generation (RSS 2.0).

pub mod rss;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::{config::SiteConfig, log, post::PostLoader, seo::minify_xml};

/// Build the feed and write it under the output directory.
///
/// Returns the written path, or `None` when the feed is disabled.
pub fn build_feed(config: &SiteConfig, loader: &PostLoader) -> Result<Option<PathBuf>> {
    if !config.feed.enable {
        return Ok(None);
    }

    let xml = self::rss::build_rss(config, loader)?;
    let xml = minify_xml(xml.as_bytes(), config.build.minify);
    let path = config.feed_output();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, &*xml).with_context(|| format!("Failed to write {}", path.display()))?;

    log!("rss"; "{}", config.feed_route());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    fn config_for(out: &TempDir, extra: &str) -> SiteConfig {
        let mut config = test_parse_config(extra);
        config.build.output = out.path().to_path_buf();
        config
    }

    #[test]
    fn test_writes_feed_under_blog_path() {
        let posts = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(
            posts.path().join("hello.md"),
            "---\ntitle: Hello\ntag: t\ndate: 2023-01-01\ndescription: d\n---\nbody\n",
        )
        .unwrap();

        let config = config_for(&out, "");
        let path = build_feed(&config, &PostLoader::new(posts.path()))
            .unwrap()
            .unwrap();
        assert_eq!(path, out.path().join("blog/rss.xml"));
        let xml = fs::read_to_string(path).unwrap();
        assert!(xml.contains("https://GmhLovEDM.app/blog/hello"));
    }

    #[test]
    fn test_minified_feed_is_single_line() {
        let posts = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = config_for(&out, "[build]\nminify = true");
        let path = build_feed(&config, &PostLoader::new(posts.path()))
            .unwrap()
            .unwrap();
        assert!(!fs::read_to_string(path).unwrap().contains('\n'));
    }

    #[test]
    fn test_minified_feed_keeps_post_html() {
        let posts = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let body = "first line\nsecond line\n\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n";
        fs::write(
            posts.path().join("hello.md"),
            format!("---\ntitle: Hello\ntag: t\ndate: 2023-01-01\ndescription: d\n---\n{body}"),
        )
        .unwrap();

        let config = config_for(&out, "[build]\nminify = true");
        let path = build_feed(&config, &PostLoader::new(posts.path()))
            .unwrap()
            .unwrap();
        let channel = ::rss::Channel::read_from(&fs::read(path).unwrap()[..]).unwrap();
        assert_eq!(
            channel.items()[0].content(),
            Some(crate::render::markdown_to_html(body).as_str())
        );
    }

    #[test]
    fn test_disabled_feed() {
        let posts = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = config_for(&out, "[feed]\nenable = false");
        assert!(build_feed(&config, &PostLoader::new(posts.path())).unwrap().is_none());
        assert!(!out.path().join("blog/rss.xml").exists());
    }
}
