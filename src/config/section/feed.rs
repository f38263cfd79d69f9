//! `[feed]` section: RSS channel settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Enable feed generation.
    pub enable: bool,

    /// Channel title.
    pub title: String,

    /// Channel description.
    pub description: String,

    /// Feed file name, placed under the blog path (`/blog/rss.xml`).
    pub path: PathBuf,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            title: "GmhLovEDM's Blog".into(),
            description: "Blog posts from GmhLovEDM with ❤️".into(),
            path: "rss.xml".into(),
        }
    }
}

impl FeedConfig {
    /// Feed file name as a URL segment.
    pub fn file_name(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }

    pub fn validate(&self, errors: &mut Vec<String>) {
        if self.path.is_absolute() || self.path.as_os_str().is_empty() {
            errors.push(format!(
                "[feed.path] '{}' must be a relative file name",
                self.path.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.feed.enable);
        assert_eq!(config.feed.title, "GmhLovEDM's Blog");
        assert_eq!(config.feed.path, PathBuf::from("rss.xml"));
        assert_eq!(config.feed.file_name(), "rss.xml");
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config("[feed]\nenable = false\npath = \"feed.xml\"");
        assert!(!config.feed.enable);
        assert_eq!(config.feed.file_name(), "feed.xml");
    }

    #[test]
    fn test_validate_absolute_path() {
        let mut errors = Vec::new();
        test_parse_config("[feed]\npath = \"/etc/rss.xml\"")
            .feed
            .validate(&mut errors);
        assert_eq!(errors.len(), 1);
    }
}
