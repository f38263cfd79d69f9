//! `[site]` configuration.
//!
//! Basic site information used by page metadata, share links and the feed.

use serde::{Deserialize, Serialize};

/// Site-wide identity and social settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site name, appended to page titles (`Post | GmhLovEDM`).
    pub name: String,

    /// Canonical base URL (e.g., "https://GmhLovEDM.app").
    pub url: String,

    /// Default page description.
    pub description: String,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,

    /// Twitter handle, used for `twitter:site` and the share text.
    pub twitter: String,

    /// Where readers open an issue to discuss a post.
    pub issues: String,

    /// Default social preview image.
    pub image: String,

    pub favicon: String,

    pub copyright: String,

    /// `<meta name="theme-color">` value.
    pub theme_color: String,

    /// `msapplication-TileColor` value.
    pub tile_color: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            name: "GmhLovEDM".into(),
            url: "https://GmhLovEDM.app".into(),
            description: "Blog posts from GmhLovEDM with ❤️".into(),
            language: "en".into(),
            twitter: "@GmhLovEDM".into(),
            issues: "https://github.com/gmhlovedm/GmhLovEDM.github.io/issues".into(),
            image: "https://GmhLovEDM.app/twitter-cards/common.png".into(),
            favicon: "https://GmhLovEDM.app/favicon.ico".into(),
            copyright: "All rights reserved 2023, GmhLovEDM".into(),
            theme_color: "#000".into(),
            tile_color: "#000000".into(),
        }
    }
}

impl SiteInfoConfig {
    /// Validate site configuration.
    ///
    /// `url` must be an absolute http(s) URL with a host, since every
    /// canonical link and feed entry is built from it.
    pub fn validate(&self, errors: &mut Vec<String>) {
        match url::Url::parse(&self.url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    errors.push(format!(
                        "[site.url] scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    ));
                }
                if parsed.host_str().is_none() {
                    errors.push("[site.url] URL must have a valid host".into());
                }
            }
            Err(e) => errors.push(format!("[site.url] invalid URL '{}': {e}", self.url)),
        }

        if self.name.trim().is_empty() {
            errors.push("[site.name] must not be empty".into());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.name, "GmhLovEDM");
        assert_eq!(config.site.url, "https://GmhLovEDM.app");
        assert_eq!(config.site.twitter, "@GmhLovEDM");
    }

    #[test]
    fn test_validate_url() {
        let mut errors = Vec::new();
        test_parse_config("[site]\nurl = \"ftp://example.com\"")
            .site
            .validate(&mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scheme 'ftp'"));

        let mut errors = Vec::new();
        test_parse_config("[site]\nurl = \"not a url\"")
            .site
            .validate(&mut errors);
        assert!(errors[0].contains("invalid URL"));

        let mut errors = Vec::new();
        test_parse_config("").site.validate(&mut errors);
        assert!(errors.is_empty());
    }
}
