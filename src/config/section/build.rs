//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! posts = "posts"      # markdown sources, one `<slug>.md` per post
//! output = "public"    # static output directory
//! blog_path = "blog"   # URL segment posts live under
//! minify = false       # minify feed XML
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Posts directory (relative to project root).
    pub posts: PathBuf,

    /// Output directory (relative to project root).
    pub output: PathBuf,

    /// URL segment under which posts are routed.
    pub blog_path: String,

    /// Minify generated XML.
    pub minify: bool,

    /// Remove the output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            posts: "posts".into(),
            output: "public".into(),
            blog_path: "blog".into(),
            minify: false,
            clean: false,
        }
    }
}

impl BuildConfig {
    /// `blog_path` without surrounding slashes.
    pub fn blog_segment(&self) -> &str {
        self.blog_path.trim_matches('/')
    }

    pub fn validate(&self, errors: &mut Vec<String>) {
        if self.blog_path.chars().any(char::is_whitespace) {
            errors.push(format!(
                "[build.blog_path] '{}' must not contain whitespace",
                self.blog_path
            ));
        }
    }
}
