//! Site configuration management for `blog.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/   # [site], [build], [feed], [serve]
//! ├── error      # ConfigError
//! ├── util       # config discovery, URL joining
//! └── mod.rs     # SiteConfig (this file)
//! ```
//!
//! A missing config file is not an error: the built-in defaults describe
//! GmhLovEDM's blog, so `gmhblog build` works in a bare posts checkout.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{BuildConfig, FeedConfig, ServeConfig, SiteInfoConfig};
pub use util::join_url;

use crate::{
    cli::{BuildArgs, Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::find_config_file;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing blog.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteInfoConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when no config exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd.clone(),
                    config_path: cwd.join(&cli.config),
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli);
        let root = config.root.clone();
        config.normalize_paths(&root);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.build.posts, cli.posts.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Serve {
                build_args,
                interface,
                port,
            } => {
                self.apply_build_args(build_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Query { .. } | Commands::Feed { .. } => {}
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.site.url, args.site_url.as_ref());
        self.build.clean = args.clean;
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve directories relative to the project root.
    fn normalize_paths(&mut self, root: &Path) {
        self.build.posts = root.join(&self.build.posts);
        self.build.output = root.join(&self.build.output);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        self.site.validate(&mut errors);
        self.build.validate(&mut errors);
        self.feed.validate(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors).into())
        }
    }

    // ========================================================================
    // routes and canonical URLs
    // ========================================================================

    /// Site-relative route of the blog index (`/blog`).
    pub fn blog_route(&self) -> String {
        let route = join_url("", &[self.build.blog_segment()]);
        if route.is_empty() { "/".into() } else { route }
    }

    /// Site-relative route of a post page (`/blog/<slug>[/<lang>]`).
    pub fn post_route(&self, slug: &str, lang: Option<&str>) -> String {
        join_url(
            "",
            &[self.build.blog_segment(), slug, lang.unwrap_or_default()],
        )
    }

    /// Site-relative route of the feed (`/blog/rss.xml`).
    pub fn feed_route(&self) -> String {
        join_url("", &[self.build.blog_segment(), &self.feed.file_name()])
    }

    /// Canonical blog URL (`https://GmhLovEDM.app/blog`).
    pub fn blog_url(&self) -> String {
        join_url(&self.site.url, &[self.build.blog_segment()])
    }

    /// Canonical post URL (`https://GmhLovEDM.app/blog/<slug>[/<lang>]`).
    pub fn post_url(&self, slug: &str, lang: Option<&str>) -> String {
        join_url(&self.site.url, &[&self.post_route(slug, lang)])
    }

    /// Canonical feed URL.
    pub fn feed_url(&self) -> String {
        join_url(&self.site.url, &[&self.feed_route()])
    }

    // ========================================================================
    // output paths
    // ========================================================================

    /// Output file of a page route: `/blog/x` -> `<output>/blog/x/index.html`.
    pub fn page_output(&self, route: &str) -> PathBuf {
        self.build
            .output
            .join(route.trim_start_matches('/'))
            .join("index.html")
    }

    /// Output file of the feed: `<output>/blog/rss.xml`.
    pub fn feed_output(&self) -> PathBuf {
        self.build
            .output
            .join(self.feed_route().trim_start_matches('/'))
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
