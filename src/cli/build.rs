//! Static site generation.
//!
//! Build phases:
//! - **Init** - Clean (optional) and create the output directory
//! - **Pages** - Render every post and translation in parallel
//! - **Index** - Render the blog index from the posts that loaded
//! - **Feed** - Assemble `rss.xml`
//!
//! Each route is an independent unit: a broken post fails its own route,
//! the remaining pages are still written, and the build reports every
//! failure at the end.

use crate::{
    config::SiteConfig,
    debug, log,
    logger::ProgressLine,
    post::{Post, PostLoader, sort_newest_first},
    render::{render_index, render_post},
    seo::feed::build_feed,
    utils::plural_count,
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// What a successful build wrote.
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub posts: usize,
    pub translations: usize,
    pub feed: Option<PathBuf>,
}

/// Build the entire blog into the output directory.
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildSummary> {
    init_output(config)?;

    let loader = PostLoader::from_config(config);
    let paths = loader
        .static_paths()
        .with_context(|| format!("Failed to list posts in {}", loader.dir().display()))?;

    let translations = paths.iter().filter(|(_, lang)| lang.is_some()).count();
    let progress = (!quiet).then(|| {
        ProgressLine::new(&[
            ("posts", paths.len() - translations),
            ("translations", translations),
        ])
    });

    let results: Vec<_> = paths
        .par_iter()
        .map(|(slug, lang)| {
            let lang = lang.as_deref();
            let result = build_route(config, &loader, slug, lang);
            if let Some(p) = &progress {
                p.inc(if lang.is_some() { "translations" } else { "posts" });
            }
            (config.post_route(slug, lang), result)
        })
        .collect();

    if let Some(p) = progress {
        p.finish();
    }

    let mut summary = BuildSummary::default();
    let mut posts = Vec::new();
    let mut failures = Vec::new();
    for (route, result) in results {
        match result {
            Ok(post) if post.lang.is_some() => summary.translations += 1,
            Ok(post) => posts.push(post),
            Err(e) => failures.push((route, e)),
        }
    }
    summary.posts = posts.len();

    sort_newest_first(&mut posts);
    let index_route = config.blog_route();
    if let Err(e) = write_page(&config.page_output(&index_route), &render_index(config, &posts)) {
        failures.push((index_route, e));
    }

    match build_feed(config, &loader) {
        Ok(path) => summary.feed = path,
        Err(e) => failures.push((config.feed_route(), e)),
    }

    if !failures.is_empty() {
        for (route, error) in &failures {
            log!("error"; "{route}: {error:#}");
        }
        bail!("{} failed to build", plural_count(failures.len(), "route"));
    }

    if !quiet {
        log!(
            "build";
            "{} and {} written to {}",
            plural_count(summary.posts, "post"),
            plural_count(summary.translations, "translation"),
            config.build.output.display()
        );
    }
    Ok(summary)
}

fn init_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    if config.build.clean && output.exists() {
        debug!("build"; "cleaning {}", output.display());
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean {}", output.display()))?;
    }
    fs::create_dir_all(output).with_context(|| format!("Failed to create {}", output.display()))
}

/// Load, render and write one post route.
fn build_route(
    config: &SiteConfig,
    loader: &PostLoader,
    slug: &str,
    lang: Option<&str>,
) -> Result<Post> {
    let post = loader.load(Some(slug), lang)?;
    let html = render_post(config, &post)?;
    write_page(&config.page_output(&config.post_route(slug, lang)), &html)?;
    Ok(post)
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}
