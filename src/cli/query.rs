//! Query command implementation.
//!
//! Prints post metadata as a JSON array, newest first.

use anyhow::{Context, Result};
use std::fs;

use crate::{
    cli::QueryArgs,
    config::SiteConfig,
    debug, log,
    post::{PostLoader, PostMeta, sort_newest_first},
    utils::plural_count,
};

/// Execute query command
pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let loader = PostLoader::from_config(config);
    let metas = collect(&loader, args)?;
    debug!("query"; "found {}", plural_count(metas.len(), "post"));

    let json = to_json(&metas, args.pretty)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            log!("query"; "{} written to {}", plural_count(metas.len(), "post"), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn collect(loader: &PostLoader, args: &QueryArgs) -> Result<Vec<PostMeta>> {
    if args.slugs.is_empty() && args.lang.is_none() {
        let posts = loader.ordered_posts()?;
        return Ok(posts.into_iter().map(|p| p.meta).collect());
    }

    let slugs = if args.slugs.is_empty() {
        loader.slugs()?
    } else {
        args.slugs.clone()
    };

    let mut posts = slugs
        .iter()
        .map(|slug| {
            loader
                .load(Some(slug), args.lang.as_deref())
                .with_context(|| format!("Failed to query `{slug}`"))
        })
        .collect::<Result<Vec<_>>>()?;
    sort_newest_first(&mut posts);
    Ok(posts.into_iter().map(|p| p.meta).collect())
}

fn to_json(metas: &[PostMeta], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(metas)?
    } else {
        serde_json::to_string(metas)?
    };
    Ok(json)
}
