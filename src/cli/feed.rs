//! Feed command: print or write the RSS document.

use anyhow::{Context, Result};
use std::{
    fs,
    io::{Write, stdout},
    path::Path,
};

use crate::{config::SiteConfig, log, post::PostLoader, seo::feed::rss::build_rss, seo::minify_xml};

pub fn run_feed(output: Option<&Path>, config: &SiteConfig) -> Result<()> {
    let loader = PostLoader::from_config(config);
    let xml = build_rss(config, &loader)?;
    let xml = minify_xml(xml.as_bytes(), config.build.minify);

    match output {
        Some(path) => {
            fs::write(path, &*xml).with_context(|| format!("Failed to write {}", path.display()))?;
            log!("rss"; "{}", path.display());
        }
        None => {
            let mut stdout = stdout().lock();
            stdout.write_all(&xml)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
