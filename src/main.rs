//! gmhblog - GmhLovEDM's markdown blog: post pages, RSS feed and social metadata.

mod cli;
mod config;
mod core;
mod logger;
mod post;
mod render;
mod seo;
mod share;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use std::sync::Arc;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config, false).map(|_| ()),
        Commands::Serve { .. } => cli::serve::serve_site(Arc::new(config)),
        Commands::Query { args } => cli::query::run_query(args, &config),
        Commands::Feed { output } => cli::feed::run_feed(output.as_deref(), &config),
    }
}
