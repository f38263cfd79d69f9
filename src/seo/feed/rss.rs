//! RSS 2.0 feed generation.
//!
//! One item per post, newest first. Each item carries the post's rendered
//! HTML as `content:encoded`.

use crate::{
    config::SiteConfig,
    post::{Post, PostLoader},
    render::markdown_to_html,
};
use anyhow::{Context, Result, anyhow};
use rss::{ChannelBuilder, GuidBuilder, ImageBuilder, ItemBuilder, validation::Validate};
use std::collections::BTreeMap;

/// Namespace of the `content:encoded` element.
const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Load every post and assemble the feed document.
///
/// Fails on the first post that cannot be loaded; the error names it.
pub fn build_rss(config: &SiteConfig, loader: &PostLoader) -> Result<String> {
    let posts = loader
        .ordered_posts()
        .context("Failed to load posts for the feed")?;
    RssFeed::new(config, &posts).into_xml()
}

struct RssFeed<'a> {
    config: &'a SiteConfig,
    posts: &'a [Post],
}

impl<'a> RssFeed<'a> {
    fn new(config: &'a SiteConfig, posts: &'a [Post]) -> Self {
        Self { config, posts }
    }

    fn into_xml(self) -> Result<String> {
        let items: Vec<_> = self
            .posts
            .iter()
            .map(|post| post_to_rss_item(post, self.config))
            .collect();

        let site = &self.config.site;
        let feed = &self.config.feed;
        let blog_url = self.config.blog_url();

        let image = ImageBuilder::default()
            .url(site.image.clone())
            .title(feed.title.clone())
            .link(blog_url.clone())
            .build();

        let channel = ChannelBuilder::default()
            .namespaces(BTreeMap::from([(
                "content".to_string(),
                CONTENT_NAMESPACE.to_string(),
            )]))
            .title(feed.title.clone())
            .link(blog_url)
            .description(feed.description.clone())
            .language(Some(site.language.clone()))
            .copyright(Some(site.copyright.clone()))
            .image(Some(image))
            .generator(Some(env!("CARGO_PKG_NAME").to_string()))
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
        Ok(channel.to_string())
    }
}

fn post_to_rss_item(post: &Post, config: &SiteConfig) -> rss::Item {
    let meta = &post.meta;
    let link = config.post_url(&meta.slug, None);

    ItemBuilder::default()
        .title(Some(meta.title.clone()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description(Some(meta.description.clone()))
        .pub_date(Some(meta.date.to_rfc2822()))
        .categories(vec![rss::CategoryBuilder::default().name(meta.tag.clone()).build()])
        .content(Some(markdown_to_html(post.body())))
        .build()
}
