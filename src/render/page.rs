//! Post and index page documents.
//!
//! Pages carry semantic markup and class names only; styling lives outside
//! this crate.

use std::fmt::Write;

use anyhow::{Context, Result};

use super::markdown::markdown_to_html;
use crate::{
    config::SiteConfig,
    post::Post,
    seo::meta::{MetadataInput, build_metadata},
    share::{discussion_url, tweet_url},
    utils::html::{escape, escape_attr},
};

/// Attributes for links that leave the site.
const EXTERNAL_LINK: &str = r#"target="_blank" rel="noopener noreferrer""#;

/// Render a full post page, including the language switcher and share footer.
pub fn render_post(config: &SiteConfig, post: &Post) -> Result<String> {
    let meta = &post.meta;
    let lang = post.lang.as_deref();
    let permalink = config.post_url(&meta.slug, lang);

    let head = build_metadata(
        &MetadataInput {
            title: Some(meta.title.clone()),
            description: Some(meta.description.clone()),
            og_image: Some(config.site.image.clone()),
            og_url: Some(permalink.clone()),
        },
        &config.site,
    )
    .to_head_html();

    let tweet = tweet_url(&config.site, &permalink).context("Failed to build the tweet link")?;
    let discuss = discussion_url(&config.site)
        .with_context(|| format!("Invalid issues URL `{}`", config.site.issues))?;

    let mut body = String::with_capacity(post.body().len() * 2);
    body.push_str("<main>\n<article>\n<header>\n");
    body.push_str(&lang_switcher(config, post));
    writeln!(
        body,
        r#"<p class="post-meta">#{} / <time datetime="{}">{}</time></p>"#,
        escape(&meta.tag),
        meta.date,
        meta.date.to_human()
    )
    .unwrap();
    writeln!(body, "<h1>{}</h1>", escape(&meta.title)).unwrap();
    writeln!(body, "<h2>{}</h2>", escape(&meta.description)).unwrap();
    body.push_str("</header>\n");
    writeln!(
        body,
        "<div class=\"markdown-reader\">\n{}</div>",
        markdown_to_html(post.body())
    )
    .unwrap();
    body.push_str("</article>\n");
    writeln!(
        body,
        r#"<p class="share">Like this post? <a href="{}" {EXTERNAL_LINK}>Tweet</a> to share it with others or <a href="{}" {EXTERNAL_LINK}>open an issue</a> to discuss with me!</p>"#,
        escape_attr(tweet.as_str()),
        escape_attr(discuss.as_str()),
    )
    .unwrap();
    body.push_str("</main>\n");

    Ok(document(config, lang.unwrap_or(&config.site.language), &head, &body))
}

/// Links to every variant of the post; empty without translations.
fn lang_switcher(config: &SiteConfig, post: &Post) -> String {
    let meta = &post.meta;
    if meta.translations.is_empty() {
        return String::new();
    }

    let current = post.lang.as_deref();
    let variants = std::iter::once((None, config.site.language.as_str()))
        .chain(meta.translations.iter().map(|l| (Some(l.as_str()), l.as_str())));

    let mut nav = String::from("<nav class=\"lang-switcher\">\n");
    for (lang, label) in variants {
        let href = config.post_route(&meta.slug, lang);
        let aria = if lang == current {
            r#" aria-current="page""#
        } else {
            ""
        };
        writeln!(
            nav,
            r#"<a href="{}" hreflang="{}"{aria}>{}</a>"#,
            escape_attr(&href),
            escape_attr(label),
            escape(label)
        )
        .unwrap();
    }
    nav.push_str("</nav>\n");
    nav
}

/// Render the blog index: every post, newest first.
pub fn render_index(config: &SiteConfig, posts: &[Post]) -> String {
    let head = build_metadata(
        &MetadataInput {
            title: Some("Blog".into()),
            description: Some(config.site.description.clone()),
            og_image: Some(config.site.image.clone()),
            og_url: Some(config.blog_url()),
        },
        &config.site,
    )
    .to_head_html();

    let mut body = String::from("<main>\n<h1>Blog</h1>\n<ul class=\"posts\">\n");
    for post in posts {
        let meta = &post.meta;
        writeln!(
            body,
            r#"<li><a href="{}"><p class="post-meta">#{} / <time datetime="{}">{}</time></p><h2>{}</h2><p>{}</p></a></li>"#,
            escape_attr(&config.post_route(&meta.slug, None)),
            escape(&meta.tag),
            meta.date,
            meta.date.to_human(),
            escape(&meta.title),
            escape(&meta.description),
        )
        .unwrap();
    }
    body.push_str("</ul>\n</main>\n");

    document(config, &config.site.language, &head, &body)
}

fn document(config: &SiteConfig, lang: &str, head: &str, body: &str) -> String {
    let mut html = String::with_capacity(head.len() + body.len() + 512);
    html.push_str("<!DOCTYPE html>\n");
    writeln!(html, r#"<html lang="{}">"#, escape_attr(&lang.replace('_', "-"))).unwrap();
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(head);
    writeln!(
        html,
        r#"<link rel="icon" href="{}">"#,
        escape_attr(&config.site.favicon)
    )
    .unwrap();
    if config.feed.enable {
        writeln!(
            html,
            r#"<link rel="alternate" type="application/rss+xml" title="{}" href="{}">"#,
            escape_attr(&config.feed.title),
            escape_attr(&config.feed_url())
        )
        .unwrap();
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}
