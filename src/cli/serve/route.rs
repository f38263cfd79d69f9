//! URL routing and page rendering for serve mode.
//!
//! Routes mirror the static build output:
//!
//! ```text
//! /blog                  -> index
//! /blog/rss.xml          -> feed
//! /blog/<slug>           -> post
//! /blog/<slug>/<lang>    -> translated post
//! ```

use anyhow::Result;

use crate::{
    config::SiteConfig,
    post::{PostError, PostLoader},
    render::{render_index, render_post},
    seo::feed::rss::build_rss,
    utils::mime::types::{HTML, PLAIN, XML},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Feed,
    Post { slug: String, lang: Option<String> },
    NotFound,
}

impl Route {
    /// Resolve a request URL (path, optional query) to a route.
    pub fn parse(url: &str, config: &SiteConfig) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let path = path.strip_suffix("index.html").unwrap_or(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let blog: Vec<&str> = config
            .build
            .blog_segment()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let Some(rest) = segments.strip_prefix(blog.as_slice()) else {
            return Self::NotFound;
        };

        let feed_name = config.feed.file_name();
        let feed: Vec<&str> = feed_name.split('/').filter(|s| !s.is_empty()).collect();
        if config.feed.enable && rest == feed.as_slice() {
            return Self::Feed;
        }

        match rest {
            [] => Self::Index,
            [slug] => Self::Post {
                slug: (*slug).to_string(),
                lang: None,
            },
            [slug, lang] => Self::Post {
                slug: (*slug).to_string(),
                lang: Some((*lang).to_string()),
            },
            _ => Self::NotFound,
        }
    }
}

/// A rendered response, independent of the HTTP server.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            content_type: PLAIN,
            headers: Vec::new(),
            body: b"404 Not Found".to_vec(),
        }
    }
}

/// Render a route. Errors become a 500 in the caller.
pub fn render(route: &Route, config: &SiteConfig) -> Result<Reply> {
    let loader = PostLoader::from_config(config);

    match route {
        Route::Index => {
            let posts = loader.ordered_posts()?;
            Ok(Reply::ok(HTML, render_index(config, &posts)))
        }
        Route::Feed => {
            let xml = build_rss(config, &loader)?;
            let mut reply = Reply::ok(XML, xml);
            reply.headers.push((
                "Content-Disposition",
                format!("inline; filename=\"{}\"", config.feed.file_name()),
            ));
            Ok(reply)
        }
        Route::Post { slug, lang } => match loader.load(Some(slug), lang.as_deref()) {
            Ok(post) => Ok(Reply::ok(HTML, render_post(config, &post)?)),
            Err(
                PostError::NotFound { .. } | PostError::InvalidSlug(_) | PostError::InvalidLang(_),
            ) => Ok(Reply::not_found()),
            Err(e) => Err(e.into()),
        },
        Route::NotFound => Ok(Reply::not_found()),
    }
}
