//! Page metadata: title, description, Open Graph and Twitter card.
//!
//! [`build_metadata`] is a pure, total function. Absent inputs produce
//! absent fields, and absent fields are skipped when rendering `<head>` tags.

use std::fmt::Write;

use serde::Serialize;

use crate::config::SiteInfoConfig;
use crate::utils::html::{escape, escape_attr};

/// Route-level metadata; every field optional.
#[derive(Debug, Clone, Default)]
pub struct MetadataInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_image: Option<String>,
    pub og_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub viewport: Viewport,
    pub theme_color: String,
    /// Extra `<meta name=.. content=..>` pairs.
    pub other: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    pub site: String,
    pub card: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: &'static str,
    pub initial_scale: u8,
    pub viewport_fit: &'static str,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: "device-width",
            initial_scale: 1,
            viewport_fit: "cover",
        }
    }
}

impl Viewport {
    fn content(&self) -> String {
        format!(
            "width={}, initial-scale={}, viewport-fit={}",
            self.width, self.initial_scale, self.viewport_fit
        )
    }
}

/// Build the metadata descriptor for one page.
///
/// The title is `"{title} | {site}"` when the route has a non-empty title,
/// otherwise the bare site name.
pub fn build_metadata(input: &MetadataInput, site: &SiteInfoConfig) -> PageMetadata {
    let title = match input.title.as_deref() {
        Some(route_title) if !route_title.is_empty() => format!("{route_title} | {}", site.name),
        _ => site.name.clone(),
    };
    let card = if input.og_image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };

    PageMetadata {
        title: title.clone(),
        description: input.description.clone(),
        open_graph: OpenGraph {
            title: title.clone(),
            description: input.description.clone(),
            images: input.og_image.clone(),
            url: input.og_url.clone(),
        },
        twitter: TwitterCard {
            title,
            description: input.description.clone(),
            images: input.og_image.clone(),
            site: site.twitter.clone(),
            card,
        },
        viewport: Viewport::default(),
        theme_color: site.theme_color.clone(),
        other: vec![("msapplication-TileColor".into(), site.tile_color.clone())],
    }
}

impl PageMetadata {
    /// Render as `<head>` children, one tag per line.
    pub fn to_head_html(&self) -> String {
        let mut out = format!("<title>{}</title>\n", escape(&self.title));

        if let Some(description) = &self.description {
            push_meta(&mut out, "name", "description", description);
        }

        let og = &self.open_graph;
        push_meta(&mut out, "property", "og:title", &og.title);
        push_meta_opt(&mut out, "property", "og:description", og.description.as_deref());
        push_meta_opt(&mut out, "property", "og:image", og.images.as_deref());
        push_meta_opt(&mut out, "property", "og:url", og.url.as_deref());

        let tw = &self.twitter;
        push_meta(&mut out, "name", "twitter:card", tw.card);
        push_meta(&mut out, "name", "twitter:site", &tw.site);
        push_meta(&mut out, "name", "twitter:title", &tw.title);
        push_meta_opt(&mut out, "name", "twitter:description", tw.description.as_deref());
        push_meta_opt(&mut out, "name", "twitter:image", tw.images.as_deref());

        push_meta(&mut out, "name", "viewport", &self.viewport.content());
        push_meta(&mut out, "name", "theme-color", &self.theme_color);
        for (name, content) in &self.other {
            push_meta(&mut out, "name", name, content);
        }
        out
    }
}

fn push_meta(out: &mut String, attr: &str, key: &str, content: &str) {
    writeln!(
        out,
        r#"<meta {attr}="{}" content="{}">"#,
        escape_attr(key),
        escape_attr(content)
    )
    .unwrap();
}

fn push_meta_opt(out: &mut String, attr: &str, key: &str, content: Option<&str>) {
    if let Some(content) = content {
        push_meta(out, attr, key, content);
    }
}
