//! Markdown to HTML via `pulldown-cmark`.
//!
//! Conversion runs in three stages:
//!
//! ```text
//! &str ──parse──► Parser ──collect──► MarkdownTree ──to_html──► String
//! ```
//!
//! The tree stage owns its events, so headings can be given stable ids
//! before serialization.

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

// ============================================================================
// Stage 1: parse
// ============================================================================

/// Parse markdown into a borrowed event stream.
pub fn parse<'a>(markdown: &'a str, options: &MarkdownOptions) -> Parser<'a> {
    Parser::new_ext(markdown, options.to_pulldown_options())
}

// ============================================================================
// Stage 2: tree
// ============================================================================

/// Owned intermediate representation of a markdown document.
#[derive(Debug, Clone, Default)]
pub struct MarkdownTree {
    events: Vec<Event<'static>>,
}

impl MarkdownTree {
    /// Collect events, assigning an id to every heading that lacks one.
    pub fn from_events<'a>(events: impl IntoIterator<Item = Event<'a>>) -> Self {
        let mut tree = Vec::new();
        let mut ids = HeadingIds::default();
        // Index of the open heading's Start event and its accumulated text
        let mut open_heading: Option<(usize, String)> = None;

        for event in events {
            match &event {
                Event::Start(Tag::Heading { .. }) => {
                    open_heading = Some((tree.len(), String::new()));
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some((_, buf)) = open_heading.as_mut() {
                        buf.push_str(text);
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((start, text)) = open_heading.take()
                        && let Some(Event::Start(Tag::Heading { id, .. })) = tree.get_mut(start)
                    {
                        match id.as_deref() {
                            Some(existing) => ids.reserve(existing),
                            None => *id = Some(CowStr::from(ids.unique(&text))),
                        }
                    }
                }
                _ => {}
            }
            tree.push(event.into_static());
        }

        Self { events: tree }
    }

    // ========================================================================
    // Stage 3: serialize
    // ========================================================================

    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.events.len() * 16);
        html::push_html(&mut out, self.events.iter().cloned());
        out
    }
}

/// Allocates unique heading ids: `intro`, `intro-1`, `intro-2`...
#[derive(Default)]
struct HeadingIds {
    seen: HashMap<String, usize>,
}

impl HeadingIds {
    fn unique(&mut self, text: &str) -> String {
        let base = slugify(text);
        let base = if base.is_empty() { "section".to_string() } else { base };

        let mut candidate = base.clone();
        while let Some(count) = self.seen.get_mut(&candidate) {
            *count += 1;
            candidate = format!("{base}-{count}");
        }
        self.seen.insert(candidate.clone(), 0);
        candidate
    }

    fn reserve(&mut self, id: &str) {
        self.seen.entry(id.to_string()).or_insert(0);
    }
}

/// Lowercase, keep alphanumerics, turn whitespace and dashes into single `-`.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-') && !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Convert markdown to HTML with every extension enabled.
pub fn markdown_to_html(markdown: &str) -> String {
    MarkdownTree::from_events(parse(markdown, &MarkdownOptions::all())).to_html()
}
