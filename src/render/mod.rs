//! HTML rendering: markdown conversion and page documents.

pub mod markdown;
pub mod page;

pub use markdown::markdown_to_html;
pub use page::{render_index, render_post};
