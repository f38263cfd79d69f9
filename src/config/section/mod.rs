//! Configuration section definitions.
//!
//! Each module corresponds to a section in `blog.toml`:
//!
//! | Module  | TOML Section | Purpose                                  |
//! |---------|--------------|------------------------------------------|
//! | `site`  | `[site]`     | Site name, canonical URL, social handles |
//! | `build` | `[build]`    | Posts/output directories, URL segment    |
//! | `feed`  | `[feed]`     | RSS channel settings                     |
//! | `serve` | `[serve]`    | Development server                       |

mod build;
mod feed;
mod serve;
mod site;

pub use build::BuildConfig;
pub use feed::FeedConfig;
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
