//! Post loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Why a post could not be loaded.
///
/// Every variant is fatal for the route being built; sibling posts are
/// unaffected.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("expected a slug")]
    MissingSlug,

    #[error("invalid slug `{0}`: only letters, digits, `.`, `_` and `-` are allowed")]
    InvalidSlug(String),

    #[error("invalid language tag `{0}`")]
    InvalidLang(String),

    #[error("post `{slug}` not found at `{}`", path.display())]
    NotFound { slug: String, path: PathBuf },

    #[error("failed to parse the metadata of `{}`", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Front-matter problems, wrapped by [`PostError::Metadata`].
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("no front-matter block (expected `---` or `+++` at the top of the file)")]
    Missing,

    #[error("unterminated front-matter block")]
    Unterminated,

    #[error("invalid TOML front-matter")]
    Toml(#[from] toml::de::Error),

    #[error("field `{0}` must be {1}")]
    FieldType(&'static str, &'static str),

    #[error("invalid line {line}: `{text}` (expected `key: value`)")]
    Syntax { line: usize, text: String },

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date `{0}` (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SSZ)")]
    InvalidDate(String),

    #[error("invalid translation language `{0}`")]
    InvalidTranslation(String),
}
