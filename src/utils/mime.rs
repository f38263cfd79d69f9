//! MIME type constants for HTTP responses.

pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const XML: &str = "application/xml";
}
