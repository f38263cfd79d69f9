//! Outbound share links.
//!
//! Query parameters are appended in the caller's order and percent-encoded
//! with everything except RFC 3986 unreserved characters escaped, so a space
//! becomes `%20` rather than the form-encoded `+`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::config::SiteInfoConfig;

/// Twitter's web intent endpoint.
pub const TWEET_INTENT: &str = "https://twitter.com/intent/tweet";

const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Append `params` to `base`, keeping any query the base already carries.
///
/// The only failure is an unparseable base URL.
pub fn share_url<I, K, V>(base: &str, params: I) -> Result<Url, url::ParseError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = Url::parse(base)?;

    let mut query = url.query().unwrap_or_default().to_string();
    for (key, value) in params {
        if !query.is_empty() {
            query.push('&');
        }
        query.extend(utf8_percent_encode(key.as_ref(), QUERY_COMPONENT));
        query.push('=');
        query.extend(utf8_percent_encode(value.as_ref(), QUERY_COMPONENT));
    }

    if !query.is_empty() {
        url.set_query(Some(&query));
    }
    Ok(url)
}

/// "Tweet" link for a post permalink.
pub fn tweet_url(site: &SiteInfoConfig, permalink: &str) -> Result<Url, url::ParseError> {
    let text = format!("I'd like to share this post from {}:\n{permalink}", site.twitter);
    share_url(TWEET_INTENT, [("text", text)])
}

/// Link to the issue tracker used for post discussion.
pub fn discussion_url(site: &SiteInfoConfig) -> Result<Url, url::ParseError> {
    share_url(&site.issues, std::iter::empty::<(&str, &str)>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_appended_in_order() {
        let url = share_url("https://example.com/intent", [("a", "1"), ("b", "x y")]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/intent?a=1&b=x%20y");
    }

    #[test]
    fn test_existing_query_preserved() {
        let url = share_url("https://example.com/intent?ref=blog", [("a", "1")]).unwrap();
        assert_eq!(url.query(), Some("ref=blog&a=1"));
    }

    #[test]
    fn test_no_params() {
        let url = share_url("https://example.com/intent", Vec::<(String, String)>::new()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/intent");
    }

    #[test]
    fn test_reserved_characters_encoded() {
        let url = share_url("https://example.com/", [("q", "a&b=c/d?é")]).unwrap();
        assert_eq!(url.query(), Some("q=a%26b%3Dc%2Fd%3F%C3%A9"));
    }

    #[test]
    fn test_invalid_base() {
        assert!(share_url("not a url", [("a", "1")]).is_err());
        assert!(share_url("", [("a", "1")]).is_err());
    }

    #[test]
    fn test_tweet_url() {
        let site = SiteInfoConfig::default();
        let url = tweet_url(&site, "https://GmhLovEDM.app/blog/hello").unwrap();
        assert_eq!(
            url.as_str(),
            "https://twitter.com/intent/tweet?text=I%27d%20like%20to%20share%20this%20post%20from%20%40GmhLovEDM%3A%0Ahttps%3A%2F%2FGmhLovEDM.app%2Fblog%2Fhello"
        );
    }

    #[test]
    fn test_discussion_url() {
        let site = SiteInfoConfig::default();
        assert_eq!(
            discussion_url(&site).unwrap().as_str(),
            "https://github.com/gmhlovedm/GmhLovEDM.github.io/issues"
        );
    }
}
