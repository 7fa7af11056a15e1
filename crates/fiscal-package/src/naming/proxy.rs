//! Proxy URL decoration.
//!
//! Remote sources are reached through a same-origin `/proxy?url=...`
//! endpoint. These helpers add and remove that wrapper.

use once_cell::sync::Lazy;
use url::{ParseError, Url};

/// Path of the proxy endpoint.
pub const PROXY_PATH: &str = "/proxy";

/// Query parameter carrying the proxied URL.
pub const PROXY_PARAM: &str = "url";

/// Origin used to resolve relative URLs such as `/proxy?url=...`.
static PLACEHOLDER_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://placeholder.invalid/").unwrap());

/// Parse an absolute or origin-relative URL.
pub(crate) fn parse_lenient(raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(ParseError::RelativeUrlWithoutBase) => PLACEHOLDER_BASE.join(raw).ok(),
        Err(_) => None,
    }
}

/// Return the wrapped URL of a proxy URL, or the input unchanged.
pub fn undecorate_proxy_url(raw: &str) -> String {
    let Some(url) = parse_lenient(raw) else {
        return raw.to_string();
    };
    if url.path() != PROXY_PATH {
        return raw.to_string();
    }

    url.query_pairs()
        .find(|(key, _)| key == PROXY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| raw.to_string())
}

/// Wrap a URL in the proxy endpoint. Already-decorated input is not wrapped twice.
pub fn decorate_proxy_url(raw: &str) -> String {
    format!(
        "{}?{}={}",
        PROXY_PATH,
        PROXY_PARAM,
        urlencoding::encode(&undecorate_proxy_url(raw))
    )
}
