//! Naming utilities: titles, slugs, resource names and proxy URLs.
//!
//! Every function here is total: empty or unparseable input yields an
//! empty string or the input itself, never an error.

mod proxy;
mod resource;
mod slug;

pub use proxy::{decorate_proxy_url, undecorate_proxy_url, PROXY_PARAM, PROXY_PATH};
pub use resource::{name_from_path, name_from_url, unique_name};
pub use slug::{to_slug, to_title, transliterate, SLUG_SEPARATOR};
