//! Fuzz target for slugs, titles and resource names.

#![no_main]

use fiscal_package::naming::{
    decorate_proxy_url, name_from_url, to_slug, to_title, undecorate_proxy_url,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.is_empty() {
        return;
    }

    let slug = to_slug(input);
    assert!(slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    assert_eq!(to_slug(&slug), slug);

    let _ = to_title(input);
    let _ = name_from_url(input);
    assert_eq!(
        undecorate_proxy_url(&decorate_proxy_url(input)),
        undecorate_proxy_url(input)
    );
});
