//! Resource names derived from file paths and URLs.

use std::collections::HashSet;
use std::path::Path;

use super::proxy::{parse_lenient, undecorate_proxy_url};
use super::slug::to_slug;

/// Slug of a file's basename without extension.
///
/// Falls back to slugifying the whole input when the basename is empty.
pub fn name_from_path(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem.is_empty() {
        to_slug(file_name)
    } else {
        to_slug(&stem)
    }
}

/// Resource name for a (possibly proxy-decorated) URL.
///
/// Returns the input unchanged when it has no usable path.
pub fn name_from_url(raw_url: &str) -> String {
    let Some(url) = parse_lenient(&undecorate_proxy_url(raw_url)) else {
        return raw_url.to_string();
    };

    let path = urlencoding::decode(url.path())
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| url.path().to_string());

    if path.trim_matches('/').is_empty() {
        return raw_url.to_string();
    }
    name_from_path(&path)
}

/// Return `candidate`, or the first `candidate-N` (N = 1, 2, ...) absent from `existing`.
pub fn unique_name<I, S>(candidate: &str, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let taken: HashSet<String> = existing
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect();

    let mut result = candidate.to_string();
    let mut suffix = 1usize;
    while taken.contains(&result) {
        result = format!("{}-{}", candidate, suffix);
        suffix += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_path() {
        assert_eq!(name_from_path("My Report.csv"), "my-report");
        assert_eq!(name_from_path("/data/budget/Витрати 2024.csv"), "vytraty-2024");
        assert_eq!(name_from_path(".hidden"), "hidden");
        assert_eq!(name_from_path("archive.tar.gz"), "archive-tar");
        assert_eq!(name_from_path(""), "");
    }

    #[test]
    fn test_name_from_url() {
        assert_eq!(name_from_url("http://x.test/files/Spending.csv"), "spending");
        assert_eq!(
            name_from_url("http://x.test/proxy?url=http%3A%2F%2Fy.test%2FData%20File.csv"),
            "data-file"
        );
        assert_eq!(
            name_from_url("/proxy?url=http%3A%2F%2Fy.test%2Fbudget.csv"),
            "budget"
        );
    }

    #[test]
    fn test_name_from_url_without_path() {
        assert_eq!(name_from_url("http://x.test"), "http://x.test");
        assert_eq!(name_from_url("http://x.test/"), "http://x.test/");
    }

    #[test]
    fn test_unique_name() {
        let existing = vec!["budget", "budget-1", "spending"];
        assert_eq!(unique_name("revenue", &existing), "revenue");
        assert_eq!(unique_name("budget", &existing), "budget-2");
        assert_eq!(unique_name("spending", &existing), "spending-1");
        assert_eq!(unique_name("budget", Vec::<String>::new()), "budget");
        assert_eq!(existing.len(), 3);
    }
}
