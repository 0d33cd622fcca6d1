use crate::error::{GameInfoError, Result};

fn is_package_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Extract the package identifier from a store page URL.
///
/// Scans for the first `id=` followed by a non-empty run of
/// `[a-zA-Z0-9_.]` and returns that run. Anything else is rejected
/// before any network call is attempted.
pub fn extract_package_id(url: &str) -> Result<&str> {
    let mut search_from = 0;
    while let Some(pos) = url[search_from..].find("id=") {
        let start = search_from + pos + 3;
        let end = url[start..]
            .find(|c| !is_package_char(c))
            .map(|i| start + i)
            .unwrap_or(url.len());
        if end > start {
            return Ok(&url[start..end]);
        }
        search_from = start;
    }
    Err(GameInfoError::InvalidStoreUrl(url.to_string()))
}
