use anyhow::Context;
use reqwest::header::HeaderMap;

/// Resolves an opaque page token to the numeric page both providers use;
/// `None` means the first page.
pub(crate) fn page_number(token: Option<&str>) -> anyhow::Result<u32> {
    match token {
        None => Ok(1),
        Some(value) => value.parse().context("malformed page token"),
    }
}

/// Extracts the next page token from a GitHub-style `Link` header.
pub(crate) fn next_page_from_link_header(headers: &HeaderMap) -> Option<String> {
    let link = headers.get("link")?.to_str().ok()?;
    for entry in link.split(',') {
        let entry = entry.trim();
        if !entry.contains("rel=\"next\"") {
            continue;
        }
        let url = entry.strip_prefix('<')?.split('>').next()?;
        let query = url.split_once('?').map(|(_, query)| query)?;
        for pair in query.split('&') {
            if let Some(page) = pair.strip_prefix("page=") {
                return Some(page.to_string());
            }
        }
    }
    None
}

/// Extracts the next page token from a GitLab-style numeric header, which
/// is blank on the last page.
pub(crate) fn next_page_from_header(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn link_header_yields_next_page_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "link",
            HeaderValue::from_static(
                "<https://api.github.com/orgs/acme/repos?per_page=10&page=4>; rel=\"next\", \
                 <https://api.github.com/orgs/acme/repos?per_page=10&page=9>; rel=\"last\"",
            ),
        );
        assert_eq!(next_page_from_link_header(&headers).as_deref(), Some("4"));
    }

    #[test]
    fn link_header_without_next_relation_is_terminal() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "link",
            HeaderValue::from_static(
                "<https://api.github.com/orgs/acme/repos?per_page=10&page=9>; rel=\"last\"",
            ),
        );
        assert_eq!(next_page_from_link_header(&headers), None);
        assert_eq!(next_page_from_link_header(&HeaderMap::new()), None);
    }

    #[test]
    fn numeric_header_is_terminal_when_blank() {
        let mut headers = HeaderMap::new();
        headers.insert("x-next-page", HeaderValue::from_static("3"));
        assert_eq!(
            next_page_from_header(&headers, "x-next-page").as_deref(),
            Some("3")
        );
        headers.insert("x-next-page", HeaderValue::from_static(""));
        assert_eq!(next_page_from_header(&headers, "x-next-page"), None);
    }

    #[test]
    fn page_number_defaults_to_first_page() {
        assert_eq!(page_number(None).unwrap(), 1);
        assert_eq!(page_number(Some("7")).unwrap(), 7);
        assert!(page_number(Some("next")).is_err());
    }
}
