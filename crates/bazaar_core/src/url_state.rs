use url::form_urlencoded;

use crate::state::{FilterState, SortKey, Tab};

/// The filter-relevant subset of state carried in the address bar.
///
/// `page_size` and the favorites filter are deliberately excluded from the
/// shareable contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlState {
    pub query: String,
    pub tab: Tab,
    pub sort: SortKey,
    pub page: usize,
}

impl Default for UrlState {
    fn default() -> Self {
        Self {
            query: String::new(),
            tab: Tab::All,
            sort: SortKey::Latest,
            page: 1,
        }
    }
}

/// Encodes the filter state as a canonical minimal query string.
///
/// Parameters appear in the fixed order `q`, `tab`, `sort`, `page` and only
/// when they differ from the default, so filter-equivalent states encode
/// identically. The default state encodes as the empty string.
pub fn encode_query_string(filter: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if !filter.query.is_empty() {
        serializer.append_pair("q", &filter.query);
    }
    if filter.tab != Tab::All {
        serializer.append_pair("tab", filter.tab.as_param());
    }
    if filter.sort != SortKey::Latest {
        serializer.append_pair("sort", filter.sort.as_param());
    }
    if filter.page != 1 {
        serializer.append_pair("page", &filter.page.to_string());
    }
    serializer.finish()
}

/// Decodes a query string, substituting defaults for absent or invalid
/// parameters. A leading `?` is tolerated; the first occurrence of a
/// parameter wins.
pub fn decode_query_string(raw: &str) -> UrlState {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let pairs: Vec<(String, String)> = form_urlencoded::parse(raw.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let first = |name: &str| {
        pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };

    UrlState {
        query: first("q").map(str::trim).unwrap_or_default().to_string(),
        tab: first("tab").and_then(Tab::from_param).unwrap_or_default(),
        sort: first("sort").and_then(SortKey::from_param).unwrap_or_default(),
        page: first("page")
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1),
    }
}
