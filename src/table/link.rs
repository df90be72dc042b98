//! Shareable view state as a flat string map (`client`, `year`, `page`, `perPage`,
//! `sortKey`, `sortDir`), the same keys a dashboard deep link carries.

use std::borrow::Cow;

use super::params::{PageSize, Sort, SortDirection, SortKey, ViewParams, YearFilter};

const CLIENT: &str = "client";
const YEAR: &str = "year";
const PAGE: &str = "page";
const PER_PAGE: &str = "perPage";
const SORT_KEY: &str = "sortKey";
const SORT_DIR: &str = "sortDir";

fn is_unset(value: &str) -> bool {
    value.is_empty() || value == "all" || value == "null"
}

/// Flatten `params` into link pairs. Empty, `all` and `null` values are left out.
/// The selection is not part of a link.
pub fn to_query_pairs(params: &ViewParams) -> Vec<(&'static str, String)> {
    let (sort_key, sort_dir) = match params.sort() {
        Some(sort) => (sort.key.as_str(), sort.direction.as_str()),
        None => ("", ""),
    };

    [
        (CLIENT, params.text_filter().to_string()),
        (YEAR, params.year_filter().to_string()),
        (PAGE, params.page().to_string()),
        (PER_PAGE, params.page_size().to_string()),
        (SORT_KEY, sort_key.to_string()),
        (SORT_DIR, sort_dir.to_string()),
    ]
    .into_iter()
    .filter(|(_, value)| !is_unset(value))
    .collect()
}

pub fn to_query_string(params: &ViewParams) -> String {
    to_query_pairs(params)
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Rebuild view params from link pairs. Anything missing or unreadable falls back
/// to its default; a sort needs both a known key and a known direction.
pub fn from_query_pairs<K, V, I>(pairs: I) -> ViewParams
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut client = None;
    let mut year = None;
    let mut page = None;
    let mut per_page = None;
    let mut sort_key = None;
    let mut sort_dir = None;

    for (key, value) in pairs {
        let value = value.as_ref();
        if is_unset(value) {
            continue;
        }
        let slot = match key.as_ref() {
            CLIENT => &mut client,
            YEAR => &mut year,
            PAGE => &mut page,
            PER_PAGE => &mut per_page,
            SORT_KEY => &mut sort_key,
            SORT_DIR => &mut sort_dir,
            _ => continue,
        };
        *slot = Some(value.to_string());
    }

    let mut params = ViewParams::default();
    if let Some(client) = client {
        params.set_text_filter(client);
    }
    if let Some(year) = year.and_then(|y| y.parse::<YearFilter>().ok()) {
        params.set_year_filter(year);
    }
    if let Some(size) = per_page.and_then(|s| s.parse::<PageSize>().ok()) {
        params.set_page_size(size);
    }
    let key = sort_key.and_then(|k| k.parse::<SortKey>().ok());
    let direction = sort_dir.and_then(|d| d.parse::<SortDirection>().ok());
    if let (Some(key), Some(direction)) = (key, direction) {
        params.set_sort(Some(Sort { key, direction }));
    }
    // Last, since the setters above send the view back to page 1.
    if let Some(page) = page.and_then(|p| p.parse::<u32>().ok()).filter(|p| *p >= 1) {
        params.set_page(page);
    }
    params
}

/// Parse a `client=..&page=..` query (leading `?` optional).
pub fn from_query_string(query: &str) -> ViewParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs = query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode(key), decode(value))
        });
    from_query_pairs(pairs)
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| spaced.clone())
}
