//! Presentable per-provider links.
//!
//! A provider gets a deep link when one was confirmed, a keyword search
//! fallback whenever there is query text, and is left out when it has
//! neither.

use std::collections::BTreeMap;

use super::domain::{Provider, ProviderLink};

/// Build the link entry for one provider, or `None` if nothing can be offered.
pub fn build_link(
    provider: Provider,
    deep_link: Option<&str>,
    query: Option<&str>,
) -> Option<ProviderLink> {
    let deep_link = deep_link.map(str::trim).filter(|l| !l.is_empty());
    let fallback = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| provider.search_url(q));

    if deep_link.is_none() && fallback.is_none() {
        return None;
    }

    Some(ProviderLink {
        name: provider,
        display_name: provider.display_name().to_string(),
        deep_link: deep_link.map(str::to_string),
        is_available: deep_link.is_some(),
        fallback_search_link: fallback,
    })
}

/// Links for every supported provider, in [`Provider::ALL`] order.
pub fn build_links(
    links: &BTreeMap<Provider, String>,
    query: Option<&str>,
) -> Vec<ProviderLink> {
    Provider::ALL
        .into_iter()
        .filter_map(|provider| {
            build_link(provider, links.get(&provider).map(String::as_str), query)
        })
        .collect()
}
