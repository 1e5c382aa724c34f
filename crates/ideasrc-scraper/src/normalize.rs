use ideasrc_core::RawScrapeRecord;
use serde_json::Value;

use crate::types::{HnFeed, HnItem};

const TITLE_PREFIXES: [(&str, &str); 3] = [
    ("ask hn", "Ask HN"),
    ("show hn", "Show HN"),
    ("tell hn", "Tell HN"),
];

/// Convert a live item into a scrape record.
///
/// Returns `None` for deleted or dead items and for items without a
/// non-blank title. `raw` is the untouched API payload and is kept for the
/// metrics adapter.
#[must_use]
pub fn item_to_record(item: &HnItem, feed: HnFeed, raw: Value) -> Option<RawScrapeRecord> {
    if !item.is_live() {
        return None;
    }
    let title = item.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;

    Some(RawScrapeRecord {
        source: feed.source(),
        source_id: item.id.to_string(),
        title: title.to_string(),
        description: item.text.clone().filter(|t| !t.trim().is_empty()),
        tags: build_tags(item, feed, title),
        raw,
    })
}

fn build_tags(item: &HnItem, feed: HnFeed, title: &str) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(kind) = item.kind.as_deref().filter(|k| !k.is_empty()) {
        tags.push(kind.to_string());
    }
    tags.push(feed.tag().to_string());
    if let Some(domain) = item.url.as_deref().and_then(domain_of) {
        tags.push(domain);
    }
    let lowered = title.to_ascii_lowercase();
    if let Some((_, label)) = TITLE_PREFIXES
        .iter()
        .find(|(prefix, _)| lowered.starts_with(prefix))
    {
        tags.push((*label).to_string());
    }
    tags
}

/// Host of `url` without a leading `www.`.
pub(crate) fn domain_of(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    (!host.is_empty()).then(|| host.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
