use std::time::Duration;

use ideasrc_core::RawScrapeRecord;
use reqwest::Client;
use serde_json::Value;

use crate::error::ScraperError;
use crate::normalize::item_to_record;
use crate::types::{HnFeed, HnItem};

pub const DEFAULT_HN_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// HTTP client for the Hacker News Firebase API.
///
/// One request per call with a fixed timeout; there is no retry. Callers
/// that scrape a whole feed use [`HackerNewsClient::scrape`], which tolerates
/// per-item failures.
pub struct HackerNewsClient {
    client: Client,
    base_url: String,
}

impl HackerNewsClient {
    /// Creates a client against the public API.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        Self::with_base_url(DEFAULT_HN_API_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client against an arbitrary API root, e.g. a mock server.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, or [`ScraperError::Http`] if the client cannot
    /// be built.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get_json(&self, url: &str) -> Result<Value, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ScraperError::Deserialize {
            context: url.to_owned(),
            source,
        })
    }

    /// Ids of the current stories in `feed`, at most `limit` of them, in
    /// feed order.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ScraperError::Http`] on network or TLS failure.
    /// - [`ScraperError::Deserialize`] if the body is not a JSON array of ids.
    pub async fn story_ids(&self, feed: HnFeed, limit: usize) -> Result<Vec<u64>, ScraperError> {
        let url = self.url_for(&feed.endpoint());
        let value = self.get_json(&url).await?;
        let mut ids: Vec<u64> =
            serde_json::from_value(value).map_err(|source| ScraperError::Deserialize {
                context: url.clone(),
                source,
            })?;
        ids.truncate(limit);
        Ok(ids)
    }

    /// Raw JSON for one item. The API answers `null` for ids it does not
    /// know, which maps to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Same as [`HackerNewsClient::story_ids`].
    pub async fn fetch_item(&self, id: u64) -> Result<Option<Value>, ScraperError> {
        let url = self.url_for(&format!("item/{id}.json"));
        match self.get_json(&url).await? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    /// Fetch the top `limit` stories of `feed` as scrape records.
    ///
    /// Items are fetched one at a time. Missing, deleted, dead and untitled
    /// items are skipped, as is any item whose request or decoding fails;
    /// those failures are logged and do not abort the scrape.
    ///
    /// # Errors
    ///
    /// Only a failure to fetch the feed's id list is returned.
    pub async fn scrape(
        &self,
        feed: HnFeed,
        limit: usize,
    ) -> Result<Vec<RawScrapeRecord>, ScraperError> {
        let ids = self.story_ids(feed, limit).await?;
        tracing::info!(feed = %feed, count = ids.len(), "fetched story ids");

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            let raw = match self.fetch_item(id).await {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    tracing::debug!(id, "item not found, skipping");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "failed to fetch item, skipping");
                    continue;
                }
            };

            let item: HnItem = match serde_json::from_value(raw.clone()) {
                Ok(item) => item,
                Err(e) => {
                    tracing::warn!(id, error = %e, "malformed item, skipping");
                    continue;
                }
            };

            match item_to_record(&item, feed, raw) {
                Some(record) => records.push(record),
                None => tracing::debug!(id, "deleted, dead or untitled item, skipping"),
            }
        }

        tracing::info!(feed = %feed, collected = records.len(), "scrape finished");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = HackerNewsClient::with_base_url("http://localhost:1/v0/", 5, "t").unwrap();
        assert_eq!(
            client.url_for("item/1.json"),
            "http://localhost:1/v0/item/1.json"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HackerNewsClient::with_base_url("not-a-url", 5, "t")
            .err()
            .expect("expected error");
        assert!(matches!(err, ScraperError::InvalidBaseUrl { .. }));

        let err = HackerNewsClient::with_base_url("ftp://example.com", 5, "t")
            .err()
            .expect("expected error");
        assert!(matches!(err, ScraperError::InvalidBaseUrl { .. }));
    }
}
