//! Hacker News API source adapter
//!
//! Fetches the newest-stories listing, then resolves each story with its
//! own lookup. The public API has no bulk item endpoint, so a run costs
//! N+1 requests with a fixed pacing delay between the per-item lookups.

use std::time::Duration;

use async_trait::async_trait;
use news_digest_domain::{Item, ItemOutcome, ItemSource, SourceError};
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com";
const STORY_PERMALINK: &str = "https://news.ycombinator.com/item?id=";
const DEFAULT_ITEM_DELAY: Duration = Duration::from_millis(150);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Item source backed by the Hacker News newest-stories API
pub struct HnItemSource {
    client: Client,
    base_url: String,
    item_delay: Duration,
}

impl HnItemSource {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url,
            item_delay: DEFAULT_ITEM_DELAY,
        }
    }

    /// Override the pacing delay between per-item lookups
    pub fn with_item_delay(mut self, item_delay: Duration) -> Self {
        self.item_delay = item_delay;
        self
    }

    /// Fetch the newest story ids, newest first
    async fn fetch_newest_ids(&self, limit: usize) -> Result<Vec<u64>, SourceError> {
        let url = format!("{}/v0/newstories.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let mut ids: Vec<u64> = response
            .json()
            .await
            .map_err(|e| SourceError::Payload(e.to_string()))?;
        ids.truncate(limit);

        Ok(ids)
    }

    /// Resolve one story id to a normalized item
    ///
    /// Stories without a title are malformed and drop silently; stories
    /// without a link fall back to the public permalink for the id. The
    /// item endpoint returns `null` for unknown ids.
    async fn resolve_item(&self, id: u64) -> ItemOutcome<u64> {
        let url = format!("{}/v0/item/{}.json", self.base_url, id);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return ItemOutcome::Failed(e.to_string()),
        };

        if !response.status().is_success() {
            return ItemOutcome::Failed(format!("unexpected status {}", response.status()));
        }

        let story: Option<HnStory> = match response.json().await {
            Ok(story) => story,
            Err(e) => return ItemOutcome::Failed(e.to_string()),
        };

        let Some(story) = story else {
            return ItemOutcome::Malformed;
        };
        let Some(title) = story.title.filter(|t| !t.is_empty()) else {
            return ItemOutcome::Malformed;
        };

        let url = story
            .url
            .unwrap_or_else(|| format!("{STORY_PERMALINK}{id}"));

        ItemOutcome::Resolved(Item { id, title, url })
    }
}

impl Default for HnItemSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct HnStory {
    title: Option<String>,
    url: Option<String>,
}

#[async_trait]
impl ItemSource for HnItemSource {
    type Id = u64;

    fn name(&self) -> &'static str {
        "hn"
    }

    async fn fetch(&self, limit: usize) -> Result<Vec<Item<u64>>, SourceError> {
        let ids = self.fetch_newest_ids(limit).await?;

        tracing::info!(count = ids.len(), "Fetched newest story ids");

        let mut items = Vec::new();
        for (index, id) in ids.into_iter().enumerate() {
            if index > 0 && !self.item_delay.is_zero() {
                // Pacing between lookups; not a retry or backoff mechanism
                tokio::time::sleep(self.item_delay).await;
            }

            match self.resolve_item(id).await {
                ItemOutcome::Resolved(item) => items.push(item),
                ItemOutcome::Malformed => {
                    tracing::debug!(id = id, "Story lacks a title, dropping");
                }
                ItemOutcome::Failed(cause) => {
                    tracing::warn!(id = id, cause = %cause, "Skipping story after failed lookup");
                }
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HnItemSource {
        HnItemSource::with_base_url(server.uri()).with_item_delay(Duration::ZERO)
    }

    async fn mock_newest(server: &MockServer, ids: &[u64]) {
        Mock::given(method("GET"))
            .and(path("/v0/newstories.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ids))
            .mount(server)
            .await;
    }

    async fn mock_item(server: &MockServer, id: u64, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/v0/item/{id}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_resolves_stories_in_listing_order() {
        let server = MockServer::start().await;
        mock_newest(&server, &[101, 102]).await;
        mock_item(
            &server,
            101,
            serde_json::json!({"id": 101, "title": "First story", "url": "https://example.com/first"}),
        )
        .await;
        mock_item(
            &server,
            102,
            serde_json::json!({"id": 102, "title": "Second story", "url": "https://example.com/second"}),
        )
        .await;

        let items = source_for(&server).fetch(30).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 101);
        assert_eq!(items[0].title, "First story");
        assert_eq!(items[1].id, 102);
    }

    #[tokio::test]
    async fn test_fetch_respects_limit() {
        let server = MockServer::start().await;
        mock_newest(&server, &[101, 102, 103]).await;
        mock_item(
            &server,
            101,
            serde_json::json!({"id": 101, "title": "Only story", "url": "https://example.com/only"}),
        )
        .await;

        let items = source_for(&server).fetch(1).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 101);
    }

    #[tokio::test]
    async fn test_failed_lookup_skips_only_that_story() {
        let server = MockServer::start().await;
        mock_newest(&server, &[101, 102]).await;
        Mock::given(method("GET"))
            .and(path("/v0/item/101.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mock_item(
            &server,
            102,
            serde_json::json!({"id": 102, "title": "Surviving story", "url": "https://example.com/ok"}),
        )
        .await;

        let items = source_for(&server).fetch(30).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 102);
    }

    #[tokio::test]
    async fn test_story_without_title_is_dropped() {
        let server = MockServer::start().await;
        mock_newest(&server, &[101, 102]).await;
        mock_item(
            &server,
            101,
            serde_json::json!({"id": 101, "url": "https://example.com/untitled"}),
        )
        .await;
        mock_item(
            &server,
            102,
            serde_json::json!({"id": 102, "title": "Titled story", "url": "https://example.com/titled"}),
        )
        .await;

        let items = source_for(&server).fetch(30).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 102);
    }

    #[tokio::test]
    async fn test_null_item_payload_is_dropped() {
        let server = MockServer::start().await;
        mock_newest(&server, &[101]).await;
        mock_item(&server, 101, serde_json::Value::Null).await;

        let items = source_for(&server).fetch(30).await.unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_story_without_url_falls_back_to_permalink() {
        let server = MockServer::start().await;
        mock_newest(&server, &[101]).await;
        mock_item(&server, 101, serde_json::json!({"id": 101, "title": "Ask HN: anything?"})).await;

        let items = source_for(&server).fetch(30).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://news.ycombinator.com/item?id=101");
    }

    #[tokio::test]
    async fn test_failed_listing_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v0/newstories.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = source_for(&server).fetch(30).await;

        assert!(matches!(result, Err(SourceError::Status { status: 503, .. })));
    }
}
