//! Alerts feed source adapter
//!
//! One round trip: the feed document already carries titles and links, so
//! there is no per-item resolution and no pacing delay. Entry identity is
//! the entry link.

use std::time::Duration;

use async_trait::async_trait;
use news_digest_domain::{Item, ItemSource, SourceError};
use reqwest::Client;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Item source backed by an RSS/Atom alerts feed
pub struct AlertsFeedSource {
    client: Client,
    feed_url: String,
}

impl AlertsFeedSource {
    pub fn new(feed_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, feed_url }
    }
}

#[async_trait]
impl ItemSource for AlertsFeedSource {
    type Id = String;

    fn name(&self) -> &'static str {
        "alerts"
    }

    async fn fetch(&self, limit: usize) -> Result<Vec<Item<String>>, SourceError> {
        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
                url: self.feed_url.clone(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let feed = feed_rs::parser::parse(body.as_ref())
            .map_err(|e| SourceError::Payload(e.to_string()))?;

        let mut items = Vec::new();
        for entry in feed.entries {
            if items.len() == limit {
                break;
            }

            let title = entry.title.map(|t| t.content).filter(|t| !t.is_empty());
            let link = entry.links.first().map(|l| l.href.clone());

            // Entries missing either field are data-quality noise
            let (Some(title), Some(link)) = (title, link) else {
                continue;
            };

            items.push(Item {
                id: link.clone(),
                title,
                url: link,
            });
        }

        tracing::info!(count = items.len(), "Fetched feed entries");

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Business alerts</title>
    <item>
      <title>Funding round closes</title>
      <link>https://alerts.example.com/funding</link>
    </item>
    <item>
      <title>Merger announced</title>
      <link>https://alerts.example.com/merger</link>
    </item>
    <item>
      <title>Entry without a link</title>
    </item>
  </channel>
</rss>"#;

    async fn mock_feed(server: &MockServer, body: &str) {
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(body.to_string(), "application/rss+xml"),
            )
            .mount(server)
            .await;
    }

    fn source_for(server: &MockServer) -> AlertsFeedSource {
        AlertsFeedSource::new(format!("{}/feed", server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_parses_entries_in_feed_order() {
        let server = MockServer::start().await;
        mock_feed(&server, FEED_BODY).await;

        let items = source_for(&server).fetch(30).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Funding round closes");
        assert_eq!(items[0].url, "https://alerts.example.com/funding");
        assert_eq!(items[0].id, items[0].url);
        assert_eq!(items[1].title, "Merger announced");
    }

    #[tokio::test]
    async fn test_entries_missing_a_link_are_dropped() {
        let server = MockServer::start().await;
        mock_feed(&server, FEED_BODY).await;

        let items = source_for(&server).fetch(30).await.unwrap();

        assert!(items.iter().all(|item| item.title != "Entry without a link"));
    }

    #[tokio::test]
    async fn test_fetch_respects_limit() {
        let server = MockServer::start().await;
        mock_feed(&server, FEED_BODY).await;

        let items = source_for(&server).fetch(1).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Funding round closes");
    }

    #[tokio::test]
    async fn test_failed_fetch_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let result = source_for(&server).fetch(30).await;

        assert!(matches!(result, Err(SourceError::Status { status: 502, .. })));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_fatal() {
        let server = MockServer::start().await;
        mock_feed(&server, "this is not a feed").await;

        let result = source_for(&server).fetch(30).await;

        assert!(matches!(result, Err(SourceError::Payload(_))));
    }
}
