//! # Earthquake Feed Service
//!
//! Ties URL validation, the HTTP fetch and the decoder together.
//!
//! ## Logic:
//! 1. [`FeedClient::fetch`] validates the URL and performs one GET.
//! 2. The body goes through the strict decoder.
//! 3. Either the records or the first [`QuakeError`] come back. The
//!    `_or_empty` variants log that error and return an empty list instead,
//!    so a host can always render "no results" without branching.

use super::decoder::try_decode;
use super::query::FeedQuery;
use super::record::Earthquake;
use crate::errors::QuakeError;
use crate::retrieve::{FeedClient, ReqwestTransport, Transport};
use tracing::{error, info};

/// # Quake Service
///
/// Stateless facade over a [`FeedClient`]. Shareable across tasks.
#[derive(Debug, Clone)]
pub struct QuakeService<T = ReqwestTransport> {
    client: FeedClient<T>,
}

impl QuakeService<ReqwestTransport> {
    /// Creates a service on the production HTTP transport.
    ///
    /// # Errors
    /// Propagates [`FeedClient::new`] failures.
    pub fn new() -> Result<Self, QuakeError> {
        Ok(Self::with_client(FeedClient::new()?))
    }
}

impl<T: Transport> QuakeService<T> {
    /// Wraps an existing client.
    pub fn with_client(client: FeedClient<T>) -> Self {
        Self { client }
    }

    /// The client this service fetches through.
    pub fn client(&self) -> &FeedClient<T> {
        &self.client
    }

    /// Fetches and decodes the feed at `url`.
    ///
    /// # Errors
    /// Any of the four [`QuakeError`] kinds.
    pub async fn fetch_earthquakes(&self, url: &str) -> Result<Vec<Earthquake>, QuakeError> {
        let body = self.client.fetch(url).await?;
        let records = try_decode(&body)?;
        info!(url, count = records.len(), "earthquake feed loaded");
        Ok(records)
    }

    /// Like [`fetch_earthquakes`](Self::fetch_earthquakes), but logs any
    /// failure and returns an empty list.
    pub async fn fetch_earthquakes_or_empty(&self, url: &str) -> Vec<Earthquake> {
        self.fetch_earthquakes(url)
            .await
            .unwrap_or_else(|e| log_failure(url, &e))
    }

    /// Builds the URL from `query`, then fetches and decodes it.
    ///
    /// # Errors
    /// Any of the four [`QuakeError`] kinds.
    pub async fn query(&self, query: &FeedQuery) -> Result<Vec<Earthquake>, QuakeError> {
        let url = query.to_url()?;
        self.fetch_earthquakes(url.as_str()).await
    }

    /// Fail-soft counterpart of [`query`](Self::query).
    pub async fn query_or_empty(&self, query: &FeedQuery) -> Vec<Earthquake> {
        match query.to_url() {
            Ok(url) => self.fetch_earthquakes_or_empty(url.as_str()).await,
            Err(e) => log_failure(&query.base_url, &e),
        }
    }
}

fn log_failure(url: &str, e: &QuakeError) -> Vec<Earthquake> {
    match e {
        QuakeError::InvalidUrl { .. } => error!(url, kind = e.kind(), error = %e, "Problem building the URL"),
        QuakeError::Network { .. } => {
            error!(url, kind = e.kind(), error = %e, "Problem retrieving the earthquake JSON results")
        }
        QuakeError::HttpStatus(status) => error!(url, kind = e.kind(), status, "Error response code"),
        QuakeError::MalformedFeed(_) => {
            error!(url, kind = e.kind(), error = %e, "Problem parsing the earthquake JSON results")
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieve::TransportResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use url::Url;

    /// Records every URL it is asked for and answers with a fixed response.
    struct Recorder {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn get(&self, url: &Url) -> Result<TransportResponse, QuakeError> {
            self.seen.lock().unwrap().push(url.to_string());
            Ok(TransportResponse {
                status: self.status,
                body: Some(self.body.to_string()),
            })
        }
    }

    fn service(status: u16, body: &'static str) -> QuakeService<Recorder> {
        QuakeService::with_client(FeedClient::with_transport(Recorder::new(status, body)))
    }

    const TWO_QUAKES: &str = r#"{
        "features": [
            {"properties": {"mag": 6.6, "place": "88km N of Yelizovo, Russia", "time": 1454124312220, "url": "https://example.com/a"}},
            {"properties": {"mag": 6.7, "place": "Pacific-Antarctic Ridge", "time": 1453777820750, "url": "https://example.com/b"}}
        ]
    }"#;

    #[tokio::test]
    async fn fetch_decodes_the_body() {
        let records = service(200, TWO_QUAKES)
            .fetch_earthquakes("https://example.com/feed")
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].location(), "Pacific-Antarctic Ridge");
    }

    #[tokio::test]
    async fn http_404_yields_status_and_no_records() {
        let svc = service(404, "Not Found");
        assert!(matches!(
            svc.fetch_earthquakes("https://example.com/feed").await,
            Err(QuakeError::HttpStatus(404))
        ));
        assert!(svc.fetch_earthquakes_or_empty("https://example.com/feed").await.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_tagged() {
        let svc = service(200, r#"{"features": [{"properties": {"mag": "big"}}]}"#);
        assert!(matches!(
            svc.fetch_earthquakes("https://example.com/feed").await,
            Err(QuakeError::MalformedFeed(_))
        ));
        assert!(svc.fetch_earthquakes_or_empty("https://example.com/feed").await.is_empty());
    }

    #[tokio::test]
    async fn invalid_url_is_not_sent() {
        let svc = service(200, TWO_QUAKES);
        assert!(svc.fetch_earthquakes_or_empty("").await.is_empty());
        assert!(svc.client().transport().seen().is_empty());
    }

    #[tokio::test]
    async fn query_sends_the_built_url() {
        let svc = service(200, TWO_QUAKES);
        let query = FeedQuery {
            min_magnitude: 5.0,
            limit: 2,
            ..FeedQuery::default()
        };

        let records = svc.query(&query).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            svc.client().transport().seen(),
            ["https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson&orderby=time&minmag=5&limit=2"]
        );
    }

    #[tokio::test]
    async fn query_with_bad_base_is_empty() {
        let svc = service(200, TWO_QUAKES);
        let query = FeedQuery {
            base_url: "nowhere".into(),
            ..FeedQuery::default()
        };
        assert!(svc.query_or_empty(&query).await.is_empty());
        assert!(svc.client().transport().seen().is_empty());
    }
}
