//! # HTTP Feed Retrieval
//!
//! A single-attempt GET client for JSON feeds. The client validates the
//! endpoint string before any I/O, enforces fixed connect/read timeouts and
//! treats every status other than exactly 200 as a failure.
//!
//! The network call sits behind [`Transport`] so the URL and status policy
//! in [`FeedClient`] can be exercised without a socket.

use crate::errors::QuakeError;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Time allowed to establish the TCP/TLS connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
/// Time allowed for each read once connected.
pub const READ_TIMEOUT: Duration = Duration::from_millis(10_000);
/// The only status accepted as success. 201, 204 and friends are failures.
pub const EXPECTED_STATUS: u16 = 200;

/// Status and body of one GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// The numeric HTTP status code.
    pub status: u16,
    /// The UTF-8 decoded body. `None` when the status was not [`EXPECTED_STATUS`].
    pub body: Option<String>,
}

/// # Transport
///
/// Performs exactly one GET for an already validated URL.
///
/// Implementations read the body only when the status is [`EXPECTED_STATUS`],
/// and must release the connection on every exit path.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues the request. I/O failures map to [`QuakeError::Network`].
    async fn get(&self, url: &Url) -> Result<TransportResponse, QuakeError>;
}

/// # Reqwest Transport
///
/// The production [`Transport`], configured with [`CONNECT_TIMEOUT`] and
/// [`READ_TIMEOUT`]. No retry middleware: one attempt per call.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds the underlying `reqwest::Client`.
    ///
    /// # Errors
    /// Returns [`QuakeError::Network`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, QuakeError> {
        let inner = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .user_agent(concat!("lib_quake/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(QuakeError::network)?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, QuakeError> {
        let response = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(QuakeError::network)?;
        let status = response.status().as_u16();

        if status != EXPECTED_STATUS {
            // Dropping the response here closes it without draining the body.
            return Ok(TransportResponse { status, body: None });
        }

        let bytes = response.bytes().await.map_err(QuakeError::network)?;
        Ok(TransportResponse {
            status,
            body: Some(String::from_utf8_lossy(&bytes).into_owned()),
        })
    }
}

/// # Feed Client
///
/// Turns an endpoint string into a response body.
///
/// Holds no mutable state; one client can serve concurrent fetches for
/// different URLs.
#[derive(Debug, Clone)]
pub struct FeedClient<T = ReqwestTransport> {
    transport: T,
}

impl FeedClient<ReqwestTransport> {
    /// Creates a client backed by [`ReqwestTransport`].
    ///
    /// # Errors
    /// Propagates the transport construction error.
    pub fn new() -> Result<Self, QuakeError> {
        Ok(Self::with_transport(ReqwestTransport::new()?))
    }
}

impl<T: Transport> FeedClient<T> {
    /// Creates a client on top of a custom transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// The transport this client sends through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the feed body at `url`.
    ///
    /// ## Logic:
    /// 1. `url` must parse as an absolute http(s) URL, otherwise
    ///    [`QuakeError::InvalidUrl`] is returned before any network I/O.
    /// 2. One GET is sent through the transport.
    /// 3. Any status other than 200 yields [`QuakeError::HttpStatus`].
    /// 4. The body has its line terminators removed (see [`join_lines`]).
    ///
    /// # Errors
    /// `InvalidUrl`, `Network` or `HttpStatus`; never `MalformedFeed`.
    pub async fn fetch(&self, url: &str) -> Result<String, QuakeError> {
        let url = parse_feed_url(url)?;
        debug!(url = %url, "requesting feed");

        let response = self.transport.get(&url).await?;
        if response.status != EXPECTED_STATUS {
            return Err(QuakeError::HttpStatus(response.status));
        }

        let body = join_lines(response.body.as_deref().unwrap_or_default());
        debug!(url = %url, bytes = body.len(), "feed received");
        Ok(body)
    }
}

/// Parses an endpoint string, accepting only absolute `http`/`https` URLs.
///
/// # Errors
/// [`QuakeError::InvalidUrl`] for empty, relative or non-http input.
pub fn parse_feed_url(raw: &str) -> Result<Url, QuakeError> {
    let url = Url::parse(raw).map_err(|e| QuakeError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(QuakeError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

/// Concatenates the lines of `text` without any separator.
///
/// `\n`, `\r\n` and a lone `\r` all count as line terminators and are dropped.
pub fn join_lines(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}
