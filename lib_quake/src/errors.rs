//! # Feed Errors
//!
//! The four ways a feed request can fail. None of them are raised past the
//! library: callers either match on the variant or use one of the
//! `*_or_empty` helpers, which log it and hand back an empty list.

use thiserror::Error;

/// Boxed underlying cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
/// # Quake Error
///
/// Tagged failure returned by the fetch and decode stages.
pub enum QuakeError {
    /// The endpoint string is not an absolute http(s) URL. No request was made.
    #[error("invalid feed URL {url:?}: {reason}")]
    InvalidUrl {
        /// The rejected input, verbatim.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Connect, timeout, DNS or read failure while talking to the endpoint.
    #[error("network error: {source}")]
    Network {
        /// The transport error that ended the request.
        #[source]
        source: BoxError,
    },

    /// A response arrived but its status was not exactly 200.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The body did not match the feed schema.
    #[error("malformed feed: {0}")]
    MalformedFeed(String),
}

impl QuakeError {
    /// Wraps any transport error as [`QuakeError::Network`].
    pub fn network<E>(source: E) -> Self
    where
        E: Into<BoxError>,
    {
        QuakeError::Network {
            source: source.into(),
        }
    }

    /// Short, stable name of the error kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            QuakeError::InvalidUrl { .. } => "invalid_url",
            QuakeError::Network { .. } => "network",
            QuakeError::HttpStatus(_) => "http_status",
            QuakeError::MalformedFeed(_) => "malformed_feed",
        }
    }
}
