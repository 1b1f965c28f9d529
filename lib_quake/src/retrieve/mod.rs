//! # Data Retrieval Module
//!
//! This module provides the HTTP side of the feed pipeline: turning an
//! endpoint string into a response body, or into a tagged [`QuakeError`].
//!
//! ## Contained Modules:
//!
//! - **`feed_http`**: `FeedClient`, a single-attempt GET client built on
//!   `reqwest` with fixed connect and read timeouts. The network call sits
//!   behind the `Transport` trait so callers and tests can swap it out.
//!
//! [`QuakeError`]: crate::QuakeError

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Single-attempt HTTP feed client with fixed timeouts and the exact-200 status policy.
pub mod feed_http;

pub use feed_http::{
    join_lines, parse_feed_url, FeedClient, ReqwestTransport, Transport, TransportResponse,
    CONNECT_TIMEOUT, EXPECTED_STATUS, READ_TIMEOUT,
};
