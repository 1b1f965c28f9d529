//! # lib_quake
//!
//! Retrieval and presentation of the USGS earthquake feed.
//!
//! The pipeline is split the same way across feature-gated folders:
//!
//! - **`retrieve`**: single-attempt HTTP client with fixed timeouts.
//! - **`quakes`**: earthquake records, feed decoding, query URLs and the
//!   presentation rules applied when rendering a record.
//! - **`loggers`**: `tracing` subscriber setup for binaries.
//! - **`configs`**: layered run configuration.
//!
//! Errors from every stage share the [`QuakeError`] taxonomy.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

pub mod errors;

#[cfg(feature = "configs")]
pub mod configs;
#[cfg(feature = "loggers")]
pub mod loggers;
#[cfg(feature = "quakes")]
pub mod quakes;
#[cfg(feature = "retrieve")]
pub mod retrieve;

pub use errors::QuakeError;
