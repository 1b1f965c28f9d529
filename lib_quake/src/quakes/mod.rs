//! # Earthquake Feed Module
//!
//! Everything specific to the USGS earthquake feed, on top of the generic
//! `retrieve` client.
//!
//! ## Contained Modules:
//!
//! - **`record`**: the immutable [`Earthquake`] value.
//! - **`decoder`**: GeoJSON body to records, strict and fail-soft.
//! - **`query`**: FDSN query URL construction from caller filters.
//! - **`presentation`**: severity bucket, location split, date/time and
//!   magnitude text.
//! - **`service`**: [`QuakeService`], fetch plus decode in one call.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

/// GeoJSON decoding into earthquake records.
pub mod decoder;
/// Pure display rules for a record.
pub mod presentation;
/// USGS query URL construction.
pub mod query;
/// The earthquake record type.
pub mod record;
/// Fetch-and-decode facade.
pub mod service;

pub use decoder::{decode, try_decode};
pub use presentation::{
    format_date, format_magnitude, format_time, split_location, LocationParts, Presentation,
    SeverityBucket, LOCATION_SEPARATOR, NEAR_THE,
};
pub use query::{FeedQuery, OrderBy, USGS_QUERY_URL};
pub use record::Earthquake;
pub use service::QuakeService;
