//! # USGS Feed Query
//!
//! Builds the FDSN event query URL from caller-supplied filters.

use crate::errors::QuakeError;
use crate::retrieve::parse_feed_url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// USGS FDSN event service endpoint.
pub const USGS_QUERY_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Sort order understood by the endpoint's `orderby` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderBy {
    /// Most recent first.
    #[default]
    Time,
    /// Oldest first.
    TimeAsc,
    /// Strongest first.
    Magnitude,
    /// Weakest first.
    MagnitudeAsc,
}

impl OrderBy {
    /// The query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderBy::Time => "time",
            OrderBy::TimeAsc => "time-asc",
            OrderBy::Magnitude => "magnitude",
            OrderBy::MagnitudeAsc => "magnitude-asc",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(OrderBy::Time),
            "time-asc" => Ok(OrderBy::TimeAsc),
            "magnitude" => Ok(OrderBy::Magnitude),
            "magnitude-asc" => Ok(OrderBy::MagnitudeAsc),
            other => Err(format!(
                "unknown order {other:?} (expected time, time-asc, magnitude or magnitude-asc)"
            )),
        }
    }
}

/// # Feed Query
///
/// Filters baked into the request URL. Defaults match the reference
/// deployment: the 10 most recent events of magnitude 6 or more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    /// FDSN event query endpoint the parameters are appended to.
    pub base_url: String,
    /// Sent as `minmag`.
    pub min_magnitude: f64,
    /// Sent as `limit`; the maximum number of events returned.
    pub limit: u32,
    /// Sent as `orderby`.
    pub order_by: OrderBy,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            base_url: USGS_QUERY_URL.to_string(),
            min_magnitude: 6.0,
            limit: 10,
            order_by: OrderBy::Time,
        }
    }
}

impl FeedQuery {
    /// Appends `format`, `orderby`, `minmag` and `limit` to the base URL.
    ///
    /// Existing query pairs on the base are kept.
    ///
    /// # Errors
    /// [`QuakeError::InvalidUrl`] when the base is not an absolute http(s) URL.
    pub fn to_url(&self) -> Result<Url, QuakeError> {
        let mut url = parse_feed_url(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("format", "geojson")
            .append_pair("orderby", self.order_by.as_str())
            .append_pair("minmag", &self.min_magnitude.to_string())
            .append_pair("limit", &self.limit.to_string());
        Ok(url)
    }
}
