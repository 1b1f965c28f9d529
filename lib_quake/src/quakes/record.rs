use serde::Serialize;

/// # Earthquake
///
/// One seismic event as decoded from the feed. Created by the decoder and
/// never mutated afterwards; equality is by value.
///
/// No range checks are applied: magnitudes may be negative or above 10, the
/// timestamp may be negative, and the detail URL is passed through unparsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Earthquake {
    magnitude: f64,
    location: String,
    time_millis: i64,
    detail_url: String,
}

impl Earthquake {
    pub(crate) fn new(magnitude: f64, location: String, time_millis: i64, detail_url: String) -> Self {
        Self {
            magnitude,
            location,
            time_millis,
            detail_url,
        }
    }

    /// The event magnitude.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Free-text place, e.g. `"74km NW of Rumoi, Japan"`.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Origin time as Unix epoch milliseconds.
    pub fn time_millis(&self) -> i64 {
        self.time_millis
    }

    /// Page with more information about the event.
    pub fn detail_url(&self) -> &str {
        &self.detail_url
    }
}
