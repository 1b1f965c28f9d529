//! # Feed Decoder
//!
//! Maps a GeoJSON feed body onto [`Earthquake`] records.
//!
//! Only four keys per feature are read: `properties.mag`, `properties.place`,
//! `properties.time` and `properties.url`. Everything else is ignored.
//!
//! A single bad feature spoils the whole body: the strict entry point reports
//! [`QuakeError::MalformedFeed`], the fail-soft one logs it and returns no
//! records at all. Absent or empty input is not an error and yields an empty
//! list.

use super::record::Earthquake;
use crate::errors::QuakeError;
use serde::Deserialize;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
struct FeedDocument {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    mag: f64,
    place: String,
    time: i64,
    url: String,
}

impl From<Properties> for Earthquake {
    fn from(p: Properties) -> Self {
        Earthquake::new(p.mag, p.place, p.time, p.url)
    }
}

/// Decodes a feed body, reporting the first schema violation.
///
/// Records keep the order of the `features` array. An empty string decodes
/// to an empty list.
///
/// # Errors
/// [`QuakeError::MalformedFeed`] when the body is not a JSON object with a
/// `features` array, or when any feature lacks a well-typed field.
pub fn try_decode(raw: &str) -> Result<Vec<Earthquake>, QuakeError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let document: FeedDocument =
        serde_json::from_str(raw).map_err(|e| QuakeError::MalformedFeed(e.to_string()))?;

    Ok(document.features.into_iter().map(|f| f.properties.into()).collect())
}

/// Decodes a feed body without ever failing.
///
/// `None`, an empty body and a malformed body all yield an empty list; the
/// malformed case is logged at error level.
pub fn decode(raw: Option<&str>) -> Vec<Earthquake> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match try_decode(raw) {
        Ok(records) => {
            debug!(count = records.len(), "feed decoded");
            records
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Problem parsing the earthquake JSON results");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(mag: serde_json::Value, place: &str, time: i64) -> serde_json::Value {
        json!({
            "type": "Feature",
            "properties": {
                "mag": mag,
                "place": place,
                "time": time,
                "url": format!("https://earthquake.usgs.gov/earthquakes/eventpage/{time}"),
                "tsunami": 0
            },
            "geometry": { "type": "Point", "coordinates": [141.8, 44.3, 10.0] }
        })
    }

    fn feed(features: Vec<serde_json::Value>) -> String {
        json!({ "type": "FeatureCollection", "metadata": { "count": features.len() }, "features": features })
            .to_string()
    }

    #[test]
    fn decodes_every_feature_in_order() {
        let body = feed(vec![
            feature(json!(7.2), "74km NW of Rumoi, Japan", 1_454_124_312_220),
            feature(json!(6.1), "94km SSE of Taron, Papua New Guinea", 1_453_777_820_750),
            feature(json!(4), "Northern California", 1_453_631_556_300),
        ]);

        let records = decode(Some(&body));

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].magnitude(), 7.2);
        assert_eq!(records[0].location(), "74km NW of Rumoi, Japan");
        assert_eq!(records[0].time_millis(), 1_454_124_312_220);
        assert_eq!(
            records[0].detail_url(),
            "https://earthquake.usgs.gov/earthquakes/eventpage/1454124312220"
        );
        assert_eq!(records[1].location(), "94km SSE of Taron, Papua New Guinea");
        // Integer magnitudes widen to f64.
        assert_eq!(records[2].magnitude(), 4.0);
    }

    #[test]
    fn absent_or_empty_input_is_an_empty_list() {
        assert!(decode(None).is_empty());
        assert!(decode(Some("")).is_empty());
        assert!(try_decode("").unwrap().is_empty());
    }

    #[test]
    fn empty_features_array_is_an_empty_list() {
        assert!(try_decode(&feed(vec![])).unwrap().is_empty());
    }

    #[test]
    fn one_bad_feature_discards_the_whole_feed() {
        let body = feed(vec![
            feature(json!(5.0), "A", 1),
            feature(json!(5.1), "B", 2),
            feature(json!("strong"), "C", 3),
            feature(json!(5.3), "D", 4),
            feature(json!(5.4), "E", 5),
        ]);

        assert!(decode(Some(&body)).is_empty());
        assert!(matches!(try_decode(&body), Err(QuakeError::MalformedFeed(_))));
    }

    #[test]
    fn null_magnitude_is_malformed() {
        let body = feed(vec![feature(serde_json::Value::Null, "Somewhere", 1)]);
        assert!(matches!(try_decode(&body), Err(QuakeError::MalformedFeed(_))));
    }

    #[test]
    fn missing_keys_are_malformed() {
        let no_features = json!({ "type": "FeatureCollection" }).to_string();
        let no_properties = json!({ "features": [ { "type": "Feature" } ] }).to_string();
        let no_url = json!({ "features": [ { "properties": { "mag": 1.0, "place": "X", "time": 1 } } ] }).to_string();

        for body in [no_features, no_properties, no_url] {
            assert!(matches!(try_decode(&body), Err(QuakeError::MalformedFeed(_))), "{body}");
            assert!(decode(Some(&body)).is_empty());
        }
    }

    #[test]
    fn non_object_documents_are_malformed() {
        for body in ["[]", "null", "42", "{not json", "   "] {
            assert!(matches!(try_decode(body), Err(QuakeError::MalformedFeed(_))), "{body}");
        }
    }

    #[test]
    fn fractional_time_is_malformed() {
        let body = json!({ "features": [ { "properties": { "mag": 1.0, "place": "X", "time": 1.5, "url": "u" } } ] })
            .to_string();
        assert!(matches!(try_decode(&body), Err(QuakeError::MalformedFeed(_))));
    }

    #[test]
    fn negative_values_pass_through() {
        let body = json!({ "features": [ { "properties": { "mag": -0.8, "place": "Deep", "time": -1000, "url": "not a url" } } ] })
            .to_string();
        let records = try_decode(&body).unwrap();
        assert_eq!(records[0].magnitude(), -0.8);
        assert_eq!(records[0].time_millis(), -1000);
        assert_eq!(records[0].detail_url(), "not a url");
    }
}
