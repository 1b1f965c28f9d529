//! # Presentation Rules
//!
//! Pure functions deriving display attributes from an [`Earthquake`]:
//! severity bucket, one-decimal magnitude text, location split and
//! date/time strings. Nothing here performs I/O or fails; NaN magnitudes and
//! negative timestamps are formatted like any other value.
//!
//! Time zone and locale are always explicit parameters so output does not
//! depend on the host environment.

use super::record::Earthquake;
use chrono::{DateTime, Locale, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

/// Separator between a distance/direction prefix and the place name.
pub const LOCATION_SEPARATOR: &str = " of ";
/// Offset used when the location carries no distance/direction prefix.
pub const NEAR_THE: &str = "Near the";

const DATE_FORMAT: &str = "%b %-d, %Y";
const TIME_FORMAT: &str = "%-I:%M %p";

/// About 253,000 years either side of 1970, inside chrono's range in every zone.
const MAX_RENDERABLE_MILLIS: i64 = 8_000_000_000_000_000;

/// # Severity Bucket
///
/// Ordinal class selected from the floor of the magnitude. Everything below
/// 2 (including negative and NaN magnitudes) shares the first bucket; 10 and
/// above share the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SeverityBucket {
    Magnitude1,
    Magnitude2,
    Magnitude3,
    Magnitude4,
    Magnitude5,
    Magnitude6,
    Magnitude7,
    Magnitude8,
    Magnitude9,
    Magnitude10Plus,
}

impl SeverityBucket {
    /// Classifies a magnitude.
    pub fn from_magnitude(magnitude: f64) -> Self {
        // `as` saturates and maps NaN to 0.
        match magnitude.floor() as i64 {
            i64::MIN..=1 => SeverityBucket::Magnitude1,
            2 => SeverityBucket::Magnitude2,
            3 => SeverityBucket::Magnitude3,
            4 => SeverityBucket::Magnitude4,
            5 => SeverityBucket::Magnitude5,
            6 => SeverityBucket::Magnitude6,
            7 => SeverityBucket::Magnitude7,
            8 => SeverityBucket::Magnitude8,
            9 => SeverityBucket::Magnitude9,
            _ => SeverityBucket::Magnitude10Plus,
        }
    }

    /// Position in the scale, 1 through 10.
    pub fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    /// Short label: `"1"` .. `"9"`, then `"10+"`.
    pub fn label(self) -> &'static str {
        match self {
            SeverityBucket::Magnitude1 => "1",
            SeverityBucket::Magnitude2 => "2",
            SeverityBucket::Magnitude3 => "3",
            SeverityBucket::Magnitude4 => "4",
            SeverityBucket::Magnitude5 => "5",
            SeverityBucket::Magnitude6 => "6",
            SeverityBucket::Magnitude7 => "7",
            SeverityBucket::Magnitude8 => "8",
            SeverityBucket::Magnitude9 => "9",
            SeverityBucket::Magnitude10Plus => "10+",
        }
    }

    /// Display color for the magnitude badge, as `#RRGGBB`.
    pub fn color_hex(self) -> &'static str {
        match self {
            SeverityBucket::Magnitude1 => "#4A7BA7",
            SeverityBucket::Magnitude2 => "#04B4B3",
            SeverityBucket::Magnitude3 => "#10CAC9",
            SeverityBucket::Magnitude4 => "#F5A623",
            SeverityBucket::Magnitude5 => "#FF7D50",
            SeverityBucket::Magnitude6 => "#FC6644",
            SeverityBucket::Magnitude7 => "#E75F40",
            SeverityBucket::Magnitude8 => "#E13A20",
            SeverityBucket::Magnitude9 => "#D93218",
            SeverityBucket::Magnitude10Plus => "#C03823",
        }
    }
}

impl fmt::Display for SeverityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Magnitude with exactly one fractional digit: `3.2`, `10.0`, `0.0`.
pub fn format_magnitude(magnitude: f64) -> String {
    format!("{magnitude:.1}")
}

/// The two halves of a location string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationParts {
    /// Distance/direction prefix including the separator, e.g. `"74km NW of "`,
    /// or [`NEAR_THE`] when there is none.
    pub offset: String,
    /// The place name, e.g. `"Rumoi, Japan"`.
    pub primary: String,
}

/// Splits a location at the first [`LOCATION_SEPARATOR`].
pub fn split_location(location: &str) -> LocationParts {
    match location.split_once(LOCATION_SEPARATOR) {
        Some((prefix, rest)) => LocationParts {
            offset: format!("{prefix}{LOCATION_SEPARATOR}"),
            primary: rest.to_string(),
        },
        None => LocationParts {
            offset: NEAR_THE.to_string(),
            primary: location.to_string(),
        },
    }
}

fn instant(time_millis: i64) -> DateTime<Utc> {
    let clamped = time_millis.clamp(-MAX_RENDERABLE_MILLIS, MAX_RENDERABLE_MILLIS);
    DateTime::from_timestamp_millis(clamped).unwrap_or_default()
}

/// Renders the date part, e.g. `"Mar 3, 1984"`.
pub fn format_date<Z>(time_millis: i64, tz: &Z, locale: Locale) -> String
where
    Z: TimeZone,
    Z::Offset: fmt::Display,
{
    instant(time_millis)
        .with_timezone(tz)
        .format_localized(DATE_FORMAT, locale)
        .to_string()
}

/// Renders the 12-hour clock part, e.g. `"4:30 PM"`.
pub fn format_time<Z>(time_millis: i64, tz: &Z, locale: Locale) -> String
where
    Z: TimeZone,
    Z::Offset: fmt::Display,
{
    instant(time_millis)
        .with_timezone(tz)
        .format_localized(TIME_FORMAT, locale)
        .to_string()
}

/// # Presentation
///
/// Every derived attribute of one record, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// Magnitude with one fractional digit, e.g. `"7.2"`.
    pub magnitude: String,
    /// Severity class of the magnitude.
    pub severity: SeverityBucket,
    /// Hex colour of the severity class, e.g. `"#E75F40"`.
    pub color: &'static str,
    /// Distance/direction prefix including `" of "`, or `"Near the"`.
    pub location_offset: String,
    /// The place name after the prefix.
    pub primary_location: String,
    /// Event date in the requested zone, e.g. `"Mar 3, 1984"`.
    pub date: String,
    /// Event time of day in the requested zone, e.g. `"4:30 PM"`.
    pub time: String,
    /// Link to the event page.
    pub detail_url: String,
}

impl Presentation {
    /// Derives the presentation of `quake` in the given zone and locale.
    pub fn of<Z>(quake: &Earthquake, tz: &Z, locale: Locale) -> Self
    where
        Z: TimeZone,
        Z::Offset: fmt::Display,
    {
        let severity = SeverityBucket::from_magnitude(quake.magnitude());
        let LocationParts { offset, primary } = split_location(quake.location());
        Self {
            magnitude: format_magnitude(quake.magnitude()),
            severity,
            color: severity.color_hex(),
            location_offset: offset,
            primary_location: primary,
            date: format_date(quake.time_millis(), tz, locale),
            time: format_time(quake.time_millis(), tz, locale),
            detail_url: quake.detail_url().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{America::Los_Angeles, Asia::Tokyo};

    // 1984-03-03T16:30:00Z
    const MARCH_3_1984: i64 = 447_179_400_000;

    #[test]
    fn buckets_collapse_at_both_ends() {
        use SeverityBucket::*;
        let cases = [
            (0.5, Magnitude1),
            (1.9, Magnitude1),
            (-2.0, Magnitude1),
            (f64::NAN, Magnitude1),
            (2.3, Magnitude2),
            (5.0, Magnitude5),
            (9.99, Magnitude9),
            (10.0, Magnitude10Plus),
            (15.0, Magnitude10Plus),
            (f64::INFINITY, Magnitude10Plus),
        ];
        for (magnitude, expected) in cases {
            assert_eq!(SeverityBucket::from_magnitude(magnitude), expected, "{magnitude}");
        }
    }

    #[test]
    fn ordinals_and_labels() {
        assert_eq!(SeverityBucket::Magnitude1.ordinal(), 1);
        assert_eq!(SeverityBucket::Magnitude10Plus.ordinal(), 10);
        assert_eq!(SeverityBucket::Magnitude7.to_string(), "7");
        assert_eq!(SeverityBucket::Magnitude10Plus.to_string(), "10+");
        assert!(SeverityBucket::Magnitude2 < SeverityBucket::Magnitude3);
    }

    #[test]
    fn magnitude_has_one_decimal() {
        assert_eq!(format_magnitude(3.2), "3.2");
        assert_eq!(format_magnitude(10.0), "10.0");
        assert_eq!(format_magnitude(0.0), "0.0");
        assert_eq!(format_magnitude(7.26), "7.3");
        assert_eq!(format_magnitude(-1.04), "-1.0");
    }

    #[test]
    fn location_with_offset_splits_on_first_separator() {
        let parts = split_location("74km NW of Rumoi, Japan");
        assert_eq!(parts.offset, "74km NW of ");
        assert_eq!(parts.primary, "Rumoi, Japan");

        let parts = split_location("5km N of Isle of Man");
        assert_eq!(parts.offset, "5km N of ");
        assert_eq!(parts.primary, "Isle of Man");
    }

    #[test]
    fn location_without_offset_falls_back() {
        let parts = split_location("Northern California");
        assert_eq!(parts.offset, NEAR_THE);
        assert_eq!(parts.primary, "Northern California");

        // The separator needs its surrounding spaces.
        assert_eq!(split_location("Gulf ofAlaska").offset, NEAR_THE);
    }

    #[test]
    fn date_and_time_in_utc() {
        assert_eq!(format_date(MARCH_3_1984, &Utc, Locale::en_US), "Mar 3, 1984");
        assert_eq!(format_time(MARCH_3_1984, &Utc, Locale::en_US), "4:30 PM");
    }

    #[test]
    fn zone_shifts_both_strings() {
        assert_eq!(format_date(MARCH_3_1984, &Los_Angeles, Locale::en_US), "Mar 3, 1984");
        assert_eq!(format_time(MARCH_3_1984, &Los_Angeles, Locale::en_US), "8:30 AM");

        assert_eq!(format_date(MARCH_3_1984, &Tokyo, Locale::en_US), "Mar 4, 1984");
        assert_eq!(format_time(MARCH_3_1984, &Tokyo, Locale::en_US), "1:30 AM");
    }

    #[test]
    fn negative_and_extreme_timestamps_still_render() {
        assert_eq!(format_date(-1_000, &Utc, Locale::en_US), "Dec 31, 1969");
        assert_eq!(format_time(-1_000, &Utc, Locale::en_US), "11:59 PM");
        assert!(!format_date(i64::MAX, &Tokyo, Locale::en_US).is_empty());
        assert!(!format_date(i64::MIN, &Los_Angeles, Locale::en_US).is_empty());
    }

    #[test]
    fn presentation_bundles_everything() {
        let quake = Earthquake::new(
            7.2,
            "74km NW of Rumoi, Japan".into(),
            1_454_124_312_220,
            "https://earthquake.usgs.gov/earthquakes/eventpage/us20004vvx".into(),
        );

        let view = Presentation::of(&quake, &Utc, Locale::en_US);

        assert_eq!(view.magnitude, "7.2");
        assert_eq!(view.severity, SeverityBucket::Magnitude7);
        assert_eq!(view.color, "#E75F40");
        assert_eq!(view.location_offset, "74km NW of ");
        assert_eq!(view.primary_location, "Rumoi, Japan");
        assert_eq!(view.date, "Jan 30, 2016");
        assert_eq!(view.time, "3:25 AM");
        assert_eq!(view.detail_url, quake.detail_url());
    }
}
