//! This module implements the subset of the [Flightradar24] API answers we need.
//!
//! Only the struct we need are there, this is not a general client API.  Fields we do not use
//! are ignored during deserialization.
//!
//! Non-mandatory fields are `Option`.  Numeric telemetry is kept as `serde_json::Number` so the
//! values end up in the output exactly as the API sent them, integer or not.
//!
//! [Flightradar24]: https://fr24api.flightradar24.com/docs/endpoints/overview
//!

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Provider-assigned id of a single flight leg.
///
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct FlightLegId(String);

impl FlightLegId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FlightLegId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FlightLegId {
    fn from(s: &str) -> Self {
        FlightLegId(s.to_string())
    }
}

/// Answer from `flight-summary/light`.
///
#[derive(Debug, Default, Deserialize)]
pub struct FlightSummary {
    #[serde(default)]
    pub data: Vec<SummaryEntry>,
}

/// One flight in the summary, everything but the id is ignored.
///
#[derive(Debug, Deserialize)]
pub struct SummaryEntry {
    pub fr24_id: Option<FlightLegId>,
}

/// One element of the answer from `flight-tracks`.  The API wraps a single flight into an array.
///
#[derive(Debug, Deserialize)]
pub struct FlightTrack {
    pub fr24_id: Option<FlightLegId>,
    #[serde(default)]
    pub tracks: Vec<TrackPoint>,
}

/// Raw telemetry sample.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TrackPoint {
    /// Latitude (degrees)
    pub lat: f64,
    /// Longitude (degrees)
    pub lon: f64,
    /// Barometric altitude (feet)
    pub alt: Option<Number>,
    /// Ground speed (knots)
    pub gspeed: Option<Number>,
    /// Heading (degrees, 0-360)
    pub track: Number,
    /// UTC, ISO-8601
    pub timestamp: String,
}

/// A CSV output row, sorted on the output timeline.
///
pub trait Record {
    /// Column names, in output order
    const HEADER: &'static [&'static str];

    fn timestamp(&self) -> &str;
}

/// A `TrackPoint` which passed the airborne check, renamed for output.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
    pub altitude: Number,
    pub speed: Number,
    pub direction: Number,
}

impl Record for Position {
    const HEADER: &'static [&'static str] =
        &["latitude", "longitude", "timestamp", "altitude", "speed", "direction"];

    fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// `Position` with the aircraft registration in front, for the aggregate output.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaggedPosition {
    pub aircraft: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
    pub altitude: Number,
    pub speed: Number,
    pub direction: Number,
}

impl TaggedPosition {
    pub fn new(aircraft: &str, p: Position) -> Self {
        TaggedPosition {
            aircraft: aircraft.to_string(),
            latitude: p.latitude,
            longitude: p.longitude,
            timestamp: p.timestamp,
            altitude: p.altitude,
            speed: p.speed,
            direction: p.direction,
        }
    }
}

impl Record for TaggedPosition {
    const HEADER: &'static [&'static str] = &[
        "aircraft",
        "latitude",
        "longitude",
        "timestamp",
        "altitude",
        "speed",
        "direction",
    ];

    fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
