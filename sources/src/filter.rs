//! Airborne heuristic.
//!
//! The track endpoint returns everything the aircraft broadcast, including taxi and parking
//! samples.  We keep only the points above both thresholds; a point without altitude or speed
//! can not be classified and is dropped.
//!

use serde::Deserialize;
use tracing::trace;

use crate::{Position, TrackPoint};

/// Default minimum altitude, in feet.
pub const MIN_ALTITUDE: f64 = 32.0;
/// Default minimum ground speed, in knots.
pub const MIN_SPEED: f64 = 10.0;

/// Thresholds for the airborne check, values equal to the threshold are kept.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Thresholds {
    pub min_altitude: f64,
    pub min_speed: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            min_altitude: MIN_ALTITUDE,
            min_speed: MIN_SPEED,
        }
    }
}

impl Thresholds {
    pub fn new(min_altitude: f64, min_speed: f64) -> Self {
        Thresholds {
            min_altitude,
            min_speed,
        }
    }

    /// Returns the output position if the point looks airborne.
    ///
    pub fn check(&self, p: &TrackPoint) -> Option<Position> {
        let (altitude, speed) = match (&p.alt, &p.gspeed) {
            (Some(alt), Some(speed)) => (alt, speed),
            _ => return None,
        };
        match (altitude.as_f64(), speed.as_f64()) {
            (Some(alt), Some(speed)) if alt >= self.min_altitude && speed >= self.min_speed => (),
            _ => return None,
        }
        Some(Position {
            latitude: p.lat,
            longitude: p.lon,
            timestamp: p.timestamp.clone(),
            altitude: altitude.clone(),
            speed: speed.clone(),
            direction: p.track.clone(),
        })
    }

    /// Filter a whole track, order is preserved.
    ///
    pub fn filter(&self, points: &[TrackPoint]) -> Vec<Position> {
        let res: Vec<Position> = points.iter().filter_map(|p| self.check(p)).collect();
        trace!("kept {}/{} points", res.len(), points.len());
        res
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Number;

    use super::*;

    /// Build a point from raw JSON values, the way the API sends them.
    fn point(alt: &str, gspeed: &str) -> TrackPoint {
        let s = format!(
            r##"{{"timestamp":"2024-06-01T10:00:00Z","lat":48.8566,"lon":2.3522,"alt":{alt},"gspeed":{gspeed},"track":270}}"##
        );
        serde_json::from_str(&s).unwrap()
    }

    #[rstest]
    #[case("null", "null")]
    #[case("null", "50")]
    #[case("5000", "null")]
    #[case("null", "50.5")]
    fn test_missing_fields(#[case] alt: &str, #[case] gspeed: &str) {
        let t = Thresholds::default();
        assert!(t.check(&point(alt, gspeed)).is_none());
    }

    #[rstest]
    #[case("31", "50", false)]
    #[case("32", "9", false)]
    #[case("0", "0", false)]
    #[case("-100", "200", false)]
    #[case("31.9", "50", false)]
    #[case("32", "9.99", false)]
    #[case("32", "10", true)]
    #[case("32.0", "10.0", true)]
    #[case("32.5", "10.25", true)]
    #[case("33", "11", true)]
    #[case("35000", "450", true)]
    fn test_thresholds(#[case] alt: &str, #[case] gspeed: &str, #[case] kept: bool) {
        let t = Thresholds::default();
        assert_eq!(kept, t.check(&point(alt, gspeed)).is_some());
    }

    #[test]
    fn test_mapping() {
        let t = Thresholds::default();
        let p = t.check(&point("32", "10")).unwrap();

        assert_eq!(48.8566, p.latitude);
        assert_eq!(2.3522, p.longitude);
        assert_eq!("2024-06-01T10:00:00Z", p.timestamp);
        assert_eq!(Number::from(32), p.altitude);
        assert_eq!(Number::from(10), p.speed);
        assert_eq!(Number::from(270), p.direction);
    }

    #[test]
    fn test_mapping_keeps_fractions() {
        let t = Thresholds::default();
        let p = t.check(&point("1500.5", "120.25")).unwrap();

        assert_eq!("1500.5", p.altitude.to_string());
        assert_eq!("120.25", p.speed.to_string());
    }

    #[test]
    fn test_custom_thresholds() {
        let t = Thresholds::new(1000.0, 100.0);
        assert!(t.check(&point("999", "200")).is_none());
        assert!(t.check(&point("999.9", "200")).is_none());
        assert!(t.check(&point("1000", "100")).is_some());
    }

    #[test]
    fn test_filter_is_pure() {
        let t = Thresholds::default();
        let pts = vec![
            point("0", "0"),
            point("1000", "150"),
            point("null", "150"),
            point("2000", "180"),
        ];
        let a = t.filter(&pts);
        let b = t.filter(&pts);

        assert_eq!(2, a.len());
        assert_eq!(a, b);
        assert_eq!(Number::from(1000), a[0].altitude);
        assert_eq!(Number::from(2000), a[1].altitude);
    }
}
