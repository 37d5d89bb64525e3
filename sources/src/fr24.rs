//! Flightradar24 pipeline
//!
//! Phases:
//! 1. ask `flight-summary/light` for every flight of a registration within the window and keep
//!    the unique `fr24_id`,
//! 2. ask `flight-tracks` for each of them, one after the other with a pause in between,
//! 3. keep only the points passing the airborne check.
//!

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, info, trace};

use fr24_common::DateWindow;

use crate::{
    ApiClient, ApiConfig, ApiError, FlightLegId, FlightSummary, FlightTrack, Position, Sleeper,
    Thresholds, Transport,
};

/// Flight summary endpoint
pub const SUMMARY: &str = "flight-summary/light";
/// Track endpoint
pub const TRACKS: &str = "flight-tracks";

/// Stateless service object tying the API client and the filter together.
///
#[derive(Debug)]
pub struct Fr24<T: Transport, S: Sleeper> {
    client: ApiClient<T, S>,
    thresholds: Thresholds,
    pause: Duration,
}

impl<T: Transport, S: Sleeper> Fr24<T, S> {
    pub fn new(cfg: &ApiConfig, thresholds: Thresholds, transport: T, sleeper: S) -> Self {
        Fr24 {
            client: ApiClient::new(cfg, transport, sleeper),
            thresholds,
            pause: Duration::from_secs(cfg.pause),
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Find all the flight legs for `aircraft` within `window`.
    ///
    #[tracing::instrument(skip(self))]
    pub fn resolve(
        &self,
        aircraft: &str,
        window: &DateWindow,
    ) -> Result<BTreeSet<FlightLegId>, ApiError> {
        let (begin, end) = window.as_api();
        let query = [
            ("registrations", aircraft),
            ("flight_datetime_from", begin.as_str()),
            ("flight_datetime_to", end.as_str()),
        ];

        let summary: FlightSummary = self.client.get(SUMMARY, &query)?;
        trace!("{} records", summary.data.len());

        let ids: BTreeSet<FlightLegId> = summary
            .data
            .into_iter()
            .filter_map(|e| e.fr24_id)
            .collect();
        debug!("{} unique flights", ids.len());
        Ok(ids)
    }

    /// Fetch the track of a single leg and filter it.
    ///
    #[tracing::instrument(skip(self))]
    pub fn fetch_points(&self, id: &FlightLegId) -> Result<Vec<Position>, ApiError> {
        let track: Vec<FlightTrack> = self.client.get(TRACKS, &[("flight_id", id.as_str())])?;

        // Single flight wrapped into an array
        //
        let points = match track.into_iter().next() {
            Some(flight) => self.thresholds.filter(&flight.tracks),
            None => vec![],
        };
        Ok(points)
    }

    /// Resolve then fetch every leg of `aircraft`, pausing between two fetches.
    ///
    #[tracing::instrument(skip(self))]
    pub fn fetch_aircraft(
        &self,
        aircraft: &str,
        window: &DateWindow,
    ) -> Result<Vec<Position>, ApiError> {
        let ids = self.resolve(aircraft, window)?;
        info!("{}: {} flight(s) between {}", aircraft, ids.len(), window);

        let total = ids.len();
        let mut res = vec![];
        for (n, id) in ids.iter().enumerate() {
            if n > 0 {
                self.client.sleeper().sleep(self.pause);
            }
            info!("{}: fetching flight {} ({}/{})", aircraft, id, n + 1, total);

            let mut points = self.fetch_points(id)?;
            info!("{}: {} airborne point(s) in {}", aircraft, points.len(), id);
            res.append(&mut points);
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Number;

    use super::*;
    use crate::testing::{reply, Recorder, Script};

    fn window() -> DateWindow {
        DateWindow::parse("2024-06-01", "2024-06-02").unwrap()
    }

    fn setup<'a>(t: &'a Script, s: &'a Recorder) -> Fr24<&'a Script, &'a Recorder> {
        let cfg = ApiConfig {
            base_url: "http://example.net/api".to_string(),
            ..Default::default()
        };
        Fr24::new(&cfg, Thresholds::default(), t, s)
    }

    const TRACK_A: &str = r##"[{"fr24_id":"a","tracks":[
        {"timestamp":"2024-06-01T10:00:00Z","lat":48.0,"lon":2.0,"alt":0,"gspeed":5,"track":90},
        {"timestamp":"2024-06-01T10:10:00Z","lat":48.1,"lon":2.1,"alt":5000,"gspeed":250,"track":95},
        {"timestamp":"2024-06-01T10:20:00Z","lat":48.2,"lon":2.2,"alt":null,"gspeed":250,"track":95}
    ]}]"##;

    const TRACK_B: &str = r##"[{"fr24_id":"b","tracks":[
        {"timestamp":"2024-06-01T08:00:00Z","lat":50.0,"lon":8.0,"alt":31,"gspeed":50,"track":180},
        {"timestamp":"2024-06-01T08:01:00Z","lat":50.1,"lon":8.1,"alt":32,"gspeed":10,"track":181}
    ]}]"##;

    #[test]
    fn test_resolve_dedup() {
        let t = Script::new(vec![reply(
            200,
            r##"{"data":[{"fr24_id":"abc"},{"fr24_id":"abc"},{"fr24_id":null}]}"##,
        )]);
        let s = Recorder::default();
        let fr = setup(&t, &s);

        let ids = fr.resolve("D-AIBL", &window()).unwrap();
        assert_eq!(1, ids.len());
        assert!(ids.contains(&FlightLegId::from("abc")));

        let (url, query) = &t.requests()[0];
        assert_eq!("http://example.net/api/flight-summary/light", url);
        assert_eq!(
            &vec![
                ("registrations".to_string(), "D-AIBL".to_string()),
                ("flight_datetime_from".to_string(), "2024-06-01T00:00:00Z".to_string()),
                ("flight_datetime_to".to_string(), "2024-06-02T23:59:59Z".to_string()),
            ],
            query
        );
    }

    #[test]
    fn test_resolve_empty() {
        let t = Script::new(vec![reply(200, r##"{"data":[]}"##)]);
        let s = Recorder::default();
        let fr = setup(&t, &s);

        assert!(fr.resolve("D-AIBL", &window()).unwrap().is_empty());
    }

    #[test]
    fn test_fetch_points() {
        let t = Script::new(vec![reply(200, TRACK_A)]);
        let s = Recorder::default();
        let fr = setup(&t, &s);

        let pts = fr.fetch_points(&FlightLegId::from("a")).unwrap();
        assert_eq!(1, pts.len());
        assert_eq!("2024-06-01T10:10:00Z", pts[0].timestamp);
        assert_eq!(Number::from(5000), pts[0].altitude);
        assert_eq!(Number::from(250), pts[0].speed);
        assert_eq!(Number::from(95), pts[0].direction);

        let (url, query) = &t.requests()[0];
        assert_eq!("http://example.net/api/flight-tracks", url);
        assert_eq!(&vec![("flight_id".to_string(), "a".to_string())], query);
    }

    #[test]
    fn test_fetch_points_fractional_values() {
        let t = Script::new(vec![reply(
            200,
            r##"[{"fr24_id":"a","tracks":[
                {"timestamp":"2024-06-01T10:10:00Z","lat":48.1,"lon":2.1,"alt":5000.0,"gspeed":250,"track":95.5},
                {"timestamp":"2024-06-01T10:11:00Z","lat":48.1,"lon":2.1,"alt":31.5,"gspeed":250,"track":96}
            ]}]"##,
        )]);
        let s = Recorder::default();
        let fr = setup(&t, &s);

        let pts = fr.fetch_points(&FlightLegId::from("a")).unwrap();
        assert_eq!(1, pts.len());
        assert_eq!("5000.0", pts[0].altitude.to_string());
        assert_eq!("95.5", pts[0].direction.to_string());
    }

    #[test]
    fn test_fetch_points_empty_answer() {
        let t = Script::new(vec![reply(200, "[]")]);
        let s = Recorder::default();
        let fr = setup(&t, &s);

        assert!(fr.fetch_points(&FlightLegId::from("a")).unwrap().is_empty());
    }

    #[test]
    fn test_fetch_aircraft_pauses_between_fetches() {
        let t = Script::new(vec![
            reply(200, r##"{"data":[{"fr24_id":"b"},{"fr24_id":"a"},{"fr24_id":"a"}]}"##),
            reply(200, TRACK_A),
            reply(200, TRACK_B),
        ]);
        let s = Recorder::default();
        let fr = setup(&t, &s);

        let pts = fr.fetch_aircraft("D-AIBL", &window()).unwrap();

        // one point from "a", one from "b" (boundary values are kept)
        assert_eq!(2, pts.len());
        assert_eq!(3, t.requests().len());
        assert_eq!(vec![Duration::from_secs(10)], s.pauses());
    }

    #[test]
    fn test_fetch_aircraft_single_flight_no_pause() {
        let t = Script::new(vec![
            reply(200, r##"{"data":[{"fr24_id":"a"}]}"##),
            reply(200, TRACK_A),
        ]);
        let s = Recorder::default();
        let fr = setup(&t, &s);

        let pts = fr.fetch_aircraft("D-AIBL", &window()).unwrap();
        assert_eq!(1, pts.len());
        assert!(s.pauses().is_empty());
    }

    #[test]
    fn test_fetch_aircraft_rate_limited_track() {
        let t = Script::new(vec![
            reply(200, r##"{"data":[{"fr24_id":"a"},{"fr24_id":"b"}]}"##),
            reply(200, TRACK_A),
            reply(429, "Too Many Requests"),
            reply(200, TRACK_B),
        ]);
        let s = Recorder::default();
        let fr = setup(&t, &s);

        let pts = fr.fetch_aircraft("D-AIBL", &window()).unwrap();
        assert_eq!(2, pts.len());
        assert_eq!(vec![Duration::from_secs(10), Duration::from_secs(20)], s.pauses());
    }

    #[test]
    fn test_fetch_aircraft_fatal_error() {
        let t = Script::new(vec![
            reply(200, r##"{"data":[{"fr24_id":"a"},{"fr24_id":"b"}]}"##),
            reply(500, "boom"),
        ]);
        let s = Recorder::default();
        let fr = setup(&t, &s);

        let r = fr.fetch_aircraft("D-AIBL", &window());
        assert!(matches!(r, Err(ApiError::Http { status: 500, .. })));
        assert_eq!(2, t.requests().len());
    }
}
