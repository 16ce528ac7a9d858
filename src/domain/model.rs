use crate::domain::geo::{self, Cardinal};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const ALERT_TITLE: &str = "Aircraft Alert";
const TRACKER_URL: &str = "https://globe.adsbexchange.com/?icao=";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Query window for the aircraft feed, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lamin: f64,
    pub lamax: f64,
    pub lomin: f64,
    pub lomax: f64,
}

impl BoundingBox {
    pub const UK: BoundingBox = BoundingBox {
        lamin: 49.5,
        lamax: 61.0,
        lomin: -9.0,
        lomax: 2.0,
    };

    pub fn contains(&self, point: Coordinates) -> bool {
        (self.lamin..=self.lamax).contains(&point.lat) && (self.lomin..=self.lomax).contains(&point.lon)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::UK
    }
}

/// One aircraft as reported by an OpenSky state vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aircraft {
    pub icao24: String,
    pub callsign: String,
    pub origin_country: String,
    pub position: Option<Coordinates>,
}

impl Aircraft {
    /// Parse a state vector: `[icao24, callsign, origin_country, time_position,
    /// last_contact, longitude, latitude, ...]`.
    pub fn from_state_vector(state: &[Value]) -> Option<Aircraft> {
        if state.len() < 7 {
            return None;
        }

        let icao24 = state[0].as_str()?.trim().to_lowercase();
        if icao24.is_empty() {
            return None;
        }
        let callsign = state[1].as_str().map(str::trim).unwrap_or_default().to_string();
        let origin_country = state[2].as_str().unwrap_or_default().to_string();

        let position = match (state[5].as_f64(), state[6].as_f64()) {
            (Some(lon), Some(lat)) => Some(Coordinates { lat, lon }),
            _ => None,
        };

        Some(Aircraft {
            icao24,
            callsign,
            origin_country,
            position,
        })
    }

    /// Callsign if the transponder reports one, otherwise the ICAO24 address.
    pub fn label(&self) -> &str {
        if self.callsign.is_empty() {
            &self.icao24
        } else {
            &self.callsign
        }
    }
}

/// Where an aircraft is relative to the monitored point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub distance_km: f64,
    pub bearing_deg: f64,
    pub cardinal: Cardinal,
}

impl Position {
    pub fn between(center: Coordinates, target: Coordinates) -> Position {
        let bearing_deg = geo::initial_bearing(center, target);
        Position {
            distance_km: geo::haversine_km(center, target),
            bearing_deg,
            cardinal: Cardinal::from_bearing(bearing_deg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertReason {
    Military,
    Favourite,
}

impl fmt::Display for AlertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertReason::Military => write!(f, "military"),
            AlertReason::Favourite => write!(f, "favourite"),
        }
    }
}

/// An in-range aircraft that qualifies for an alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sighting {
    pub aircraft: Aircraft,
    pub position: Position,
    pub reason: AlertReason,
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub timestamp: DateTime<Local>,
    pub sighting: Sighting,
}

impl Alert {
    pub fn new(sighting: Sighting, timestamp: DateTime<Local>) -> Self {
        Self { timestamp, sighting }
    }

    pub fn title(&self) -> &'static str {
        ALERT_TITLE
    }

    pub fn message(&self) -> String {
        let aircraft = &self.sighting.aircraft;
        let position = &self.sighting.position;
        format!(
            "🕧 {}\n🧭 {:.1}km {} ({:.0}°)\n✈️ {} / {}\n🔗 {}{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            position.distance_km,
            position.cardinal,
            position.bearing_deg,
            aircraft.callsign,
            aircraft.icao24,
            TRACKER_URL,
            aircraft.icao24
        )
    }
}

/// Outcome of a single poll cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub aircraft_seen: usize,
    pub in_range: usize,
    pub alerts_sent: usize,
    pub alerts_failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn state(values: Value) -> Vec<Value> {
        values.as_array().unwrap().clone()
    }

    #[test]
    fn test_from_state_vector() {
        let vector = state(json!([
            "43c6f1", "RRR7712 ", "United Kingdom", 1700000000, 1700000001,
            -1.25, 51.75, 9000.0, false, 200.0
        ]));

        let aircraft = Aircraft::from_state_vector(&vector).unwrap();
        assert_eq!(aircraft.icao24, "43c6f1");
        assert_eq!(aircraft.callsign, "RRR7712");
        assert_eq!(aircraft.origin_country, "United Kingdom");
        assert_eq!(aircraft.position, Some(Coordinates { lat: 51.75, lon: -1.25 }));
    }

    #[test]
    fn test_from_state_vector_null_fields() {
        let vector = state(json!(["ae1234", null, "United States", null, 1700000001, null, null]));

        let aircraft = Aircraft::from_state_vector(&vector).unwrap();
        assert_eq!(aircraft.callsign, "");
        assert_eq!(aircraft.label(), "ae1234");
        assert!(aircraft.position.is_none());
    }

    #[test]
    fn test_from_state_vector_rejects_short_or_untyped() {
        assert!(Aircraft::from_state_vector(&state(json!(["abc", "X"]))).is_none());
        assert!(Aircraft::from_state_vector(&state(json!([42, "X", "", 0, 0, 1.0, 2.0]))).is_none());
    }

    #[test]
    fn test_alert_message_format() {
        let sighting = Sighting {
            aircraft: Aircraft {
                icao24: "43c6f1".to_string(),
                callsign: "RRR7712".to_string(),
                origin_country: "United Kingdom".to_string(),
                position: Some(Coordinates { lat: 51.8, lon: -1.2 }),
            },
            position: Position {
                distance_km: 12.345,
                bearing_deg: 47.6,
                cardinal: Cardinal::NE,
            },
            reason: AlertReason::Military,
        };
        let timestamp = Local.with_ymd_and_hms(2024, 5, 1, 14, 3, 9).unwrap();
        let alert = Alert::new(sighting, timestamp);

        assert_eq!(alert.title(), "Aircraft Alert");
        assert_eq!(
            alert.message(),
            "🕧 2024-05-01 14:03:09\n🧭 12.3km NE (48°)\n✈️ RRR7712 / 43c6f1\n🔗 https://globe.adsbexchange.com/?icao=43c6f1"
        );
    }

    #[test]
    fn test_uk_bounds_default() {
        let bbox = BoundingBox::default();
        assert_eq!(bbox, BoundingBox::UK);
        assert!(bbox.contains(Coordinates { lat: 51.5, lon: -0.12 }));
        assert!(!bbox.contains(Coordinates { lat: 48.85, lon: 2.35 }));
    }
}
