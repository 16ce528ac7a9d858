//! Great-circle helpers on WGS84 coordinates (spherical Earth).

use crate::domain::model::{BoundingBox, Coordinates};
use serde::Serialize;
use std::fmt;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate kilometres per degree of latitude.
const KM_PER_DEGREE: f64 = 111.0;

/// Haversine distance between two points in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Forward azimuth from `from` to `to`, in degrees within `[0, 360)`.
pub fn initial_bearing(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// 16-point compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cardinal {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

const CARDINALS: [Cardinal; 16] = [
    Cardinal::N,
    Cardinal::NNE,
    Cardinal::NE,
    Cardinal::ENE,
    Cardinal::E,
    Cardinal::ESE,
    Cardinal::SE,
    Cardinal::SSE,
    Cardinal::S,
    Cardinal::SSW,
    Cardinal::SW,
    Cardinal::WSW,
    Cardinal::W,
    Cardinal::WNW,
    Cardinal::NW,
    Cardinal::NNW,
];

impl Cardinal {
    /// Each 22.5° sector starts at its label: `[0, 22.5)` is N, `[22.5, 45)` is NNE.
    pub fn from_bearing(bearing: f64) -> Cardinal {
        if !bearing.is_finite() {
            return Cardinal::N;
        }
        let sector = (bearing.rem_euclid(360.0) / 22.5).floor() as usize;
        CARDINALS[sector % CARDINALS.len()]
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl BoundingBox {
    /// Box enclosing a circle of `radius_km` around `center`.
    pub fn around(center: Coordinates, radius_km: f64) -> BoundingBox {
        let lat_delta = radius_km / KM_PER_DEGREE;
        let lon_delta = radius_km / (KM_PER_DEGREE * center.lat.to_radians().cos());

        BoundingBox {
            lamin: (center.lat - lat_delta).max(-90.0),
            lamax: (center.lat + lat_delta).min(90.0),
            lomin: (center.lon - lon_delta).max(-180.0),
            lomax: (center.lon + lon_delta).min(180.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: Coordinates = Coordinates {
        lat: 51.5074,
        lon: -0.1278,
    };
    const PARIS: Coordinates = Coordinates {
        lat: 48.8566,
        lon: 2.3522,
    };

    #[test]
    fn test_haversine_same_point() {
        assert!(haversine_km(LONDON, LONDON).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_london_paris() {
        let d = haversine_km(LONDON, PARIS);
        assert!((d - 343.5).abs() < 2.0, "got {}", d);
        assert!((haversine_km(PARIS, LONDON) - d).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_axes() {
        let origin = Coordinates { lat: 0.0, lon: 0.0 };
        let north = Coordinates { lat: 1.0, lon: 0.0 };
        let east = Coordinates { lat: 0.0, lon: 1.0 };
        let west = Coordinates { lat: 0.0, lon: -1.0 };

        assert!(initial_bearing(origin, north).abs() < 1e-9);
        assert!((initial_bearing(origin, east) - 90.0).abs() < 1e-9);
        assert!((initial_bearing(origin, west) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_london_to_paris_is_south_east() {
        let b = initial_bearing(LONDON, PARIS);
        assert!(b > 135.0 && b < 157.5, "got {}", b);
        assert_eq!(Cardinal::from_bearing(b), Cardinal::SE);
    }

    #[test]
    fn test_cardinal_sectors() {
        assert_eq!(Cardinal::from_bearing(0.0), Cardinal::N);
        assert_eq!(Cardinal::from_bearing(22.4), Cardinal::N);
        assert_eq!(Cardinal::from_bearing(22.5), Cardinal::NNE);
        assert_eq!(Cardinal::from_bearing(90.0), Cardinal::E);
        assert_eq!(Cardinal::from_bearing(180.0), Cardinal::S);
        assert_eq!(Cardinal::from_bearing(337.5), Cardinal::NNW);
        assert_eq!(Cardinal::from_bearing(359.9), Cardinal::NNW);
        assert_eq!(Cardinal::from_bearing(360.0), Cardinal::N);
        assert_eq!(Cardinal::from_bearing(-90.0), Cardinal::W);
        assert_eq!(Cardinal::from_bearing(f64::NAN), Cardinal::N);
        assert_eq!(Cardinal::WSW.to_string(), "WSW");
    }

    #[test]
    fn test_bounding_box_around() {
        let bbox = BoundingBox::around(LONDON, 20.0);
        assert!((bbox.lamax - bbox.lamin - 40.0 / 111.0).abs() < 1e-9);
        // Longitude span widens with latitude.
        assert!(bbox.lomax - bbox.lomin > bbox.lamax - bbox.lamin);
        assert!(bbox.contains(LONDON));
    }
}
