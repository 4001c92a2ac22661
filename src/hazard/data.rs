//! Grid observation record and longitude handling

use chrono::{Datelike, NaiveDate};

/// One grid cell value on one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridObservation {
    pub time: NaiveDate,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees, normalized to [-180, 180)
    pub lon: f64,
    /// Hazard intensity (mm/day for precipitation)
    pub value: f64,
}

impl GridObservation {
    pub fn new(time: NaiveDate, lat: f64, lon: f64, value: f64) -> Self {
        Self {
            time,
            lat,
            lon: normalize_longitude(lon),
            value,
        }
    }

    pub fn year(&self) -> i32 {
        self.time.year()
    }
}

/// Map a longitude onto [-180, 180) via ((lon + 180) mod 360) - 180
///
/// Values already in range are returned unchanged. Non-finite input stays non-finite.
pub fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        return lon;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative offsets
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(180.0), -180.0);
        assert_eq!(normalize_longitude(-180.0), -180.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(359.5), -0.5);
        assert_eq!(normalize_longitude(360.0), 0.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(720.25), 0.25);
    }

    #[test]
    fn test_normalize_longitude_is_idempotent_and_in_range() {
        let inputs = [-725.0, -360.0, -181.0, -1e-15, 0.0, 45.5, 179.999, 180.0, 270.0, 1e6];
        for &lon in &inputs {
            let once = normalize_longitude(lon);
            assert!((-180.0..180.0).contains(&once), "{} -> {}", lon, once);
            assert_eq!(normalize_longitude(once), once);
        }
    }

    #[test]
    fn test_observation_normalizes_longitude() {
        let date = NaiveDate::from_ymd_opt(2050, 6, 1).unwrap();
        let obs = GridObservation::new(date, 10.0, 300.0, 12.5);
        assert_eq!(obs.lon, -60.0);
        assert_eq!(obs.lat, 10.0);
        assert_eq!(obs.year(), 2050);
    }
}
