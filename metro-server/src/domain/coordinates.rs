//! Geographic coordinates and great-circle distance.

use std::fmt;

use geo::{HaversineDistance, Point};

/// Error returned when a latitude/longitude pair is not a usable position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

/// A validated WGS84 position in degrees.
///
/// Latitude is always within `[-90, 90]` and longitude within `[-180, 180]`,
/// and both are finite.
///
/// # Examples
///
/// ```
/// use metro_server::domain::Coordinates;
///
/// let yenikapi = Coordinates::new(41.0056, 28.9513).unwrap();
/// assert_eq!(yenikapi.latitude(), 41.0056);
///
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Create coordinates from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinates {
                reason: "latitude and longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse coordinates from the decimal strings used by the upstream feed.
    ///
    /// Surrounding whitespace is ignored. Empty strings are rejected.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, InvalidCoordinates> {
        let lat = latitude.trim();
        let lon = longitude.trim();
        if lat.is_empty() || lon.is_empty() {
            return Err(InvalidCoordinates {
                reason: "latitude and longitude are required",
            });
        }
        let lat = lat.parse::<f64>().map_err(|_| InvalidCoordinates {
            reason: "latitude is not a number",
        })?;
        let lon = lon.parse::<f64>().map_err(|_| InvalidCoordinates {
            reason: "longitude is not a number",
        })?;
        Self::new(lat, lon)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another position, in kilometres.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        self.point().haversine_distance(&other.point()) / 1000.0
    }

    fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinates({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    #[test]
    fn accepts_valid_positions() {
        assert!(Coordinates::new(0.0, 0.0).is_ok());
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(41.0055971704, 28.9513306172).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinates::new(90.1, 0.0).is_err());
        assert!(Coordinates::new(-90.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, 180.1).is_err());
        assert!(Coordinates::new(0.0, -180.1).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn parse_feed_strings() {
        let c = Coordinates::parse("41.0055971704", " 28.9513306172 ").unwrap();
        assert_eq!(c.latitude(), 41.0055971704);
        assert_eq!(c.longitude(), 28.9513306172);
    }

    #[test]
    fn parse_rejects_missing_and_malformed() {
        assert!(Coordinates::parse("", "28.95").is_err());
        assert!(Coordinates::parse("41.0", "").is_err());
        assert!(Coordinates::parse("north", "28.95").is_err());
        assert!(Coordinates::parse("41.0", "28,95").is_err());
    }

    #[test]
    fn zero_distance_to_self() {
        let c = coords(41.0, 29.0);
        assert_eq!(c.distance_km(&c), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // One degree along a meridian is ~111.2 km.
        let d = coords(41.0, 29.0).distance_km(&coords(42.0, 29.0));
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn known_city_distance() {
        // Yenikapi to Uskudar, roughly 5.8 km across the Bosphorus.
        let yenikapi = coords(41.0055971704, 28.9513306172);
        let uskudar = coords(41.025618259645256, 29.015061927581854);
        let d = yenikapi.distance_km(&uskudar);
        assert!((d - 5.7).abs() < 0.5, "got {d}");
    }

    #[test]
    fn display_and_debug() {
        let c = coords(41.5, 29.25);
        assert_eq!(c.to_string(), "41.500000,29.250000");
        assert_eq!(format!("{:?}", c), "Coordinates(41.5, 29.25)");
    }
}
