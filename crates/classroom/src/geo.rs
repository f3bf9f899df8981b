use crate::error::{ClassroomError, Result};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Reject out-of-range or non-finite coordinates before any distance math.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<()> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(ClassroomError::InvalidCoordinates);
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(ClassroomError::InvalidCoordinates);
    }
    Ok(())
}

/// Great-circle distance in meters between two points (haversine formula).
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    EARTH_RADIUS_M * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_for_identical_points() {
        assert_eq!(haversine_distance(12.34, 56.78, 12.34, 56.78), 0.0);
        assert_eq!(haversine_distance(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let d1 = haversine_distance(12.34, 56.78, 12.35, 56.79);
        let d2 = haversine_distance(12.35, 56.79, 12.34, 56.78);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // 0.001 degrees of latitude is roughly 111 meters
        let d = haversine_distance(12.340, 56.78, 12.341, 56.78);
        assert!((d - 111.2).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn test_short_distance_inside_geofence() {
        // A scan from the next seat over, about 1.5 meters away
        let d = haversine_distance(12.34, 56.78, 12.34001, 56.78001);
        assert!(d < 5.0, "got {}", d);
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }
}
