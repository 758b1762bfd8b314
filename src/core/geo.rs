//! Great-circle geometry on a spherical Earth.
//!
//! None of these functions reject out-of-range coordinates; apply
//! [`GeoPoint::is_valid`] beforehand when that matters.

use crate::domain::model::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres.
pub fn surface_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Straight-line distance from the hypocenter to a surface point.
pub fn hypocentral_distance(epicenter: GeoPoint, depth_km: f64, site: GeoPoint) -> f64 {
    surface_distance(epicenter, site).hypot(depth_km)
}

/// Initial compass bearing from `a` to `b`, in `[0, 360)`.
pub fn bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

/// Eight-point compass label for a bearing, for display.
pub fn compass_point(bearing_deg: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = ((bearing_deg.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    POINTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONCEPCION: GeoPoint = GeoPoint::new(-36.12, -72.90);
    const SANTIAGO: GeoPoint = GeoPoint::new(-33.45, -70.67);
    const TOKYO: GeoPoint = GeoPoint::new(35.68, 139.69);

    #[test]
    fn test_one_degree_on_equator() {
        let d = surface_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((d - 111.195).abs() < 0.01, "got {}", d);
        let d = surface_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - 111.195).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn test_zero_and_symmetry() {
        assert_eq!(surface_distance(SANTIAGO, SANTIAGO), 0.0);
        let ab = surface_distance(CONCEPCION, SANTIAGO);
        let ba = surface_distance(SANTIAGO, CONCEPCION);
        assert!((ab - ba).abs() < 1e-9);
        assert!((ab - 360.0).abs() < 1.0, "got {}", ab);
    }

    #[test]
    fn test_triangle_inequality() {
        let ab = surface_distance(CONCEPCION, SANTIAGO);
        let bc = surface_distance(SANTIAGO, TOKYO);
        let ac = surface_distance(CONCEPCION, TOKYO);
        assert!(ac <= ab + bc + 1e-6);
    }

    #[test]
    fn test_antipodal_points_stay_finite() {
        let d = surface_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_hypocentral_distance_bounds() {
        let surface = surface_distance(CONCEPCION, SANTIAGO);
        let hypo = hypocentral_distance(CONCEPCION, 35.0, SANTIAGO);
        assert!(hypo >= surface);
        assert!(hypo >= 35.0);
        assert_eq!(hypocentral_distance(SANTIAGO, 12.0, SANTIAGO), 12.0);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert!(bearing(origin, GeoPoint::new(1.0, 0.0)).abs() < 1e-9);
        assert!((bearing(origin, GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((bearing(origin, GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((bearing(origin, GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_range_and_compass() {
        let b = bearing(CONCEPCION, SANTIAGO);
        assert!((0.0..360.0).contains(&b));
        assert_eq!(compass_point(b), "NE");
        assert_eq!(compass_point(359.0), "N");
        assert_eq!(compass_point(-90.0), "W");
    }
}
