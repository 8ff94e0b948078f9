//! Utility functions for bounding boxes and distances

use crate::LatLng;
use geo::{BoundingRect, Coord, LineString, Rect};

/// Earth's mean radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters in one statute mile
pub const METERS_PER_MILE: f64 = 1_609.344;

/// Mean Earth-Moon distance in miles
pub const MOON_DISTANCE_MILES: f64 = 238_855.0;

/// Bounding box of a path in planar degrees (x = longitude, y = latitude)
///
/// Returns `None` for an empty path.
pub fn bounding_rect(points: &[LatLng]) -> Option<Rect<f64>> {
    let line: LineString<f64> = points.iter().copied().map(Coord::from).collect();
    line.bounding_rect()
}

/// Midpoint of a path's bounding box
///
/// Returns `None` for an empty path.
#[inline]
pub fn center(points: &[LatLng]) -> Option<LatLng> {
    bounding_rect(points).map(|rect| {
        let c = rect.center();
        LatLng::new(c.y, c.x)
    })
}

/// Haversine distance between two points in meters
#[inline(always)]
pub fn haversine_distance(p1: LatLng, p2: LatLng) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Total length of a path in meters, summing consecutive haversine legs
pub fn path_length(points: &[LatLng]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .sum()
}

/// Convert meters to statute miles
#[inline(always)]
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_rect() {
        let points = [
            LatLng::new(51.5, -0.2),
            LatLng::new(51.7, -0.1),
            LatLng::new(51.6, -0.3),
        ];
        let rect = bounding_rect(&points).unwrap();
        assert_eq!(rect.min().x, -0.3);
        assert_eq!(rect.max().x, -0.1);
        assert_eq!(rect.min().y, 51.5);
        assert_eq!(rect.max().y, 51.7);
    }

    #[test]
    fn test_bounding_rect_empty() {
        assert!(bounding_rect(&[]).is_none());
        assert!(center(&[]).is_none());
    }

    #[test]
    fn test_center() {
        let points = [LatLng::new(10.0, 20.0), LatLng::new(12.0, 26.0)];
        let c = center(&points).unwrap();
        assert!((c.lat - 11.0).abs() < 1e-12);
        assert!((c.lng - 23.0).abs() < 1e-12);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let d = haversine_distance(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
        // 2 * pi * R / 360
        assert!((d - 111_194.93).abs() < 1.0);
    }

    #[test]
    fn test_haversine_zero() {
        let p = LatLng::new(51.5074, -0.1278);
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn test_path_length() {
        let points = [
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 0.0),
            LatLng::new(2.0, 0.0),
        ];
        assert!((path_length(&points) - 2.0 * 111_194.93).abs() < 2.0);
        assert_eq!(path_length(&points[..1]), 0.0);
        assert_eq!(path_length(&[]), 0.0);
    }

    #[test]
    fn test_meters_to_miles() {
        assert!((meters_to_miles(1_609.344) - 1.0).abs() < 1e-12);
    }
}
