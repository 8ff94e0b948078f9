//! Geographic points and paths

use geo::Coord;

/// A geographic sample in degrees, latitude first
///
/// With the `serde` feature this serialises as a `[lat, lng]` pair, the shape uploaded tracks
/// and share links use.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "(f64, f64)", into = "(f64, f64)")
)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// An ordered sequence of points. Order is significant.
pub type Path = Vec<LatLng>;

impl LatLng {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both coordinates are finite numbers
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for LatLng {
    #[inline]
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    #[inline]
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for (f64, f64) {
    #[inline]
    fn from(point: LatLng) -> Self {
        (point.lat, point.lng)
    }
}

/// Planar view of the point: x is longitude, y is latitude (geo's convention)
impl From<LatLng> for Coord<f64> {
    #[inline]
    fn from(point: LatLng) -> Self {
        Coord {
            x: point.lng,
            y: point.lat,
        }
    }
}

impl From<&gpx::Waypoint> for LatLng {
    #[inline]
    fn from(waypoint: &gpx::Waypoint) -> Self {
        let point = waypoint.point();
        Self {
            lat: point.y(),
            lng: point.x(),
        }
    }
}
