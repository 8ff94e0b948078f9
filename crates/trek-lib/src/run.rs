//! Run storage and share links
//!
//! A `Run` is one named GPS activity: its path plus the distance computed once at
//! construction. Runs travel between views as a [`SharedRun`], whose path is an encoded
//! polyline small enough to live in a URL.

use crate::{
    DecodeError, EncodedPolyline, LatLng, Path, Result, TrekError, decode_polyline,
    encode_polyline, utils,
};
use std::io::Read;

/// A single named run with its path and precomputed metadata
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Run {
    name: String,
    /// Points in recording order
    path: Path,
    /// Cached haversine length in miles (computed once during construction)
    distance_miles: f64,
}

/// The share-link form of a run: the path is an encoded polyline
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharedRun {
    pub coordinates: EncodedPolyline,
    pub name: String,
    /// Distance in miles
    pub distance: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Run {
    /// Create a run from a path
    ///
    /// # Returns
    /// The run on success, or [`TrekError::EmptyRoute`] if the path has no points
    pub fn new(name: impl Into<String>, path: Path) -> Result<Self> {
        if path.is_empty() {
            return Err(TrekError::EmptyRoute);
        }

        let distance_miles = utils::meters_to_miles(utils::path_length(&path));
        Ok(Self {
            name: name.into(),
            path,
            distance_miles,
        })
    }

    /// Create a run from parsed GPX data
    ///
    /// Every track segment is flattened into one path in document order. Points with
    /// non-finite coordinates are skipped.
    pub fn from_gpx(name: impl Into<String>, gpx: &gpx::Gpx) -> Result<Self> {
        let mut path = Path::new();
        let mut skipped = 0usize;

        for track in &gpx.tracks {
            for segment in &track.segments {
                for waypoint in &segment.points {
                    let point = LatLng::from(waypoint);
                    if point.is_finite() {
                        path.push(point);
                    } else {
                        skipped += 1;
                    }
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} GPX points with non-finite coordinates", skipped);
        }
        if path.is_empty() && skipped > 0 {
            return Err(TrekError::InvalidGeometry(
                "No valid points in route".to_string(),
            ));
        }

        Self::new(name, path)
    }

    /// Parse GPX XML and create a run from it
    pub fn from_gpx_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let gpx = gpx::read(reader)?;
        Self::from_gpx(name, &gpx)
    }

    /// Rebuild a run from a share link
    ///
    /// The stored distance is kept as-is rather than recomputed from the decoded path, so the
    /// figure shown matches the one that was shared.
    pub fn from_shared(shared: &SharedRun) -> Result<Self> {
        let path = decode_polyline(&shared.coordinates)?;
        if path.is_empty() {
            return Err(TrekError::EmptyRoute);
        }
        Ok(Self {
            name: shared.name.clone(),
            path,
            distance_miles: shared.distance,
        })
    }

    /// Produce the share-link form of this run
    pub fn to_shared(&self) -> SharedRun {
        SharedRun {
            coordinates: encode_polyline(&self.path),
            name: self.name.clone(),
            distance: self.distance_miles,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &[LatLng] {
        &self.path
    }

    /// Total distance in miles
    ///
    /// This is O(1) as the value is cached during construction.
    #[inline]
    pub fn distance_miles(&self) -> f64 {
        self.distance_miles
    }

    /// Distance as a percentage of the way to the Moon
    #[inline]
    pub fn moon_percent(&self) -> f64 {
        self.distance_miles / utils::MOON_DISTANCE_MILES * 100.0
    }

    /// Midpoint of the run's bounding box, where a map view should center
    #[inline]
    pub fn center(&self) -> LatLng {
        // Construction guarantees at least one point
        utils::center(&self.path).unwrap_or_default()
    }
}

impl SharedRun {
    /// Decode the coordinates without building a full run
    pub fn decode_path(&self) -> std::result::Result<Path, DecodeError> {
        decode_polyline(&self.coordinates)
    }

    /// Serialize to the JSON document a share URL carries
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the JSON document a share URL carries
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
