//! Geographic paths to fixed-size drawing surfaces
//!
//! The path is simplified first, then its bounding box (grown by a small margin) is stretched
//! over the canvas: longitude maps to x over `[0, width]` and latitude maps to y over
//! `[height, 0]`, so north is up while pixel y grows downward.

use crate::{LatLng, simplify, utils};
use geo::Coord;
use std::fmt::Write;

/// A point in canvas pixels, origin top-left, y pointing down
pub type DrawablePoint = Coord<f64>;

/// Margin added around the path's bounding box on every side, in degrees
pub const DEFAULT_MARGIN_DEGREES: f64 = 0.002;

/// Simplification tolerance used for the constellation view, in degrees
pub const CONSTELLATION_TOLERANCE: f64 = 0.000215;

/// Projection settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionConfig {
    /// Margin around the bounding box, in degrees (negative values are treated as zero)
    pub margin_degrees: f64,
    /// Simplification tolerance applied before projecting, in degrees
    pub tolerance: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            margin_degrees: DEFAULT_MARGIN_DEGREES,
            tolerance: 0.0,
        }
    }
}

impl ProjectionConfig {
    /// Preset for the sparse, star-studded constellation view
    pub fn constellation() -> Self {
        Self {
            tolerance: CONSTELLATION_TOLERANCE,
            ..Self::default()
        }
    }
}

/// Simplify `path` and map it onto a `width` x `height` canvas
///
/// The output corresponds index-for-index with `simplify(path, tolerance)`. Every point lies
/// within `[0, width] x [0, height]`; an axis with no extent maps to the canvas midpoint.
pub fn project(path: &[LatLng], width: f64, height: f64, tolerance: f64) -> Vec<DrawablePoint> {
    project_with(
        path,
        width,
        height,
        &ProjectionConfig {
            tolerance,
            ..ProjectionConfig::default()
        },
    )
}

/// [`project`] with an explicit configuration
pub fn project_with(
    path: &[LatLng],
    width: f64,
    height: f64,
    config: &ProjectionConfig,
) -> Vec<DrawablePoint> {
    #[cfg(feature = "profiling")]
    profiling::scope!("project::project");

    let simplified = simplify(path, config.tolerance);
    let Some(bounds) = utils::bounding_rect(&simplified) else {
        return Vec::new();
    };

    let margin = config.margin_degrees.max(0.0);
    let lng_axis = Axis::new(bounds.min().x - margin, bounds.max().x + margin);
    let lat_axis = Axis::new(bounds.min().y - margin, bounds.max().y + margin);

    if lng_axis.is_degenerate() || lat_axis.is_degenerate() {
        tracing::debug!(
            "Degenerate bounding box ({} x {} degrees), centering flat axes",
            bounds.width(),
            bounds.height()
        );
    }

    simplified
        .iter()
        .map(|point| Coord {
            x: lng_axis.scale(point.lng, width),
            y: height - lat_axis.scale(point.lat, height),
        })
        .collect()
}

/// One axis of the (margin-expanded) bounding box
#[derive(Debug, Clone, Copy)]
struct Axis {
    min: f64,
    span: f64,
}

impl Axis {
    fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            span: max - min,
        }
    }

    #[inline]
    fn is_degenerate(&self) -> bool {
        !(self.span > 0.0 && self.span.is_finite())
    }

    /// Map `value` onto `[0, extent]`; a degenerate axis yields the midpoint
    #[inline]
    fn scale(&self, value: f64, extent: f64) -> f64 {
        if self.is_degenerate() {
            return extent / 2.0;
        }
        let scaled = (value - self.min) / self.span * extent;
        if scaled.is_finite() {
            scaled.clamp(0.0, extent)
        } else {
            extent / 2.0
        }
    }
}

/// Indices of the points drawn as stars: every other point, starting with the first
pub fn star_indices(len: usize) -> Vec<usize> {
    (0..len).step_by(2).collect()
}

/// Format points as the `"x,y x,y ..."` list an SVG polyline takes
pub fn svg_points(points: &[DrawablePoint]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Writing to a String cannot fail
        let _ = write!(out, "{},{}", p.x, p.y);
    }
    out
}
