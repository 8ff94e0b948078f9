//! Path simplification by maximum perpendicular deviation
//!
//! Repeatedly splits a range at the point farthest from the chord joining its endpoints,
//! until every remaining point lies within `tolerance` of its chord. Distances are planar in
//! degrees. The split work is driven by an explicit stack so very long tracks cannot exhaust
//! the call stack.

use crate::{LatLng, Path};

/// Simplify a path, keeping its first and last point exactly
///
/// Paths with fewer than 3 points are returned unchanged. The output is a subsequence of the
/// input and is fully deterministic.
///
/// # Arguments
/// * `path` - The points to simplify, in order
/// * `tolerance` - Maximum allowed perpendicular deviation, in degrees (`>= 0`)
pub fn simplify(path: &[LatLng], tolerance: f64) -> Path {
    #[cfg(feature = "profiling")]
    profiling::scope!("simplify::simplify");

    simplify_indices(path, tolerance)
        .into_iter()
        .map(|i| path[i])
        .collect()
}

/// Same as [`simplify`], but returns the indices of the kept points
pub fn simplify_indices(path: &[LatLng], tolerance: f64) -> Vec<usize> {
    if path.len() < 3 {
        return (0..path.len()).collect();
    }

    let last = path.len() - 1;
    let mut keep = vec![false; path.len()];
    keep[0] = true;
    keep[last] = true;

    let mut pending = vec![(0, last)];
    while let Some((start, end)) = pending.pop() {
        if end <= start + 1 {
            continue;
        }

        let (index, max_distance) = farthest_from_chord(path, start, end);
        if max_distance > tolerance {
            keep[index] = true;
            pending.push((index, end));
            pending.push((start, index));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}

/// Find the interior point of `start..=end` with the largest distance to the chord
///
/// Ties keep the earliest index. Returns `(start, 0.0)` when nothing is farther than zero.
fn farthest_from_chord(path: &[LatLng], start: usize, end: usize) -> (usize, f64) {
    let mut max_distance = 0.0;
    let mut index = start;

    for (i, point) in path.iter().enumerate().take(end).skip(start + 1) {
        let distance = perpendicular_distance(*point, path[start], path[end]);
        if distance > max_distance {
            max_distance = distance;
            index = i;
        }
    }

    (index, max_distance)
}

/// Distance from `point` to the infinite line through `line_start` and `line_end`
///
/// Projects onto the chord direction. A zero-length chord degrades to the Euclidean distance
/// to `line_start`.
#[inline]
pub(crate) fn perpendicular_distance(point: LatLng, line_start: LatLng, line_end: LatLng) -> f64 {
    let dx = line_end.lat - line_start.lat;
    let dy = line_end.lng - line_start.lng;

    if dx == 0.0 && dy == 0.0 {
        return distance(point, line_start);
    }

    let t = ((point.lat - line_start.lat) * dx + (point.lng - line_start.lng) * dy)
        / (dx * dx + dy * dy);
    let nearest = LatLng::new(line_start.lat + t * dx, line_start.lng + t * dy);

    distance(point, nearest)
}

#[inline]
fn distance(a: LatLng, b: LatLng) -> f64 {
    ((a.lat - b.lat).powi(2) + (a.lng - b.lng).powi(2)).sqrt()
}
