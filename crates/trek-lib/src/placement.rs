//! Randomised placement of items in a bounded virtual canvas
//!
//! Candidates are sampled uniformly inside the padded canvas and accepted when their center is
//! far enough from every box accepted so far. The separation test is a bounding-circle check
//! on the nominal footprint: rotation and scale never enter it. When [`MAX_ATTEMPTS`]
//! candidates are all rejected, [`FALLBACK_SAMPLES`] extra positions are drawn and the one
//! farthest from its nearest neighbour wins. The fallback always terminates but may overlap.

use geo::Coord;
use rand::Rng;

/// Candidates tried before falling back
pub const MAX_ATTEMPTS: usize = 100;

/// Positions sampled by the fallback
pub const FALLBACK_SAMPLES: usize = 30;

const MIN_SCALE: f64 = 0.7;
const MAX_SCALE: f64 = 1.3;
const FULL_TURN_DEGREES: f64 = 360.0;

/// The bounded region items are laid out in
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualCanvas {
    pub width: f64,
    pub height: f64,
    /// Margin kept clear along every edge, also added to the minimum separation
    pub padding: f64,
}

impl Default for VirtualCanvas {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            padding: 50.0,
        }
    }
}

impl VirtualCanvas {
    /// Valid top-left range along x for an item `item_width` wide: `[padding, padding + span]`
    #[inline]
    fn x_span(&self, item_width: f64) -> f64 {
        self.width - item_width - 2.0 * self.padding
    }

    #[inline]
    fn y_span(&self, item_height: f64) -> f64 {
        self.height - item_height - 2.0 * self.padding
    }

    /// Whether an item of this size fits inside the padded canvas at all
    pub fn fits(&self, item_width: f64, item_height: f64) -> bool {
        self.x_span(item_width) >= 0.0 && self.y_span(item_height) >= 0.0
    }
}

/// A placed item in virtual-canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementBox {
    /// Top-left corner of the nominal (unrotated) footprint
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees, `[0, 360)`
    pub rotation: f64,
    /// Display scale, `[0.7, 1.3)`
    pub scale: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacementBox {
    /// Center of the nominal footprint
    #[inline]
    pub fn center(&self) -> Coord<f64> {
        Coord {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    #[inline]
    fn center_distance(&self, other: &PlacementBox) -> f64 {
        let a = self.center();
        let b = other.center();
        (a.x - b.x).hypot(a.y - b.y)
    }
}

/// How a placement was found
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum PlacementOutcome {
    /// A candidate passed the separation test after this many draws (1-based)
    Accepted { attempts: usize },
    /// Every candidate was rejected; the best-separated fallback sample was used
    Fallback {
        /// Distance from the chosen center to the nearest existing center
        nearest_distance: f64,
    },
}

/// Result of [`place_next`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    #[cfg_attr(feature = "serde", serde(rename = "box"))]
    pub placed: PlacementBox,
    pub outcome: PlacementOutcome,
}

impl Placement {
    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, PlacementOutcome::Fallback { .. })
    }
}

/// Minimum center-to-center distance for two items to count as separated
///
/// The item's diagonal plus the canvas padding.
#[inline]
pub fn min_center_distance(item_width: f64, item_height: f64, padding: f64) -> f64 {
    item_width.hypot(item_height) + padding
}

/// Compute a position for the next item given every box accepted so far
///
/// `existing` is only read; the caller appends the result before placing the next item.
/// Calls for the same growing collection must run one after another. All randomness comes
/// from `rng`, so a seeded generator gives reproducible layouts.
pub fn place_next<R: Rng>(
    existing: &[PlacementBox],
    canvas: &VirtualCanvas,
    item_width: f64,
    item_height: f64,
    rng: &mut R,
) -> Placement {
    #[cfg(feature = "profiling")]
    profiling::scope!("placement::place_next");

    if !canvas.fits(item_width, item_height) {
        tracing::warn!(
            "Item {}x{} does not fit in canvas {}x{} with padding {}; pinning to the padding corner",
            item_width,
            item_height,
            canvas.width,
            canvas.height,
            canvas.padding
        );
    }

    let min_distance = min_center_distance(item_width, item_height, canvas.padding);
    let mut candidate = sample_box(canvas, item_width, item_height, rng);
    let mut attempts = 1;

    loop {
        if !overlaps(&candidate, existing, min_distance) {
            return Placement {
                placed: candidate,
                outcome: PlacementOutcome::Accepted { attempts },
            };
        }
        if attempts == MAX_ATTEMPTS {
            break;
        }
        candidate = sample_box(canvas, item_width, item_height, rng);
        attempts += 1;
    }

    let placed = fallback(candidate, existing, canvas, rng);
    let nearest_distance = nearest_distance(&placed, existing);
    tracing::debug!(
        "No free slot after {} attempts among {} boxes; fallback nearest distance {:.1} (wanted {:.1})",
        MAX_ATTEMPTS,
        existing.len(),
        nearest_distance,
        min_distance
    );

    Placement {
        placed,
        outcome: PlacementOutcome::Fallback { nearest_distance },
    }
}

/// Greedy max-min search over fresh positions
///
/// Starts from the last rejected candidate; a sample replaces the current best only when its
/// nearest-neighbour distance is strictly larger, and then gets a freshly drawn rotation and
/// scale.
fn fallback<R: Rng>(
    last_candidate: PlacementBox,
    existing: &[PlacementBox],
    canvas: &VirtualCanvas,
    rng: &mut R,
) -> PlacementBox {
    let mut best = last_candidate;
    let mut best_distance = 0.0;

    for _ in 0..FALLBACK_SAMPLES {
        let (x, y) = sample_position(canvas, last_candidate.width, last_candidate.height, rng);
        let probe = PlacementBox {
            x,
            y,
            ..last_candidate
        };
        let distance = nearest_distance(&probe, existing);

        if distance > best_distance {
            best_distance = distance;
            let (rotation, scale) = sample_pose(rng);
            best = PlacementBox {
                rotation,
                scale,
                ..probe
            };
        }
    }

    best
}

fn overlaps(candidate: &PlacementBox, existing: &[PlacementBox], min_distance: f64) -> bool {
    existing
        .iter()
        .any(|placed| candidate.center_distance(placed) < min_distance)
}

/// Distance to the nearest existing center, `f64::MAX` when there is none
fn nearest_distance(candidate: &PlacementBox, existing: &[PlacementBox]) -> f64 {
    existing
        .iter()
        .map(|placed| candidate.center_distance(placed))
        .fold(f64::MAX, f64::min)
}

fn sample_box<R: Rng>(
    canvas: &VirtualCanvas,
    item_width: f64,
    item_height: f64,
    rng: &mut R,
) -> PlacementBox {
    let (x, y) = sample_position(canvas, item_width, item_height, rng);
    let (rotation, scale) = sample_pose(rng);
    PlacementBox {
        x,
        y,
        rotation,
        scale,
        width: item_width,
        height: item_height,
    }
}

fn sample_position<R: Rng>(
    canvas: &VirtualCanvas,
    item_width: f64,
    item_height: f64,
    rng: &mut R,
) -> (f64, f64) {
    let x = canvas.padding + unit(rng) * canvas.x_span(item_width).max(0.0);
    let y = canvas.padding + unit(rng) * canvas.y_span(item_height).max(0.0);
    (x, y)
}

fn sample_pose<R: Rng>(rng: &mut R) -> (f64, f64) {
    let rotation = unit(rng) * FULL_TURN_DEGREES;
    let scale = MIN_SCALE + unit(rng) * (MAX_SCALE - MIN_SCALE);
    (rotation, scale)
}

/// Uniform sample in `[0, 1)`
#[inline]
fn unit<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}
