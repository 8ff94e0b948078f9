//! Trek Library - Core Algorithms for GPS Run Constellations
//!
//! This library turns a raw GPS track into a compact, drawable "constellation" and lays many
//! of them out in a shared virtual galaxy. Everything here is pure and synchronous; rendering,
//! uploads and navigation belong to the callers.
//!
//! # Architecture
//!
//! - **[`simplify()`]**: Perpendicular-distance line simplification (endpoints always kept)
//! - **[`encode_polyline`] / [`decode_polyline`]**: Reversible compact text codec for share links
//! - **[`project()`]**: Geographic path to pixel canvas, aspect-correct with the y axis flipped
//! - **[`place_next`]**: Randomised non-overlapping placement with a greedy fallback
//! - **[`Run`]** and **[`Galaxy`]**: Higher-level containers tying the pieces together
//!
//! # Data flow
//!
//! ```text
//! raw track -> simplify -> project -> drawable points
//! raw track -> encode_polyline -> share string -> decode_polyline -> raw track
//! galaxy boxes so far -> place_next -> next box
//! ```

mod galaxy;
mod path;
mod placement;
mod polyline;
mod project;
mod run;
mod simplify;
pub mod utils;

// Public API exports
pub use galaxy::{DEFAULT_ITEM_SIZE, Galaxy};
pub use path::{LatLng, Path};
pub use placement::{
    FALLBACK_SAMPLES, MAX_ATTEMPTS, Placement, PlacementBox, PlacementOutcome, VirtualCanvas,
    min_center_distance, place_next,
};
pub use polyline::{DecodeError, EncodedPolyline, decode_polyline, encode_polyline};
pub use project::{
    CONSTELLATION_TOLERANCE, DEFAULT_MARGIN_DEGREES, DrawablePoint, ProjectionConfig, project,
    project_with, star_indices, svg_points,
};
pub use run::{Run, SharedRun};
pub use simplify::{simplify, simplify_indices};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum TrekError {
    #[error("GPX parsing error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),

    #[error("Polyline decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty route")]
    EmptyRoute,
}

pub type Result<T> = std::result::Result<T, TrekError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn(&[LatLng], f64) -> Path = simplify;
        let _: fn(&[LatLng]) -> EncodedPolyline = encode_polyline;
        let _: fn(&str) -> std::result::Result<Path, DecodeError> = decode_polyline;
        let _: fn() -> VirtualCanvas = VirtualCanvas::default;
    }

    #[test]
    fn test_decode_error_converts() {
        let err: TrekError = decode_polyline("_").unwrap_err().into();
        assert!(matches!(err, TrekError::Decode(DecodeError::Truncated { .. })));
    }
}
