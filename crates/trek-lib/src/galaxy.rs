//! Galaxy - Shared virtual canvas holding many constellations
//!
//! Boxes are placed one at a time, each against every box accepted before it, and the
//! collection only ever grows. Projection of the runs into their boxes is independent per run
//! and runs in parallel.

use crate::{
    DrawablePoint, Placement, PlacementBox, ProjectionConfig, Run, VirtualCanvas, place_next,
    project_with,
};
use rand::Rng;
use rayon::prelude::*;

/// Default footprint of one constellation in the galaxy, in pixels
pub const DEFAULT_ITEM_SIZE: f64 = 130.0;

/// An append-only layout of constellations in a virtual canvas
#[derive(Debug, Clone)]
pub struct Galaxy {
    canvas: VirtualCanvas,
    item_width: f64,
    item_height: f64,
    /// Runs shown in the galaxy, in the order they were added
    runs: Vec<Run>,
    /// Index into `placements` of the slot each run occupies
    run_slots: Vec<usize>,
    /// Every placement made so far, in order
    placements: Vec<Placement>,
    /// Boxes mirrored from `placements`, the slice handed to the placer
    boxes: Vec<PlacementBox>,
}

impl Default for Galaxy {
    fn default() -> Self {
        Self::new(VirtualCanvas::default(), DEFAULT_ITEM_SIZE, DEFAULT_ITEM_SIZE)
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Galaxy {
    /// Create an empty galaxy
    pub fn new(canvas: VirtualCanvas, item_width: f64, item_height: f64) -> Self {
        Self {
            canvas,
            item_width,
            item_height,
            runs: Vec::new(),
            run_slots: Vec::new(),
            placements: Vec::new(),
            boxes: Vec::new(),
        }
    }

    /// Create a galaxy with one placed item per run, in order
    pub fn with_runs<R: Rng>(runs: Vec<Run>, rng: &mut R) -> Self {
        let mut galaxy = Self::default();
        for run in runs {
            galaxy.add_run(run, rng);
        }
        galaxy
    }

    /// Place the next item and append it
    pub fn place_next<R: Rng>(&mut self, rng: &mut R) -> &Placement {
        let placement = place_next(
            &self.boxes,
            &self.canvas,
            self.item_width,
            self.item_height,
            rng,
        );
        self.boxes.push(placement.placed);
        self.placements.push(placement);
        &self.placements[self.placements.len() - 1]
    }

    /// Add a run and give it the next slot
    pub fn add_run<R: Rng>(&mut self, run: Run, rng: &mut R) -> &Placement {
        tracing::debug!("Placing run '{}' as item {}", run.name(), self.placements.len());
        self.runs.push(run);
        self.run_slots.push(self.placements.len());
        self.place_next(rng)
    }

    /// Project every run into its item footprint, in run order
    ///
    /// The projection happens in parallel; each entry pairs the run's placement with its
    /// drawable points in item-local pixels.
    pub fn project_all(&self, config: &ProjectionConfig) -> Vec<(Placement, Vec<DrawablePoint>)> {
        #[cfg(feature = "profiling")]
        profiling::scope!("galaxy::project_all");

        self.runs
            .par_iter()
            .zip(self.run_slots.par_iter())
            .map(|(run, &slot)| {
                let points = project_with(run.path(), self.item_width, self.item_height, config);
                (self.placements[slot], points)
            })
            .collect()
    }

    #[inline]
    pub fn canvas(&self) -> &VirtualCanvas {
        &self.canvas
    }

    /// Item footprint as `(width, height)`
    #[inline]
    pub fn item_size(&self) -> (f64, f64) {
        (self.item_width, self.item_height)
    }

    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// The run occupying placement `slot`, if any
    pub fn run_at(&self, slot: usize) -> Option<&Run> {
        self.run_slots
            .iter()
            .position(|&s| s == slot)
            .map(|i| &self.runs[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// How many placements had to use the fallback
    pub fn fallback_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_fallback()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LatLng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn create_test_run(i: usize) -> Run {
        let path = (0..50)
            .map(|j| {
                let t = j as f64 / 50.0;
                LatLng::new(
                    51.5 + i as f64 * 0.1 + (t * 20.0).sin() * 0.003,
                    -0.1 + t * 0.02,
                )
            })
            .collect();
        Run::new(format!("run {i}"), path).unwrap()
    }

    #[test]
    fn test_default_galaxy() {
        let galaxy = Galaxy::default();
        assert!(galaxy.is_empty());
        assert_eq!(galaxy.item_size(), (130.0, 130.0));
        assert_eq!(*galaxy.canvas(), VirtualCanvas::default());
    }

    #[test]
    fn test_place_next_grows_collection() {
        let mut galaxy = Galaxy::default();
        let mut rng = StdRng::seed_from_u64(1);
        for expected in 1..=5 {
            galaxy.place_next(&mut rng);
            assert_eq!(galaxy.len(), expected);
        }
        assert_eq!(galaxy.boxes.len(), galaxy.placements.len());
    }

    #[test]
    fn test_earlier_placements_never_change() {
        let mut galaxy = Galaxy::default();
        let mut rng = StdRng::seed_from_u64(2);
        let first = *galaxy.place_next(&mut rng);
        for _ in 0..10 {
            galaxy.place_next(&mut rng);
        }
        assert_eq!(galaxy.placements()[0], first);
    }

    #[test]
    fn test_dense_galaxy_reports_fallbacks() {
        let mut galaxy = Galaxy::default();
        let mut rng = StdRng::seed_from_u64(3);
        // A 1000px galaxy cannot hold 40 separated 130px items
        for _ in 0..40 {
            galaxy.place_next(&mut rng);
        }
        assert!(galaxy.fallback_count() > 0);
        assert!(galaxy.fallback_count() < galaxy.len());
    }

    #[test]
    fn test_with_runs_and_project_all() {
        let runs: Vec<Run> = (0..6).map(create_test_run).collect();
        let mut rng = StdRng::seed_from_u64(4);
        let galaxy = Galaxy::with_runs(runs.clone(), &mut rng);

        assert_eq!(galaxy.len(), 6);
        assert_eq!(galaxy.runs().len(), 6);

        let config = ProjectionConfig::constellation();
        let projected = galaxy.project_all(&config);
        assert_eq!(projected.len(), 6);

        for ((placement, points), (run, expected)) in projected
            .iter()
            .zip(runs.iter().zip(galaxy.placements()))
        {
            assert_eq!(placement, expected);
            assert_eq!(*points, project_with(run.path(), 130.0, 130.0, &config));
        }
    }

    #[test]
    fn test_runs_keep_their_slot() {
        let mut galaxy = Galaxy::default();
        let mut rng = StdRng::seed_from_u64(5);
        galaxy.place_next(&mut rng);
        galaxy.place_next(&mut rng);
        let placed = *galaxy.add_run(create_test_run(0), &mut rng);

        assert!(galaxy.run_at(0).is_none());
        assert_eq!(galaxy.run_at(2).map(Run::name), Some("run 0"));

        let projected = galaxy.project_all(&ProjectionConfig::default());
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].0, placed);
        assert_eq!(galaxy.placements()[2], placed);
    }
}
