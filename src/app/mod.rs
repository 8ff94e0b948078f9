//! Command implementations
//!
//! Every command prints one JSON document on stdout.

pub(crate) mod cli;
mod files;

use crate::entrypoints::cli::get_env;
use cli::{CanvasArgs, Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use std::path::PathBuf;
use trek_lib::{
    Galaxy, ProjectionConfig, TrekError, VirtualCanvas, decode_polyline, encode_polyline,
    project_with, simplify, star_indices, svg_points,
};

/// Environment variable read when `--seed` is not given
const SEED_ENV: &str = "TREK_SEED";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Trek(#[from] TrekError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No input file given")]
    MissingInput,
}

impl From<trek_lib::DecodeError> for AppError {
    fn from(err: trek_lib::DecodeError) -> Self {
        Self::Trek(err.into())
    }
}

/// Run the selected command and print its result
pub fn run(cli: Cli) -> Result<(), AppError> {
    let output = execute(cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn execute(command: Command) -> Result<Value, AppError> {
    match command {
        Command::Simplify { input, tolerance } => {
            let points = files::load_points(&input)?;
            let simplified = simplify(&points, tolerance);
            tracing::info!(
                "Simplified {} points to {} (tolerance {})",
                points.len(),
                simplified.len(),
                tolerance
            );
            Ok(serde_json::to_value(simplified)?)
        }
        Command::Encode { input } => {
            let points = files::load_points(&input)?;
            Ok(Value::String(encode_polyline(&points)))
        }
        Command::Decode { encoded } => {
            let points = decode_polyline(&encoded)?;
            Ok(serde_json::to_value(points)?)
        }
        Command::Project {
            input,
            width,
            height,
            tolerance,
            margin,
        } => {
            let points = files::load_points(&input)?;
            let config = ProjectionConfig {
                margin_degrees: margin,
                tolerance,
            };
            let projected = project_with(&points, width, height, &config);
            Ok(json!({
                "width": width,
                "height": height,
                "points": projected.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
                "svg_points": svg_points(&projected),
                "stars": star_indices(projected.len()),
            }))
        }
        Command::Share { input } => {
            let run = files::load_run(&input)?;
            tracing::info!(
                "'{}': {:.2} miles, {:.6}% of the way to the moon",
                run.name(),
                run.distance_miles(),
                run.moon_percent()
            );
            Ok(serde_json::to_value(run.to_shared())?)
        }
        Command::Galaxy {
            gpx_files,
            count,
            seed,
            canvas,
        } => galaxy(gpx_files, count, seed, canvas),
    }
}

fn galaxy(
    gpx_files: Vec<PathBuf>,
    count: Option<usize>,
    seed: Option<u64>,
    canvas: CanvasArgs,
) -> Result<Value, AppError> {
    let seed = seed
        .or_else(|| get_env(SEED_ENV))
        .unwrap_or_else(rand::random);
    tracing::info!("Placement seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut galaxy = Galaxy::new(
        VirtualCanvas {
            width: canvas.galaxy_width,
            height: canvas.galaxy_height,
            padding: canvas.padding,
        },
        canvas.item_width,
        canvas.item_height,
    );

    for path in &gpx_files {
        let run = files::load_gpx(path, None)?;
        galaxy.add_run(run, &mut rng);
    }
    let target = count.unwrap_or(gpx_files.len());
    while galaxy.len() < target {
        galaxy.place_next(&mut rng);
    }

    if galaxy.fallback_count() > 0 {
        tracing::warn!(
            "{} of {} placements used the fallback and may overlap",
            galaxy.fallback_count(),
            galaxy.len()
        );
    }

    let names: Vec<Option<&str>> = (0..galaxy.len())
        .map(|slot| galaxy.run_at(slot).map(|run| run.name()))
        .collect();
    let constellations: Vec<String> = galaxy
        .project_all(&ProjectionConfig::constellation())
        .iter()
        .map(|(_, points)| svg_points(points))
        .collect();
    Ok(json!({
        "seed": seed,
        "canvas": galaxy.canvas(),
        "names": names,
        "placements": galaxy.placements(),
        "constellations": constellations,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_args() -> CanvasArgs {
        CanvasArgs {
            galaxy_width: 1000.0,
            galaxy_height: 1000.0,
            padding: 50.0,
            item_width: 130.0,
            item_height: 130.0,
        }
    }

    #[test]
    fn test_decode_command() {
        let value = execute(Command::Decode {
            encoded: "_p~iF~ps|U".to_string(),
        })
        .unwrap();
        assert_eq!(value, json!([[38.5, -120.2]]));
    }

    #[test]
    fn test_decode_command_rejects_corrupt_input() {
        let result = execute(Command::Decode {
            encoded: "_p~iF~ps|".to_string(),
        });
        assert!(matches!(result, Err(AppError::Trek(TrekError::Decode(_)))));
    }

    #[test]
    fn test_galaxy_is_reproducible_with_seed() {
        let a = galaxy(vec![], Some(5), Some(11), canvas_args()).unwrap();
        let b = galaxy(vec![], Some(5), Some(11), canvas_args()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a["placements"].as_array().unwrap().len(), 5);
        assert_eq!(a["seed"], json!(11));
        assert_eq!(a["names"], json!([null, null, null, null, null]));
        assert_eq!(a["constellations"], json!([]));
    }
}
