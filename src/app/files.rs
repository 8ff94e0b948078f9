//! Loading runs from files

use super::AppError;
use crate::app::cli::InputArgs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use trek_lib::{LatLng, Run};

/// Read a run from whichever file the arguments name
pub fn load_run(input: &InputArgs) -> Result<Run, AppError> {
    match (&input.gpx, &input.json) {
        (Some(path), _) => load_gpx(path, input.name.as_deref()),
        (None, Some(path)) => {
            let points = load_json_points(path)?;
            Ok(Run::new(run_name(path, input.name.as_deref()), points)?)
        }
        (None, None) => Err(AppError::MissingInput),
    }
}

/// Read only the points, allowing an empty JSON path
pub fn load_points(input: &InputArgs) -> Result<Vec<LatLng>, AppError> {
    match (&input.gpx, &input.json) {
        (None, Some(path)) => load_json_points(path),
        _ => Ok(load_run(input)?.path().to_vec()),
    }
}

/// Read a GPX file as a run
pub fn load_gpx(path: &Path, name: Option<&str>) -> Result<Run, AppError> {
    tracing::info!("Loading GPX file {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    Ok(Run::from_gpx_reader(run_name(path, name), reader)?)
}

fn load_json_points(path: &Path) -> Result<Vec<LatLng>, AppError> {
    tracing::info!("Loading JSON path {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn run_name(path: &Path, name: Option<&str>) -> String {
    name.map(str::to_owned).unwrap_or_else(|| {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("run")
            .to_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_name() {
        assert_eq!(run_name(Path::new("/tmp/morning.gpx"), None), "morning");
        assert_eq!(run_name(Path::new("/tmp/morning.gpx"), Some("Tempo")), "Tempo");
        assert_eq!(run_name(Path::new("/"), None), "run");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let input = InputArgs {
            gpx: Some("/definitely/not/here.gpx".into()),
            json: None,
            name: None,
        };
        assert!(matches!(load_run(&input), Err(AppError::Io(_))));
    }

    #[test]
    fn test_load_json_points() {
        let path = std::env::temp_dir().join(format!("trek-input-{}.json", std::process::id()));
        std::fs::write(&path, "[[38.5,-120.2],[40.7,-120.95]]").unwrap();

        let input = InputArgs {
            gpx: None,
            json: Some(path.clone()),
            name: Some("json run".to_string()),
        };
        let points = load_points(&input).unwrap();
        assert_eq!(points, vec![LatLng::new(38.5, -120.2), LatLng::new(40.7, -120.95)]);

        let run = load_run(&input).unwrap();
        assert_eq!(run.name(), "json run");
        assert_eq!(run.path().len(), 2);

        std::fs::remove_file(&path).unwrap();
    }
}
