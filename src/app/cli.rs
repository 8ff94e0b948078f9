use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use trek_lib::{CONSTELLATION_TOLERANCE, DEFAULT_ITEM_SIZE, DEFAULT_MARGIN_DEGREES};

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Trek - Turn GPS runs into constellations and lay them out in a shared galaxy
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Simplify a run, printing the kept points as [lat, lng] pairs
    Simplify {
        #[clap(flatten)]
        input: InputArgs,

        /// Maximum perpendicular deviation in degrees
        #[clap(short, long, default_value_t = CONSTELLATION_TOLERANCE)]
        tolerance: f64,
    },

    /// Encode a run as a compact polyline string
    Encode {
        #[clap(flatten)]
        input: InputArgs,
    },

    /// Decode a polyline string back into [lat, lng] pairs
    Decode {
        /// The encoded polyline
        encoded: String,
    },

    /// Project a run onto a fixed-size drawing surface
    Project {
        #[clap(flatten)]
        input: InputArgs,

        /// Canvas width in pixels
        #[clap(long, default_value = "250")]
        width: f64,

        /// Canvas height in pixels
        #[clap(long, default_value = "250")]
        height: f64,

        /// Simplification tolerance in degrees (0 keeps every point)
        #[clap(short, long, default_value_t = CONSTELLATION_TOLERANCE)]
        tolerance: f64,

        /// Margin around the run's bounding box in degrees
        #[clap(long, default_value_t = DEFAULT_MARGIN_DEGREES)]
        margin: f64,
    },

    /// Print the share-link document for a run
    Share {
        #[clap(flatten)]
        input: InputArgs,
    },

    /// Lay out constellations in the galaxy
    Galaxy {
        /// GPX files to place, one constellation each
        #[clap(short, long, value_name = "FILE")]
        gpx_files: Vec<PathBuf>,

        /// Number of items to place (defaults to the number of GPX files)
        #[clap(short, long)]
        count: Option<usize>,

        /// Seed for the placement RNG (falls back to TREK_SEED, then to a random seed)
        #[clap(long)]
        seed: Option<u64>,

        #[clap(flatten)]
        canvas: CanvasArgs,
    },
}

/// Where a single run comes from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// GPX file to read the run from
    #[clap(long, value_name = "FILE", conflicts_with = "json", required_unless_present = "json")]
    pub gpx: Option<PathBuf>,

    /// JSON file holding an array of [lat, lng] pairs
    #[clap(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Run name (defaults to the file stem)
    #[clap(long)]
    pub name: Option<String>,
}

/// Galaxy dimensions
#[derive(Args, Debug, Clone)]
pub struct CanvasArgs {
    /// Galaxy width in pixels
    #[clap(long, default_value = "1000")]
    pub galaxy_width: f64,

    /// Galaxy height in pixels
    #[clap(long, default_value = "1000")]
    pub galaxy_height: f64,

    /// Margin along the galaxy edges, also the extra separation between items
    #[clap(long, default_value = "50")]
    pub padding: f64,

    /// Constellation width in pixels
    #[clap(long, default_value_t = DEFAULT_ITEM_SIZE)]
    pub item_width: f64,

    /// Constellation height in pixels
    #[clap(long, default_value_t = DEFAULT_ITEM_SIZE)]
    pub item_height: f64,
}
