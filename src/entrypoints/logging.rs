/*!
Logging setup for the command line.

Logs go to stderr so stdout stays a clean JSON document. `RUST_LOG` wins when set;
otherwise a default level is chosen based on the build profile.
*/

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_DEBUG_FILTER: &str = "debug";
const DEFAULT_RELEASE_FILTER: &str = "info";

/// Initialize the global tracing subscriber.
pub fn setup_logging() {
    let default_filter = if cfg!(debug_assertions) {
        DEFAULT_DEBUG_FILTER
    } else {
        DEFAULT_RELEASE_FILTER
    };
    let from_env = std::env::var("RUST_LOG").is_ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();

    if !from_env {
        tracing::debug!("RUST_LOG not set, using default: {}", default_filter);
    }
}
