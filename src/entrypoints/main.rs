use super::{cli::parse_args, logging::setup_logging};
use crate::app::{self, cli::Cli};
use std::process::ExitCode;

// === Entry point for the command line ===
pub fn main() -> ExitCode {
    setup_logging();

    let cli_args = match parse_args::<Cli>() {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    tracing::debug!("Parsed arguments: {:?}", cli_args);

    match app::run(cli_args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
