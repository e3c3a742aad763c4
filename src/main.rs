//! Exercise tracker entry point
//!
//! Parses arguments, installs logging and hands off to `cli::run`.
//! Exits non-zero on failure.

use std::process::ExitCode;

use exercise_tracker::cli::{self, Cli};
use exercise_tracker::observability::{init_logging, Event};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse_args();
    init_logging(args.log_format);

    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(
                event = Event::BootFailed.as_str(),
                code = e.code(),
                error = %e,
                "exercise tracker stopped"
            );
            ExitCode::FAILURE
        }
    }
}
