//! docref CLI
//!
//! Checks that inline code in documentation still exists in the source tree.
//! Inputs also arrive as `INPUT_*` environment variables when run as a CI action.

use clap::Parser;
use docref::logging::{self, LogFormat};
use docref::{CheckArgs, Outcome, run_check};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "docref")]
#[command(author = "RoyalBit Inc.")]
#[command(version)]
#[command(about = "Verify inline code references in documentation")]
#[command(long_about = "Flags inline code spans in markdown that no longer appear anywhere in the source tree.\n\nSource files: <code-path>/**/*.{js,ts,py,java,go,rb}")]
struct Cli {
    /// Log line format on stderr
    #[arg(long, value_enum, env = "DOCREF_LOG_FORMAT", default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(flatten)]
    check: CheckArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    let outcome = match run_check(cli.check).await {
        Ok(outcome) => outcome,
        Err(e) => Outcome::Failed(e.to_string()),
    };

    match outcome {
        Outcome::Passed => ExitCode::SUCCESS,
        Outcome::Failed(message) => {
            tracing::error!("{}", message);
            ExitCode::FAILURE
        }
    }
}
