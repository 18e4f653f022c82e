use xfer_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Diagnostic logs go to a file so they never mix with the progress line.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("xfer error: {:#}", err);
        std::process::exit(1);
    }
}
