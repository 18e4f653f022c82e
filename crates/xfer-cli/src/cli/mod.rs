//! CLI for the xfer console transfer reporter.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use xfer_core::config;

use commands::{run_config, run_simulate, SimulateOptions};

/// Top-level CLI for xfer.
#[derive(Debug, Parser)]
#[command(name = "xfer")]
#[command(about = "xfer: console progress for concurrent artifact transfers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Drive simulated concurrent transfers through the console reporter.
    Simulate {
        /// Number of concurrent transfers.
        #[arg(long, default_value = "3", value_name = "N")]
        transfers: usize,
        /// Size of the first transfer in bytes; each further one is one chunk larger.
        #[arg(long, default_value = "262144", value_name = "BYTES")]
        size: u64,
        /// Bytes added per progress event.
        #[arg(long, default_value = "8192", value_name = "BYTES")]
        chunk: u64,
        /// Delay between progress events of one transfer.
        #[arg(long, default_value = "20", value_name = "MS")]
        interval_ms: u64,
        /// Do not announce content lengths (shows plain byte counts).
        #[arg(long)]
        unknown_size: bool,
        /// Simulate uploads instead of downloads.
        #[arg(long)]
        upload: bool,
        /// Verbose output (overrides the config file).
        #[arg(short, long)]
        verbose: bool,
        /// Transfer index (0-based) that fails with a connection error. Repeatable.
        #[arg(long, value_name = "I")]
        fail: Vec<usize>,
        /// Transfer index that fails with missing repository metadata. Repeatable.
        #[arg(long, value_name = "I")]
        missing_metadata: Vec<usize>,
        /// Transfer index whose checksum does not match. Repeatable.
        #[arg(long, value_name = "I")]
        corrupt: Vec<usize>,
    },

    /// Show the config file path and effective configuration.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Simulate {
                transfers,
                size,
                chunk,
                interval_ms,
                unknown_size,
                upload,
                verbose,
                fail,
                missing_metadata,
                corrupt,
            } => {
                let opts = SimulateOptions {
                    transfers,
                    size,
                    chunk,
                    interval_ms,
                    unknown_size,
                    upload,
                    fail,
                    missing_metadata,
                    corrupt,
                };
                let mut cfg = cfg;
                cfg.verbose |= verbose;
                run_simulate(&cfg, opts).await?;
            }
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
