//! `xfer simulate` – run fake concurrent transfers through the console reporter.
//!
//! Each transfer is a tokio task emitting Initiated, Progressed per chunk and a
//! terminal event into one shared reporter, the way a resolver's transfer
//! threads would.

use anyhow::{ensure, Result};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use xfer_core::config::ReporterConfig;
use xfer_core::{
    ConsoleTransferReporter, Direction, TransferError, TransferListener, TransferResource,
};

const REPO_URL: &str = "https://repo.example.org/maven2/";

#[derive(Debug, Clone, Default)]
pub struct SimulateOptions {
    pub transfers: usize,
    pub size: u64,
    pub chunk: u64,
    pub interval_ms: u64,
    pub unknown_size: bool,
    pub upload: bool,
    pub fail: Vec<usize>,
    pub missing_metadata: Vec<usize>,
    pub corrupt: Vec<usize>,
}

/// How a simulated transfer ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ConnectionFailure,
    MissingMetadata,
    Corrupted,
}

impl SimulateOptions {
    /// Missing metadata wins over a connection failure, which wins over corruption.
    pub fn outcome(&self, index: usize) -> Outcome {
        if self.missing_metadata.contains(&index) {
            Outcome::MissingMetadata
        } else if self.fail.contains(&index) {
            Outcome::ConnectionFailure
        } else if self.corrupt.contains(&index) {
            Outcome::Corrupted
        } else {
            Outcome::Success
        }
    }

    pub fn transfer_size(&self, index: usize) -> u64 {
        self.size.saturating_add((index as u64).saturating_mul(self.chunk))
    }

    fn direction(&self) -> Direction {
        if self.upload {
            Direction::Upload
        } else {
            Direction::Download
        }
    }

    fn resource(&self, index: usize) -> TransferResource {
        let name = format!("org/example/artifact-{index}/1.0/artifact-{index}-1.0.jar");
        let length = if self.unknown_size {
            -1
        } else {
            i64::try_from(self.transfer_size(index)).unwrap_or(i64::MAX)
        };
        TransferResource::new(REPO_URL, name).with_content_length(length)
    }
}

pub async fn run_simulate(cfg: &ReporterConfig, opts: SimulateOptions) -> Result<()> {
    let reporter = Arc::new(ConsoleTransferReporter::from_config(cfg, io::stdout()));
    drive_transfers(&reporter, &opts).await?;
    tracing::info!(transfers = opts.transfers, "simulation finished");
    Ok(())
}

/// Spawn one task per transfer against `reporter` and wait for all of them.
pub async fn drive_transfers<W>(
    reporter: &Arc<ConsoleTransferReporter<W>>,
    opts: &SimulateOptions,
) -> Result<()>
where
    W: Write + Send + 'static,
{
    ensure!(opts.chunk > 0, "--chunk must be greater than zero");
    let interval = Duration::from_millis(opts.interval_ms);
    let direction = opts.direction();

    let handles: Vec<_> = (0..opts.transfers)
        .map(|i| {
            let reporter = Arc::clone(reporter);
            let resource = opts.resource(i);
            let size = opts.transfer_size(i);
            let outcome = opts.outcome(i);
            let chunk = opts.chunk;
            tokio::spawn(async move {
                simulate_transfer(&*reporter, resource, direction, size, chunk, interval, outcome)
                    .await
            })
        })
        .collect();

    for h in handles {
        h.await?;
    }
    Ok(())
}

async fn simulate_transfer<L>(
    listener: &L,
    resource: TransferResource,
    direction: Direction,
    size: u64,
    chunk: u64,
    interval: Duration,
    outcome: Outcome,
) where
    L: TransferListener + ?Sized,
{
    listener.on_initiated(&resource, direction);

    let stop_at = match outcome {
        Outcome::Success | Outcome::Corrupted => size,
        Outcome::ConnectionFailure => size / 2,
        Outcome::MissingMetadata => 0,
    };
    let mut transferred = 0u64;
    while transferred < stop_at {
        tokio::time::sleep(interval).await;
        transferred = transferred.saturating_add(chunk).min(stop_at);
        listener.on_progressed(&resource, transferred);
    }

    match outcome {
        Outcome::Success => listener.on_succeeded(&resource, direction, transferred),
        Outcome::ConnectionFailure => {
            let cause = TransferError::Connection {
                url: resource.repository_url().to_string(),
                source: io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer"),
            };
            listener.on_failed(&resource, direction, &cause);
        }
        Outcome::MissingMetadata => {
            let cause = TransferError::MetadataNotFound {
                resource: resource.name().to_string(),
            };
            listener.on_failed(&resource, direction, &cause);
        }
        Outcome::Corrupted => {
            let cause = TransferError::ChecksumMismatch {
                expected: "0f343b0931126a20f133d67c2b018a3b".into(),
                actual: "d41d8cd98f00b204e9800998ecf8427e".into(),
            };
            listener.on_corrupted(&resource, direction, &cause);
            let cause = TransferError::Other(format!(
                "checksum validation failed for {}",
                resource.name()
            ));
            listener.on_failed(&resource, direction, &cause);
        }
    }
}
