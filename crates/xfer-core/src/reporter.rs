//! Console reporter: one overwritten summary line for all active transfers,
//! plus permanent lines for starts, outcomes, failures and corruption.

use std::io::Write;
use std::time::SystemTime;

use crate::config::{ReporterConfig, DEFAULT_VERBOSE_HINT};
use crate::error::TransferError;
use crate::event::TransferListener;
use crate::format::{format_size, format_throughput, throughput_kb_per_sec};
use crate::registry::ProgressRegistry;
use crate::render::LineRenderer;
use crate::resource::{Direction, TransferResource};

/// Source of "now" for throughput computation.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Transfer listener that draws progress to a character sink (usually stdout).
///
/// One instance per resolution session; share it across transfer threads with `Arc`.
pub struct ConsoleTransferReporter<W> {
    verbose: bool,
    verbose_hint: String,
    registry: ProgressRegistry,
    renderer: LineRenderer<W>,
    clock: Box<dyn Clock>,
}

impl<W: Write + Send> ConsoleTransferReporter<W> {
    pub fn new(verbose: bool, sink: W) -> Self {
        Self {
            verbose,
            verbose_hint: DEFAULT_VERBOSE_HINT.to_string(),
            registry: ProgressRegistry::new(),
            renderer: LineRenderer::new(sink),
            clock: Box::new(SystemClock),
        }
    }

    pub fn from_config(cfg: &ReporterConfig, sink: W) -> Self {
        Self {
            verbose_hint: cfg.verbose_hint.clone(),
            ..Self::new(cfg.verbose, sink)
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn registry(&self) -> &ProgressRegistry {
        &self.registry
    }

    pub fn into_inner(self) -> W {
        self.renderer.into_inner()
    }

    /// Drop the transfer from the registry and blank the summary line.
    ///
    /// The line is not rebuilt: other transfers redraw it on their next progress event.
    fn transfer_completed(&self, resource: &TransferResource) {
        if !self.registry.remove(resource.id()) {
            tracing::trace!(id = %resource.id(), "completed transfer had no progress entry");
        }
        self.renderer.erase();
    }

    fn outcome_line(
        &self,
        resource: &TransferResource,
        direction: Direction,
        transferred: u64,
    ) -> String {
        let mut throughput = String::new();
        let elapsed = self.clock.now().duration_since(resource.start_time());
        // Err: clock went backwards; treated like a zero duration.
        if let Some(rate) = elapsed
            .ok()
            .and_then(|d| throughput_kb_per_sec(transferred, resource.resume_offset(), d))
        {
            throughput = format!(" at {} KB/sec", format_throughput(rate));
        }
        format!(
            "{}: {} ({}{})",
            direction.past_verb(),
            resource.location(),
            format_size(transferred),
            throughput
        )
    }

    /// Failure/corruption message: cause chain when verbose, otherwise one line plus the hint.
    fn cause_message(&self, prefix: &str, cause: &TransferError) -> String {
        if !self.verbose {
            return format!("{}: {}{}", prefix, cause, self.verbose_hint);
        }
        let mut msg = format!("{}: {}", prefix, cause);
        for c in cause.causes() {
            msg.push_str("\n    caused by: ");
            msg.push_str(&c);
        }
        msg
    }
}

impl<W: Write + Send> TransferListener for ConsoleTransferReporter<W> {
    fn on_initiated(&self, resource: &TransferResource, direction: Direction) {
        tracing::debug!(id = %resource.id(), ?direction, "transfer initiated");
        if self.verbose {
            let line = format!("{}: {}", direction.present_verb(), resource.location());
            self.renderer.println_over_summary(&line);
        }
    }

    fn on_progressed(&self, resource: &TransferResource, transferred: u64) {
        self.registry.record_progress(resource, transferred);
        self.renderer.render(&self.registry.snapshot());
    }

    fn on_succeeded(&self, resource: &TransferResource, direction: Direction, transferred: u64) {
        tracing::debug!(id = %resource.id(), transferred, "transfer succeeded");
        self.transfer_completed(resource);
        if self.verbose {
            let line = self.outcome_line(resource, direction, transferred);
            self.renderer.println(&line);
        }
    }

    fn on_failed(
        &self,
        resource: &TransferResource,
        _direction: Direction,
        cause: &TransferError,
    ) {
        tracing::debug!(id = %resource.id(), error = %cause, "transfer failed");
        self.transfer_completed(resource);
        if !cause.is_metadata_not_found() {
            self.renderer.println(&self.cause_message("Transfer failed", cause));
        }
    }

    fn on_corrupted(
        &self,
        resource: &TransferResource,
        _direction: Direction,
        cause: &TransferError,
    ) {
        tracing::debug!(id = %resource.id(), error = %cause, "transfer corrupted");
        // The transfer is still registered, so its summary line may be on screen.
        self.renderer.println_over_summary(&self.cause_message("Transfer corrupted", cause));
    }
}
