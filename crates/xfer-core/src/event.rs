//! Transfer lifecycle events and the listener interface that consumes them.

use crate::error::TransferError;
use crate::resource::{Direction, TransferResource};

/// One lifecycle step of a transfer.
///
/// Per resource the engine emits `Initiated`, then any number of `Progressed`,
/// then exactly one of `Succeeded` / `Failed`. `Corrupted` may precede the
/// terminal event when a checksum check fails.
#[derive(Debug)]
pub enum TransferEvent {
    Initiated {
        resource: TransferResource,
        direction: Direction,
    },
    Progressed {
        resource: TransferResource,
        /// Total bytes transferred so far (not a delta).
        transferred: u64,
    },
    Succeeded {
        resource: TransferResource,
        direction: Direction,
        transferred: u64,
    },
    Failed {
        resource: TransferResource,
        direction: Direction,
        cause: TransferError,
    },
    Corrupted {
        resource: TransferResource,
        direction: Direction,
        cause: TransferError,
    },
}

impl TransferEvent {
    pub fn resource(&self) -> &TransferResource {
        match self {
            TransferEvent::Initiated { resource, .. }
            | TransferEvent::Progressed { resource, .. }
            | TransferEvent::Succeeded { resource, .. }
            | TransferEvent::Failed { resource, .. }
            | TransferEvent::Corrupted { resource, .. } => resource,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransferEvent::Succeeded { .. } | TransferEvent::Failed { .. }
        )
    }
}

/// Receives transfer events, possibly from many threads at once.
///
/// Every method defaults to a no-op so implementors only override what they
/// care about.
pub trait TransferListener: Send + Sync {
    fn on_initiated(&self, _resource: &TransferResource, _direction: Direction) {}

    fn on_progressed(&self, _resource: &TransferResource, _transferred: u64) {}

    fn on_succeeded(&self, _resource: &TransferResource, _direction: Direction, _transferred: u64) {
    }

    fn on_failed(
        &self,
        _resource: &TransferResource,
        _direction: Direction,
        _cause: &TransferError,
    ) {
    }

    fn on_corrupted(
        &self,
        _resource: &TransferResource,
        _direction: Direction,
        _cause: &TransferError,
    ) {
    }

    /// Dispatch an event to the matching handler.
    fn on_event(&self, event: &TransferEvent) {
        match event {
            TransferEvent::Initiated {
                resource,
                direction,
            } => self.on_initiated(resource, *direction),
            TransferEvent::Progressed {
                resource,
                transferred,
            } => self.on_progressed(resource, *transferred),
            TransferEvent::Succeeded {
                resource,
                direction,
                transferred,
            } => self.on_succeeded(resource, *direction, *transferred),
            TransferEvent::Failed {
                resource,
                direction,
                cause,
            } => self.on_failed(resource, *direction, cause),
            TransferEvent::Corrupted {
                resource,
                direction,
                cause,
            } => self.on_corrupted(resource, *direction, cause),
        }
    }
}
