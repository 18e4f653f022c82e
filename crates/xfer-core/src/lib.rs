pub mod config;
pub mod logging;

pub mod error;
pub mod event;
pub mod format;
pub mod registry;
pub mod render;
pub mod reporter;
pub mod resource;

pub use error::TransferError;
pub use event::{TransferEvent, TransferListener};
pub use reporter::{Clock, ConsoleTransferReporter, SystemClock};
pub use resource::{Direction, TransferId, TransferResource};
