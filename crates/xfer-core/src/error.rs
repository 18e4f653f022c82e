//! Causes reported alongside failed or corrupted transfers.

use std::error::Error as _;
use std::io;

/// Why a transfer failed or was flagged as corrupted.
///
/// The reporter never raises these itself; the resolution engine hands them in
/// with `Failed` / `Corrupted` events.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Repository metadata (e.g. `maven-metadata.xml`) is absent. Expected while
    /// probing repositories and never shown to the user.
    #[error("could not find metadata {resource}")]
    MetadataNotFound { resource: String },
    #[error("could not find artifact {resource}")]
    NotFound { resource: String },
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
    #[error("could not transfer from {url}")]
    Connection {
        url: String,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Other(String),
}

impl TransferError {
    /// The one cause the console reporter suppresses.
    pub fn is_metadata_not_found(&self) -> bool {
        matches!(self, TransferError::MetadataNotFound { .. })
    }

    /// Descriptions of the underlying causes, outermost first (excluding `self`).
    pub fn causes(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut cur = self.source();
        while let Some(e) = cur {
            out.push(e.to_string());
            cur = e.source();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_metadata_not_found_is_suppressible() {
        let md = TransferError::MetadataNotFound {
            resource: "org/x/maven-metadata.xml".into(),
        };
        assert!(md.is_metadata_not_found());
        let nf = TransferError::NotFound {
            resource: "org/x/x-1.0.jar".into(),
        };
        assert!(!nf.is_metadata_not_found());
        assert!(!TransferError::Other("boom".into()).is_metadata_not_found());
    }

    #[test]
    fn connection_exposes_source_chain() {
        let e = TransferError::Connection {
            url: "https://repo.example/".into(),
            source: io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"),
        };
        assert_eq!(e.to_string(), "could not transfer from https://repo.example/");
        assert_eq!(e.causes(), vec!["connection reset".to_string()]);
    }

    #[test]
    fn leaf_errors_have_no_causes() {
        let e = TransferError::ChecksumMismatch {
            expected: "ab".into(),
            actual: "cd".into(),
        };
        assert!(e.causes().is_empty());
        assert_eq!(e.to_string(), "checksum mismatch: expected ab, got cd");
    }
}
