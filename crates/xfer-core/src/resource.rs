//! Transfer identity and metadata as reported by the resolution engine.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

static NEXT_TRANSFER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle for one in-flight transfer.
///
/// Allocated once per [`TransferResource`]; two resources describing the same
/// artifact at the same URL still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransferId(u64);

impl TransferId {
    fn next() -> Self {
        TransferId(NEXT_TRANSFER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a transfer sends (PUT) or fetches (GET) the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Upload,
    Download,
}

impl Direction {
    /// Verb used when the transfer starts ("Uploading" / "Downloading").
    pub fn present_verb(self) -> &'static str {
        match self {
            Direction::Upload => "Uploading",
            Direction::Download => "Downloading",
        }
    }

    /// Verb used when the transfer succeeded ("Uploaded" / "Downloaded").
    pub fn past_verb(self) -> &'static str {
        match self {
            Direction::Upload => "Uploaded",
            Direction::Download => "Downloaded",
        }
    }
}

/// Metadata of the remote resource being transferred.
#[derive(Debug, Clone)]
pub struct TransferResource {
    id: TransferId,
    repository_url: String,
    name: String,
    /// Declared length in bytes; negative when the server did not announce one.
    content_length: i64,
    start_time: SystemTime,
    /// Bytes already present locally when the transfer (re)started.
    resume_offset: u64,
}

impl TransferResource {
    /// New resource with unknown length, no resume offset, started now.
    pub fn new(repository_url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TransferId::next(),
            repository_url: repository_url.into(),
            name: name.into(),
            content_length: -1,
            start_time: SystemTime::now(),
            resume_offset: 0,
        }
    }

    pub fn with_content_length(mut self, content_length: i64) -> Self {
        self.content_length = content_length;
        self
    }

    pub fn with_resume_offset(mut self, resume_offset: u64) -> Self {
        self.resume_offset = resume_offset;
        self
    }

    pub fn with_start_time(mut self, start_time: SystemTime) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn id(&self) -> TransferId {
        self.id
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw declared length (-1 or any negative value = unknown).
    pub fn raw_content_length(&self) -> i64 {
        self.content_length
    }

    /// Declared length, or `None` when unknown.
    pub fn content_length(&self) -> Option<u64> {
        u64::try_from(self.content_length).ok()
    }

    pub fn start_time(&self) -> SystemTime {
        self.start_time
    }

    pub fn resume_offset(&self) -> u64 {
        self.resume_offset
    }

    /// Repository URL immediately followed by the resource name, as shown in log lines.
    pub fn location(&self) -> String {
        format!("{}{}", self.repository_url, self.name)
    }
}
