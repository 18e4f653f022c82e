//! Byte-count and throughput formatting for the console.
//!
//! Kilobyte values always round up: a single byte shows as `1 KB`, never `0 KB`.

use std::time::Duration;

/// Bytes per kilobyte (binary).
pub const KB: u64 = 1024;

/// Whole kilobytes, rounded up.
pub fn ceil_kb(bytes: u64) -> u64 {
    bytes.div_ceil(KB)
}

/// Status fragment for one transfer on the summary line (trailing space included).
///
/// `total` is the declared content length; negative means unknown.
pub fn format_status(transferred: u64, total: i64) -> String {
    match u64::try_from(total) {
        Ok(total) if total >= KB => {
            format!("{}/{} KB ", ceil_kb(transferred), ceil_kb(total))
        }
        Ok(total) => format!("{}/{} B ", transferred, total),
        Err(_) if transferred >= KB => format!("{} KB ", ceil_kb(transferred)),
        Err(_) => format!("{} B ", transferred),
    }
}

/// Size shown in the "Downloaded: ..." line.
pub fn format_size(bytes: u64) -> String {
    if bytes >= KB {
        format!("{} KB", ceil_kb(bytes))
    } else {
        format!("{} B", bytes)
    }
}

/// Average rate in KB/s over `elapsed`, counting only bytes moved in this session.
///
/// Returns `None` for a zero-length interval rather than dividing by zero.
pub fn throughput_kb_per_sec(
    transferred: u64,
    resume_offset: u64,
    elapsed: Duration,
) -> Option<f64> {
    let millis = elapsed.as_millis();
    if millis == 0 {
        return None;
    }
    let bytes = transferred.saturating_sub(resume_offset);
    Some((bytes as f64 / KB as f64) / (millis as f64 / 1000.0))
}

/// One decimal digit, `.` as separator regardless of locale.
pub fn format_throughput(kb_per_sec: f64) -> String {
    format!("{:.1}", kb_per_sec)
}
