/*
 * Byte-size and encoding checks for rule files. Every file is read as raw bytes,
 * classified against the allowed byte set and compared with a warning and an
 * error threshold. Only the error threshold affects the outcome of a run;
 * oversize-but-tolerated files and non-ASCII content are reported as warnings.
 */
use std::path::PathBuf;

use super::file_system::Result;
use super::models::{Diagnostic, DiagnosticKind, FileRecord, ScanResult};

pub const DEFAULT_WARN_BYTES: u64 = 4096;
pub const DEFAULT_ERROR_BYTES: u64 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    pub warn_bytes: u64,
    pub error_bytes: u64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        SizeLimits {
            warn_bytes: DEFAULT_WARN_BYTES,
            error_bytes: DEFAULT_ERROR_BYTES,
        }
    }
}

// Tab, LF, CR and printable ASCII.
pub fn is_allowed_byte(b: u8) -> bool {
    matches!(b, 9 | 10 | 13 | 32..=126)
}

pub fn first_disallowed_byte(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| !is_allowed_byte(b))
}

/*
 * Applies the encoding and size checks to one record and folds the outcome
 * into `result`. A file yields at most one encoding warning no matter how many
 * offending bytes it holds. Both size comparisons are strict, so a file of
 * exactly `error_bytes` bytes only earns the warning.
 */
pub fn evaluate_record(record: &FileRecord, limits: &SizeLimits, result: &mut ScanResult) {
    let size = record.size();
    result.files_scanned += 1;
    result.total_bytes += size;

    if let Some(offset) = first_disallowed_byte(&record.bytes) {
        log::debug!(
            "SizeChecker: {:?} has byte 0x{:02x} at offset {offset}",
            record.path,
            record.bytes[offset]
        );
        result.record(Diagnostic::new(
            DiagnosticKind::Encoding,
            &record.path,
            format!("contains non-ASCII characters (first at byte {offset})"),
        ));
    }

    if size > limits.error_bytes {
        result.record(Diagnostic::new(
            DiagnosticKind::Size,
            &record.path,
            format!("is {size} bytes (> {})", limits.error_bytes),
        ));
    } else if size > limits.warn_bytes {
        result.record(Diagnostic::new(
            DiagnosticKind::SizeWarning,
            &record.path,
            format!("is {size} bytes (> {})", limits.warn_bytes),
        ));
    }
}

pub fn check_sizes(files: &[PathBuf], limits: &SizeLimits) -> Result<ScanResult> {
    let mut result = ScanResult::new();
    for path in files {
        let record = FileRecord::read(path)?;
        evaluate_record(&record, limits, &mut result);
    }
    log::info!(
        "SizeChecker: Scanned {} files, {} bytes total, {} errors, {} warnings",
        result.files_scanned,
        result.total_bytes,
        result.error_count(),
        result.warning_count()
    );
    Ok(result)
}
