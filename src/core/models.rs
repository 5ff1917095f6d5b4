/*
 * Data structures shared by the rule checkers. A `FileRecord` lives only for the
 * duration of a single file check; a `ScanResult` accumulates counters and
 * diagnostics over one pass and is handed to the report layer at the end.
 */
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::file_system::{FileSystemError, Result};

// Whether a diagnostic only informs or also fails the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Encoding,
    Size,
    SizeWarning,
    Lines,
}

impl DiagnosticKind {
    /// The bracketed category printed in front of every diagnostic line.
    pub fn tag(&self) -> &'static str {
        match self {
            DiagnosticKind::Encoding => "encoding",
            DiagnosticKind::Size => "size",
            DiagnosticKind::SizeWarning => "warn",
            DiagnosticKind::Lines => "lines",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::Size | DiagnosticKind::Lines => Severity::Error,
            DiagnosticKind::Encoding | DiagnosticKind::SizeWarning => Severity::Warning,
        }
    }
}

// A single finding against one rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: PathBuf,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: &Path, detail: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            path: path.to_path_buf(),
            detail: detail.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}",
            self.kind.tag(),
            self.path.display(),
            self.detail
        )
    }
}

/*
 * The raw content of one rule file, read in a single call. Text-based checks
 * decode it lossily, so invalid UTF-8 sequences become U+FFFD instead of
 * aborting the scan.
 */
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl FileRecord {
    pub fn new(path: PathBuf, bytes: Vec<u8>) -> Self {
        FileRecord { path, bytes }
    }

    pub fn read(path: &Path) -> Result<Self> {
        log::trace!("FileRecord: Reading {path:?}");
        let bytes = fs::read(path).map_err(|source| FileSystemError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(FileRecord::new(path.to_path_buf(), bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/*
 * Accumulator for one checker invocation. Counters are updated in file-list
 * order; recording any error-severity diagnostic latches the failure flag.
 */
#[derive(Debug, Default, Clone)]
pub struct ScanResult {
    pub files_scanned: usize,
    pub total_bytes: u64,
    pub diagnostics: Vec<Diagnostic>,
    failed: bool,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity() == Severity::Error {
            self.failed = true;
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn is_failure(&self) -> bool {
        self.failed
    }

    pub fn error_count(&self) -> usize {
        self.count_by_severity(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_by_severity(Severity::Warning)
    }

    fn count_by_severity(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_diagnostic_display_uses_bracketed_tag() {
        let d = Diagnostic::new(
            DiagnosticKind::Size,
            Path::new("rules/a.mdc"),
            "is 9000 bytes (> 8192)",
        );
        assert_eq!(d.to_string(), "[size] rules/a.mdc is 9000 bytes (> 8192)");
    }

    #[test]
    fn test_scan_result_warning_does_not_fail() {
        let mut result = ScanResult::new();
        result.record(Diagnostic::new(
            DiagnosticKind::Encoding,
            Path::new("a.mdc"),
            "contains non-ASCII characters",
        ));
        assert!(!result.is_failure());
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_scan_result_error_latches_failure() {
        let mut result = ScanResult::new();
        result.record(Diagnostic::new(
            DiagnosticKind::Lines,
            Path::new("a.mdc"),
            "has 1001 lines (>1000)",
        ));
        result.record(Diagnostic::new(
            DiagnosticKind::SizeWarning,
            Path::new("b.mdc"),
            "is 5000 bytes (> 4096)",
        ));
        assert!(result.is_failure());
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_file_record_read_and_lossy_text() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.mdc");
        fs::write(&path, [b'a', 0xff, b'b'])?;

        let record = FileRecord::read(&path)?;
        assert_eq!(record.size(), 3);
        assert_eq!(record.text(), "a\u{fffd}b");
        Ok(())
    }

    #[test]
    fn test_file_record_read_missing_file_is_error() {
        let result = FileRecord::read(Path::new("definitely_missing_rule_file.mdc"));
        assert!(matches!(result, Err(FileSystemError::Read { .. })));
    }
}
