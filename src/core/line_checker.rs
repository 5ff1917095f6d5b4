use std::path::PathBuf;

use super::file_system::Result;
use super::models::{Diagnostic, DiagnosticKind, FileRecord, ScanResult};

pub const DEFAULT_MAX_LINES: usize = 1000;

/*
 * Counts the lines of a decoded rule file as the number of pieces left after
 * splitting on line terminators. `\n` and `\r\n` are equivalent; a lone `\r`
 * is ordinary content. A trailing terminator opens one more (empty) line, so
 * empty text counts as one line.
 */
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

pub fn evaluate_record(record: &FileRecord, max_lines: usize, result: &mut ScanResult) {
    let text = record.text();
    let lines = count_lines(&text);
    result.files_scanned += 1;
    result.total_bytes += record.size();
    log::trace!("LineChecker: {:?} has {lines} lines", record.path);

    if lines > max_lines {
        result.record(Diagnostic::new(
            DiagnosticKind::Lines,
            &record.path,
            format!("has {lines} lines (>{max_lines})"),
        ));
    }
}

pub fn check_line_counts(files: &[PathBuf], max_lines: usize) -> Result<ScanResult> {
    let mut result = ScanResult::new();
    for path in files {
        let record = FileRecord::read(path)?;
        evaluate_record(&record, max_lines, &mut result);
    }
    log::info!(
        "LineChecker: Checked {} files against a limit of {max_lines} lines, {} over",
        result.files_scanned,
        result.error_count()
    );
    Ok(result)
}
