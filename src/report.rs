/*
 * Renders checker results as line-oriented text. Warnings and errors go to the
 * diagnostic stream (stderr in the binaries), summaries to the output stream
 * (stdout). Writers are generic so the exact text can be asserted in tests.
 */
use std::io::{self, Write};

use crate::core::{ScanResult, TokenEstimate};

pub const RULE_OF_THUMB: &str = "Rule of thumb: keep rulesets compact; prefer agent-select rules.";

fn write_diagnostics(result: &ScanResult, diag: &mut impl Write) -> io::Result<()> {
    for diagnostic in &result.diagnostics {
        writeln!(diag, "{diagnostic}")?;
    }
    Ok(())
}

// The summary is printed even when the run fails.
pub fn write_size_report(
    result: &ScanResult,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> io::Result<()> {
    write_diagnostics(result, diag)?;
    writeln!(
        out,
        "[ok] {} rule files scanned. Total: {} bytes",
        result.files_scanned, result.total_bytes
    )
}

pub fn write_line_report(
    result: &ScanResult,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> io::Result<()> {
    write_diagnostics(result, diag)?;
    if result.is_failure() {
        writeln!(
            out,
            "[fail] {} rule files checked, {} over the line limit.",
            result.files_scanned,
            result.error_count()
        )
    } else {
        writeln!(out, "[ok] {} rule files checked.", result.files_scanned)
    }
}

pub fn write_token_report(estimate: &TokenEstimate, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Approx total chars across rules: {}", estimate.total_chars)?;
    writeln!(
        out,
        "Approx total tokens ({}): {}",
        estimate.counter_name, estimate.total_tokens
    )?;
    writeln!(out, "{RULE_OF_THUMB}")
}
