/*
 * Rough capacity estimate for a rule set: the total number of characters across
 * all rule files, plus a BPE token estimate from a `TokenCounterOperations`
 * implementation. Purely informational, it never fails a run.
 */
use std::path::PathBuf;

use super::file_system::Result;
use super::models::FileRecord;
use super::tokenizer_utils::TokenCounterOperations;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenEstimate {
    pub files: usize,
    pub total_chars: usize,
    pub total_tokens: usize,
    pub counter_name: &'static str,
}

pub fn estimate_tokens(
    files: &[PathBuf],
    counter: &dyn TokenCounterOperations,
) -> Result<TokenEstimate> {
    let mut estimate = TokenEstimate {
        counter_name: counter.name(),
        ..TokenEstimate::default()
    };
    for path in files {
        let record = FileRecord::read(path)?;
        let text = record.text();
        let chars = text.chars().count();
        let tokens = counter.count_tokens(&text);
        log::trace!("TokenEstimator: {path:?} has {chars} chars, ~{tokens} tokens");
        estimate.files += 1;
        estimate.total_chars += chars;
        estimate.total_tokens += tokens;
    }
    log::info!(
        "TokenEstimator: {} files, {} chars, ~{} tokens ({})",
        estimate.files,
        estimate.total_chars,
        estimate.total_tokens,
        estimate.counter_name
    );
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer_utils::SimpleWhitespaceTokenCounter;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_estimate_sums_chars_and_tokens() -> Result<()> {
        let dir = tempdir()?;
        let a = dir.path().join("a.mdc");
        let b = dir.path().join("b.mdc");
        fs::write(&a, "use ref for primitives\n")?;
        fs::write(&b, "prefer é\n")?;

        let estimate = estimate_tokens(&[a, b], &SimpleWhitespaceTokenCounter::new())?;

        assert_eq!(estimate.files, 2);
        // 'é' is one character even though it takes two bytes.
        assert_eq!(estimate.total_chars, 23 + 9);
        assert_eq!(estimate.total_tokens, 4 + 2);
        assert_eq!(estimate.counter_name, "whitespace");
        Ok(())
    }

    #[test]
    fn test_estimate_of_no_files_is_zero() -> Result<()> {
        let estimate = estimate_tokens(&[], &SimpleWhitespaceTokenCounter::new())?;
        assert_eq!(estimate.files, 0);
        assert_eq!(estimate.total_chars, 0);
        assert_eq!(estimate.total_tokens, 0);
        Ok(())
    }
}
