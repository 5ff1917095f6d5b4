/*
 * Token counting strategies used by the token estimator. `TokenCounterOperations`
 * is the seam; `CoreTikTokenCounter` uses the `cl100k_base` BPE from `tiktoken-rs`
 * and `SimpleWhitespaceTokenCounter` counts whitespace separated words.
 */
use tiktoken_rs::{CoreBPE, cl100k_base};

pub trait TokenCounterOperations {
    fn count_tokens(&self, text: &str) -> usize;

    // Short label printed next to the estimate.
    fn name(&self) -> &'static str;
}

/*
 * Loads the `cl100k_base` encoder once at construction. If loading fails the
 * error is logged and every call falls back to a whitespace word count, so an
 * estimate is still produced, only less accurate.
 */
pub struct CoreTikTokenCounter {
    bpe: Option<CoreBPE>,
}

impl CoreTikTokenCounter {
    pub fn new() -> Self {
        let bpe = match cl100k_base() {
            Ok(bpe) => Some(bpe),
            Err(e) => {
                log::error!(
                    "TokenCounter: Failed to initialize TikToken BPE (cl100k_base): {e:?}. Falling back to whitespace token count."
                );
                None
            }
        };
        CoreTikTokenCounter { bpe }
    }
}

impl Default for CoreTikTokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounterOperations for CoreTikTokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        match &self.bpe {
            Some(bpe) => bpe.encode_with_special_tokens(text).len(),
            None => text.split_whitespace().count(),
        }
    }

    fn name(&self) -> &'static str {
        if self.bpe.is_some() {
            "cl100k_base"
        } else {
            "whitespace"
        }
    }
}

pub struct SimpleWhitespaceTokenCounter;

impl SimpleWhitespaceTokenCounter {
    pub fn new() -> Self {
        SimpleWhitespaceTokenCounter
    }
}

impl Default for SimpleWhitespaceTokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounterOperations for SimpleWhitespaceTokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
